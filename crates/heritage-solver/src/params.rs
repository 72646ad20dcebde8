//! Type-parameter maps.
//!
//! A [`TypeSubstitution`] maps parameter names to the arguments bound at one
//! point of the hierarchy walk. [`type_var_map`] builds the map contributed
//! by a single type expression.
//!
//! ## Variadic partitioning
//!
//! For `class C(Generic[B, *Ts, T])` and `C[int, type, str, bytes]`:
//!
//! | Parameter | Binding |
//! |-----------|---------|
//! | `B` | `int` (leading fixed) |
//! | `*Ts` | `(type, str)` (everything in between) |
//! | `T` | `bytes` (trailing fixed) |
//!
//! Fewer arguments than fixed parameters is not an error here: parameters
//! without an argument are simply absent from the map.

use crate::def::ClassStore;
use crate::descriptor::TypeDescriptor;
use crate::types::{TypeExpr, TypeParam};
use heritage_common::interner::Atom;
use rustc_hash::FxHashMap;

/// The value bound to one type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A fixed parameter bound to a single argument.
    Type(TypeExpr),
    /// A variadic group bound to a (possibly empty) run of arguments.
    Pack(Vec<TypeExpr>),
}

/// Parameter name to binding, valid for one traversal branch.
///
/// Branches that fork must each work on their own clone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSubstitution {
    map: FxHashMap<Atom, Binding>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: Atom, binding: Binding) {
        self.map.insert(name, binding);
    }

    pub fn get(&self, name: Atom) -> Option<&Binding> {
        self.map.get(&name)
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.map.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Merge `other` into `self`; bindings in `other` win.
    pub fn extend(&mut self, other: TypeSubstitution) {
        self.map.extend(other.map);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, &Binding)> {
        self.map.iter().map(|(k, v)| (*k, v))
    }
}

/// Build the parameter map contributed by `expr`.
///
/// Returns an empty map for bare classes, placeholders, and origins without
/// declared type parameters.
pub fn type_var_map(store: &ClassStore, expr: &TypeExpr) -> TypeSubstitution {
    let Some(desc) = TypeDescriptor::of(expr) else {
        return TypeSubstitution::new();
    };
    let Some(params) = store.type_params(desc.origin) else {
        return TypeSubstitution::new();
    };
    if params.is_empty() || desc.slots().is_empty() {
        return TypeSubstitution::new();
    }

    if desc.is_concrete() && !params.iter().any(|p| p.is_variadic()) {
        let mut subst = TypeSubstitution::new();
        for (param, arg) in params.iter().zip(desc.supplied_args()) {
            subst.insert(param.name(), Binding::Type(arg.clone()));
        }
        return subst;
    }

    bind_positional(&params, desc.slots())
}

/// Bind declared parameters against argument slots.
pub fn bind_positional(params: &[TypeParam], slots: &[TypeExpr]) -> TypeSubstitution {
    let mut subst = TypeSubstitution::new();
    let variadic_at = params.iter().position(|p| p.is_variadic());
    let open_group = slots.iter().position(|s| matches!(s, TypeExpr::Unpack(_)));

    match open_group {
        None => match variadic_at {
            None => {
                for (param, slot) in params.iter().zip(slots) {
                    bind_fixed(&mut subst, *param, slot);
                }
            }
            Some(v) => {
                let leading = v;
                let trailing = params.len() - v - 1;
                let n = slots.len();
                for (param, slot) in params[..leading].iter().zip(slots) {
                    bind_fixed(&mut subst, *param, slot);
                }
                if n >= leading + trailing {
                    let tail_start = n - trailing;
                    for (param, slot) in params[v + 1..].iter().zip(&slots[tail_start..]) {
                        bind_fixed(&mut subst, *param, slot);
                    }
                    let group = &slots[leading..tail_start];
                    if !group.iter().any(TypeExpr::is_placeholder) {
                        subst.insert(params[v].name(), Binding::Pack(group.to_vec()));
                    }
                } else {
                    // Short argument list: fill trailing parameters left to right.
                    for (param, slot) in params[v + 1..].iter().zip(&slots[leading.min(n)..]) {
                        bind_fixed(&mut subst, *param, slot);
                    }
                }
            }
        },
        Some(first_open) => {
            // An unresolved `*Ts` argument has unknown length. Only the
            // arguments before it and after the last one can be anchored.
            let last_open = slots
                .iter()
                .rposition(|s| matches!(s, TypeExpr::Unpack(_)))
                .unwrap_or(first_open);
            let head = &slots[..first_open];
            let tail = &slots[last_open + 1..];
            let head_params = variadic_at.unwrap_or(params.len());
            for (param, slot) in params[..head_params].iter().zip(head) {
                bind_fixed(&mut subst, *param, slot);
            }
            let tail_params = match variadic_at {
                Some(v) => &params[v + 1..],
                None => &params[head.len().min(params.len())..],
            };
            for (param, slot) in tail_params.iter().rev().zip(tail.iter().rev()) {
                bind_fixed(&mut subst, *param, slot);
            }
        }
    }
    subst
}

fn bind_fixed(subst: &mut TypeSubstitution, param: TypeParam, slot: &TypeExpr) {
    if slot.is_placeholder() || param.is_variadic() {
        return;
    }
    subst.insert(param.name(), Binding::Type(slot.clone()));
}

#[cfg(test)]
#[path = "../tests/params_tests.rs"]
mod tests;
