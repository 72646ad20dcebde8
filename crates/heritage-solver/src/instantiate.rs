//! Placeholder substitution and re-specialization.

use crate::def::ClassStore;
use crate::params::{Binding, TypeSubstitution};
use crate::types::{ClassId, TypeExpr, TypeParam};

/// Replace every bound placeholder in `expr`.
///
/// A variadic placeholder bound to a pack is spliced into the surrounding
/// argument list: `A1[T, *Ts]` with `T = str, Ts = (int, type)` becomes
/// `A1[str, int, type]`. Unbound placeholders are left in place.
pub fn instantiate_type(expr: &TypeExpr, subst: &TypeSubstitution) -> TypeExpr {
    if subst.is_empty() || !expr.contains_placeholders() {
        return expr.clone();
    }
    match expr {
        TypeExpr::Class(_) => expr.clone(),
        TypeExpr::Param(name) | TypeExpr::Unpack(name) => match subst.get(*name) {
            Some(Binding::Type(ty)) => ty.clone(),
            _ => expr.clone(),
        },
        TypeExpr::Applied { origin, args } => {
            let mut out = Vec::with_capacity(args.len());
            for arg in args {
                match (arg, arg_pack(arg, subst)) {
                    (TypeExpr::Unpack(_), Some(pack)) => out.extend(pack.iter().cloned()),
                    _ => out.push(instantiate_type(arg, subst)),
                }
            }
            TypeExpr::Applied {
                origin: *origin,
                args: out,
            }
        }
    }
}

fn arg_pack<'s>(arg: &TypeExpr, subst: &'s TypeSubstitution) -> Option<&'s [TypeExpr]> {
    let TypeExpr::Unpack(name) = arg else {
        return None;
    };
    match subst.get(*name) {
        Some(Binding::Pack(items)) => Some(items),
        _ => None,
    }
}

/// Build the specialized form of `origin` from the current bindings.
///
/// Returns `None` when `origin` declares no type parameters or when any of
/// its parameters is still unbound; callers then fall back to the
/// expression they already have.
pub fn specialize(store: &ClassStore, origin: ClassId, subst: &TypeSubstitution) -> Option<TypeExpr> {
    let params = store.type_params(origin)?;
    if params.is_empty() {
        return None;
    }

    let mut args = Vec::with_capacity(params.len());
    for param in &params {
        match (param, subst.get(param.name())?) {
            (TypeParam::Variadic(_), Binding::Pack(items)) => args.extend(items.iter().cloned()),
            (_, Binding::Type(ty)) => args.push(ty.clone()),
            (TypeParam::Fixed(_), Binding::Pack(_)) => return None,
        }
    }
    Some(TypeExpr::Applied { origin, args })
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
