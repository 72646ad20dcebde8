//! Class declarations and the class store.
//!
//! The store is the explicit replacement for runtime reflection: every class
//! the closure pipeline can see is registered here once, with its declared
//! type parameters and its declared base list, before any closure is
//! computed.
//!
//! ## Registration order
//!
//! A class may only name bases (and base arguments) that are already
//! registered. The declared-base graph is therefore acyclic by construction,
//! and the walker never needs cycle detection.
//!
//! ## Type variables
//!
//! Placeholders are never inferred from unknown names. A name becomes a
//! placeholder only when it is declared as a type variable with
//! [`ClassStore::type_var`] or [`ClassStore::type_var_tuple`] (or listed as
//! an explicit parameter of the class being described). Any other name that
//! is not a registered class is rejected by the parser.
//!
//! ## Root markers
//!
//! | Id | Name | Bases |
//! |----|------|-------|
//! | 1 | `object` | - |
//! | 2 | `type` | `object` |
//! | 3 | `Enum` | `object` |
//! | 4 | `ABC` | `object` |
//! | 5 | `ABCMeta` | `type` |
//! | 6 | `Generic` | `object` |
//! | 7 | `Exception` | `object` |

use crate::error::RegisterError;
use crate::format::TypeFormatter;
use crate::linearize::c3_linearize;
use crate::types::{ClassId, TypeExpr, TypeParam};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use heritage_common::interner::{Atom, Interner};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Declared type parameters of one class. Most classes have at most two.
pub type TypeParamList = SmallVec<[TypeParam; 2]>;

// =============================================================================
// ClassDecl - Registration Input
// =============================================================================

/// A class as written in source: name, optional explicit type parameters,
/// and the ordered declared base list.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub name: String,
    /// `None` infers the parameters from the placeholders used in `bases`.
    pub type_params: Option<Vec<TypeParam>>,
    pub bases: Vec<TypeExpr>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: None,
            bases: Vec::new(),
        }
    }

    /// Declare the type parameters explicitly.
    pub fn with_type_params(mut self, params: Vec<TypeParam>) -> Self {
        self.type_params = Some(params);
        self
    }

    /// Set the declared base list.
    pub fn with_bases(mut self, bases: impl IntoIterator<Item = TypeExpr>) -> Self {
        self.bases = bases.into_iter().collect();
        self
    }
}

// =============================================================================
// ClassInfo - Stored Class Data
// =============================================================================

/// Complete information about a registered class.
#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: Atom,
    /// Declared type parameters, in declaration order
    pub type_params: TypeParamList,
    /// Declared base list, exactly as written (placeholders included)
    pub bases: Vec<TypeExpr>,
    /// C3 linearization of the class over base origins, self first
    pub mro: Vec<ClassId>,
    /// True when the class or any ancestor carries parameterized bases or
    /// type parameters. Such classes are resolved by the ancestor walker.
    pub generic_ancestry: bool,
}

impl ClassInfo {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Number of fixed (non-variadic) parameters and whether a variadic
    /// group is present.
    pub fn arity(&self) -> (usize, bool) {
        let variadic = self.type_params.iter().any(|p| p.is_variadic());
        let fixed = self.type_params.len() - usize::from(variadic);
        (fixed, variadic)
    }

    /// Iterate over the origins of the declared bases.
    pub fn base_origins(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.bases.iter().filter_map(TypeExpr::origin)
    }
}

// =============================================================================
// ClassStore - Storage for Classes
// =============================================================================

/// Thread-safe storage for class declarations.
///
/// Uses `DashMap` so that closures can be resolved from several threads while
/// sharing one store.
///
/// ## Usage
///
/// ```
/// use heritage_solver::{ClassDecl, ClassStore, TypeExpr};
///
/// let store = ClassStore::new();
/// let a1 = store.register(ClassDecl::new("A1")).unwrap();
/// let a2 = store
///     .register(ClassDecl::new("A2").with_bases([TypeExpr::Class(a1)]))
///     .unwrap();
/// assert_eq!(store.get(a2).unwrap().mro.len(), 3);
/// ```
pub struct ClassStore {
    interner: Interner,

    /// `ClassId` -> `ClassInfo` mapping
    classes: DashMap<ClassId, Arc<ClassInfo>>,

    /// Class name -> `ClassId` mapping
    by_name: DashMap<Atom, ClassId>,

    /// Declared type variables, by name
    type_vars: DashMap<Atom, TypeParam>,

    /// Next available `ClassId`
    next_id: AtomicU32,
}

impl Default for ClassStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassStore {
    /// Create a store holding only the root marker classes.
    pub fn new() -> Self {
        let store = Self {
            interner: Interner::new(),
            classes: DashMap::new(),
            by_name: DashMap::new(),
            type_vars: DashMap::new(),
            next_id: AtomicU32::new(ClassId::FIRST_USER),
        };
        let params = store.intern("Params");
        store.insert_root(ClassId::OBJECT, "object", &[], TypeParamList::new());
        store.insert_root(ClassId::TYPE, "type", &[ClassId::OBJECT], TypeParamList::new());
        store.insert_root(ClassId::ENUM, "Enum", &[ClassId::OBJECT], TypeParamList::new());
        store.insert_root(ClassId::ABC, "ABC", &[ClassId::OBJECT], TypeParamList::new());
        store.insert_root(ClassId::ABC_META, "ABCMeta", &[ClassId::TYPE], TypeParamList::new());
        store.insert_root(
            ClassId::GENERIC,
            "Generic",
            &[ClassId::OBJECT],
            smallvec::smallvec![TypeParam::Variadic(params)],
        );
        store.insert_root(
            ClassId::EXCEPTION,
            "Exception",
            &[ClassId::OBJECT],
            TypeParamList::new(),
        );
        store
    }

    fn insert_root(&self, id: ClassId, name: &str, bases: &[ClassId], params: TypeParamList) {
        let name = self.intern(name);
        let mut mro = vec![id];
        if let Some(&base) = bases.first() {
            if let Some(base_info) = self.classes.get(&base) {
                mro.extend(base_info.mro.iter().copied());
            }
        }
        let info = ClassInfo {
            id,
            name,
            type_params: params,
            bases: bases.iter().copied().map(TypeExpr::Class).collect(),
            mro,
            generic_ancestry: false,
        };
        self.classes.insert(id, Arc::new(info));
        self.by_name.insert(name, id);
    }

    /// Intern a class or parameter name.
    pub fn intern(&self, name: &str) -> Atom {
        self.interner.intern(name)
    }

    /// Look up an already-interned name without interning it.
    pub fn atom_of(&self, name: &str) -> Option<Atom> {
        self.interner.lookup(name)
    }

    /// Declare a fixed type variable, like `T = TypeVar("T")`.
    pub fn type_var(&self, name: &str) -> Result<TypeParam, RegisterError> {
        self.declare_type_var(TypeParam::Fixed(self.intern(name)))
    }

    /// Declare a variadic type variable, like `Ts = TypeVarTuple("Ts")`.
    pub fn type_var_tuple(&self, name: &str) -> Result<TypeParam, RegisterError> {
        self.declare_type_var(TypeParam::Variadic(self.intern(name)))
    }

    /// Declaring the same variable twice with the same kind is a no-op.
    fn declare_type_var(&self, param: TypeParam) -> Result<TypeParam, RegisterError> {
        let name = param.name();
        if self.by_name.contains_key(&name) {
            return Err(RegisterError::NameConflict {
                name: self.resolve(name).to_string(),
                existing: "class",
            });
        }
        let existing = *self.type_vars.entry(name).or_insert(param);
        if existing != param {
            return Err(RegisterError::NameConflict {
                name: self.resolve(name).to_string(),
                existing: if existing.is_variadic() {
                    "variadic type variable"
                } else {
                    "type variable"
                },
            });
        }
        trace!(name = %self.resolve(name), variadic = param.is_variadic(), "type variable");
        Ok(param)
    }

    /// Find a declared type variable by name.
    pub fn lookup_type_var(&self, name: &str) -> Option<TypeParam> {
        let atom = self.interner.lookup(name)?;
        self.type_vars.get(&atom).map(|r| *r)
    }

    /// Resolve an interned name.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.interner.resolve(atom)
    }

    /// Allocate a fresh `ClassId`.
    fn allocate(&self) -> ClassId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        ClassId(id)
    }

    /// Validate and register a class declaration.
    pub fn register(&self, decl: ClassDecl) -> Result<ClassId, RegisterError> {
        let class = decl.name.clone();
        let name = self.intern(&decl.name);
        if self.by_name.contains_key(&name) {
            return Err(RegisterError::DuplicateClass { name: class });
        }
        if self.type_vars.contains_key(&name) {
            return Err(RegisterError::NameConflict {
                name: class,
                existing: "type variable",
            });
        }

        self.check_bases(&class, &decl.bases)?;
        let type_params = self.declared_params(&class, decl.type_params, &decl.bases)?;
        for base in &decl.bases {
            self.check_arity(&class, base)?;
        }

        let origins: Vec<ClassId> = decl.bases.iter().filter_map(TypeExpr::origin).collect();
        let id = self.allocate();
        let mro = if origins.is_empty() {
            vec![id, ClassId::OBJECT]
        } else {
            c3_linearize(self, id, &origins)
                .ok_or_else(|| RegisterError::InconsistentMro { class: class.clone() })?
        };

        let generic_ancestry = !type_params.is_empty()
            || decl.bases.iter().any(TypeExpr::is_parameterized)
            || origins
                .iter()
                .any(|o| self.get(*o).is_some_and(|info| info.generic_ancestry));

        trace!(
            class_id = id.0,
            name = %class,
            params = type_params.len(),
            bases = decl.bases.len(),
            generic_ancestry,
            "ClassStore::register"
        );

        let info = ClassInfo {
            id,
            name,
            type_params,
            bases: decl.bases,
            mro,
            generic_ancestry,
        };

        match self.by_name.entry(name) {
            Entry::Occupied(_) => Err(RegisterError::DuplicateClass { name: class }),
            Entry::Vacant(slot) => {
                self.classes.insert(id, Arc::new(info));
                slot.insert(id);
                Ok(id)
            }
        }
    }

    fn check_bases(&self, class: &str, bases: &[TypeExpr]) -> Result<(), RegisterError> {
        let mut seen = FxHashSet::default();
        for base in bases {
            let Some(origin) = base.origin() else {
                return Err(RegisterError::PlaceholderBase {
                    class: class.to_string(),
                    name: self.display(base),
                });
            };

            let mut missing = None;
            base.for_each_class(&mut |id| {
                if missing.is_none() && !self.contains(id) {
                    missing = Some(id);
                }
            });
            if let Some(id) = missing {
                return Err(RegisterError::UnknownClass {
                    class: class.to_string(),
                    id: id.0,
                });
            }

            if !seen.insert(origin) {
                return Err(RegisterError::DuplicateBase {
                    class: class.to_string(),
                    base: self.name_of(origin).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Work out the declared type parameters.
    ///
    /// Without an explicit list, a `Generic[...]` base fixes the parameters;
    /// otherwise every placeholder in the bases becomes a parameter in order
    /// of first appearance.
    fn declared_params(
        &self,
        class: &str,
        explicit: Option<Vec<TypeParam>>,
        bases: &[TypeExpr],
    ) -> Result<TypeParamList, RegisterError> {
        let mut used: Vec<TypeParam> = Vec::new();
        for base in bases {
            base.for_each_placeholder(&mut |p| {
                if !used.iter().any(|u| u.name() == p.name()) {
                    used.push(p);
                }
            });
        }

        let params: TypeParamList = match explicit {
            Some(list) => list.into_iter().collect(),
            None => {
                let generic_marker = bases
                    .iter()
                    .find(|b| b.origin() == Some(ClassId::GENERIC) && b.is_parameterized());
                match generic_marker {
                    Some(marker) => {
                        let mut from_marker = TypeParamList::new();
                        marker.for_each_placeholder(&mut |p| {
                            if !from_marker.iter().any(|u| u.name() == p.name()) {
                                from_marker.push(p);
                            }
                        });
                        from_marker
                    }
                    None => used.iter().copied().collect(),
                }
            }
        };

        if params.iter().filter(|p| p.is_variadic()).count() > 1 {
            return Err(RegisterError::MultipleVariadics {
                class: class.to_string(),
            });
        }
        for p in &used {
            if !params.iter().any(|d| d.name() == p.name()) {
                return Err(RegisterError::UndeclaredParameter {
                    class: class.to_string(),
                    name: self.resolve(p.name()).to_string(),
                });
            }
        }
        Ok(params)
    }

    /// Check argument counts of every parameterized expression inside a base.
    fn check_arity(&self, class: &str, expr: &TypeExpr) -> Result<(), RegisterError> {
        let TypeExpr::Applied { origin, args } = expr else {
            return Ok(());
        };
        for arg in args {
            self.check_arity(class, arg)?;
        }
        if *origin == ClassId::GENERIC {
            return Ok(());
        }
        let Some(info) = self.get(*origin) else {
            return Ok(());
        };

        let (fixed, variadic) = info.arity();
        let open_group = args.iter().any(|a| matches!(a, TypeExpr::Unpack(_)));
        let supplied = args
            .iter()
            .filter(|a| !matches!(a, TypeExpr::Unpack(_)))
            .count();

        let ok = match (variadic, open_group) {
            (true, true) => true,
            (true, false) => supplied >= fixed,
            (false, true) => supplied <= fixed,
            (false, false) => supplied == fixed,
        };
        if ok {
            return Ok(());
        }
        let expected = if variadic {
            format!("at least {fixed}")
        } else {
            format!("exactly {fixed}")
        };
        Err(RegisterError::ArityMismatch {
            class: class.to_string(),
            origin: self.name_of(*origin).to_string(),
            expected,
            found: supplied,
        })
    }

    /// Get class info by `ClassId`.
    pub fn get(&self, id: ClassId) -> Option<Arc<ClassInfo>> {
        self.classes.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Check if a `ClassId` exists.
    pub fn contains(&self, id: ClassId) -> bool {
        self.classes.contains_key(&id)
    }

    /// Find a class by name.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        let atom = self.interner.lookup(name)?;
        self.by_name.get(&atom).map(|r| *r)
    }

    /// Get the name of a class, or `<unknown>` for an unregistered id.
    pub fn name_of(&self, id: ClassId) -> Arc<str> {
        match self.classes.get(&id) {
            Some(info) => self.resolve(info.name),
            None => Arc::from("<unknown>"),
        }
    }

    /// Get type parameters for a class.
    pub fn type_params(&self, id: ClassId) -> Option<TypeParamList> {
        self.classes.get(&id).map(|r| r.type_params.clone())
    }

    /// Get the linearization of a class.
    pub fn mro(&self, id: ClassId) -> Option<Vec<ClassId>> {
        self.classes.get(&id).map(|r| r.mro.clone())
    }

    /// Render a type expression with class and parameter names.
    pub fn display(&self, expr: &TypeExpr) -> String {
        TypeFormatter::new(self).format(expr)
    }

    /// Number of classes, root markers included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the store holds nothing but the root markers.
    pub fn is_empty(&self) -> bool {
        self.classes.len() <= (ClassId::FIRST_USER - 1) as usize
    }

    /// Get all `ClassId`s in registration order (for debugging/testing).
    pub fn all_ids(&self) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self.classes.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
