//! Closure builder and the multi-bind adapter.
//!
//! [`resolve_closure`] dispatches on the shape of the starting expression:
//!
//! | Input | Strategy |
//! |-------|----------|
//! | `A1[str]` | seed the substitution from the arguments, walk declared bases |
//! | class with generic ancestry | walk declared bases from an empty substitution |
//! | plain class | linearization, root markers filtered out |
//!
//! [`with_parents`] wraps a multi-element closure into [`Provides::Multiple`],
//! the marker the container uses to bind one factory under every listed type.

use crate::def::ClassStore;
use crate::descriptor::origin_of;
use crate::error::HierarchyError;
use crate::ignore::is_ignored;
use crate::instantiate::specialize;
use crate::linearize::linear_ancestors;
use crate::params::{TypeSubstitution, type_var_map};
use crate::types::TypeExpr;
use crate::walker::AncestorWalker;
use heritage_common::limits::MAX_HIERARCHY_DEPTH;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// What to do with an ancestor reached through more than one path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first occurrence of each structurally equal expression.
    #[default]
    Merge,
    /// Keep the raw pre-order walk, one entry per path.
    Keep,
}

/// Knobs for [`resolve_closure_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosureConfig {
    pub duplicates: DuplicatePolicy,
    pub max_depth: u32,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            duplicates: DuplicatePolicy::Merge,
            max_depth: MAX_HIERARCHY_DEPTH,
        }
    }
}

impl ClosureConfig {
    pub fn keep_duplicates() -> Self {
        Self {
            duplicates: DuplicatePolicy::Keep,
            ..Self::default()
        }
    }
}

/// Registration marker produced by [`with_parents`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provides {
    /// Register under this one type.
    Single(TypeExpr),
    /// Register one factory under each of these types.
    Multiple(Vec<TypeExpr>),
}

impl Provides {
    /// Every type the factory must be bound under.
    pub fn types(&self) -> &[TypeExpr] {
        match self {
            Provides::Single(ty) => std::slice::from_ref(ty),
            Provides::Multiple(tys) => tys,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Provides::Multiple(_))
    }
}

impl From<TypeExpr> for Provides {
    fn from(ty: TypeExpr) -> Self {
        Provides::Single(ty)
    }
}

/// Ancestor closure of `expr` with the default configuration.
pub fn resolve_closure(store: &ClassStore, expr: &TypeExpr) -> Result<Vec<TypeExpr>, HierarchyError> {
    resolve_closure_with(store, expr, &ClosureConfig::default())
}

/// Ancestor closure of `expr`: the starting type first, then every
/// non-ignored ancestor.
#[tracing::instrument(level = "debug", skip_all, fields(ty = %store.display(expr)))]
pub fn resolve_closure_with(
    store: &ClassStore,
    expr: &TypeExpr,
    config: &ClosureConfig,
) -> Result<Vec<TypeExpr>, HierarchyError> {
    let Some(origin) = origin_of(expr) else {
        return Err(HierarchyError::NotAClass {
            name: store.display(expr),
        });
    };
    if is_ignored(origin) {
        return Err(HierarchyError::IgnoredRoot {
            name: store.display(expr),
        });
    }
    let info = store
        .get(origin)
        .ok_or(HierarchyError::UnknownClass { id: origin.0 })?;
    let walker = AncestorWalker::new(store).with_max_depth(config.max_depth);

    let closure = if expr.is_parameterized() {
        let subst = type_var_map(store, expr);
        let head = specialize(store, origin, &subst).unwrap_or_else(|| expr.clone());
        let mut closure = vec![head];
        walker.walk(expr, &mut closure, subst)?;
        closure
    } else if info.generic_ancestry {
        let mut closure = vec![expr.clone()];
        walker.walk(expr, &mut closure, TypeSubstitution::new())?;
        closure
    } else {
        linear_ancestors(store, origin)?
            .into_iter()
            .filter(|id| !is_ignored(*id))
            .map(TypeExpr::Class)
            .collect()
    };

    let closure = match config.duplicates {
        DuplicatePolicy::Merge => merge_duplicates(closure),
        DuplicatePolicy::Keep => closure,
    };
    debug!(len = closure.len(), "resolved closure");
    Ok(closure)
}

fn merge_duplicates(closure: Vec<TypeExpr>) -> Vec<TypeExpr> {
    let unique: IndexSet<TypeExpr, FxBuildHasher> = closure.into_iter().collect();
    unique.into_iter().collect()
}

/// Registration sugar: the closure of `expr` as a provides marker.
pub fn with_parents(store: &ClassStore, expr: &TypeExpr) -> Result<Provides, HierarchyError> {
    with_parents_with(store, expr, &ClosureConfig::default())
}

pub fn with_parents_with(
    store: &ClassStore,
    expr: &TypeExpr,
    config: &ClosureConfig,
) -> Result<Provides, HierarchyError> {
    let parents = resolve_closure_with(store, expr, config)?;
    if parents.len() > 1 {
        Ok(Provides::Multiple(parents))
    } else {
        Ok(Provides::Single(expr.clone()))
    }
}

#[cfg(test)]
#[path = "../tests/closure_tests.rs"]
mod tests;
