//! The ancestor walker.
//!
//! Depth-first, pre-order walk of declared base lists in declaration order.
//! Each base is instantiated with the bindings of the class that declares
//! it, contributes its own parameter map to a branch-local copy of the
//! substitution, is appended in its re-specialized form, and is then walked
//! with that copy. Sibling branches never see each other's bindings.
//!
//! Root markers end a branch: neither the marker nor its own bases are
//! visited.

use crate::def::ClassStore;
use crate::descriptor::origin_of;
use crate::error::HierarchyError;
use crate::ignore::is_ignored;
use crate::instantiate::{instantiate_type, specialize};
use crate::params::{TypeSubstitution, type_var_map};
use crate::types::TypeExpr;
use heritage_common::limits::MAX_HIERARCHY_DEPTH;
use tracing::trace;

/// Walks declared-base relationships with substitution applied.
pub struct AncestorWalker<'a> {
    store: &'a ClassStore,
    max_depth: u32,
}

impl<'a> AncestorWalker<'a> {
    pub fn new(store: &'a ClassStore) -> Self {
        Self {
            store,
            max_depth: MAX_HIERARCHY_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Collect the ancestors of `expr` (not `expr` itself) into a new list.
    pub fn ancestors(&self, expr: &TypeExpr) -> Result<Vec<TypeExpr>, HierarchyError> {
        let mut closure = Vec::new();
        self.walk(expr, &mut closure, TypeSubstitution::new())?;
        Ok(closure)
    }

    /// Append every non-ignored ancestor of `expr` to `closure`, in pre-order.
    ///
    /// `subst` holds the bindings inherited from the caller's branch and is
    /// consumed; pass a clone when the caller still needs it.
    pub fn walk(
        &self,
        expr: &TypeExpr,
        closure: &mut Vec<TypeExpr>,
        subst: TypeSubstitution,
    ) -> Result<(), HierarchyError> {
        self.walk_at(expr, closure, subst, 0)
    }

    fn walk_at(
        &self,
        expr: &TypeExpr,
        closure: &mut Vec<TypeExpr>,
        mut subst: TypeSubstitution,
        depth: u32,
    ) -> Result<(), HierarchyError> {
        if depth > self.max_depth {
            return Err(HierarchyError::HierarchyTooDeep {
                depth: self.max_depth,
            });
        }
        let Some(origin) = origin_of(expr) else {
            return Ok(());
        };
        if is_ignored(origin) {
            return Ok(());
        }

        subst.extend(type_var_map(self.store, expr));
        let info = self
            .store
            .get(origin)
            .ok_or(HierarchyError::UnknownClass { id: origin.0 })?;

        for declared in &info.bases {
            let base = instantiate_type(declared, &subst);
            let Some(base_origin) = origin_of(&base) else {
                continue;
            };
            if is_ignored(base_origin) {
                trace!(class_id = origin.0, base_id = base_origin.0, "skipping root marker base");
                continue;
            }

            let mut working = subst.clone();
            working.extend(type_var_map(self.store, &base));
            let specialized =
                specialize(self.store, base_origin, &working).unwrap_or_else(|| base.clone());

            trace!(
                depth,
                class_id = origin.0,
                base_id = base_origin.0,
                bindings = working.len(),
                "ancestor"
            );
            closure.push(specialized);
            self.walk_at(&base, closure, working, depth + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/walker_tests.rs"]
mod tests;
