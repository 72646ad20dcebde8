//! Type descriptor extraction: origin class and supplied arguments.

use crate::types::{ClassId, TypeExpr};

/// Origin and argument slots of a type expression.
///
/// For a bare class the origin is the class itself and there are no slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeDescriptor<'a> {
    pub origin: ClassId,
    slots: &'a [TypeExpr],
}

impl<'a> TypeDescriptor<'a> {
    /// Describe an expression. Placeholders have no origin and yield `None`.
    pub fn of(expr: &'a TypeExpr) -> Option<Self> {
        match expr {
            TypeExpr::Class(id) => Some(Self {
                origin: *id,
                slots: &[],
            }),
            TypeExpr::Applied { origin, args } => Some(Self {
                origin: *origin,
                slots: args,
            }),
            TypeExpr::Param(_) | TypeExpr::Unpack(_) => None,
        }
    }

    /// Positional argument slots, placeholders included.
    pub fn slots(&self) -> &'a [TypeExpr] {
        self.slots
    }

    /// Supplied arguments usable as bindings: raw placeholders are dropped.
    pub fn supplied_args(&self) -> impl Iterator<Item = &'a TypeExpr> + 'a {
        self.slots.iter().filter(|arg| !arg.is_placeholder())
    }

    /// True when no slot is a raw placeholder.
    pub fn is_concrete(&self) -> bool {
        self.supplied_args().count() == self.slots.len()
    }
}

/// The origin class of an expression, if it has one.
pub fn origin_of(expr: &TypeExpr) -> Option<ClassId> {
    TypeDescriptor::of(expr).map(|d| d.origin)
}
