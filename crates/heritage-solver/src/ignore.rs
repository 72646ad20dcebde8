//! Universal root markers.
//!
//! These classes sit at the top of every hierarchy and carry no domain
//! meaning, so they never appear in an ancestor closure and a walk stops
//! when it reaches one.

use crate::descriptor::origin_of;
use crate::types::{ClassId, TypeExpr};

/// The fixed ignore set.
pub const IGNORED_ROOTS: [ClassId; 7] = [
    ClassId::TYPE,
    ClassId::OBJECT,
    ClassId::ENUM,
    ClassId::ABC,
    ClassId::ABC_META,
    ClassId::GENERIC,
    ClassId::EXCEPTION,
];

/// True iff `origin` is exactly one of the root markers.
#[inline]
pub fn is_ignored(origin: ClassId) -> bool {
    IGNORED_ROOTS.contains(&origin)
}

/// True iff the origin of `expr` is a root marker. Placeholders are never ignored.
#[inline]
pub fn is_ignored_type(expr: &TypeExpr) -> bool {
    origin_of(expr).is_some_and(is_ignored)
}
