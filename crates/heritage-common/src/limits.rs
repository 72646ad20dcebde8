//! Centralized limits for hierarchy traversal and type-expression parsing.
//!
//! Declared-base graphs are acyclic because a class can only name bases that
//! were registered before it. These limits bound pathological inputs, not
//! cycles.

/// Maximum depth of the declared-base walk.
///
/// Each level of inheritance adds one recursive frame to the ancestor walker.
/// Exceeding it yields `HierarchyError::HierarchyTooDeep` instead of a stack
/// overflow.
pub const MAX_HIERARCHY_DEPTH: u32 = 256;

/// Maximum nesting of bracketed arguments accepted by the type-expression
/// parser, e.g. `A[B[C[D]]]` has nesting 3.
pub const MAX_TYPE_NESTING: u32 = 64;

/// Maximum number of arguments in a single bracketed argument list.
pub const MAX_TYPE_ARGS: usize = 256;
