//! Substitution-aware ancestor closures for dependency-injection
//! registration.
//!
//! The work is split across the workspace crates:
//!
//! - [`common`]: string interning and recursion limits
//! - [`solver`]: the class store, parameter maps, ancestor walker, and
//!   closure builder
//! - [`container`]: scoped container with multi-bind registration
//!
//! This crate re-exports the three and adds the `heritage` command line.

pub use heritage_common as common;
pub use heritage_container as container;
pub use heritage_solver as solver;

pub use heritage_container::{Container, ContainerError, Provider, Scope};
pub use heritage_solver::{
    ClassStore, ClosureConfig, DuplicatePolicy, HierarchyDescription, HierarchyError, Provides,
    TypeExpr, resolve_closure, resolve_closure_with, with_parents,
};

// Tracing configuration (text / tree / JSON output)
pub mod tracing_config;

pub mod cli;
