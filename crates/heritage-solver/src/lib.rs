//! Substitution-aware ancestor closures.
//!
//! Given a class, possibly applied to concrete type arguments, this crate
//! computes the ordered list of every type a single constructed instance
//! should be resolvable under. The pipeline has five stages:
//!
//! - **Descriptor extraction** (`descriptor`): origin class and supplied arguments
//! - **Parameter maps** (`params`): parameter name to bound argument, variadics included
//! - **Ignore filter** (`ignore`): universal root markers
//! - **Ancestor walk** (`walker`): pre-order DFS over declared bases with re-specialization
//! - **Closure builder** (`closure`): entry point and the multi-bind marker
//!
//! Classes are described explicitly in a [`ClassStore`] rather than
//! discovered by reflection. Type variables are declared there too, before
//! any class uses them.
mod closure;
pub mod def;
pub mod describe;
pub mod descriptor;
mod error;
mod format;
pub mod ignore;
pub mod instantiate;
pub mod linearize;
pub mod params;
pub mod syntax;
pub mod types;
mod walker;

pub use closure::{
    ClosureConfig, DuplicatePolicy, Provides, resolve_closure, resolve_closure_with, with_parents,
    with_parents_with,
};
pub use def::{ClassDecl, ClassInfo, ClassStore, TypeParamList};
pub use describe::{ClassDescription, HierarchyDescription};
pub use descriptor::{TypeDescriptor, origin_of};
pub use error::{DescribeError, HierarchyError, RegisterError, SyntaxError};
pub use format::TypeFormatter;
pub use ignore::{IGNORED_ROOTS, is_ignored, is_ignored_type};
pub use instantiate::{instantiate_type, specialize};
pub use linearize::{c3_merge, linear_ancestors};
pub use params::{Binding, TypeSubstitution, type_var_map};
pub use syntax::{ParamScope, parse_type};
pub use types::{ClassId, TypeExpr, TypeParam};
pub use walker::AncestorWalker;

#[cfg(test)]
#[path = "../tests/properties_tests.rs"]
mod properties_tests;
