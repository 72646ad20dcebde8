use crate::scope::Scope;
use heritage_solver::HierarchyError;
use thiserror::Error;

/// Resolution failures. Types are rendered in source form, e.g. `A1[int]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("no factory for `{ty}`")]
    NoFactory { ty: String },

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("`{ty}` is provided in {required} scope, which is not active (current: {current})")]
    ScopeMismatch {
        ty: String,
        required: Scope,
        current: Scope,
    },

    #[error("factory for `{ty}` does not produce `{expected}`")]
    Downcast { ty: String, expected: &'static str },

    #[error("no scope below {scope}")]
    NoChildScope { scope: Scope },
}
