//! Error types for the solver.

use thiserror::Error;

/// Failure to compute an ancestor closure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The starting expression is itself a universal root marker.
    #[error("the starting class `{name}` is in ignored types")]
    IgnoredRoot { name: String },

    /// A bare placeholder was passed where a class was expected.
    #[error("`{name}` is a type-parameter placeholder, not a class")]
    NotAClass { name: String },

    /// The expression refers to a class id the store does not know.
    #[error("class id {id} is not registered")]
    UnknownClass { id: u32 },

    /// The declared-base walk went deeper than the configured limit.
    #[error("class hierarchy is deeper than {depth} levels")]
    HierarchyTooDeep { depth: u32 },
}

/// Failure to register a class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("class `{name}` is already registered")]
    DuplicateClass { name: String },

    #[error("class `{class}` refers to unregistered class id {id}")]
    UnknownClass { class: String, id: u32 },

    #[error("class `{class}` lists base `{base}` more than once")]
    DuplicateBase { class: String, base: String },

    #[error("class `{class}` cannot extend the bare placeholder `{name}`")]
    PlaceholderBase { class: String, name: String },

    #[error("class `{class}`: `{origin}` expects {expected} type argument(s), got {found}")]
    ArityMismatch {
        class: String,
        origin: String,
        expected: String,
        found: usize,
    },

    #[error("class `{class}` uses type parameter `{name}` without declaring it")]
    UndeclaredParameter { class: String, name: String },

    #[error("class `{class}` declares more than one variadic type parameter")]
    MultipleVariadics { class: String },

    #[error("cannot create a consistent method resolution order for `{class}`")]
    InconsistentMro { class: String },

    /// A class and a type variable, or a fixed and a variadic type
    /// variable, share one name.
    #[error("`{name}` is already declared as a {existing}")]
    NameConflict { name: String, existing: &'static str },
}

/// Failure to parse a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unknown name `{name}` at offset {offset}")]
    UnknownName { name: String, offset: usize },

    #[error("`*{name}` is only allowed inside an argument list (offset {offset})")]
    MisplacedUnpack { name: String, offset: usize },

    #[error("type expression nested too deeply at offset {offset}")]
    TooDeep { offset: usize },

    #[error("too many type arguments at offset {offset}")]
    TooManyArgs { offset: usize },
}

/// Failure to load a hierarchy description.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("invalid hierarchy description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class `{class}`: {source}")]
    Syntax {
        class: String,
        #[source]
        source: SyntaxError,
    },

    #[error("class `{class}`: invalid type parameter `{param}`")]
    InvalidParam { class: String, param: String },

    #[error("invalid type variable `{name}`")]
    InvalidTypeVar { name: String },

    #[error(transparent)]
    Register(#[from] RegisterError),
}
