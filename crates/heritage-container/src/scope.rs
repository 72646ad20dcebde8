use std::fmt;

/// Lifetime of a cached instance. `App` outlives `Request`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    App,
    Request,
}

impl Scope {
    /// The scope entered from this one, if any.
    pub const fn child(self) -> Option<Scope> {
        match self {
            Scope::App => Some(Scope::Request),
            Scope::Request => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::App => f.write_str("app"),
            Scope::Request => f.write_str("request"),
        }
    }
}
