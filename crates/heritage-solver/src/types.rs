//! Type expressions and type-parameter declarations.
//!
//! A [`TypeExpr`] is the unit the closure pipeline consumes and produces:
//! a bare class, a class applied to type arguments, or one of the two
//! placeholder forms that appear inside declared base lists.

use heritage_common::interner::Atom;
use serde::Serialize;

// =============================================================================
// ClassId - Solver-Owned Class Identifier
// =============================================================================

/// Solver-owned class identifier.
///
/// Ids are allocated sequentially by [`ClassStore`](crate::ClassStore).
/// The first few ids are reserved for the root marker classes that every
/// store pre-registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Sentinel value for invalid `ClassId`.
    pub const INVALID: Self = Self(0);

    /// The topmost object type.
    pub const OBJECT: Self = Self(1);
    /// The metaclass of all classes.
    pub const TYPE: Self = Self(2);
    /// Enumeration base.
    pub const ENUM: Self = Self(3);
    /// Abstract-base-class marker.
    pub const ABC: Self = Self(4);
    /// Abstract-base-class metaclass marker.
    pub const ABC_META: Self = Self(5);
    /// Generic-declaration marker (`Generic[T, *Ts]`).
    pub const GENERIC: Self = Self(6);
    /// Exception base.
    pub const EXCEPTION: Self = Self(7);

    /// First id handed out to user classes.
    pub const FIRST_USER: u32 = 8;

    /// Check if this `ClassId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    /// Check if this id is one of the pre-registered root markers.
    pub const fn is_builtin_root(self) -> bool {
        self.0 >= Self::OBJECT.0 && self.0 < Self::FIRST_USER
    }
}

// =============================================================================
// TypeParam - Declared Type Parameters
// =============================================================================

/// A type parameter declared by a generic class, in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeParam {
    /// A single placeholder: `T`.
    Fixed(Atom),
    /// A variadic placeholder group: `*Ts`. At most one per class.
    Variadic(Atom),
}

impl TypeParam {
    pub const fn name(self) -> Atom {
        match self {
            TypeParam::Fixed(name) | TypeParam::Variadic(name) => name,
        }
    }

    pub const fn is_variadic(self) -> bool {
        matches!(self, TypeParam::Variadic(_))
    }

    /// The placeholder expression that refers to this parameter.
    pub fn placeholder(self) -> TypeExpr {
        match self {
            TypeParam::Fixed(name) => TypeExpr::Param(name),
            TypeParam::Variadic(name) => TypeExpr::Unpack(name),
        }
    }
}

// =============================================================================
// TypeExpr - Type Expressions
// =============================================================================

/// A type expression.
///
/// Equality and hashing are structural, so two independently built
/// `A1[str]` expressions are the same container key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Bare class reference: `A1`.
    Class(ClassId),
    /// Parameterized generic type: `A1[str, int]`.
    Applied { origin: ClassId, args: Vec<TypeExpr> },
    /// Unbound type-parameter reference: `T`.
    Param(Atom),
    /// Unbound variadic placeholder group: `*Ts`.
    Unpack(Atom),
}

impl TypeExpr {
    /// Build a parameterized expression.
    pub fn applied(origin: ClassId, args: impl IntoIterator<Item = TypeExpr>) -> Self {
        TypeExpr::Applied {
            origin,
            args: args.into_iter().collect(),
        }
    }

    /// The class this expression is rooted at, if it is not a placeholder.
    pub const fn origin(&self) -> Option<ClassId> {
        match self {
            TypeExpr::Class(id) | TypeExpr::Applied { origin: id, .. } => Some(*id),
            TypeExpr::Param(_) | TypeExpr::Unpack(_) => None,
        }
    }

    pub const fn is_parameterized(&self) -> bool {
        matches!(self, TypeExpr::Applied { .. })
    }

    pub const fn is_placeholder(&self) -> bool {
        matches!(self, TypeExpr::Param(_) | TypeExpr::Unpack(_))
    }

    /// Check whether a placeholder occurs anywhere inside this expression.
    pub fn contains_placeholders(&self) -> bool {
        match self {
            TypeExpr::Class(_) => false,
            TypeExpr::Applied { args, .. } => args.iter().any(TypeExpr::contains_placeholders),
            TypeExpr::Param(_) | TypeExpr::Unpack(_) => true,
        }
    }

    /// Visit every placeholder in left-to-right order.
    pub fn for_each_placeholder(&self, f: &mut impl FnMut(TypeParam)) {
        match self {
            TypeExpr::Class(_) => {}
            TypeExpr::Applied { args, .. } => {
                for arg in args {
                    arg.for_each_placeholder(f);
                }
            }
            TypeExpr::Param(name) => f(TypeParam::Fixed(*name)),
            TypeExpr::Unpack(name) => f(TypeParam::Variadic(*name)),
        }
    }

    /// Visit every class referenced anywhere in this expression.
    pub fn for_each_class(&self, f: &mut impl FnMut(ClassId)) {
        match self {
            TypeExpr::Class(id) => f(*id),
            TypeExpr::Applied { origin, args } => {
                f(*origin);
                for arg in args {
                    arg.for_each_class(f);
                }
            }
            TypeExpr::Param(_) | TypeExpr::Unpack(_) => {}
        }
    }
}

impl From<ClassId> for TypeExpr {
    fn from(id: ClassId) -> Self {
        TypeExpr::Class(id)
    }
}
