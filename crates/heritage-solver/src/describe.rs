//! Hierarchy descriptions.
//!
//! Start-up description of a class hierarchy, loaded from JSON:
//!
//! ```json
//! {
//!   "type_vars": ["T", "*Ts"],
//!   "classes": [
//!     { "name": "A1", "bases": ["Generic[T, *Ts]"] },
//!     { "name": "A2", "bases": ["A1[str, int, type]"] }
//!   ]
//! }
//! ```
//!
//! Type variables are declared first, then classes are registered in file
//! order, so a class may only name classes listed before it. `params` may be
//! omitted; the parameters are then inferred from the type variables used in
//! `bases`. With `params` given, only those names are placeholders.

use crate::def::{ClassDecl, ClassStore};
use crate::error::DescribeError;
use crate::syntax::{ParamScope, parse_type};
use crate::types::{ClassId, TypeParam};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A whole hierarchy, in registration order.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HierarchyDescription {
    /// `"T"` declares a type variable, `"*Ts"` a variadic one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_vars: Vec<String>,
    pub classes: Vec<ClassDescription>,
}

/// One class entry.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClassDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
    #[serde(default)]
    pub bases: Vec<String>,
}

impl HierarchyDescription {
    pub fn from_json(text: &str) -> Result<Self, DescribeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Register every type variable and class into `store`, returning the
    /// class ids in order.
    pub fn load_into(&self, store: &ClassStore) -> Result<Vec<ClassId>, DescribeError> {
        for text in &self.type_vars {
            declare_type_var(store, text)?;
        }
        let mut ids = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            ids.push(class.register(store)?);
        }
        debug!(
            type_vars = self.type_vars.len(),
            classes = ids.len(),
            "loaded hierarchy description"
        );
        Ok(ids)
    }

    /// Build a fresh store holding the root markers plus this hierarchy.
    pub fn build(&self) -> Result<ClassStore, DescribeError> {
        let store = ClassStore::new();
        self.load_into(&store)?;
        Ok(store)
    }
}

impl ClassDescription {
    pub fn register(&self, store: &ClassStore) -> Result<ClassId, DescribeError> {
        let params = match &self.params {
            Some(list) => Some(
                list.iter()
                    .map(|p| {
                        parse_param(store, p).ok_or_else(|| DescribeError::InvalidParam {
                            class: self.name.clone(),
                            param: p.trim().to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let scope = match &params {
            Some(list) => ParamScope::Declared(list.as_slice()),
            None => ParamScope::TypeVars,
        };
        let bases = self
            .bases
            .iter()
            .map(|text| {
                parse_type(store, text, scope).map_err(|source| DescribeError::Syntax {
                    class: self.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut decl = ClassDecl::new(self.name.clone()).with_bases(bases);
        if let Some(list) = params {
            decl = decl.with_type_params(list);
        }
        Ok(store.register(decl)?)
    }
}

/// Parse `T` or `*Ts`. Returns `None` for malformed names and for names
/// of registered classes.
fn parse_param(store: &ClassStore, text: &str) -> Option<TypeParam> {
    let text = text.trim();
    let (variadic, name) = match text.strip_prefix('*') {
        Some(rest) => (true, rest.trim()),
        None => (false, text),
    };
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid || store.lookup(name).is_some() {
        return None;
    }
    let atom = store.intern(name);
    Some(if variadic {
        TypeParam::Variadic(atom)
    } else {
        TypeParam::Fixed(atom)
    })
}

fn declare_type_var(store: &ClassStore, text: &str) -> Result<TypeParam, DescribeError> {
    let param = parse_param(store, text).ok_or_else(|| DescribeError::InvalidTypeVar {
        name: text.trim().to_string(),
    })?;
    let name = store.resolve(param.name());
    let declared = if param.is_variadic() {
        store.type_var_tuple(&name)?
    } else {
        store.type_var(&name)?
    };
    Ok(declared)
}

impl ClassStore {
    /// Declare type variables from `T` / `*Ts` strings.
    pub fn declare_type_vars(&self, names: &[&str]) -> Result<Vec<TypeParam>, DescribeError> {
        names.iter().map(|text| declare_type_var(self, text)).collect()
    }

    /// Declare a class from base-expression strings, inferring its
    /// parameters from the type variables used.
    pub fn declare(&self, name: &str, bases: &[&str]) -> Result<ClassId, DescribeError> {
        ClassDescription {
            name: name.to_string(),
            params: None,
            bases: bases.iter().map(|b| (*b).to_string()).collect(),
        }
        .register(self)
    }

    /// Parse a type expression that may only mention registered classes.
    pub fn parse(&self, text: &str) -> Result<crate::TypeExpr, crate::SyntaxError> {
        parse_type(self, text, ParamScope::Declared(&[]))
    }
}

#[cfg(test)]
#[path = "../tests/describe_tests.rs"]
mod tests;
