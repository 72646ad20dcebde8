//! Type-expression syntax.
//!
//! ```text
//! type  := name ( '[' args? ']' )?
//! args  := arg ( ',' arg )* ','?
//! arg   := '*' name | type
//! name  := [A-Za-z_][A-Za-z0-9_.]*
//! ```
//!
//! Names resolve to registered classes first, then to placeholders in scope.
//! A name that is neither is an error: an unregistered class is never
//! mistaken for a type parameter.

use crate::def::ClassStore;
use crate::error::SyntaxError;
use crate::types::{TypeExpr, TypeParam};
use heritage_common::limits::{MAX_TYPE_ARGS, MAX_TYPE_NESTING};

/// Which placeholder names a parsed expression may use.
#[derive(Clone, Copy, Debug)]
pub enum ParamScope<'a> {
    /// Only these parameters; any other unknown name is an error.
    Declared(&'a [TypeParam]),
    /// Type variables declared in the store.
    TypeVars,
}

impl ParamScope<'_> {
    fn admits(&self, store: &ClassStore, name: &str) -> bool {
        match self {
            ParamScope::Declared(params) => {
                let Some(atom) = store.atom_of(name) else {
                    return false;
                };
                params.iter().any(|p| p.name() == atom)
            }
            ParamScope::TypeVars => store.lookup_type_var(name).is_some(),
        }
    }
}

/// Parse a type expression against the classes registered in `store`.
pub fn parse_type(
    store: &ClassStore,
    text: &str,
    scope: ParamScope<'_>,
) -> Result<TypeExpr, SyntaxError> {
    let mut parser = Parser {
        store,
        scope,
        src: text.as_bytes(),
        pos: 0,
        depth: 0,
    };
    parser.skip_ws();
    let expr = parser.parse_type()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(expr),
        Some(found) => Err(SyntaxError::UnexpectedChar {
            found: found as char,
            offset: parser.pos,
        }),
    }
}

struct Parser<'a> {
    store: &'a ClassStore,
    scope: ParamScope<'a>,
    src: &'a [u8],
    pos: usize,
    depth: u32,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(SyntaxError::UnexpectedChar {
                found: found as char,
                offset: self.pos,
            }),
            None => Err(SyntaxError::UnexpectedEnd { offset: self.pos }),
        }
    }

    fn name(&mut self) -> Result<(&'a str, usize), SyntaxError> {
        let src: &'a [u8] = self.src;
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => self.pos += 1,
            Some(found) => {
                return Err(SyntaxError::UnexpectedChar {
                    found: found as char,
                    offset: self.pos,
                });
            }
            None => return Err(SyntaxError::UnexpectedEnd { offset: self.pos }),
        }
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        {
            self.pos += 1;
        }
        // The consumed range is ASCII by construction.
        let text = std::str::from_utf8(&src[start..self.pos]).unwrap_or_default();
        Ok((text, start))
    }

    fn parse_type(&mut self) -> Result<TypeExpr, SyntaxError> {
        if self.peek() == Some(b'*') {
            let offset = self.pos;
            self.pos += 1;
            let (name, _) = self.name()?;
            return Err(SyntaxError::MisplacedUnpack {
                name: name.to_string(),
                offset,
            });
        }

        let (name, offset) = self.name()?;
        let name = name.to_string();
        self.skip_ws();

        let Some(class) = self.store.lookup(&name) else {
            if self.scope.admits(self.store, &name) {
                return Ok(TypeExpr::Param(self.store.intern(&name)));
            }
            return Err(SyntaxError::UnknownName { name, offset });
        };

        if self.peek() != Some(b'[') {
            return Ok(TypeExpr::Class(class));
        }
        self.pos += 1;
        self.depth += 1;
        if self.depth > MAX_TYPE_NESTING {
            return Err(SyntaxError::TooDeep { offset: self.pos });
        }

        let mut args = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                break;
            }
            if args.len() >= MAX_TYPE_ARGS {
                return Err(SyntaxError::TooManyArgs { offset: self.pos });
            }
            args.push(self.parse_arg()?);
            self.skip_ws();
            if self.peek() == Some(b',') {
                self.pos += 1;
                continue;
            }
            break;
        }
        self.skip_ws();
        self.expect(b']')?;
        self.depth -= 1;
        Ok(TypeExpr::Applied {
            origin: class,
            args,
        })
    }

    fn parse_arg(&mut self) -> Result<TypeExpr, SyntaxError> {
        if self.peek() != Some(b'*') {
            return self.parse_type();
        }
        self.pos += 1;
        self.skip_ws();
        let (name, offset) = self.name()?;
        let name = name.to_string();
        if self.store.lookup(&name).is_none() && self.scope.admits(self.store, &name) {
            Ok(TypeExpr::Unpack(self.store.intern(&name)))
        } else {
            Err(SyntaxError::UnknownName { name, offset })
        }
    }
}

#[cfg(test)]
#[path = "../tests/syntax_tests.rs"]
mod tests;
