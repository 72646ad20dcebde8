//! Human-readable rendering of type expressions.

use crate::def::ClassStore;
use crate::types::TypeExpr;

/// Renders `TypeExpr`s as `A1[str, int, *Ts]`.
///
/// The output is accepted back by [`parse_type`](crate::parse_type) when the
/// placeholders are in scope.
pub struct TypeFormatter<'a> {
    store: &'a ClassStore,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(store: &'a ClassStore) -> Self {
        Self { store }
    }

    pub fn format(&self, expr: &TypeExpr) -> String {
        let mut out = String::new();
        self.write(&mut out, expr);
        out
    }

    /// Render a whole closure as `[A, B[int], C]`.
    pub fn format_list(&self, exprs: &[TypeExpr]) -> String {
        let mut out = String::from("[");
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(&mut out, expr);
        }
        out.push(']');
        out
    }

    fn write(&self, out: &mut String, expr: &TypeExpr) {
        match expr {
            TypeExpr::Class(id) => out.push_str(&self.store.name_of(*id)),
            TypeExpr::Applied { origin, args } => {
                out.push_str(&self.store.name_of(*origin));
                out.push('[');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(out, arg);
                }
                out.push(']');
            }
            TypeExpr::Param(name) => out.push_str(&self.store.resolve(*name)),
            TypeExpr::Unpack(name) => {
                out.push('*');
                out.push_str(&self.store.resolve(*name));
            }
        }
    }
}
