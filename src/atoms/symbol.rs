/*!

  A symbol is a ground term: an atomic named identifier. Two symbols are equal exactly when their names are.
  Names are interned.

*/

use crate::{
  atom::{Atom, DerivativeSymbols},
  expression::Expression,
  interner::{interned, resolve_str, InternedString},
};


/// Create a symbol from a `&str`.
pub fn symbol(name: &str) -> Expression {
  symbol_from_interned(interned(name))
}

pub(crate) fn symbol_from_interned(name: InternedString) -> Expression {
  Expression::new(Atom::Symbol(name))
}

/// Comma separated names, as in the variable list of a formal derivative.
pub(crate) fn format_names(names: &DerivativeSymbols) -> String {
  names.iter()
       .map(|name| resolve_str(*name))
       .collect::<Vec<_>>()
       .join(", ")
}
