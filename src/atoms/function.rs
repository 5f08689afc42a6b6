/*!

An unevaluated application `name(argument)` of a function the kernel knows nothing about. There are no closed forms,
so every argument is canonical. Two applications are equal when both the names and the arguments are.

*/

use crate::{
  atom::Atom,
  expression::Expression,
  interner::{interned, InternedString},
};


/// Creates the application `name(arg)`.
pub fn function_symbol(name: &str, arg: &Expression) -> Expression {
  function_from_interned(interned(name), arg)
}

pub(crate) fn function_from_interned(name: InternedString, arg: &Expression) -> Expression {
  Expression::new(Atom::FunctionSymbol(name, arg.clone()))
}

pub(crate) fn is_canonical(_arg: &Expression) -> bool {
  true
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::atoms::{integer, symbol};

  #[test]
  fn equal_by_name_and_argument() {
    let x = symbol("x");
    assert_eq!(function_symbol("f", &x), function_symbol("f", &symbol("x")));
    assert_ne!(function_symbol("f", &x), function_symbol("g", &x));
    assert_ne!(function_symbol("f", &x), function_symbol("f", &integer(0)));
  }

  #[test]
  fn forms() {
    let f = function_symbol("f", &symbol("x"));
    assert_eq!(f.to_string(), "f(x)");
    assert_eq!(format!("{:?}", f), "f[x]");
  }
}
