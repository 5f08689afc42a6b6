/*!

A formal derivative: a target expression together with the ordered list of symbols it is differentiated by. The
list may repeat (`[x, x]` is the second derivative in `x`) and it is not reordered, so `D[x, y](f)` and
`D[y, x](f)` are different nodes.

*/

use crate::{
  atom::{Atom, DerivativeSymbols},
  error::{KernelError, KernelResult},
  expression::Expression,
};


/// Creates the formal derivative of `arg` by each of `symbols` in turn. Fails if any of `symbols` is not a symbol.
/// An empty list is the zeroth derivative, `arg` itself.
pub fn derivative(arg: &Expression, symbols: &[Expression]) -> KernelResult<Expression> {
  let names =
    symbols.iter()
           .map(|s| s.symbol_name().ok_or_else(|| KernelError::NotASymbol(s.to_string())))
           .collect::<KernelResult<DerivativeSymbols>>()?;
  if names.is_empty() {
    return Ok(arg.clone());
  }
  Ok(derivative_from_names(arg, names))
}

pub(crate) fn derivative_from_names(arg: &Expression, symbols: DerivativeSymbols) -> Expression {
  Expression::new(Atom::Derivative(arg.clone(), symbols))
}

pub(crate) fn is_canonical(_arg: &Expression, symbols: &DerivativeSymbols) -> bool {
  !symbols.is_empty()
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::atoms::{function_symbol, integer, symbol};

  #[test]
  fn symbol_list_is_positional() {
    let (x, y) = (symbol("x"), symbol("y"));
    let f = function_symbol("f", &x);
    let dxy = derivative(&f, &[x.clone(), y.clone()]).unwrap();
    let dyx = derivative(&f, &[y, x]).unwrap();
    assert_ne!(dxy, dyx);
    assert_eq!(dxy.to_string(), "D[x, y](f(x))");
    assert_eq!(format!("{:?}", dxy), "Derivative[f[x], x, y]");
  }

  #[test]
  fn only_symbols_are_variables() {
    let f = function_symbol("f", &symbol("x"));
    assert_eq!(derivative(&f, &[integer(2)]), Err(KernelError::NotASymbol("2".to_string())));
    assert!(derivative(&f, &[]).unwrap().ptr_eq(&f));
  }
}
