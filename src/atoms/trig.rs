/*!

`sin` and `cos`. The only closed forms the kernel knows are at the literal integer zero: `sin(0)` is 0 and `cos(0)`
is 1. Every other argument, including other numbers, gives an unevaluated node.

*/

use crate::{
  atom::Atom,
  expression::{one, zero, Expression},
};


pub fn sin(arg: &Expression) -> Expression {
  if arg.is_zero() {
    return zero();
  }
  Expression::new(Atom::Sin(arg.clone()))
}

pub fn cos(arg: &Expression) -> Expression {
  if arg.is_zero() {
    return one();
  }
  Expression::new(Atom::Cos(arg.clone()))
}

pub(crate) fn is_canonical(arg: &Expression) -> bool {
  !arg.is_zero()
}
