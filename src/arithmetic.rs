/*!

The arithmetic entry points, in one place: the canonicalizing factories `add`, `mul` and `pow`, and the operations
built from them, `sub`, `div`, `neg` and `abs`.

`add`, `sub` and `neg` cannot fail and are also available as the operators `+`, `-` and unary `-` on
`&Expression`. `mul`, `div` and `pow` can meet zero raised to a non-positive power, so they return a `KernelResult`.

*/

use std::ops;

use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::{
  atom::Atom,
  atoms::{
    add::scale,
    function::function_from_interned,
    rational::{number, value_of},
  },
  error::KernelResult,
  expression::{minus_one, Expression},
  interner::{interned_static, InternedString},
};

pub use crate::atoms::{add, mul, pow};


/// `left - right`
pub fn sub(left: &Expression, right: &Expression) -> Expression {
  add(left, &neg(right))
}

/// `left / right`. Dividing by zero is zero to the power -1, an error.
pub fn div(left: &Expression, right: &Expression) -> KernelResult<Expression> {
  mul(left, &pow(right, &minus_one())?)
}

/// `-expression`
pub fn neg(expression: &Expression) -> Expression {
  scale(&-BigRational::one(), expression)
}

/**
  The absolute value. Numbers evaluate; a numeric coefficient comes out of the bars, `abs(-3*x)` is `3*abs(x)`; and
  `abs(abs(x))` is `abs(x)`. Anything else is the unevaluated function `abs(x)`.
*/
pub fn abs(expression: &Expression) -> Expression {
  match expression.atom() {
    Atom::Integer(_) | Atom::Rational(_) => number(value_of(expression).abs()),

    Atom::Mul(product) if !product.coefficient().is_one() => {
      let magnitude = value_of(product.coefficient()).abs();
      scale(&magnitude, &abs(&product.without_coefficient()))
    }

    Atom::FunctionSymbol(name, _) if *name == abs_name() => expression.clone(),

    _ => function_from_interned(abs_name(), expression),
  }
}

fn abs_name() -> InternedString {
  interned_static("abs")
}


impl ops::Add for &Expression {
  type Output = Expression;

  fn add(self, rhs: Self) -> Expression {
    add(self, rhs)
  }
}

impl ops::Sub for &Expression {
  type Output = Expression;

  fn sub(self, rhs: Self) -> Expression {
    sub(self, rhs)
  }
}

impl ops::Neg for &Expression {
  type Output = Expression;

  fn neg(self) -> Expression {
    neg(self)
  }
}
