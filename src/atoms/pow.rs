/*!

Powers. `pow` folds, in this order:

  1. a zero base: a numeric exponent that is not positive is an error, a positive one gives 0, and a symbolic
     exponent leaves the power unevaluated,
  2. `b**0` is 1, `b**1` is `b`, and `1**e` is 1,
  3. a number to an integer power is computed exactly,
  4. `(b**e)**n` is `b**(e*n)` and `(c*f1*f2)**n` is `c**n * f1**n * f2**n` for an integer `n`.

Anything else is a `Pow` node. A number to a non-integer power, `2**(1/2)` for example, is kept as it is.

*/

use num_traits::Signed;

use crate::{
  atom::{Atom, PRECEDENCE_ATOM},
  atoms::{
    mul::{mul, mul_many},
    rational::{pow_number, value_of},
  },
  error::{KernelError, KernelResult},
  expression::{one, zero, Expression},
  format::{ExpressionFormatter, Formattable},
  logging::{log_with, Channel},
};


/// `base**exponent`
pub fn pow(base: &Expression, exponent: &Expression) -> KernelResult<Expression> {
  if base.is_zero() {
    return match exponent.as_rational() {
      Some(value) if value.is_positive() => Ok(zero()),
      Some(_)                            => Err(KernelError::ZeroToNonPositivePower),
      None                               => Ok(Expression::new(Atom::Pow(base.clone(), exponent.clone()))),
    };
  }
  if exponent.is_zero() {
    return Ok(one());
  }
  if exponent.is_one() {
    return Ok(base.clone());
  }
  if base.is_one() {
    return Ok(one());
  }

  if let Some(n) = exponent.as_integer() {
    match base.atom() {
      Atom::Integer(_) | Atom::Rational(_) => {
        return pow_number(&value_of(base), n);
      }

      Atom::Pow(inner_base, inner_exponent) => {
        log_with(Channel::Debug, 4, || format!("pow: ({})**{} flattens", base, n));
        return pow(inner_base, &mul(inner_exponent, exponent)?);
      }

      Atom::Mul(product) => {
        log_with(Channel::Debug, 4, || format!("pow: ({})**{} distributes", base, n));
        let mut factors = Vec::with_capacity(product.factors().len() + 1);
        factors.push(pow_number(&value_of(product.coefficient()), n)?);
        for (factor_base, factor_exponent) in product.factors() {
          factors.push(pow(factor_base, &mul(factor_exponent, exponent)?)?);
        }
        return mul_many(factors);
      }

      _ => {}
    }
  }

  Ok(Expression::new(Atom::Pow(base.clone(), exponent.clone())))
}


/// The powers `pow` returns unevaluated. Everything else would have been folded.
pub(crate) fn is_canonical(base: &Expression, exponent: &Expression) -> bool {
  if exponent.is_zero() || exponent.is_one() || base.is_one() {
    return false;
  }
  if base.is_zero() && exponent.is_number() {
    return false;
  }
  !(exponent.is_integer() && matches!(base.atom(), Atom::Integer(_) | Atom::Rational(_) | Atom::Pow(..) | Atom::Mul(_)))
}


/// Input form of `base**exponent`. Anything that is not atomic is parenthesized on either side.
pub(crate) fn format_power(base: &Expression, exponent: &Expression, formatter: &ExpressionFormatter) -> String {
  format!("{}**{}", operand(base, formatter), operand(exponent, formatter))
}

fn operand(expression: &Expression, formatter: &ExpressionFormatter) -> String {
  if expression.atom().precedence() < PRECEDENCE_ATOM {
    format!("({})", expression.format(formatter))
  } else {
    expression.format(formatter)
  }
}
