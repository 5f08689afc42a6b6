/*!

Rational primitive type and the numeric backend.

A `Rational` is always stored in lowest terms with a positive denominator greater than one. A value whose reduced
denominator is one is an `Integer`, never a `Rational`; `number` is the single funnel that enforces this for every
numeric result the kernel computes.

*/

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{
  atom::Atom,
  atoms::integer::integer_from_big,
  error::{KernelError, KernelResult},
  expression::Expression,
};


/// Creates `numerator/denominator` in lowest terms. Yields an `Integer` when the denominator divides the numerator.
pub fn rational<N, D>(numerator: N, denominator: D) -> KernelResult<Expression>
  where N: Into<BigInt>,
        D: Into<BigInt>
{
  rational_from_big(numerator.into(), denominator.into())
}

pub(crate) fn rational_from_big(numerator: BigInt, denominator: BigInt) -> KernelResult<Expression> {
  if denominator.is_zero() {
    return Err(KernelError::ZeroDenominator);
  }

  let divisor         = numerator.gcd(&denominator);
  let mut numerator   = numerator / &divisor;
  let mut denominator = denominator / &divisor;
  // The sign lives on the numerator.
  if denominator.is_negative() {
    numerator   = -numerator;
    denominator = -denominator;
  }

  if denominator.is_one() {
    Ok(integer_from_big(numerator))
  } else {
    Ok(Expression::new(Atom::Rational(BigRational::new_raw(numerator, denominator))))
  }
}

/// Creates the rational `numerator/denominator` from two integer expressions.
pub fn rational_from_expressions(numerator: &Expression, denominator: &Expression) -> KernelResult<Expression> {
  match (numerator.as_integer(), denominator.as_integer()) {
    (Some(n), Some(d)) => rational_from_big(n.clone(), d.clone()),
    _                  => Err(KernelError::NonIntegerRational)
  }
}

/// Wraps a backend value as a numeric leaf, choosing `Integer` when it is integral.
pub(crate) fn number(value: BigRational) -> Expression {
  if value.is_integer() {
    integer_from_big(value.to_integer())
  } else {
    // Backend arithmetic keeps ratios reduced with a positive denominator.
    Expression::new(Atom::Rational(value))
  }
}

/// The most bits an exact power may take before it is refused as `ExponentTooLarge`.
pub(crate) const MAX_POWER_BITS: u64 = 1 << 24;

/**
  `base**exponent` for a numeric base and an integer exponent, computed exactly. The size of the result is
  estimated up front as the bits of the larger of the base's numerator and denominator times the exponent, and a
  result over `MAX_POWER_BITS` is refused.
*/
pub(crate) fn pow_number(base: &BigRational, exponent: &BigInt) -> KernelResult<Expression> {
  if base.is_zero() {
    if exponent.is_positive() {
      return Ok(number(BigRational::zero()));
    }
    return Err(KernelError::ZeroToNonPositivePower);
  }
  // Unit bases stay small whatever the exponent.
  if base.abs().is_one() {
    let negative = base.is_negative() && exponent.is_odd();
    return Ok(number(if negative { -BigRational::one() } else { BigRational::one() }));
  }

  let too_large = || KernelError::ExponentTooLarge(exponent.to_string());
  let magnitude = exponent.abs().to_u64().ok_or_else(too_large)?;
  let bits      = base.numer().bits().max(base.denom().bits());
  if bits.checked_mul(magnitude).map_or(true, |total| total > MAX_POWER_BITS) {
    return Err(too_large());
  }
  let magnitude = usize::try_from(magnitude).map_err(|_| too_large())?;

  let power = num_traits::pow(base.clone(), magnitude);
  if exponent.is_negative() {
    Ok(number(power.recip()))
  } else {
    Ok(number(power))
  }
}

/// The numeric value of a leaf known to be a number. Callers check `is_number` first.
pub(crate) fn value_of(expression: &Expression) -> BigRational {
  expression.as_rational().unwrap_or_else(|| not_a_number(expression))
}

/// A critical error state.
fn not_a_number(expression: &Expression) -> ! {
  unreachable!("Asked for the numeric value of the non-number `{}`. This is a bug.", expression)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::atoms::integer;

  #[test]
  fn reduces_to_lowest_terms() {
    let r = rational(6, -4).unwrap();
    assert!(r.is_rational());
    assert_eq!(r.to_string(), "-3/2");
  }

  #[test]
  fn integral_ratio_is_an_integer() {
    let r = rational(4, 2).unwrap();
    assert!(r.is_integer());
    assert_eq!(r, integer(2));
    assert!(rational(0, 5).unwrap().is_zero());
    assert!(rational(-7, -7).unwrap().is_one());
  }

  #[test]
  fn zero_denominator_is_an_error() {
    assert_eq!(rational(1, 0), Err(KernelError::ZeroDenominator));
  }

  #[test]
  fn rational_requires_integer_operands() {
    let half = rational(1, 2).unwrap();
    assert_eq!(rational_from_expressions(&half, &integer(3)), Err(KernelError::NonIntegerRational));
    assert_eq!(rational_from_expressions(&integer(3), &integer(9)).unwrap(), rational(1, 3).unwrap());
  }

  #[test]
  fn exact_powers() {
    let two_thirds = BigRational::new(BigInt::from(2), BigInt::from(3));
    assert_eq!(pow_number(&two_thirds, &BigInt::from(2)).unwrap(), rational(4, 9).unwrap());
    assert_eq!(pow_number(&two_thirds, &BigInt::from(-1)).unwrap(), rational(3, 2).unwrap());
    assert_eq!(
      pow_number(&BigRational::zero(), &BigInt::from(-1)),
      Err(KernelError::ZeroToNonPositivePower)
    );
  }

  #[test]
  fn oversized_powers_are_refused() {
    let huge = BigInt::from(1_000_000_000_000i64);
    assert_eq!(
      pow_number(&BigRational::from_integer(BigInt::from(2)), &huge),
      Err(KernelError::ExponentTooLarge("1000000000000".to_string()))
    );
    assert_eq!(
      pow_number(&BigRational::new(BigInt::from(1), BigInt::from(3)), &-huge.clone()),
      Err(KernelError::ExponentTooLarge("-1000000000000".to_string()))
    );

    // Units and zero never grow.
    let minus_one = -BigRational::one();
    assert!(pow_number(&minus_one, &(huge.clone() + 1)).unwrap().is_minus_one());
    assert!(pow_number(&minus_one, &-huge.clone()).unwrap().is_one());
    assert!(pow_number(&BigRational::zero(), &huge).unwrap().is_zero());

    let power = pow_number(&BigRational::from_integer(BigInt::from(2)), &BigInt::from(4096)).unwrap();
    assert_eq!(power.as_integer().map(|value| value.bits()), Some(4097));
  }
}
