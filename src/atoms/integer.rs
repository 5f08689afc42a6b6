/*!

Integer primitive type, arbitrary precision. The integers 0, 1 and -1 are shared: every construction path that
produces one of them returns the process-wide allocation, so `is_zero` is usually a pointer comparison.

*/

use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::{
  atom::Atom,
  error::{KernelError, KernelResult},
  expression::{minus_one, one, zero, Expression},
};


/// Creates an integer. Accepts anything `BigInt` can be built from (`i64`, `u64`, `BigInt`, …).
pub fn integer<T>(n: T) -> Expression
  where T: Into<BigInt>
{
  integer_from_big(n.into())
}

pub(crate) fn integer_from_big(n: BigInt) -> Expression {
  if n.is_zero() {
    zero()
  } else if n.is_one() {
    one()
  } else if n == -BigInt::one() {
    minus_one()
  } else {
    Expression::new(Atom::Integer(n))
  }
}

/// Parses a base-10 integer, with an optional leading sign.
pub fn integer_from_str(digits: &str) -> KernelResult<Expression> {
  BigInt::from_str(digits.trim())
    .map(integer_from_big)
    .map_err(|_| KernelError::InvalidInteger(digits.to_string()))
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_base_ten() {
    assert_eq!(integer_from_str("-12345678901234567890").unwrap().to_string(), "-12345678901234567890");
    assert!(integer_from_str("0").unwrap().ptr_eq(&zero()));
    assert_eq!(
      integer_from_str("12a"),
      Err(KernelError::InvalidInteger("12a".to_string()))
    );
  }

  #[test]
  fn native_widths() {
    assert_eq!(integer(7u64), integer(7i64));
    assert_eq!(integer(u64::MAX).to_string(), "18446744073709551615");
  }
}
