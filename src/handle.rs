/*!

A mutable slot holding one expression, for callers that work with handles rather than values: a handle is created
empty with `new`, filled by a setter or an arithmetic operation that writes its result into it, copied with
`assign`, and released with `free`. Copying a handle copies the reference to the shared expression, never the
expression itself.

Reading an empty handle is `KernelError::EmptyHandle`. Every operation that can be asked for something invalid
reports it through its `KernelResult` and leaves the destination handle as it was.

*/

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::{
  arithmetic,
  atoms::{
    integer,
    integer_from_str,
    rational,
    rational::rational_from_big,
    rational_from_expressions,
    symbol,
  },
  error::{KernelError, KernelResult},
  expression::Expression,
};


#[derive(Clone, Default, Debug)]
pub struct BasicHandle {
  value: Option<Expression>,
}


impl BasicHandle {
  pub fn new() -> BasicHandle {
    BasicHandle::default()
  }

  /// Releases the handle's reference to its expression.
  pub fn free(self) {}

  /// Makes `self` refer to the expression `other` refers to.
  pub fn assign(&mut self, other: &BasicHandle) -> KernelResult<()> {
    let value = other.get()?.clone();
    self.value = Some(value);
    Ok(())
  }

  pub fn get(&self) -> KernelResult<&Expression> {
    self.value.as_ref().ok_or(KernelError::EmptyHandle)
  }

  pub fn set(&mut self, value: Expression) {
    self.value = Some(value);
  }

  // region Leaf setters

  pub fn set_symbol(&mut self, name: &str) {
    self.set(symbol(name));
  }

  pub fn set_i64(&mut self, value: i64) {
    self.set(integer(value));
  }

  pub fn set_u64(&mut self, value: u64) {
    self.set(integer(value));
  }

  pub fn set_big_integer(&mut self, value: &BigInt) {
    self.set(integer(value.clone()));
  }

  /// Parses a base-10 integer.
  pub fn set_integer_str(&mut self, digits: &str) -> KernelResult<()> {
    let value = integer_from_str(digits)?;
    self.set(value);
    Ok(())
  }

  /// Sets `self` to `numerator/denominator`. Fails unless both handles hold integers.
  pub fn set_rational(&mut self, numerator: &BasicHandle, denominator: &BasicHandle) -> KernelResult<()> {
    let value = rational_from_expressions(numerator.get()?, denominator.get()?)?;
    self.set(value);
    Ok(())
  }

  pub fn set_rational_i64(&mut self, numerator: i64, denominator: i64) -> KernelResult<()> {
    let value = rational(numerator, denominator)?;
    self.set(value);
    Ok(())
  }

  pub fn set_rational_u64(&mut self, numerator: u64, denominator: u64) -> KernelResult<()> {
    let value = rational(numerator, denominator)?;
    self.set(value);
    Ok(())
  }

  /// Sets `self` to `value` in lowest terms. `value` need not be reduced, and a zero denominator is an error.
  pub fn set_big_rational(&mut self, value: &BigRational) -> KernelResult<()> {
    let value = rational_from_big(value.numer().clone(), value.denom().clone())?;
    self.set(value);
    Ok(())
  }

  // endregion

  // region Integer getters

  /// The held integer, if it is one and fits.
  pub fn get_i64(&self) -> Option<i64> {
    self.value.as_ref()?.as_integer()?.to_i64()
  }

  pub fn get_u64(&self) -> Option<u64> {
    self.value.as_ref()?.as_integer()?.to_u64()
  }

  pub fn get_big_integer(&self) -> Option<BigInt> {
    self.value.as_ref()?.as_integer().cloned()
  }

  // endregion

  // region Arithmetic

  pub fn add(&mut self, a: &BasicHandle, b: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::add(a.get()?, b.get()?);
    self.set(value);
    Ok(())
  }

  pub fn sub(&mut self, a: &BasicHandle, b: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::sub(a.get()?, b.get()?);
    self.set(value);
    Ok(())
  }

  pub fn mul(&mut self, a: &BasicHandle, b: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::mul(a.get()?, b.get()?)?;
    self.set(value);
    Ok(())
  }

  pub fn div(&mut self, a: &BasicHandle, b: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::div(a.get()?, b.get()?)?;
    self.set(value);
    Ok(())
  }

  pub fn pow(&mut self, a: &BasicHandle, b: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::pow(a.get()?, b.get()?)?;
    self.set(value);
    Ok(())
  }

  pub fn neg(&mut self, a: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::neg(a.get()?);
    self.set(value);
    Ok(())
  }

  pub fn abs(&mut self, a: &BasicHandle) -> KernelResult<()> {
    let value = arithmetic::abs(a.get()?);
    self.set(value);
    Ok(())
  }

  pub fn expand(&mut self, a: &BasicHandle) -> KernelResult<()> {
    let value = a.get()?.expand()?;
    self.set(value);
    Ok(())
  }

  /// Sets `self` to the derivative of `expr` by `symbol`. Fails if `symbol` does not hold a symbol.
  pub fn diff(&mut self, expr: &BasicHandle, symbol: &BasicHandle) -> KernelResult<()> {
    let value = expr.get()?.diff(symbol.get()?)?;
    self.set(value);
    Ok(())
  }

  // endregion

  // region Introspection

  pub fn is_integer(&self) -> bool {
    self.value.as_ref().map_or(false, Expression::is_integer)
  }

  pub fn is_rational(&self) -> bool {
    self.value.as_ref().map_or(false, Expression::is_rational)
  }

  pub fn is_symbol(&self) -> bool {
    self.value.as_ref().map_or(false, Expression::is_symbol)
  }

  /// The input form of the held expression, as an owned string.
  pub fn to_text(&self) -> KernelResult<String> {
    Ok(self.get()?.to_string())
  }

  // endregion
}


impl fmt::Display for BasicHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.value {
      Some(value) => write!(f, "{}", value),
      None        => write!(f, "<empty>"),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lifecycle() {
    let mut a = BasicHandle::new();
    assert_eq!(a.to_text(), Err(KernelError::EmptyHandle));

    a.set_symbol("x");
    let mut b = BasicHandle::new();
    b.assign(&a).unwrap();
    assert!(b.get().unwrap().ptr_eq(a.get().unwrap()));

    a.set_i64(3);
    assert_eq!(b.to_text().unwrap(), "x");
    assert_eq!(a.get_i64(), Some(3));
    b.free();
  }

  #[test]
  fn rational_setter_requires_integers() {
    let (mut n, mut d, mut r) = (BasicHandle::new(), BasicHandle::new(), BasicHandle::new());
    n.set_i64(4);
    d.set_i64(2);
    r.set_rational(&n, &d).unwrap();
    assert!(r.is_integer());
    assert_eq!(r.get_i64(), Some(2));

    n.set_symbol("x");
    assert_eq!(r.set_rational(&n, &d), Err(KernelError::NonIntegerRational));
    // The destination is untouched by a failed operation.
    assert_eq!(r.get_i64(), Some(2));

    r.set_rational_i64(3, -6).unwrap();
    assert!(r.is_rational());
    assert_eq!(r.to_text().unwrap(), "-1/2");
  }

  #[test]
  fn big_rational_setter_reduces() {
    let mut r = BasicHandle::new();
    r.set_big_rational(&BigRational::new_raw(4.into(), 2.into())).unwrap();
    assert!(r.is_integer());
    assert_eq!(r.get_i64(), Some(2));

    r.set_big_rational(&BigRational::new_raw(3.into(), (-6).into())).unwrap();
    assert_eq!(r.to_text().unwrap(), "-1/2");

    assert_eq!(
      r.set_big_rational(&BigRational::new_raw(1.into(), 0.into())),
      Err(KernelError::ZeroDenominator)
    );
    assert_eq!(r.to_text().unwrap(), "-1/2");
  }

  #[test]
  fn arithmetic_and_diff() {
    let (mut x, mut two, mut e) = (BasicHandle::new(), BasicHandle::new(), BasicHandle::new());
    x.set_symbol("x");
    two.set_integer_str("2").unwrap();

    e.pow(&x, &two).unwrap();
    assert_eq!(e.to_text().unwrap(), "x**2");

    let mut d = BasicHandle::new();
    d.diff(&e, &x).unwrap();
    assert_eq!(d.to_text().unwrap(), "2*x");

    assert_eq!(d.diff(&e, &two), Err(KernelError::NotASymbol("2".to_string())));
    assert!(x.is_symbol() && !x.is_integer());

    let mut zero = BasicHandle::new();
    zero.set_u64(0);
    assert_eq!(e.div(&x, &zero), Err(KernelError::ZeroToNonPositivePower));
  }
}
