/*!

Recoverable errors. These are the invalid operations a caller can ask for: they are reported, never asserted.
Violations of the canonical-form contract are bugs and are not represented here; see `assert_canonical!`.

*/

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KernelError {
  #[error("zero cannot be raised to a non-positive power")]
  ZeroToNonPositivePower,

  #[error("rational with a zero denominator")]
  ZeroDenominator,

  #[error("a rational can only be built from two integers")]
  NonIntegerRational,

  #[error("can only differentiate with respect to a symbol, got `{0}`")]
  NotASymbol(String),

  #[error("exponent `{0}` is too large to evaluate exactly")]
  ExponentTooLarge(String),

  #[error("`{0}` is not a base-10 integer")]
  InvalidInteger(String),

  #[error("cannot substitute the non-symbol `{0}` for a differentiation variable")]
  DerivativeVariableSubstitution(String),

  #[error("handle holds no expression")]
  EmptyHandle,
}

pub type KernelResult<T> = Result<T, KernelError>;
