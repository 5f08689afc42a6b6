/*!

A small symbolic algebra kernel: exact numbers, symbols, sums, products, powers, `sin`, `cos`, unevaluated
functions and formal derivatives, held as a shared immutable DAG and kept in a canonical form by the factory
functions that build them.

```
use symcore::{add, integer, mul, pow, sin, symbol};

let x = symbol("x");
assert_eq!(add(&x, &x), mul(&integer(2), &x).unwrap());

let e = sin(&pow(&x, &integer(2)).unwrap());
assert_eq!(e.diff(&x).unwrap().to_string(), "2*x*cos(x**2)");
```

*/

/// Asserts the canonical-form contract at a node constructor. Active in debug builds, and in release builds with the
/// `strict-canonical` feature. A failure is a bug in a factory, never a user error.
macro_rules! assert_canonical {
  ($condition:expr, $($message:tt)+) => {
    if cfg!(any(debug_assertions, feature = "strict-canonical")) {
      assert!($condition, $($message)+);
    }
  }
}

#[macro_use]
mod format;
mod atom;
mod data_structures;
mod differentiate;
mod expand;
mod expression;
mod interner;
mod normal_form;
mod substitute;

pub mod arithmetic;
pub mod atoms;
pub mod error;
pub mod handle;
pub mod logging;

#[cfg(test)]
mod property_tests;

pub use atom::{Atom, AtomKind, DerivativeSymbols};
pub use atoms::{
  add,
  add_many,
  cos,
  derivative,
  function_symbol,
  integer,
  integer_from_str,
  mul,
  mul_many,
  pow,
  rational,
  rational_from_expressions,
  sin,
  symbol,
};
pub use arithmetic::{abs, div, neg, sub};
pub use data_structures::SubstitutionMap;
pub use error::{KernelError, KernelResult};
pub use expression::{minus_one, one, zero, Expression};
pub use format::{DisplayForm, ExpressionFormatter, Formattable};
pub use handle::BasicHandle;
pub use interner::InternedString;
pub use normal_form::NormalFormOrder;
