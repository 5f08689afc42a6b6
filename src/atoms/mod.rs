/*!

The factories. Each node kind has a constructor function here, and these functions are the only way to build a
node: they put their arguments in canonical form first, so a node of a given value has exactly one shape.

  * numbers: `integer`, `integer_from_str`, `rational`, `rational_from_expressions`
  * `symbol`
  * `add`, `add_many`, `mul`, `mul_many`, `pow`
  * `sin`, `cos`
  * `function_symbol`, `derivative`

The ones that can be asked for something invalid (a zero denominator, zero to a negative power, a derivative by a
non-symbol) return a `KernelResult`.

*/

pub mod add;
pub mod derivative;
pub mod function;
pub mod integer;
pub mod mul;
pub mod pow;
pub mod rational;
pub mod symbol;
pub mod trig;

pub use add::{add, add_many};
pub use derivative::derivative;
pub use function::function_symbol;
pub use integer::{integer, integer_from_str};
pub use mul::{mul, mul_many};
pub use pow::pow;
pub use rational::{rational, rational_from_expressions};
pub use symbol::symbol;
pub use trig::{cos, sin};
