/*!

  Containers keyed by expressions.

*/

pub mod hash;

use crate::expression::Expression;

pub use hash::{FnvHashMap, FnvHashSet};

/// A substitution: each key expression is replaced by its value. Keys are matched by structural equality, so the
/// insertion order does not matter.
pub type SubstitutionMap = FnvHashMap<Expression, Expression>;
