/*

# Normalization

Sums and products are commutative and associative, so `x + y`, `y + x` and `(x + y) + 0` name one value. To make
structural equality coincide with that, every `Add` and `Mul` is built in a normal form:

> An _associative normal form_ (A-normal form) of a term is obtained by rewriting it with the associativity axiom
> from left to right as long as possible. … A commutative normal form (C-normal form) of a ground term is obtained
> by rearranging arguments of commutative function symbols to obtain the minimal term with respect to the defined
> ordering.

Flattening gives the A-normal form. Sorting the operands by a strict total order gives the C-normal form. On top
of that the factories collect like terms and fold numbers, so the kernel's normal form is also unique for the
simple arithmetic identities `x + x = 2*x`, `x*x = x**2` and `2 + 3 = 5`.

The order itself is arbitrary but fixed. Atoms of different kinds are ordered by their kind (the declaration order
of `AtomKind`). Atoms of the same kind are ordered by their contents. See `Atom::cmp`.

*/

use std::cmp::Ordering;

/// A total order on all expressions.
///
/// The total ordering of expressions does not use Rust's in-built `Ord` trait, because implementors may have a
/// different ordering that is natural for the type (numbers, for example), and normalization does not require
/// Rust's ordering machinery.
pub trait NormalFormOrder {
  fn cmp(&self, other: &Self) -> Ordering;

  fn is_equal(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }

  fn is_greater(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Greater
  }

  fn is_less(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Less
  }
}

/// Pairs compare on the first component, then the second.
impl<A: NormalFormOrder, B: NormalFormOrder> NormalFormOrder for (A, B) {
  fn cmp(&self, other: &Self) -> Ordering {
    NormalFormOrder::cmp(&self.0, &other.0).then_with(|| NormalFormOrder::cmp(&self.1, &other.1))
  }
}

/// Lexicographic comparison of two sequences under `NormalFormOrder`, shorter sequences first on a tie.
pub(crate) fn cmp_sequences<'a, T, I>(left: I, right: I) -> Ordering
  where T: NormalFormOrder + 'a,
        I: ExactSizeIterator<Item = &'a T>
{
  let (left_len, right_len) = (left.len(), right.len());
  for (l, r) in left.zip(right) {
    let ordering = NormalFormOrder::cmp(l, r);
    if ordering != Ordering::Equal {
      return ordering;
    }
  }
  // If we get this far, expression pairs have been equal. Compare lengths.
  left_len.cmp(&right_len)
}
