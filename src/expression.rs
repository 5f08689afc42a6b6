/*!

An `Expression` is a shared, immutable handle to an `Atom`. Expressions form a DAG: a subexpression that appears in
several places is one allocation referenced by all of its parents, and it lives as long as its longest holder. No
node is mutated after construction; every "edit" builds a new node.

The handle is an `Arc`, so expressions can be shared between threads. The structural hash is computed once, when
the node is created, and cached beside it.

Equality is structural, with two shortcuts: two handles to the same allocation are equal, and two nodes with
different cached hashes are not. Because the factories keep every node in canonical form, structural equality is
also mathematical equality for everything the factories know how to simplify.

*/

use std::{
  cmp::Ordering,
  fmt,
  hash::{Hash, Hasher},
  sync::Arc
};

use crate::data_structures::FnvHashSet;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::{
  atom::{Atom, AtomKind},
  format::{DisplayForm, ExpressionFormatter, Formattable},
  interner::{InternedString, resolve_str},
  normal_form::NormalFormOrder,
};


lazy_static! {
  static ref ZERO     : Expression = Expression::new(Atom::Integer(BigInt::zero()));
  static ref ONE      : Expression = Expression::new(Atom::Integer(BigInt::one()));
  static ref MINUS_ONE: Expression = Expression::new(Atom::Integer(-BigInt::one()));
}

/// The shared integer 0. Every integer zero the kernel produces is this allocation.
pub fn zero() -> Expression {
  ZERO.clone()
}

/// The shared integer 1.
pub fn one() -> Expression {
  ONE.clone()
}

/// The shared integer -1.
pub fn minus_one() -> Expression {
  MINUS_ONE.clone()
}


#[derive(Debug)]
struct Node {
  hash: u64,
  atom: Atom,
}

#[derive(Clone)]
pub struct Expression(Arc<Node>);


impl Expression {

  /// Allocates a node. Only factory functions call this, after they have put `atom` in canonical form.
  pub(crate) fn new(atom: Atom) -> Expression {
    assert_canonical!(atom.is_canonical(), "a non-canonical {} reached its constructor: {}", atom.kind(), atom);
    let hash = atom.structural_hash();
    Expression(Arc::new(Node { hash, atom }))
  }

  pub fn atom(&self) -> &Atom {
    &self.0.atom
  }

  pub fn kind(&self) -> AtomKind {
    self.0.atom.kind()
  }

  /// The cached structural hash.
  pub fn hash_value(&self) -> u64 {
    self.0.hash
  }

  /// Are `self` and `other` the same allocation? Operations that change nothing return their input, so this
  /// detects "no change" without a structural comparison.
  pub fn ptr_eq(&self, other: &Expression) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// The normal-form order, as the three-way comparison of the `Basic` contract.
  pub fn compare(&self, other: &Expression) -> Ordering {
    NormalFormOrder::cmp(self, other)
  }

  // region Predicates

  pub fn is_integer(&self) -> bool {
    matches!(self.atom(), Atom::Integer(_))
  }

  pub fn is_rational(&self) -> bool {
    matches!(self.atom(), Atom::Rational(_))
  }

  pub fn is_number(&self) -> bool {
    self.atom().is_number()
  }

  pub fn is_symbol(&self) -> bool {
    matches!(self.atom(), Atom::Symbol(_))
  }

  pub fn is_zero(&self) -> bool {
    self.ptr_eq(&ZERO) || matches!(self.atom(), Atom::Integer(n) if n.is_zero())
  }

  pub fn is_one(&self) -> bool {
    self.ptr_eq(&ONE) || matches!(self.atom(), Atom::Integer(n) if n.is_one())
  }

  pub fn is_minus_one(&self) -> bool {
    self.ptr_eq(&MINUS_ONE) || matches!(self.atom(), Atom::Integer(n) if *n == -BigInt::one())
  }

  // endregion

  /// The value of a number as a rational, `None` for anything else.
  pub fn as_rational(&self) -> Option<BigRational> {
    self.atom().as_rational()
  }

  pub fn as_integer(&self) -> Option<&BigInt> {
    match self.atom() {
      Atom::Integer(n) => Some(n),
      _                => None
    }
  }

  /// The interned name of a symbol.
  pub fn symbol_name(&self) -> Option<InternedString> {
    match self.atom() {
      Atom::Symbol(name) => Some(*name),
      _                  => None
    }
  }

  /// Splits a factor into `(base, exponent)`: `Pow(b, e)` gives `(b, e)`, anything else `(self, 1)`.
  pub fn as_base_exponent(&self) -> (Expression, Expression) {
    match self.atom() {
      Atom::Pow(base, exponent) => (base.clone(), exponent.clone()),
      _                         => (self.clone(), one())
    }
  }

  /// The direct operands of the node, in stored order. Numeric metadata of `Add` and `Mul` (multiplicities and
  /// exponents) is not included, but the numeric coefficient is when it is not the identity.
  pub fn operands(&self) -> Vec<Expression> {
    match self.atom() {
      | Atom::Integer(_)
      | Atom::Rational(_)
      | Atom::Symbol(_) => Vec::new(),

      Atom::Add(sum)                => sum.operands(),
      Atom::Mul(product)            => product.operands(),
      Atom::Pow(base, exponent)     => vec![base.clone(), exponent.clone()],
      | Atom::Sin(arg)
      | Atom::Cos(arg)
      | Atom::FunctionSymbol(_, arg)
      | Atom::Derivative(arg, _)    => vec![arg.clone()],
    }
  }

  /// Does the symbol named `name` occur anywhere in `self`? Differentiation variables of a `Derivative` count.
  pub fn has_symbol(&self, name: InternedString) -> bool {
    match self.atom() {
      | Atom::Integer(_)
      | Atom::Rational(_)                 => false,
      Atom::Symbol(s)                     => *s == name,
      Atom::Add(sum)                      => sum.terms().iter().any(|(t, _)| t.has_symbol(name)),
      Atom::Mul(product)                  => {
        product.factors().iter().any(|(b, e)| b.has_symbol(name) || e.has_symbol(name))
      }
      Atom::Pow(base, exponent)           => base.has_symbol(name) || exponent.has_symbol(name),
      | Atom::Sin(arg)
      | Atom::Cos(arg)
      | Atom::FunctionSymbol(_, arg)      => arg.has_symbol(name),
      Atom::Derivative(arg, symbols)      => symbols.contains(&name) || arg.has_symbol(name),
    }
  }

  /// The set of names of all symbols occurring in `self`.
  pub fn free_symbols(&self) -> FnvHashSet<InternedString> {
    let mut found = FnvHashSet::default();
    self.collect_symbols(&mut found);
    found
  }

  fn collect_symbols(&self, found: &mut FnvHashSet<InternedString>) {
    match self.atom() {
      Atom::Symbol(s) => {
        found.insert(*s);
      }
      Atom::Derivative(arg, symbols) => {
        found.extend(symbols.iter().copied());
        arg.collect_symbols(found);
      }
      Atom::Mul(product) => {
        for (base, exponent) in product.factors() {
          base.collect_symbols(found);
          exponent.collect_symbols(found);
        }
      }
      _ => {
        for operand in self.operands() {
          operand.collect_symbols(found);
        }
      }
    }
  }

  /// The name of a symbol as a string, for diagnostics.
  pub fn name(&self) -> Option<String> {
    self.symbol_name().map(resolve_str)
  }
}


impl PartialEq for Expression {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other) || (self.0.hash == other.0.hash && self.0.atom == other.0.atom)
  }
}

impl Eq for Expression {}


impl Hash for Expression {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_u64(self.0.hash)
  }
}


impl NormalFormOrder for Expression {
  fn cmp(&self, other: &Self) -> Ordering {
    if self.ptr_eq(other) {
      return Ordering::Equal;
    }
    NormalFormOrder::cmp(self.atom(), other.atom())
  }
}


impl Formattable for Expression {
  fn format(&self, formatter: &ExpressionFormatter) -> String {
    self.atom().format(formatter)
  }
}

display_formattable_impl!(Expression);

impl fmt::Debug for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.format(&DisplayForm::Full.into()))
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::atoms::{add, integer, symbol, sin};

  #[test]
  fn singletons_are_shared() {
    assert!(integer(0).ptr_eq(&zero()));
    assert!(integer(1).ptr_eq(&one()));
    assert!(integer(-1).ptr_eq(&minus_one()));
    assert!(zero().is_zero());
    assert!(!one().is_zero());
  }

  #[test]
  fn equal_expressions_hash_equal() {
    let x = symbol("x");
    let a = add(&x, &integer(1));
    let b = add(&integer(1), &symbol("x"));
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_eq!(a.hash_value(), b.hash_value());
    assert_eq!(a.compare(&b), Ordering::Equal);
  }

  #[test]
  fn symbol_queries() {
    let x = symbol("x");
    let y = symbol("y");
    let e = sin(&add(&x, &y));
    let xn = x.symbol_name().unwrap();
    assert!(e.has_symbol(xn));
    assert!(!e.has_symbol(symbol("z").symbol_name().unwrap()));
    assert_eq!(e.free_symbols().len(), 2);
    assert_eq!(x.name().as_deref(), Some("x"));
  }

  #[test]
  fn debug_shows_full_form() {
    let e = sin(&symbol("x"));
    assert_eq!(format!("{:?}", e), "Sin[x]");
    assert_eq!(format!("{}", e), "sin(x)");
  }

  #[test]
  #[cfg(any(debug_assertions, feature = "strict-canonical"))]
  #[should_panic(expected = "non-canonical Sin")]
  fn non_canonical_node_is_rejected() {
    // `sin(0)` folds to 0 in its factory, so a `Sin` node of 0 breaks the contract.
    Expression::new(Atom::Sin(zero()));
  }
}
