//! Property-based tests of the `Basic` contract over randomly built expressions:
//! - hashing and equality agree, and rebuilding a node through its factory reproduces it
//! - `compare` is a total order consistent with equality
//! - the factories are insensitive to operand order
//! - differentiation and substitution that touch nothing return zero or the input itself

use quickcheck::{Arbitrary, Gen, QuickCheck};

use crate::{
  arithmetic::neg,
  atoms::{add, cos, function_symbol, integer, mul, pow, rational, sin, symbol},
  data_structures::SubstitutionMap,
  expression::{zero, Expression},
};
use std::cmp::Ordering;


#[derive(Clone, Debug)]
struct Expr(Expression);

impl Arbitrary for Expr {
  fn arbitrary(g: &mut Gen) -> Expr {
    // Limit depth so expansion of numeric powers stays small.
    let depth = g.size().min(3);
    Expr(generate(g, depth))
  }
}

fn leaf(g: &mut Gen) -> Expression {
  match u8::arbitrary(g) % 6 {
    0 => integer(i64::from(i8::arbitrary(g))),
    1 => rational(i64::from(i8::arbitrary(g)), i64::from(u8::arbitrary(g) % 7) + 1).unwrap(),
    2 => symbol("x"),
    3 => symbol("y"),
    _ => symbol("z"),
  }
}

fn generate(g: &mut Gen, depth: usize) -> Expression {
  if depth == 0 || u8::arbitrary(g) % 4 == 0 {
    return leaf(g);
  }

  let left = generate(g, depth - 1);
  match u8::arbitrary(g) % 8 {
    0 | 1 => add(&left, &generate(g, depth - 1)),
    2 | 3 => mul(&left, &generate(g, depth - 1)).unwrap_or(left),
    4     => pow(&left, &integer(i64::from(i8::arbitrary(g) % 4))).unwrap_or(left),
    5     => sin(&left),
    6     => cos(&left),
    _     => function_symbol("f", &left),
  }
}

fn tests() -> QuickCheck {
  QuickCheck::new().tests(200).gen(Gen::new(8))
}


#[test]
fn rebuilding_reproduces_the_node() {
  fn prop(e: Expr) -> bool {
    let x = symbol("x");
    let mut map = SubstitutionMap::default();
    map.insert(x.clone(), x);
    match e.0.subs(&map) {
      Ok(rebuilt) => rebuilt == e.0 && rebuilt.hash_value() == e.0.hash_value(),
      Err(_)      => false,
    }
  }
  tests().quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn compare_is_a_total_order() {
  fn prop(a: Expr, b: Expr, c: Expr) -> bool {
    let (a, b, c) = (a.0, b.0, c.0);
    let reflexive     = a.compare(&a) == Ordering::Equal;
    let antisymmetric = a.compare(&b) == b.compare(&a).reverse();
    let consistent    = (a.compare(&b) == Ordering::Equal) == (a == b);
    let transitive    = !(a.compare(&b) != Ordering::Greater && b.compare(&c) != Ordering::Greater)
                        || a.compare(&c) != Ordering::Greater;
    reflexive && antisymmetric && consistent && transitive
  }
  tests().quickcheck(prop as fn(Expr, Expr, Expr) -> bool);
}

#[test]
fn equal_values_hash_equal() {
  fn prop(a: Expr, b: Expr) -> bool {
    let (a, b) = (a.0, b.0);
    a != b || a.hash_value() == b.hash_value()
  }
  tests().quickcheck(prop as fn(Expr, Expr) -> bool);
}

#[test]
fn operand_order_does_not_matter() {
  fn prop(a: Expr, b: Expr) -> bool {
    let (a, b) = (a.0, b.0);
    let sums_commute     = add(&a, &b) == add(&b, &a);
    let products_commute = match (mul(&a, &b), mul(&b, &a)) {
      (Ok(ab), Ok(ba)) => ab == ba,
      _                => false,
    };
    sums_commute && products_commute
  }
  tests().quickcheck(prop as fn(Expr, Expr) -> bool);
}

#[test]
fn negation_cancels() {
  fn prop(a: Expr) -> bool {
    add(&a.0, &neg(&a.0)).ptr_eq(&zero())
  }
  tests().quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn untouched_variables() {
  fn prop(a: Expr) -> bool {
    // `w` never occurs in a generated expression.
    let w = symbol("w");
    let mut map = SubstitutionMap::default();
    map.insert(w.clone(), integer(1));

    let derivative_is_zero = matches!(a.0.diff(&w), Ok(d) if d.ptr_eq(&zero()));
    let substitution_is_identity = matches!(a.0.subs(&map), Ok(s) if s.ptr_eq(&a.0));
    derivative_is_zero && substitution_is_identity
  }
  tests().quickcheck(prop as fn(Expr) -> bool);
}
