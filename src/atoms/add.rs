/*!

Sums. A `Sum` holds a numeric coefficient and a list of `(term, multiplicity)` pairs sorted by term. The factory
`add_many` is the only way to build one, and it:

  1. flattens nested sums,
  2. folds every number into the coefficient,
  3. splits the numeric coefficient off of products, so `2*x` contributes the term `x` with multiplicity 2,
  4. merges equal terms by adding multiplicities, dropping terms whose multiplicity becomes zero,
  5. returns a bare number, or a bare (possibly scaled) term, when no sum is needed,
  6. sorts the terms by the normal-form order.

*/

use std::{
  cmp::Ordering,
  collections::hash_map::Entry,
};

use crate::data_structures::FnvHashMap;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::{
  atom::{cmp_pairs, Atom},
  atoms::{
    mul::Product,
    rational::{number, value_of},
  },
  expression::{zero, Expression},
  format::{DisplayForm, ExpressionFormatter, Formattable},
  logging::{log_with, Channel},
  normal_form::NormalFormOrder,
};


#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Sum {
  coefficient: Expression,
  terms      : Vec<(Expression, Expression)>,
}


impl Sum {
  /// The numeric part of the sum; zero when there is none.
  pub fn coefficient(&self) -> &Expression {
    &self.coefficient
  }

  /// The `(term, multiplicity)` pairs, in normal-form order of the terms.
  pub fn terms(&self) -> &[(Expression, Expression)] {
    &self.terms
  }

  /// The summands as expressions: each term times its multiplicity, then the coefficient if it is not zero.
  pub(crate) fn operands(&self) -> Vec<Expression> {
    let mut operands: Vec<Expression> =
      self.terms
          .iter()
          .map(|(term, multiplicity)| scale(&value_of(multiplicity), term))
          .collect();
    if !self.coefficient.is_zero() {
      operands.push(self.coefficient.clone());
    }
    operands
  }

  pub(crate) fn is_canonical(&self) -> bool {
    if !self.coefficient.is_number() || self.terms.is_empty() {
      return false;
    }
    // A single term with no constant is a (scaled) term, not a sum.
    if self.coefficient.is_zero() && self.terms.len() == 1 {
      return false;
    }

    let terms_ok = self.terms.iter().all(|(term, multiplicity)| {
      multiplicity.is_number()
          && !multiplicity.is_zero()
          && match term.atom() {
               Atom::Integer(_) | Atom::Rational(_) | Atom::Add(_) => false,
               Atom::Mul(product)                                  => product.coefficient().is_one(),
               _                                                   => true
             }
    });

    terms_ok && self.terms.windows(2).all(|pair| pair[0].0.is_less(&pair[1].0))
  }
}


impl NormalFormOrder for Sum {
  fn cmp(&self, other: &Self) -> Ordering {
    cmp_pairs(&self.terms, &other.terms)
        .then_with(|| NormalFormOrder::cmp(&self.coefficient, &other.coefficient))
  }
}


impl Formattable for Sum {
  fn format(&self, formatter: &ExpressionFormatter) -> String {
    let operands = self.operands();
    match formatter.form {
      DisplayForm::Full => {
        format!(
          "Add[{}]",
          operands.iter().map(|o| o.format(formatter)).collect::<Vec<_>>().join(", ")
        )
      }

      DisplayForm::Input => {
        let mut text = String::new();
        for (index, operand) in operands.iter().enumerate() {
          let piece = operand.format(formatter);
          match (index, piece.strip_prefix('-')) {
            (0, _)             => text.push_str(&piece),
            (_, Some(negated)) => {
              text.push_str(" - ");
              text.push_str(negated);
            }
            (_, None)          => {
              text.push_str(" + ");
              text.push_str(&piece);
            }
          }
        }
        text
      }
    }
  }
}


/// `left + right`
pub fn add(left: &Expression, right: &Expression) -> Expression {
  add_many([left.clone(), right.clone()])
}

/// The canonical sum of `operands`.
pub fn add_many<I>(operands: I) -> Expression
  where I: IntoIterator<Item = Expression>
{
  let mut coefficient = BigRational::zero();
  let mut terms: FnvHashMap<Expression, BigRational> = FnvHashMap::default();

  for operand in operands {
    absorb(&mut coefficient, &mut terms, operand);
  }

  let mut terms: Vec<(Expression, BigRational)> =
    terms.into_iter()
         .filter(|(_, multiplicity)| !multiplicity.is_zero())
         .collect();

  log_with(Channel::Debug, 4, || {
    format!("add: {} distinct terms, coefficient {}", terms.len(), coefficient)
  });

  if terms.is_empty() {
    return number(coefficient);
  }
  if coefficient.is_zero() && terms.len() == 1 {
    if let Some((term, multiplicity)) = terms.pop() {
      return scale(&multiplicity, &term);
    }
  }

  terms.sort_by(|(a, _), (b, _)| NormalFormOrder::cmp(a, b));

  Expression::new(Atom::Add(Sum {
    coefficient: number(coefficient),
    terms      : terms.into_iter()
                      .map(|(term, multiplicity)| (term, number(multiplicity)))
                      .collect(),
  }))
}


fn absorb(coefficient: &mut BigRational, terms: &mut FnvHashMap<Expression, BigRational>, operand: Expression) {
  match operand.atom() {
    Atom::Integer(_) | Atom::Rational(_) => {
      *coefficient += value_of(&operand);
    }

    Atom::Add(sum) => {
      *coefficient += value_of(&sum.coefficient);
      for (term, multiplicity) in sum.terms.iter() {
        accumulate(terms, term.clone(), value_of(multiplicity));
      }
    }

    Atom::Mul(product) if !product.coefficient().is_one() => {
      accumulate(terms, product.without_coefficient(), value_of(product.coefficient()));
    }

    _ => {
      accumulate(terms, operand, BigRational::one());
    }
  }
}


fn accumulate(terms: &mut FnvHashMap<Expression, BigRational>, term: Expression, multiplicity: BigRational) {
  match terms.entry(term) {
    Entry::Occupied(mut entry) => {
      *entry.get_mut() += multiplicity;
    }
    Entry::Vacant(entry) => {
      entry.insert(multiplicity);
    }
  }
}


/**
  `factor * expression` for a numeric `factor`, built directly. The product of a number and a canonical expression
  needs no merging: the number only changes the coefficient, or the multiplicities of a sum. Negation is
  `scale(-1, e)`.
*/
pub(crate) fn scale(factor: &BigRational, expression: &Expression) -> Expression {
  if factor.is_zero() {
    return zero();
  }
  if factor.is_one() {
    return expression.clone();
  }

  match expression.atom() {
    Atom::Integer(_) | Atom::Rational(_) => number(factor * value_of(expression)),

    // A number times a sum is distributed: `2*(x + 1)` is `2*x + 2`.
    Atom::Add(sum) => {
      Expression::new(Atom::Add(Sum {
        coefficient: number(factor * value_of(&sum.coefficient)),
        terms      : sum.terms
                        .iter()
                        .map(|(term, multiplicity)| (term.clone(), number(factor * value_of(multiplicity))))
                        .collect(),
      }))
    }

    Atom::Mul(product) => {
      Product::with_coefficient(factor * value_of(product.coefficient()), product.factors().to_vec())
    }

    _ => {
      Product::with_coefficient(factor.clone(), vec![expression.as_base_exponent()])
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::atoms::{integer, mul, rational, sin, symbol};

  #[test]
  fn numbers_fold() {
    let five = add(&integer(2), &integer(3));
    assert!(five.is_integer());
    assert_eq!(five, integer(5));

    let one = add(&rational(1, 2).unwrap(), &rational(1, 2).unwrap());
    assert!(one.ptr_eq(&crate::expression::one()));
  }

  #[test]
  fn like_terms_merge() {
    let x = symbol("x");
    let two_x = add(&x, &x);
    assert_eq!(two_x, mul(&integer(2), &x).unwrap());
    assert!(matches!(two_x.atom(), Atom::Mul(_)));

    let three_x = add(&two_x, &x);
    assert_eq!(three_x.to_string(), "3*x");
  }

  #[test]
  fn cancellation_returns_identity() {
    let x = symbol("x");
    let minus_x = scale(&-BigRational::one(), &x);
    let nothing = add(&x, &minus_x);
    assert!(nothing.ptr_eq(&zero()));

    let y = symbol("y");
    let just_y = add_many([x.clone(), y.clone(), minus_x]);
    assert!(just_y.ptr_eq(&y));
  }

  #[test]
  fn flattening_and_order() {
    let (x, y, z) = (symbol("x"), symbol("y"), symbol("z"));
    let left  = add(&add(&x, &y), &z);
    let right = add(&z, &add(&y, &x));
    assert_eq!(left, right);

    if let Atom::Add(sum) = left.atom() {
      assert_eq!(sum.terms().len(), 3);
      assert!(sum.terms().iter().all(|(t, _)| !matches!(t.atom(), Atom::Add(_))));
    } else {
      panic!("expected a sum, got {}", left);
    }
  }

  #[test]
  fn scaled_products_collect() {
    let x = symbol("x");
    let y = symbol("y");
    let xy = mul(&x, &y).unwrap();
    let three_xy = mul(&integer(3), &xy).unwrap();
    let four_xy = add(&xy, &three_xy);
    assert_eq!(four_xy, mul(&integer(4), &xy).unwrap());
  }

  #[test]
  fn numbers_distribute_over_sums() {
    let x = symbol("x");
    let sum = add(&x, &integer(1));
    let doubled = mul(&integer(2), &sum).unwrap();
    assert_eq!(doubled, add(&mul(&integer(2), &x).unwrap(), &integer(2)));
    assert!(matches!(doubled.atom(), Atom::Add(_)));
    assert!(add(&doubled, &scale(&BigRational::from_integer((-2).into()), &sum)).ptr_eq(&zero()));
  }

  #[test]
  fn input_form() {
    let x = symbol("x");
    let e = add_many([sin(&x), integer(-2), scale(&BigRational::from_integer((-3).into()), &x)]);
    assert_eq!(e.to_string(), "-3*x + sin(x) - 2");
    assert_eq!(format!("{:?}", e), "Add[Mul[-3, x], Sin[x], -2]");
  }
}
