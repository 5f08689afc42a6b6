/*!

Products. A `Product` holds a nonzero numeric coefficient and a list of `(base, exponent)` pairs sorted by base.
The factory `mul_many`:

  1. flattens nested products,
  2. folds every number into the coefficient,
  3. merges equal bases by adding exponents (`x*x**y` is `x**(y + 1)`), dropping factors whose exponent becomes 0,
  4. re-canonicalizes each merged factor through `pow`, folding numeric results into the coefficient and
     re-flattening any factor that `pow` rewrites (`(2*x)**(1/2) * (2*x)**(1/2)` is `2*x`),
  5. returns zero for a zero coefficient, and a bare number or bare factor when no product is needed,
  6. distributes a number over a lone sum, so `2*(x + 1)` is `2*x + 2`,
  7. sorts the factors by the normal-form order of their bases.

Exponents are arbitrary expressions, so `mul` can fail in the one way `pow` can: when merging makes a zero base
meet a non-positive exponent.

*/

use std::{
  cmp::Ordering,
  collections::hash_map::Entry,
};

use crate::data_structures::FnvHashMap;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::{
  atom::{cmp_pairs, Atom, PRECEDENCE_MUL},
  atoms::{
    add::{add, scale},
    pow::{format_power, pow},
    rational::{number, value_of},
  },
  error::KernelResult,
  expression::{one, zero, Expression},
  format::{DisplayForm, ExpressionFormatter, Formattable},
  logging::{log_with, Channel},
  normal_form::NormalFormOrder,
};


#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Product {
  coefficient: Expression,
  factors    : Vec<(Expression, Expression)>,
}


impl Product {
  /// The numeric part of the product; one when there is none.
  pub fn coefficient(&self) -> &Expression {
    &self.coefficient
  }

  /// The `(base, exponent)` pairs, in normal-form order of the bases.
  pub fn factors(&self) -> &[(Expression, Expression)] {
    &self.factors
  }

  /// The coefficient (if it is not one) followed by each factor as an expression.
  pub(crate) fn operands(&self) -> Vec<Expression> {
    let mut operands = Vec::with_capacity(self.factors.len() + 1);
    if !self.coefficient.is_one() {
      operands.push(self.coefficient.clone());
    }
    operands.extend(self.factor_expressions());
    operands
  }

  /// Each `(base, exponent)` pair as the expression `base**exponent`.
  pub(crate) fn factor_expressions(&self) -> impl Iterator<Item = Expression> + '_ {
    self.factors.iter().map(|(base, exponent)| factor_expression(base, exponent))
  }

  /// The same product with coefficient one. This is the term a scaled product contributes to a sum.
  pub(crate) fn without_coefficient(&self) -> Expression {
    Product::with_coefficient(BigRational::one(), self.factors.clone())
  }

  /**
    Builds `coefficient * factors` from factors that are already a canonical product's factors. Only the
    coefficient changes, so nothing needs merging: the result is zero, a bare factor, or a product node.
  */
  pub(crate) fn with_coefficient(coefficient: BigRational, factors: Vec<(Expression, Expression)>) -> Expression {
    if coefficient.is_zero() {
      return zero();
    }
    if factors.is_empty() {
      return number(coefficient);
    }
    if coefficient.is_one() && factors.len() == 1 {
      let (base, exponent) = &factors[0];
      return factor_expression(base, exponent);
    }
    Expression::new(Atom::Mul(Product {
      coefficient: number(coefficient),
      factors,
    }))
  }

  pub(crate) fn is_canonical(&self) -> bool {
    if !self.coefficient.is_number() || self.coefficient.is_zero() || self.factors.is_empty() {
      return false;
    }
    if self.factors.len() == 1 {
      let (base, exponent) = &self.factors[0];
      // A lone factor with no coefficient is that factor, not a product, and a number times a sum is distributed.
      if self.coefficient.is_one() || (exponent.is_one() && matches!(base.atom(), Atom::Add(_))) {
        return false;
      }
    }

    // Each factor is a fixed point of `pow`.
    let factors_ok = self.factors.iter().all(|(base, exponent)| {
      !exponent.is_zero() && (exponent.is_one() || super::pow::is_canonical(base, exponent))
          && !(exponent.is_one() && matches!(base.atom(), Atom::Mul(_) | Atom::Integer(_) | Atom::Rational(_)))
    });

    factors_ok && self.factors.windows(2).all(|pair| pair[0].0.is_less(&pair[1].0))
  }
}


impl NormalFormOrder for Product {
  fn cmp(&self, other: &Self) -> Ordering {
    cmp_pairs(&self.factors, &other.factors)
        .then_with(|| NormalFormOrder::cmp(&self.coefficient, &other.coefficient))
  }
}


impl Formattable for Product {
  fn format(&self, formatter: &ExpressionFormatter) -> String {
    match formatter.form {
      DisplayForm::Full => {
        format!(
          "Mul[{}]",
          self.operands().iter().map(|o| o.format(formatter)).collect::<Vec<_>>().join(", ")
        )
      }

      DisplayForm::Input => {
        let factors =
          self.factors
              .iter()
              .map(|(base, exponent)| {
                if exponent.is_one() {
                  parenthesize(base, PRECEDENCE_MUL, formatter)
                } else {
                  format_power(base, exponent, formatter)
                }
              })
              .collect::<Vec<_>>()
              .join("*");

        if self.coefficient.is_one() {
          factors
        } else if self.coefficient.is_minus_one() {
          format!("-{}", factors)
        } else {
          format!("{}*{}", self.coefficient.format(formatter), factors)
        }
      }
    }
  }
}


/// Formats `expression`, wrapped in parentheses if it binds more loosely than `precedence`.
pub(crate) fn parenthesize(expression: &Expression, precedence: u8, formatter: &ExpressionFormatter) -> String {
  if expression.atom().precedence() < precedence {
    format!("({})", expression.format(formatter))
  } else {
    expression.format(formatter)
  }
}

/// `base**exponent` for a pair known to be a fixed point of `pow`.
fn factor_expression(base: &Expression, exponent: &Expression) -> Expression {
  if exponent.is_one() {
    base.clone()
  } else {
    Expression::new(Atom::Pow(base.clone(), exponent.clone()))
  }
}


/// `left * right`
pub fn mul(left: &Expression, right: &Expression) -> KernelResult<Expression> {
  mul_many([left.clone(), right.clone()])
}

/// The canonical product of `operands`.
pub fn mul_many<I>(operands: I) -> KernelResult<Expression>
  where I: IntoIterator<Item = Expression>
{
  let mut coefficient = BigRational::one();
  let mut exponents: FnvHashMap<Expression, Expression> = FnvHashMap::default();

  for operand in operands {
    absorb(&mut coefficient, &mut exponents, operand);
  }

  if coefficient.is_zero() {
    return Ok(zero());
  }

  let mut factors: Vec<(Expression, Expression, Expression)> = Vec::with_capacity(exponents.len());
  let mut rewritten: Vec<Expression> = Vec::new();

  for (base, exponent) in exponents {
    if exponent.is_zero() {
      continue;
    }
    let factor = pow(&base, &exponent)?;
    match factor.atom() {
      Atom::Integer(_) | Atom::Rational(_) => {
        coefficient *= value_of(&factor);
      }

      Atom::Mul(_) => rewritten.push(factor),

      _ => {
        let (new_base, new_exponent) = factor.as_base_exponent();
        if new_base == base && new_exponent == exponent {
          factors.push((base, exponent, factor));
        } else {
          rewritten.push(factor);
        }
      }
    }
  }

  log_with(Channel::Debug, 4, || {
    format!(
      "mul: {} factors, {} rewritten by pow, coefficient {}",
      factors.len(), rewritten.len(), coefficient
    )
  });

  if coefficient.is_zero() {
    return Ok(zero());
  }

  if !rewritten.is_empty() {
    // Some factor changed shape; merge again with everything else.
    rewritten.extend(factors.into_iter().map(|(_, _, factor)| factor));
    rewritten.push(number(coefficient));
    return mul_many(rewritten);
  }

  if factors.is_empty() {
    return Ok(number(coefficient));
  }
  if coefficient.is_one() && factors.len() == 1 {
    if let Some((_, _, factor)) = factors.pop() {
      return Ok(factor);
    }
  }

  if factors.len() == 1 && factors[0].1.is_one() && matches!(factors[0].0.atom(), Atom::Add(_)) {
    // A number times a sum.
    return Ok(scale(&coefficient, &factors[0].0));
  }

  factors.sort_by(|(a, _, _), (b, _, _)| NormalFormOrder::cmp(a, b));

  Ok(Expression::new(Atom::Mul(Product {
    coefficient: number(coefficient),
    factors    : factors.into_iter().map(|(base, exponent, _)| (base, exponent)).collect(),
  })))
}


fn absorb(coefficient: &mut BigRational, exponents: &mut FnvHashMap<Expression, Expression>, operand: Expression) {
  match operand.atom() {
    Atom::Integer(_) | Atom::Rational(_) => {
      *coefficient *= value_of(&operand);
    }

    Atom::Mul(product) => {
      *coefficient *= value_of(&product.coefficient);
      for (base, exponent) in product.factors.iter() {
        accumulate(exponents, base.clone(), exponent.clone());
      }
    }

    Atom::Pow(base, exponent) => {
      accumulate(exponents, base.clone(), exponent.clone());
    }

    _ => {
      accumulate(exponents, operand, one());
    }
  }
}


fn accumulate(exponents: &mut FnvHashMap<Expression, Expression>, base: Expression, exponent: Expression) {
  match exponents.entry(base) {
    Entry::Occupied(mut entry) => {
      let merged = add(entry.get(), &exponent);
      *entry.get_mut() = merged;
    }
    Entry::Vacant(entry) => {
      entry.insert(exponent);
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    atoms::{add_many, cos, integer, rational, sin, symbol},
    error::KernelError,
  };

  #[test]
  fn square_is_a_power() {
    let x = symbol("x");
    let xx = mul(&x, &x).unwrap();
    assert_eq!(xx, pow(&x, &integer(2)).unwrap());
    assert!(matches!(xx.atom(), Atom::Pow(..)));
    assert_eq!(xx.to_string(), "x**2");
  }

  #[test]
  fn numbers_fold_and_annihilate() {
    let x = symbol("x");
    assert_eq!(mul(&integer(6), &rational(1, 3).unwrap()).unwrap(), integer(2));
    assert!(mul(&integer(0), &x).unwrap().ptr_eq(&zero()));
    assert!(mul(&integer(1), &x).unwrap().ptr_eq(&x));
  }

  #[test]
  fn reciprocal_cancels() {
    let x = symbol("x");
    let inverse = pow(&x, &integer(-1)).unwrap();
    assert!(mul(&x, &inverse).unwrap().ptr_eq(&one()));
  }

  #[test]
  fn symbolic_exponents_merge() {
    let x = symbol("x");
    let y = symbol("y");
    let x_to_y = pow(&x, &y).unwrap();
    let product = mul(&x, &x_to_y).unwrap();
    let expected = pow(&x, &add(&y, &integer(1))).unwrap();
    assert_eq!(product, expected);
  }

  #[test]
  fn roots_merge_back_into_integers() {
    let half = rational(1, 2).unwrap();
    let root_two = pow(&integer(2), &half).unwrap();
    assert!(matches!(root_two.atom(), Atom::Pow(..)));
    assert_eq!(mul(&root_two, &root_two).unwrap(), integer(2));

    let x = symbol("x");
    let two_x = mul(&integer(2), &x).unwrap();
    let root = pow(&two_x, &half).unwrap();
    assert_eq!(mul(&root, &root).unwrap(), two_x);
  }

  #[test]
  fn order_does_not_matter() {
    let (x, y) = (symbol("x"), symbol("y"));
    let a = mul_many([sin(&x), integer(3), y.clone(), cos(&x)]).unwrap();
    let b = mul_many([cos(&x), y.clone(), sin(&x), integer(3)]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "3*y*sin(x)*cos(x)");
  }

  #[test]
  fn sums_as_factors_are_parenthesized() {
    let x = symbol("x");
    let sum = add_many([x.clone(), integer(1)]);
    let product = mul(&integer(-1), &mul(&x, &sum).unwrap()).unwrap();
    assert_eq!(product.to_string(), "-x*(x + 1)");
  }

  #[test]
  fn zero_base_meeting_negative_exponent_fails() {
    let y = symbol("y");
    let zero_to_y = pow(&zero(), &y).unwrap();
    let minus_y_minus_one = add_many([crate::arithmetic::neg(&y), integer(-1)]);
    let zero_to_rest = pow(&zero(), &minus_y_minus_one).unwrap();
    assert_eq!(mul(&zero_to_y, &zero_to_rest), Err(KernelError::ZeroToNonPositivePower));
  }
}
