/*!

Expansion: products are distributed over sums, and positive integer powers of sums are multiplied out, all the way
down through sums, products and powers. The arguments of functions and formal derivatives are left alone.

```text
expand((x + 1)**2 * y) = x**2*y + 2*x*y + y
```

Every intermediate result goes through the factories, so like terms produced by the distribution are collected.

*/

use num_bigint::BigInt;
use num_integer::binomial;
use num_traits::{Signed, ToPrimitive};

use crate::{
  atom::Atom,
  atoms::{
    add::{add_many, scale},
    mul::mul,
    pow::pow,
    rational::value_of,
  },
  error::{KernelError, KernelResult},
  expression::Expression,
  logging::{log_with, Channel},
};


impl Expression {
  /// Distributes every product over sums and multiplies out positive integer powers of sums.
  pub fn expand(&self) -> KernelResult<Expression> {
    match self.atom() {
      Atom::Add(sum) => {
        let mut operands = Vec::with_capacity(sum.terms().len() + 1);
        for (term, multiplicity) in sum.terms() {
          operands.push(scale(&value_of(multiplicity), &term.expand()?));
        }
        operands.push(sum.coefficient().clone());
        Ok(add_many(operands))
      }

      Atom::Mul(product) => {
        let mut expanded = product.coefficient().clone();
        for factor in product.factor_expressions() {
          expanded = distribute(&expanded, &factor.expand()?)?;
        }
        Ok(expanded)
      }

      Atom::Pow(base, exponent) => {
        let base     = base.expand()?;
        let exponent = exponent.expand()?;

        match (base.atom(), exponent.as_integer()) {
          (Atom::Add(sum), Some(n)) if n.is_positive() => {
            let n = expansion_exponent(sum.operands().len(), n)?;
            log_with(Channel::Debug, 4, || format!("expand: ({})**{}", base, n));
            let mut expanded = base.clone();
            for _ in 1..n {
              expanded = distribute(&expanded, &base)?;
            }
            Ok(expanded)
          }

          _ => pow(&base, &exponent),
        }
      }

      _ => Ok(self.clone()),
    }
  }
}


/// The most terms a multinomial expansion may have before it is refused as `ExponentTooLarge`.
const MAX_EXPANDED_TERMS: u64 = 4096;

/**
  Checks that a sum of `summands` terms raised to `exponent` expands to at most `MAX_EXPANDED_TERMS` terms before
  any work is done. The count is that of the multinomial expansion, `binomial(exponent + summands - 1, summands - 1)`,
  an upper bound on the terms left after collection.
*/
fn expansion_exponent(summands: usize, exponent: &BigInt) -> KernelResult<usize> {
  let too_large = || KernelError::ExponentTooLarge(exponent.to_string());
  let choose    = BigInt::from(summands.saturating_sub(1));
  let terms     = binomial(exponent + &choose, choose);
  if terms > BigInt::from(MAX_EXPANDED_TERMS) {
    return Err(too_large());
  }
  exponent.to_usize().ok_or_else(too_large)
}

/// `left * right` with each side split into its summands and every pair of summands multiplied.
fn distribute(left: &Expression, right: &Expression) -> KernelResult<Expression> {
  let left_summands  = summands(left);
  let right_summands = summands(right);

  let mut products = Vec::with_capacity(left_summands.len() * right_summands.len());
  for l in left_summands.iter() {
    for r in right_summands.iter() {
      products.push(mul(l, r)?);
    }
  }
  Ok(add_many(products))
}

fn summands(expression: &Expression) -> Vec<Expression> {
  match expression.atom() {
    Atom::Add(sum) => sum.operands(),
    _              => vec![expression.clone()],
  }
}


#[cfg(test)]
mod tests {
  use crate::{
    atoms::{add, add_many, integer, mul, mul_many, pow, sin, symbol},
    error::KernelError,
  };

  #[test]
  fn square_of_a_sum() {
    let (x, y) = (symbol("x"), symbol("y"));
    let square = pow(&add(&x, &integer(1)), &integer(2)).unwrap();
    let product = mul(&square, &y).unwrap();

    let expected = add_many([
      mul(&pow(&x, &integer(2)).unwrap(), &y).unwrap(),
      mul_many([integer(2), x.clone(), y.clone()]).unwrap(),
      y.clone(),
    ]);
    assert_eq!(product.expand().unwrap(), expected);
    assert_eq!(expected.to_string(), "y + 2*x*y + x**2*y");
  }

  #[test]
  fn difference_of_squares() {
    let (x, y) = (symbol("x"), symbol("y"));
    let minus_y = mul(&integer(-1), &y).unwrap();
    let product = mul(&add(&x, &y), &add(&x, &minus_y)).unwrap();
    let expected = add(&pow(&x, &integer(2)).unwrap(), &mul(&integer(-1), &pow(&y, &integer(2)).unwrap()).unwrap());
    assert_eq!(product.expand().unwrap(), expected);
  }

  #[test]
  fn already_expanded_is_unchanged() {
    let x = symbol("x");
    let e = add(&mul(&integer(3), &x).unwrap(), &sin(&add(&x, &integer(1))));
    assert_eq!(e.expand().unwrap(), e);

    let inverse = pow(&add(&x, &integer(1)), &integer(-1)).unwrap();
    assert_eq!(inverse.expand().unwrap(), inverse);
  }

  #[test]
  fn oversized_expansion_is_refused() {
    let (x, y) = (symbol("x"), symbol("y"));
    let binomial = add(&x, &integer(1));

    let huge = pow(&binomial, &integer(1_000_000)).unwrap();
    assert_eq!(huge.expand(), Err(KernelError::ExponentTooLarge("1000000".to_string())));

    // Three summands to the 100th power have 5151 terms.
    let trinomial = pow(&add_many([x.clone(), y.clone(), integer(1)]), &integer(100)).unwrap();
    assert_eq!(trinomial.expand(), Err(KernelError::ExponentTooLarge("100".to_string())));

    let cube = pow(&binomial, &integer(3)).unwrap().expand().unwrap();
    let expected = add_many([
      pow(&x, &integer(3)).unwrap(),
      mul(&integer(3), &pow(&x, &integer(2)).unwrap()).unwrap(),
      mul(&integer(3), &x).unwrap(),
      integer(1),
    ]);
    assert_eq!(cube, expected);
  }
}
