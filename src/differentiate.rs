/*!

Symbolic differentiation with respect to one symbol. One bottom-up recursion, dispatched on the node kind, with the
results put back together through the factories so they come out canonical. In particular a chain-rule product
whose inner derivative is zero collapses to the zero singleton.

  * sums differentiate term by term, products by the product rule,
  * `d/dx b**e` is `e*b**(e - 1)*b'` when `e` does not depend on `x`,
  * `d/dx sin(f)` is `cos(f)*f'` and `d/dx cos(f)` is `-sin(f)*f'`.

Where there is no closed form the result is a formal `Derivative` node: for an unknown function of something that
depends on `x`, for a power whose exponent depends on `x`, and for a `Derivative`, which just appends `x` to its
list of variables.

*/

use smallvec::smallvec;

use crate::{
  atom::Atom,
  atoms::{
    add::{add, add_many, scale},
    cos,
    derivative::derivative_from_names,
    mul::{mul, mul_many},
    pow::pow,
    rational::value_of,
    sin,
  },
  error::{KernelError, KernelResult},
  expression::{minus_one, one, zero, Expression},
  interner::{resolve_str, InternedString},
  logging::{log_with, Channel},
};


impl Expression {
  /// The derivative of `self` with respect to the symbol `x`. Fails if `x` is not a symbol.
  pub fn diff(&self, x: &Expression) -> KernelResult<Expression> {
    let name = x.symbol_name().ok_or_else(|| KernelError::NotASymbol(x.to_string()))?;
    self.diff_by(name)
  }

  pub(crate) fn diff_by(&self, x: InternedString) -> KernelResult<Expression> {
    log_with(Channel::Debug, 5, || format!("diff: d/d{} {}", resolve_str(x), self));

    match self.atom() {
      Atom::Integer(_) | Atom::Rational(_) => Ok(zero()),

      Atom::Symbol(name) => {
        if *name == x {
          Ok(one())
        } else {
          Ok(zero())
        }
      }

      Atom::Add(sum) => {
        let mut terms = Vec::with_capacity(sum.terms().len());
        for (term, multiplicity) in sum.terms() {
          let derivative = term.diff_by(x)?;
          if !derivative.is_zero() {
            terms.push(scale(&value_of(multiplicity), &derivative));
          }
        }
        Ok(add_many(terms))
      }

      Atom::Mul(product) => {
        let factors: Vec<Expression> = product.factor_expressions().collect();
        let mut terms = Vec::with_capacity(factors.len());

        for (index, factor) in factors.iter().enumerate() {
          let derivative = factor.diff_by(x)?;
          if derivative.is_zero() {
            continue;
          }
          let mut operands = Vec::with_capacity(factors.len() + 1);
          operands.push(product.coefficient().clone());
          operands.extend(
            factors.iter()
                   .enumerate()
                   .filter(|(other, _)| *other != index)
                   .map(|(_, f)| f.clone())
          );
          operands.push(derivative);
          terms.push(mul_many(operands)?);
        }

        Ok(add_many(terms))
      }

      Atom::Pow(base, exponent) => {
        if exponent.has_symbol(x) {
          return Ok(derivative_from_names(self, smallvec![x]));
        }
        let base_derivative = base.diff_by(x)?;
        if base_derivative.is_zero() {
          return Ok(zero());
        }
        let reduced = pow(base, &add(exponent, &minus_one()))?;
        mul_many([exponent.clone(), reduced, base_derivative])
      }

      Atom::Sin(arg) => mul(&cos(arg), &arg.diff_by(x)?),

      Atom::Cos(arg) => mul_many([minus_one(), sin(arg), arg.diff_by(x)?]),

      Atom::FunctionSymbol(_, arg) => {
        if arg.diff_by(x)?.is_zero() {
          Ok(zero())
        } else {
          Ok(derivative_from_names(self, smallvec![x]))
        }
      }

      Atom::Derivative(arg, symbols) => {
        let mut symbols = symbols.clone();
        symbols.push(x);
        Ok(derivative_from_names(arg, symbols))
      }
    }
  }
}
