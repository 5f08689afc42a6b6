/*!

Substitution of whole subexpressions.

Every node first looks itself up in the map. A hit is returned as it is, without looking inside. Otherwise the node
substitutes into its operands and is rebuilt through its factory, but only if some operand actually changed: when
nothing matched anywhere below, the result is the very same allocation that was passed in, and callers can detect
"no change" with `Expression::ptr_eq`.

Sums and products are also matched operand by operand, so `{2*x: y}` rewrites `2*x + 1` to `y + 1` even though
the sum stores `x` with multiplicity 2. A product with a coefficient also offers the product without it, so
`{x*y: z}` rewrites `2*x*y` to `2*z`. A scaled term of a sum is substituted exactly as the standalone product it
stands for, which keeps `subs(a + b) == subs(a) + subs(b)`.

The variables of a formal derivative can only be renamed: substituting a symbol for one renames it everywhere, and
substituting anything else for one is an error.

*/

use crate::{
  atom::Atom,
  atoms::{
    add::{add_many, scale},
    cos,
    derivative::derivative_from_names,
    function::function_from_interned,
    mul::{mul, mul_many},
    pow,
    rational::value_of,
    sin,
    symbol::symbol_from_interned,
  },
  data_structures::SubstitutionMap,
  error::{KernelError, KernelResult},
  expression::Expression,
  logging::{log_with, Channel},
};


impl Expression {
  /// Replaces every subexpression of `self` that is a key of `map` by its value.
  pub fn subs(&self, map: &SubstitutionMap) -> KernelResult<Expression> {
    if map.is_empty() {
      return Ok(self.clone());
    }
    if let Some(replacement) = map.get(self) {
      log_with(Channel::Debug, 5, || format!("subs: {} -> {}", self, replacement));
      return Ok(replacement.clone());
    }

    match self.atom() {
      | Atom::Integer(_)
      | Atom::Rational(_)
      | Atom::Symbol(_) => Ok(self.clone()),

      Atom::Add(sum) => {
        let mut changed  = false;
        let mut operands = Vec::with_capacity(sum.terms().len() + 1);

        for (term, multiplicity) in sum.terms() {
          let multiplicity = value_of(multiplicity);
          let scaled       = scale(&multiplicity, term);
          // A scaled term is substituted as the standalone product it stands for.
          let new_scaled   = scaled.subs(map)?;
          if new_scaled.ptr_eq(&scaled) {
            operands.push(scaled);
          } else {
            operands.push(new_scaled);
            changed = true;
          }
        }

        let coefficient = sum.coefficient();
        if !coefficient.is_zero() {
          match map.get(coefficient) {
            Some(replacement) => {
              operands.push(replacement.clone());
              changed = true;
            }
            None => operands.push(coefficient.clone()),
          }
        }

        if changed {
          Ok(add_many(operands))
        } else {
          Ok(self.clone())
        }
      }

      Atom::Mul(product) => {
        let mut changed  = false;
        let mut operands = Vec::with_capacity(product.factors().len() + 1);

        let coefficient = product.coefficient();
        if !coefficient.is_one() {
          let rest = product.without_coefficient();
          if let Some(replacement) = map.get(&rest) {
            log_with(Channel::Debug, 5, || format!("subs: {} -> {}", rest, replacement));
            let coefficient = map.get(coefficient).unwrap_or(coefficient);
            return mul(coefficient, replacement);
          }
          match map.get(coefficient) {
            Some(replacement) => {
              operands.push(replacement.clone());
              changed = true;
            }
            None => operands.push(coefficient.clone()),
          }
        }

        for ((base, exponent), factor) in product.factors().iter().zip(product.factor_expressions()) {
          if let Some(replacement) = map.get(&factor) {
            operands.push(replacement.clone());
            changed = true;
            continue;
          }
          let new_base     = base.subs(map)?;
          let new_exponent = exponent.subs(map)?;
          if new_base.ptr_eq(base) && new_exponent.ptr_eq(exponent) {
            operands.push(factor);
          } else {
            operands.push(pow(&new_base, &new_exponent)?);
            changed = true;
          }
        }

        if changed {
          mul_many(operands)
        } else {
          Ok(self.clone())
        }
      }

      Atom::Pow(base, exponent) => {
        let new_base     = base.subs(map)?;
        let new_exponent = exponent.subs(map)?;
        if new_base.ptr_eq(base) && new_exponent.ptr_eq(exponent) {
          Ok(self.clone())
        } else {
          pow(&new_base, &new_exponent)
        }
      }

      Atom::Sin(arg) => {
        let new_arg = arg.subs(map)?;
        if new_arg.ptr_eq(arg) { Ok(self.clone()) } else { Ok(sin(&new_arg)) }
      }

      Atom::Cos(arg) => {
        let new_arg = arg.subs(map)?;
        if new_arg.ptr_eq(arg) { Ok(self.clone()) } else { Ok(cos(&new_arg)) }
      }

      Atom::FunctionSymbol(name, arg) => {
        let new_arg = arg.subs(map)?;
        if new_arg.ptr_eq(arg) {
          Ok(self.clone())
        } else {
          Ok(function_from_interned(*name, &new_arg))
        }
      }

      Atom::Derivative(arg, symbols) => {
        let mut changed     = false;
        let mut new_symbols = symbols.clone();

        for name in new_symbols.iter_mut() {
          if let Some(replacement) = map.get(&symbol_from_interned(*name)) {
            match replacement.symbol_name() {
              Some(new_name) => {
                changed |= new_name != *name;
                *name = new_name;
              }
              None => return Err(KernelError::DerivativeVariableSubstitution(replacement.to_string())),
            }
          }
        }

        let new_arg = arg.subs(map)?;
        if new_arg.ptr_eq(arg) && !changed {
          Ok(self.clone())
        } else {
          Ok(derivative_from_names(&new_arg, new_symbols))
        }
      }
    }
  }
}
