/*!

Primitive expression node types.

An `Atom` is one immutable node of an expression: a number, a symbol, or a composite whose operands are shared
`Expression` handles. The set of node kinds is closed, so every operation of the kernel (hashing, equality, the
normal-form order, formatting, differentiation, substitution) dispatches on the variant.

Atoms are never built directly outside the kernel. Each kind has a factory function in `crate::atoms` that puts
its arguments in canonical form before the node is allocated; `Expression::new` asserts that contract.

*/

use std::{
  cmp::Ordering,
  hash::{Hash, Hasher}
};

use crate::data_structures::hash::FnvHasher;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};
use smallvec::SmallVec;
use strum::Display as KindDisplay;
use strum_macros::{
  EnumDiscriminants,
  IntoStaticStr
};

use crate::{
  atoms::{
    add::Sum,
    derivative,
    function,
    mul::Product,
    pow,
    symbol,
    trig,
  },
  expression::Expression,
  format::{
    DisplayForm,
    ExpressionFormatter,
    Formattable,
  },
  interner::{
    cmp_resolved,
    resolve_str,
    InternedString
  },
  normal_form::{
    cmp_sequences,
    NormalFormOrder
  },
};

/// The ordered, possibly repeating list of variables of a formal derivative.
pub type DerivativeSymbols = SmallVec<[InternedString; 2]>;

/// The closed set of node kinds. The declaration order is also the cross-kind normal-form order.
#[derive(Clone, PartialEq, Eq, Debug, IntoStaticStr, EnumDiscriminants)]
#[strum_discriminants(name(AtomKind))]
#[strum_discriminants(derive(KindDisplay, PartialOrd, Ord, Hash))]
pub enum Atom {
  Integer(BigInt),
  /// Always in lowest terms with denominator > 1.
  Rational(BigRational),
  Symbol(InternedString),
  Add(Sum),
  Mul(Product),
  /// `Pow(base, exponent)`
  Pow(Expression, Expression),
  Sin(Expression),
  Cos(Expression),
  /// An unevaluated application `name(argument)`.
  FunctionSymbol(InternedString, Expression),
  /// `Derivative(target, symbols)`: the target differentiated by each symbol in turn.
  Derivative(Expression, DerivativeSymbols),
}


impl Atom {
  /// Reports the `AtomKind` of `self`.
  pub fn kind(&self) -> AtomKind {
    self.into()
  }

  pub fn is_number(&self) -> bool {
    matches!(self, Atom::Integer(_) | Atom::Rational(_))
  }

  /// The value of a numeric atom as a rational.
  pub fn as_rational(&self) -> Option<BigRational> {
    match self {
      Atom::Integer(n)  => Some(BigRational::from_integer(n.clone())),
      Atom::Rational(r) => Some(r.clone()),
      _                 => None
    }
  }

  /// Checks the canonical-form contract for this node. Factories guarantee it; `Expression::new` asserts it.
  pub fn is_canonical(&self) -> bool {
    match self {
      Atom::Integer(_)               => true,
      Atom::Rational(r)              => {
        *r.denom() > BigInt::one() && num_integer::Integer::gcd(r.numer(), r.denom()).is_one()
      }
      Atom::Symbol(_)                => true,
      Atom::Add(sum)                 => sum.is_canonical(),
      Atom::Mul(product)             => product.is_canonical(),
      Atom::Pow(base, exponent)      => pow::is_canonical(base, exponent),
      Atom::Sin(arg)
      | Atom::Cos(arg)               => trig::is_canonical(arg),
      Atom::FunctionSymbol(_, arg)   => function::is_canonical(arg),
      Atom::Derivative(arg, symbols) => derivative::is_canonical(arg, symbols),
    }
  }

  /**
    Computes the structural hash of the node. Operands contribute their own (cached) hashes, so this is linear in
    the number of direct operands.

    If two nodes just happen to have the same operands, a sine and a cosine of `x` for example, we still want
    their hashes to differ. So we hash a kind-specific prefix before hashing the data. The prefixes for integers,
    rationals, and symbols are expreduce's; the rest were chosen at random.

    ```text
        integer       : [242, 99 , 84 , 113, 102, 46 , 118, 94 ]
        rational      : [90 , 82 , 214, 51 , 52 , 7  , 7  , 33 ]
        symbol        : [107, 10 , 247, 23 , 33 , 221, 163, 156]
        add           : [38 , 171, 91 , 230, 14 , 199, 62 , 125]
        mul           : [201, 17 , 140, 77 , 236, 105, 3  , 188]
        pow           : [119, 250, 36 , 161, 92 , 8  , 213, 70 ]
        sin           : [64 , 133, 222, 9  , 181, 47 , 150, 27 ]
        cos           : [157, 60 , 11 , 244, 126, 218, 85 , 192]
        function      : [1  , 207, 143, 106, 203, 58 , 96 , 148]
        derivative    : [5  , 15 , 105, 181, 241, 116, 76 , 166]
    ```

    The operand order of `Add` and `Mul` is canonical, so an ordered combine is enough for them as well.
  */
  pub fn structural_hash(&self) -> u64 {
    let mut hasher = FnvHasher::default();

    match self {
      Atom::Integer(v) => {
        hasher.write(&[242, 99, 84, 113, 102, 46, 118, 94]);
        v.hash(&mut hasher);
      }

      Atom::Rational(v) => {
        hasher.write(&[90, 82, 214, 51, 52, 7, 7, 33]);
        v.numer().hash(&mut hasher);
        v.denom().hash(&mut hasher);
      }

      Atom::Symbol(name) => {
        hasher.write(&[107, 10, 247, 23, 33, 221, 163, 156]);
        name.hash(&mut hasher);
      }

      Atom::Add(sum) => {
        hasher.write(&[38, 171, 91, 230, 14, 199, 62, 125]);
        sum.hash(&mut hasher);
      }

      Atom::Mul(product) => {
        hasher.write(&[201, 17, 140, 77, 236, 105, 3, 188]);
        product.hash(&mut hasher);
      }

      Atom::Pow(base, exponent) => {
        hasher.write(&[119, 250, 36, 161, 92, 8, 213, 70]);
        base.hash(&mut hasher);
        exponent.hash(&mut hasher);
      }

      Atom::Sin(arg) => {
        hasher.write(&[64, 133, 222, 9, 181, 47, 150, 27]);
        arg.hash(&mut hasher);
      }

      Atom::Cos(arg) => {
        hasher.write(&[157, 60, 11, 244, 126, 218, 85, 192]);
        arg.hash(&mut hasher);
      }

      Atom::FunctionSymbol(name, arg) => {
        hasher.write(&[1, 207, 143, 106, 203, 58, 96, 148]);
        arg.hash(&mut hasher);
        name.hash(&mut hasher);
      }

      Atom::Derivative(arg, symbols) => {
        hasher.write(&[5, 15, 105, 181, 241, 116, 76, 166]);
        arg.hash(&mut hasher);
        for symbol in symbols.iter() {
          symbol.hash(&mut hasher);
        }
      }
    }

    hasher.finish()
  }

  /// Binding strength of the node's outermost operator in the `Input` form. Atomic things bind tightest.
  pub(crate) fn precedence(&self) -> u8 {
    match self {
      Atom::Integer(n) if n.is_negative() => PRECEDENCE_ADD,
      Atom::Rational(_)                   => PRECEDENCE_MUL,
      Atom::Add(_)                        => PRECEDENCE_ADD,
      Atom::Mul(_)                        => PRECEDENCE_MUL,
      Atom::Pow(..)                       => PRECEDENCE_POW,
      _                                   => PRECEDENCE_ATOM,
    }
  }

  /// Orders two atoms already known to be of the same kind.
  fn cmp_same_kind(&self, other: &Self) -> Ordering {
    match (self, other) {
      // Value comparison.
      (Atom::Integer(v), Atom::Integer(u))   => v.cmp(u),
      (Atom::Rational(s), Atom::Rational(t)) => s.cmp(t),

      (Atom::Symbol(s), Atom::Symbol(t))     => cmp_resolved(*s, *t),

      (Atom::Add(s), Atom::Add(t))           => NormalFormOrder::cmp(s, t),
      (Atom::Mul(s), Atom::Mul(t))           => NormalFormOrder::cmp(s, t),

      (Atom::Pow(b, e), Atom::Pow(c, f))     => {
        NormalFormOrder::cmp(b, c).then_with(|| NormalFormOrder::cmp(e, f))
      }

      | (Atom::Sin(s), Atom::Sin(t))
      | (Atom::Cos(s), Atom::Cos(t))         => NormalFormOrder::cmp(s, t),

      (Atom::FunctionSymbol(f, s), Atom::FunctionSymbol(g, t)) => {
        cmp_resolved(*f, *g).then_with(|| NormalFormOrder::cmp(s, t))
      }

      (Atom::Derivative(s, xs), Atom::Derivative(t, ys)) => {
        NormalFormOrder::cmp(s, t).then_with(|| {
          for (x, y) in xs.iter().zip(ys.iter()) {
            let ordering = cmp_resolved(*x, *y);
            if ordering != Ordering::Equal {
              return ordering;
            }
          }
          xs.len().cmp(&ys.len())
        })
      }

      (thing_one, thing_two) => mismatched_kinds(thing_one.kind(), thing_two.kind())
    }
  }
}


pub(crate) const PRECEDENCE_ADD : u8 = 1;
pub(crate) const PRECEDENCE_MUL : u8 = 2;
pub(crate) const PRECEDENCE_POW : u8 = 3;
pub(crate) const PRECEDENCE_ATOM: u8 = 4;


impl NormalFormOrder for Atom {
  fn cmp(&self, other: &Self) -> Ordering {
    match self.kind().cmp(&other.kind()) {
      // Same expression type
      Ordering::Equal => self.cmp_same_kind(other),
      // Different expression types
      // Integer < Rational < Symbol < Add < Mul < Pow < Sin < Cos < FunctionSymbol < Derivative
      ordering        => ordering,
    }
  }
}


/// Pairs of (operand, numeric metadata) as stored by `Add` and `Mul`, compared lexicographically.
pub(crate) fn cmp_pairs(left: &[(Expression, Expression)], right: &[(Expression, Expression)]) -> Ordering {
  cmp_sequences(left.iter(), right.iter())
}


impl Formattable for Atom {
  fn format(&self, formatter: &ExpressionFormatter) -> String {
    match (self, formatter.form) {
      (Atom::Integer(v), _)  => format!("{}", v),
      (Atom::Rational(v), _) => format!("{}/{}", v.numer(), v.denom()),
      (Atom::Symbol(v), _)   => resolve_str(*v),

      (Atom::Add(sum), _)     => sum.format(formatter),
      (Atom::Mul(product), _) => product.format(formatter),

      (Atom::Pow(base, exponent), DisplayForm::Input) => pow::format_power(base, exponent, formatter),
      (Atom::Pow(base, exponent), DisplayForm::Full)  => {
        format!("Pow[{}, {}]", base.format(formatter), exponent.format(formatter))
      }

      (Atom::Sin(arg), DisplayForm::Input) => format!("sin({})", arg.format(formatter)),
      (Atom::Sin(arg), DisplayForm::Full)  => format!("Sin[{}]", arg.format(formatter)),
      (Atom::Cos(arg), DisplayForm::Input) => format!("cos({})", arg.format(formatter)),
      (Atom::Cos(arg), DisplayForm::Full)  => format!("Cos[{}]", arg.format(formatter)),

      (Atom::FunctionSymbol(name, arg), DisplayForm::Input) => {
        format!("{}({})", resolve_str(*name), arg.format(formatter))
      }
      (Atom::FunctionSymbol(name, arg), DisplayForm::Full)  => {
        format!("{}[{}]", resolve_str(*name), arg.format(formatter))
      }

      (Atom::Derivative(arg, symbols), DisplayForm::Input) => {
        format!("D[{}]({})", symbol::format_names(symbols), arg.format(formatter))
      }
      (Atom::Derivative(arg, symbols), DisplayForm::Full)  => {
        format!("Derivative[{}, {}]", arg.format(formatter), symbol::format_names(symbols))
      }
    }
  }
}

display_formattable_impl!(Atom);


/// A critical error state. Callers check kinds before reaching the per-kind comparison.
fn mismatched_kinds(left: AtomKind, right: AtomKind) -> ! {
  unreachable!("Compared a {} with a {} as if they were the same kind of atom. This is a bug.", left, right)
}
