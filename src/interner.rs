/*!
A global dictionary of interned strings. Symbol names and function names are interned so that two names
compare equal by comparing two integers. Provides an abstraction API for any interner library.

The interner sits behind a `RwLock` so that expressions, which hold interned names, can be built and read from
several threads at once.

*/

use std::{
  cmp::Ordering,
  sync::RwLock
};

use lazy_static::lazy_static;
use string_interner::{
  StringInterner,
  symbol::SymbolU32
};

pub type InternedString = SymbolU32;

lazy_static! {
  static ref STRING_INTERNER: RwLock<StringInterner> = RwLock::new(StringInterner::default());
}


pub fn interned(string: &str) -> InternedString {
  // Fast path: most names are interned long before they are looked up again.
  if let Some(symbol) = get_interned(string) {
    return symbol;
  }
  let mut interner = STRING_INTERNER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
  interner.get_or_intern(string)
}


pub fn interned_static(string: &'static str) -> InternedString {
  if let Some(symbol) = get_interned(string) {
    return symbol;
  }
  let mut interner = STRING_INTERNER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
  interner.get_or_intern_static(string)
}


pub fn get_interned(string: &str) -> Option<InternedString> {
  let interner = STRING_INTERNER.read().unwrap_or_else(|poisoned| poisoned.into_inner());
  interner.get(string)
}

/// Resolves `symbol` to an owned copy of its string.
pub fn resolve_str(symbol: InternedString) -> String {
  resolve_str_checked(symbol).unwrap_or_else(|| unknown_symbol(symbol))
}

pub fn resolve_str_checked(symbol: InternedString) -> Option<String> {
  let interner = STRING_INTERNER.read().unwrap_or_else(|poisoned| poisoned.into_inner());
  interner.resolve(symbol).map(str::to_owned)
}

/// Compares the strings behind two interned symbols lexicographically, taking the lock once.
pub fn cmp_resolved(left: InternedString, right: InternedString) -> Ordering {
  if left == right {
    return Ordering::Equal;
  }
  let interner = STRING_INTERNER.read().unwrap_or_else(|poisoned| poisoned.into_inner());
  match (interner.resolve(left), interner.resolve(right)) {
    (Some(l), Some(r)) => l.cmp(r),
    (None, _)          => unknown_symbol(left),
    (_, None)          => unknown_symbol(right),
  }
}

/// A critical error state. Every `InternedString` in circulation came out of this interner.
fn unknown_symbol(symbol: InternedString) -> ! {
  unreachable!("Tried to resolve an interned string ({:?}) that was never interned. This is a bug.", symbol)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn intern_round_trip() {
    let a = interned("alpha");
    let b = interned("alpha");
    assert_eq!(a, b);
    assert_eq!(resolve_str(a), "alpha");
    assert_eq!(get_interned("alpha"), Some(a));
  }

  #[test]
  fn resolved_order_is_lexicographic() {
    let b = interned("beta");
    let a = interned("alpha_late");
    // Interning order must not leak into the comparison.
    assert_eq!(cmp_resolved(a, b), Ordering::Less);
    assert_eq!(cmp_resolved(b, a), Ordering::Greater);
    assert_eq!(cmp_resolved(a, a), Ordering::Equal);
  }
}
