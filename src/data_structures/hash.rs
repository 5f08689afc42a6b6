/*!

  Non-cryptographic hashing for structural hashes and for the maps and sets keyed by expressions or names.

*/

pub use fnv::{
  FnvHasher,
  FnvHashSet,
  FnvHashMap
};
