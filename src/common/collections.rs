//! Hashing collections used throughout the crate.
//!
//! Keys are small (ids, codes), so the non-cryptographic Fx hasher is the
//! right default everywhere.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;

pub use std::collections::BTreeMap;
