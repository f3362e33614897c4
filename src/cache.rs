//! Computed tables: operation memoization.
//!
//! One `OpCache` per Boolean operator maps argument signals to the result
//! signal. Entries are never invalidated: a cached result may refer to a
//! node whose reference count has dropped to zero, which is sound because
//! node indices are never reused.
//!
//! Backed by `hashbrown::HashMap` with an identity hasher fed by the
//! crate's [`MyHash`] values, so all table layers hash the same way.

use std::cell::Cell;
use std::hash::{BuildHasherDefault, Hash, Hasher};

use hashbrown::HashMap;

use crate::utils::MyHash;

/// A hasher that passes through a precomputed `MyHash` value.
#[derive(Default)]
pub struct MyHasher {
    hash: u64,
}

impl Hasher for MyHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, _bytes: &[u8]) {
        unreachable!("MyHasher only supports write_u64")
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Wrapper that implements `std::hash::Hash` for any `MyHash` type,
/// allowing such types as `HashMap` keys.
#[derive(Clone, PartialEq, Eq)]
#[repr(transparent)]
struct HashableKey<K>(K);

impl<K: MyHash> Hash for HashableKey<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash());
    }
}

/// A computed table for one operator.
pub struct OpCache<K, V> {
    map: HashMap<HashableKey<K>, V, BuildHasherDefault<MyHasher>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> Default for OpCache<K, V> {
    fn default() -> Self {
        Self::new(14)
    }
}

impl<K, V> OpCache<K, V> {
    /// Create a cache with capacity for `2^bits` entries; it grows
    /// beyond that as needed.
    pub fn new(bits: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(1 << bits, BuildHasherDefault::default()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of probes that found an entry.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of probes that found nothing.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}

impl<K, V> OpCache<K, V>
where
    K: MyHash + Eq,
{
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = key.hash();
        match self.map.raw_entry().from_hash(hash, |k| k.0 == *key).map(|(_, v)| v) {
            Some(v) => {
                self.hits.set(self.hits.get() + 1);
                Some(v)
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        let hash = key.hash();
        self.map
            .raw_entry_mut()
            .from_hash(hash, |k| k.0 == key)
            .insert(HashableKey(key), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic() {
        let mut cache = OpCache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        cache.insert((3, 4), 99);

        assert_eq!(cache.get(&(1, 2)), Some(&42));
        assert_eq!(cache.get(&(3, 4)), Some(&99));
        assert_eq!(cache.get(&(5, 6)), None);
        // The key is ordered.
        assert_eq!(cache.get(&(2, 1)), None);

        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_cache_overwrite() {
        let mut cache = OpCache::<(u64, u64), i32>::new(4);
        cache.insert((1, 2), 42);
        cache.insert((1, 2), 7);
        assert_eq!(cache.get(&(1, 2)), Some(&7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_grows() {
        let mut cache = OpCache::<(u64, u64), i32>::new(2);

        for i in 0..1000 {
            cache.insert((i, 0), i as i32);
        }
        for i in 0..1000 {
            assert_eq!(cache.get(&(i, 0)), Some(&(i as i32)));
        }
    }
}
