use std::cell::Cell;

use crate::reference::FormulaRef;
use crate::utils::{pairing2, MyHash};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Direct-mapped cache: each key hashes to exactly one slot, and a newer
/// entry simply evicts the older one.
pub struct Cache<K, V> {
    data: Vec<Option<Entry<K, V>>>,
    bitmask: u64,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> Cache<K, V> {
    /// Create a new cache of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1 << bits;
        let bitmask = (size - 1) as u64;

        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Reset the cache.
    pub fn clear(&mut self) {
        self.data.fill_with(|| None);
    }

    fn index(&self, key: u64) -> usize {
        (key & self.bitmask) as usize
    }
}

impl<K, V> Cache<K, V>
where
    K: MyHash + Eq,
{
    /// Get the cached result.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.index(key.hash());
        match &self.data[index] {
            Some(entry) if &entry.key == key => {
                self.hits.set(self.hits.get() + 1);
                Some(&entry.value)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.index(key.hash());
        self.data[index] = Some(Entry { key, value });
    }
}

/// Key of the factory-level transformation cache: a transformation tag and
/// the input formula.
pub type TransformationKey = (&'static str, FormulaRef);

impl MyHash for TransformationKey {
    fn hash(&self) -> u64 {
        pairing2(self.1.get() as u64, MyHash::hash(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache() {
        let mut cache = Cache::<(u64, u64), i32>::new(3);

        cache.insert((1, 2), 3);
        cache.insert((2, 3), 1);
        cache.insert((1, 3), 2);

        assert_eq!(cache.get(&(1, 2)), Some(&3));
        assert_eq!(cache.get(&(2, 3)), Some(&1));
        assert_eq!(cache.get(&(1, 3)), Some(&2));
        assert_eq!(cache.get(&(2, 1)), None);
        assert_eq!(cache.get(&(3, 2)), None);
        assert_eq!(cache.get(&(1, 1)), None);
        assert_eq!(cache.hits(), 3);
        assert_eq!(cache.misses(), 3);
    }

    #[test]
    fn test_cache_collision_evicts() {
        let mut cache = Cache::<u64, &str>::new(2);
        cache.insert(1, "one");
        cache.insert(5, "five"); // 5 & 0b11 == 1
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&5), Some(&"five"));
    }

    #[test]
    fn test_transformation_key() {
        let mut cache = Cache::<TransformationKey, FormulaRef>::new(4);
        let f = FormulaRef::new(7);
        let g = FormulaRef::new(8);
        cache.insert(("negate", f), g);
        assert_eq!(cache.get(&("negate", f)), Some(&g));
        assert_eq!(cache.get(&("other", f)), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = Cache::<u64, u64>::new(2);
        cache.insert(1, 10);
        cache.clear();
        assert_eq!(cache.get(&1), None);
    }
}
