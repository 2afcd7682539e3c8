//! Grouping key/value samples by key.

use crate::{GenlabError, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Every value seen for each key, in the order the pairs arrived.
///
/// Keys iterate in order of first appearance.
#[derive(Debug, Clone)]
pub struct DedupIndex<K, V> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, Vec<V>)>,
    total: usize,
}

impl<K: PartialEq, V: PartialEq> PartialEq for DedupIndex<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for DedupIndex<K, V> {}

impl<K, V> Default for DedupIndex<K, V> {
    fn default() -> Self {
        DedupIndex {
            slots: HashMap::new(),
            entries: Vec::new(),
            total: 0,
        }
    }
}

impl<K, V> DedupIndex<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, creating the entry if needed.
    pub fn insert(&mut self, key: K, value: V) {
        let slot = match self.slots.get(&key) {
            Some(&slot) => slot,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, Vec::new()));
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.push(value);
        self.total += 1;
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.slots
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// Like [`get`](Self::get), for keys that must be present.
    pub fn require(&self, key: &K) -> Result<&[V]>
    where
        K: fmt::Debug,
    {
        self.get(key).ok_or_else(|| GenlabError::MissingKey {
            key: format!("{key:?}"),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.entries
            .iter()
            .map(|(key, values)| (key, values.as_slice()))
    }

    /// Values across all keys; equals the number of pairs indexed.
    pub fn total_values(&self) -> usize {
        self.total
    }

    /// Pairs whose key had already been seen.
    pub fn duplicates(&self) -> usize {
        self.total - self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for DedupIndex<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut index = DedupIndex::new();
        for (key, value) in pairs {
            index.insert(key, value);
        }
        index
    }
}

/// Group `pairs` by key in a single forward pass.
pub fn ukey<K, V>(pairs: &[(K, V)]) -> DedupIndex<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pairs.iter().cloned().collect()
}

/// The map a plain `HashMap` construction keeps: later pairs overwrite
/// earlier ones with the same key.
pub fn last_wins<K, V>(pairs: &[(K, V)]) -> HashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pairs.iter().cloned().collect()
}
