//! Generic interner for bidirectional ID <-> Value lookups
//!
//! Combines a `SlotMap` (for stable, compact IDs) with a `HashMap` (for
//! reverse lookup). Used to intern method and filter names so that identity
//! comparisons in the Chain Builder are integer comparisons rather than
//! string comparisons.

use std::collections::HashMap;
use std::hash::Hash;

use slotmap::{Key, SlotMap};

/// A bidirectional intern table with `SlotMap`-based IDs.
///
/// Provides O(1) lookup in both directions:
/// - ID -> Value (via `SlotMap`)
/// - Value -> ID (via `HashMap`)
#[derive(Debug)]
pub struct Interner<K: Key, V: Eq + Hash + Clone> {
    id_to_value: SlotMap<K, V>,
    value_to_id: HashMap<V, K>,
}

impl<K: Key, V: Eq + Hash + Clone> Interner<K, V> {
    pub fn new() -> Self {
        Self {
            id_to_value: SlotMap::with_key(),
            value_to_id: HashMap::new(),
        }
    }

    /// Get or insert a value, returning its ID.
    pub fn get_or_insert(&mut self, value: &V) -> K {
        if let Some(&id) = self.value_to_id.get(value) {
            return id;
        }
        let id = self.id_to_value.insert(value.clone());
        self.value_to_id.insert(value.clone(), id);
        id
    }

    /// Get the ID for a value, if it has already been interned.
    pub fn get_id(&self, value: &V) -> Option<K> {
        self.value_to_id.get(value).copied()
    }

    /// Get the value for an ID.
    pub fn get(&self, id: K) -> Option<&V> {
        self.id_to_value.get(id)
    }

    pub fn len(&self) -> usize {
        self.id_to_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_value.is_empty()
    }
}

impl<K: Key, V: Eq + Hash + Clone> Default for Interner<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::new_key_type;

    new_key_type! { struct TestId; }

    #[test]
    fn get_or_insert_dedups() {
        let mut interner: Interner<TestId, String> = Interner::new();

        let id1 = interner.get_or_insert(&"hello".to_string());
        let id2 = interner.get_or_insert(&"hello".to_string());
        let id3 = interner.get_or_insert(&"world".to_string());

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn bidirectional_lookup() {
        let mut interner: Interner<TestId, String> = Interner::new();

        let value = "test".to_string();
        let id = interner.get_or_insert(&value);

        assert_eq!(interner.get(id), Some(&value));
        assert_eq!(interner.get_id(&value), Some(id));
    }

    #[test]
    fn unknown_id_returns_none() {
        let interner: Interner<TestId, String> = Interner::new();
        let mut other: Interner<TestId, String> = Interner::new();
        let foreign = other.get_or_insert(&"nope".to_string());
        assert_eq!(interner.get(foreign), None);
    }
}
