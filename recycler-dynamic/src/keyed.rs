#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use recycler::SlotKey;

#[cfg(feature = "std")]
type Store<K, S> = HashMap<K, S>;
#[cfg(not(feature = "std"))]
type Store<K, S> = BTreeMap<K, S>;

/// Per-item state keyed by identity, persistent across recycling.
///
/// Slots are reassigned constantly, so state kept on a slot leaks between
/// items; state keyed by item identity survives any number of re-renders and
/// reassignments. Entries are created on first use and live until explicitly
/// evicted. There is no implicit eviction, so hosts iterating unbounded key
/// spaces must call [`Self::retain`] or [`Self::evict`] on data changes to
/// keep the store from growing without bound.
#[derive(Clone, Debug)]
pub struct KeyedState<K, S> {
    store: Store<K, S>,
}

impl<K: SlotKey, S> KeyedState<K, S> {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&S> {
        self.store.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut S> {
        self.store.get_mut(key)
    }

    /// Returns the state for `key`, creating it with `init` on first use.
    pub fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> S) -> &mut S {
        self.store.entry(key).or_insert_with(init)
    }

    pub fn evict(&mut self, key: &K) -> Option<S> {
        self.store.remove(key)
    }

    /// Keeps only entries whose key satisfies the predicate.
    pub fn retain(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.store.retain(|k, _| pred(k));
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<K: SlotKey, S> Default for KeyedState<K, S> {
    fn default() -> Self {
        Self::new()
    }
}
