use alloc::sync::Arc;

#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::ItemKey;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, T> = HashMap<K, T>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, T> = BTreeMap<K, T>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

/// Bound for item keys and type tags used to index pool and ledger caches.
#[cfg(feature = "std")]
pub trait SlotKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> SlotKey for K {}

#[cfg(not(feature = "std"))]
pub trait SlotKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> SlotKey for K {}

/// Resolves a stable identity (key) and a recycle-pool type tag for each item.
///
/// The key must uniquely identify an item among currently-live items and stay
/// stable across data updates as long as the item persists; caches and the
/// slot pool are indexed by it. The type tag segregates the recycle pool so
/// visually distinct templates are never cross-assigned; it defaults to the
/// constant `()` type when items carry no explicit tag.
pub struct Identity<T, K = ItemKey, V = ()> {
    key_of: Arc<dyn Fn(usize, &T) -> Option<K> + Send + Sync>,
    kind_of: Arc<dyn Fn(&T) -> V + Send + Sync>,
}

impl<T, K> Identity<T, K, ()> {
    /// Identity derived from the item itself (e.g. an id field).
    ///
    /// Returning `None` from the resolver is a fatal data error, reported by
    /// the reconciliation pass that encounters it.
    pub fn keyed(key_of: impl Fn(&T) -> Option<K> + Send + Sync + 'static) -> Self {
        Self {
            key_of: Arc::new(move |_, item| key_of(item)),
            kind_of: Arc::new(|_| ()),
        }
    }
}

impl<T> Identity<T, ItemKey, ()> {
    /// Identity by position, for collections without a usable key field.
    ///
    /// Measured sizes keyed this way do not follow items across reordering.
    pub fn by_index() -> Self {
        Self {
            key_of: Arc::new(|index, _| Some(index as ItemKey)),
            kind_of: Arc::new(|_| ()),
        }
    }
}

impl<T: Clone> Identity<T, T, ()> {
    /// Identity by value, for sequences of primitives.
    pub fn by_value() -> Self {
        Self {
            key_of: Arc::new(|_, item: &T| Some(item.clone())),
            kind_of: Arc::new(|_| ()),
        }
    }
}

impl<T, K, V> Identity<T, K, V> {
    /// Replaces the type-tag resolver, keeping the key resolver.
    pub fn with_kind_of<V2>(
        self,
        kind_of: impl Fn(&T) -> V2 + Send + Sync + 'static,
    ) -> Identity<T, K, V2> {
        Identity {
            key_of: self.key_of,
            kind_of: Arc::new(kind_of),
        }
    }

    pub(crate) fn key_of(&self, index: usize, item: &T) -> Option<K> {
        (self.key_of)(index, item)
    }

    pub(crate) fn kind_of(&self, item: &T) -> V {
        (self.kind_of)(item)
    }
}

impl<T, K, V> Clone for Identity<T, K, V> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
            kind_of: Arc::clone(&self.kind_of),
        }
    }
}

impl<T, K, V> core::fmt::Debug for Identity<T, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Identity(..)")
    }
}
