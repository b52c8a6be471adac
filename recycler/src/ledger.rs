use alloc::vec::Vec;

use crate::identity::{KeyMap, KeySet};
use crate::SlotKey;

/// One row of the cumulative-offset table.
///
/// `accumulator` is the sum of the sizes of all items up to and including
/// this index; the implicit entry at position `-1` is `accumulator = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeEntry {
    pub accumulator: u64,
    pub size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MeasuredSize {
    size: u32,
    valid: bool,
}

/// Cumulative offsets plus the cache of measured sizes, for variable-size
/// mode.
///
/// The table is rebuilt in full, lazily: any size-affecting change marks it
/// dirty and the next windowing pass recomputes it. Recomputation is O(n)
/// over the collection; measurement events are rare next to scroll events, so
/// a prefix structure with cheaper point updates would not pay for itself
/// here. Fixed-size mode bypasses the ledger entirely.
#[derive(Clone, Debug)]
pub struct SizeLedger<K> {
    entries: Vec<SizeEntry>,
    dirty: bool,
    measured: KeyMap<K, MeasuredSize>,
    unknown: KeySet<K>,
}

impl<K: SlotKey> SizeLedger<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            dirty: true,
            measured: KeyMap::new(),
            unknown: KeySet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cumulative table stale. The next rebuild recomputes it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Recomputes the full table.
    ///
    /// The size of each item resolves in order: measured size for its key
    /// (kept even while invalidated, so layout holds steady until the
    /// remeasure lands), then the structural size read off the item, then
    /// `min_item_size` as the placeholder for unmeasured items, then 0.
    /// Items with neither a measured nor a structural size are counted as
    /// unknown; items resolving to 0 contribute nothing and are skipped by
    /// the windowing and pool passes until a measurement arrives.
    pub(crate) fn rebuild<T>(
        &mut self,
        items: &[T],
        key_of: impl Fn(usize, &T) -> Option<K>,
        size_of: Option<&(dyn Fn(&T) -> Option<u32> + Send + Sync)>,
        min_item_size: Option<u32>,
    ) {
        rdebug!(
            count = items.len(),
            cached = self.measured.len(),
            "SizeLedger::rebuild"
        );
        self.entries.clear();
        self.entries.reserve_exact(items.len());
        self.unknown.clear();

        let mut accumulator = 0u64;
        for (index, item) in items.iter().enumerate() {
            let key = key_of(index, item);
            let measured = key.as_ref().and_then(|k| self.measured.get(k)).map(|m| m.size);
            let structural = size_of.and_then(|f| f(item));
            if measured.is_none() && structural.is_none() {
                // Awaiting measurement. `min_item_size` may still lay the
                // item out as a placeholder below, but e.g. scroll-to-end
                // cannot finalize until this set drains.
                if let Some(k) = key {
                    self.unknown.insert(k);
                }
            }
            let size = measured.or(structural).or(min_item_size).unwrap_or(0);
            accumulator = accumulator.saturating_add(size as u64);
            self.entries.push(SizeEntry { accumulator, size });
        }
        self.dirty = false;
    }

    pub fn size_at(&self, index: usize) -> u32 {
        self.entries.get(index).map(|e| e.size).unwrap_or(0)
    }

    pub fn accumulator_at(&self, index: usize) -> u64 {
        self.entries.get(index).map(|e| e.accumulator).unwrap_or(0)
    }

    /// Cumulative offset of everything before `index`, which is the slot
    /// position of the item at `index`.
    pub fn accumulator_before(&self, index: usize) -> u64 {
        if index == 0 {
            0
        } else {
            self.accumulator_at(index - 1)
        }
    }

    /// Total extent of the collection (last accumulator).
    pub fn total(&self) -> u64 {
        self.entries.last().map(|e| e.accumulator).unwrap_or(0)
    }

    /// Greatest index whose cumulative offset is <= `offset`, as the start of
    /// the visible window.
    ///
    /// Bisection over the half-open invariant: entries in `[0, lo)` have
    /// `accumulator <= offset`, entries in `[hi, len)` have a greater one.
    /// The interval shrinks strictly every iteration, so the loop terminates
    /// even across runs of zero-size items where the accumulator plateaus.
    pub fn start_index_for(&self, offset: u64) -> usize {
        let mut lo = 0usize;
        let mut hi = self.entries.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid].accumulator <= offset {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo.saturating_sub(1)
    }

    /// Records a measured size for `key`.
    ///
    /// Returns `true` when the layout actually changed (and the table was
    /// invalidated); re-validating an unchanged size returns `false`, which is
    /// the fixed point that terminates measurement-triggered rewindow loops.
    /// Zero extents are ignored: a collapsed box means the slot has not really
    /// painted yet.
    pub fn record(&mut self, key: K, size: u32) -> bool {
        if size == 0 {
            return false;
        }
        self.unknown.remove(&key);
        match self.measured.get_mut(&key) {
            Some(m) if m.size == size => {
                m.valid = true;
                false
            }
            Some(m) => {
                rtrace!(size, "SizeLedger::record");
                m.size = size;
                m.valid = true;
                self.dirty = true;
                true
            }
            None => {
                rtrace!(size, "SizeLedger::record");
                self.measured.insert(key, MeasuredSize { size, valid: true });
                self.dirty = true;
                true
            }
        }
    }

    pub fn measured_size(&self, key: &K) -> Option<u32> {
        self.measured.get(key).map(|m| m.size)
    }

    /// Whether the cached size for `key` is current (not awaiting remeasure).
    pub fn is_valid(&self, key: &K) -> bool {
        self.measured.get(key).map(|m| m.valid).unwrap_or(false)
    }

    /// Number of items seen by the last rebuild with neither a measured nor
    /// a structural size.
    pub fn unknown_len(&self) -> usize {
        self.unknown.len()
    }

    pub fn measurement_len(&self) -> usize {
        self.measured.len()
    }

    /// Drops validity on every cached size, keeping the sizes themselves so
    /// layout holds until items are measured again.
    pub fn invalidate_measurements(&mut self) {
        for m in self.measured.values_mut() {
            m.valid = false;
        }
    }

    /// Forgets all measured sizes.
    pub fn reset_measurements(&mut self) {
        self.measured.clear();
        self.dirty = true;
    }

    /// Evicts cached sizes whose key fails the predicate.
    ///
    /// The cache never evicts on its own (sizes usefully survive filtering
    /// and reinsertion); hosts that churn through unbounded key spaces should
    /// call this on data changes.
    pub fn retain_measurements(&mut self, mut pred: impl FnMut(&K) -> bool) {
        self.measured.retain(|k, _| pred(k));
        self.dirty = true;
    }
}

impl<K: SlotKey> Default for SizeLedger<K> {
    fn default() -> Self {
        Self::new()
    }
}
