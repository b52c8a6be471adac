use alloc::vec::Vec;

use crate::identity::KeyMap;
use crate::window::SizeInfo;
use crate::{Identity, RecyclerError, SlotKey, ViewId, WindowRange, OFF_SCREEN};

/// A reusable rendering unit, owned exclusively by the pool.
///
/// Slots are created on first need and reassigned in place forever after;
/// they are never deallocated, so allocation churn is bounded by the
/// high-water mark of concurrently visible items.
#[derive(Clone, Debug)]
pub(crate) struct ViewSlot<K, V> {
    pub id: ViewId,
    pub index: usize,
    pub key: K,
    pub kind: V,
    pub position: i64,
    pub used: bool,
    /// Present in its kind's free list. Guards against double-parking a slot
    /// that was fake-released during a jump and then released for real.
    parked: bool,
}

/// Bounded pool of view slots plus the live-key index and per-type free
/// lists.
#[derive(Clone, Debug)]
pub(crate) struct ViewPool<K, V> {
    slots: Vec<ViewSlot<K, V>>,
    /// Key of each currently displayed item -> slot holding it.
    live: KeyMap<K, usize>,
    /// Free lists, segregated by type tag so distinct templates are never
    /// cross-assigned.
    unused: KeyMap<V, Vec<usize>>,
    next_id: ViewId,
    prev_range: WindowRange,
    /// `None` until the first pass. Jump passes and the pass re-entering
    /// continuous mode start from a full pool reset.
    continuous: Option<bool>,
}

impl<K: SlotKey, V: SlotKey> ViewPool<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: KeyMap::new(),
            unused: KeyMap::new(),
            next_id: 0,
            prev_range: WindowRange::new(0, 0),
            continuous: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slots(&self) -> &[ViewSlot<K, V>] {
        &self.slots
    }

    pub(crate) fn live_len(&self) -> usize {
        self.live.len()
    }

    /// Reconciles the pool against a freshly computed window.
    ///
    /// Release happens strictly before (re)assignment, and assignment
    /// strictly before the position update, so no slot is ever observed with
    /// a stale item/position pairing. Returns whether the transition was
    /// continuous.
    pub(crate) fn reconcile<T>(
        &mut self,
        items: &[T],
        range: WindowRange,
        identity: &Identity<T, K, V>,
        sizes: SizeInfo<'_, K>,
        check_item: bool,
        items_limit: usize,
    ) -> Result<bool, RecyclerError> {
        let continuous = range.overlaps(&self.prev_range);
        rtrace!(
            start = range.start_index,
            end = range.end_index,
            continuous,
            "ViewPool::reconcile"
        );

        if !continuous {
            // Jump: positional continuity assumptions no longer hold, so
            // partial diffing would cost more than a clean reassignment.
            self.release_all();
        } else if self.continuous != Some(true) {
            // Re-entering continuous scrolling: the free lists still carry
            // fake-unused slots from the jump, so start clean here too.
            self.release_all();
        } else {
            self.revalidate(items, range, identity, check_item);
        }
        self.continuous = Some(continuous);

        // Per-type read cursors into the free lists for discontinuous
        // passes, which borrow slots without popping them: the same indices
        // may be revisited before the next continuous pass stabilizes.
        let mut cursors: KeyMap<V, usize> = KeyMap::new();

        for index in range.start_index..range.end_index {
            let item = &items[index];
            let key = identity
                .key_of(index, item)
                .ok_or(RecyclerError::DataIntegrity { index })?;

            // A key mapping to a slot that has since been rebound elsewhere
            // (possible during discontinuous churn) counts as a miss.
            let existing = self
                .live
                .get(&key)
                .copied()
                .filter(|&s| self.slots[s].key == key);

            // Variable mode: no size contribution yet means nothing to
            // render for this index until a measurement arrives.
            if let SizeInfo::Variable(ledger) = sizes {
                if ledger.size_at(index) == 0 {
                    if let Some(s) = existing {
                        self.release(s);
                    }
                    continue;
                }
            }

            let slot = match existing {
                Some(s) => {
                    let slot = &mut self.slots[s];
                    slot.used = true;
                    slot.index = index;
                    s
                }
                None => {
                    let kind = identity.kind_of(item);
                    let s = if continuous {
                        match self.pop_free(&kind) {
                            Some(s) => self.rebind(s, index, key.clone(), kind),
                            None => self.alloc(index, key.clone(), kind, items_limit)?,
                        }
                    } else {
                        let cursor = cursors.get(&kind).copied().unwrap_or(0);
                        match self.peek_free(&kind, cursor) {
                            Some(s) => {
                                cursors.insert(kind.clone(), cursor + 1);
                                self.rebind_parked(s, index, key.clone(), kind)
                            }
                            None => {
                                let s = self.alloc(index, key.clone(), kind.clone(), items_limit)?;
                                // Fake-unused: parked but kept `used`, so the
                                // next jump pass can reclaim it via cursor.
                                self.park(s);
                                cursors.insert(kind, cursor + 1);
                                s
                            }
                        }
                    };
                    self.live.insert(key, s);
                    s
                }
            };

            self.slots[slot].position = match sizes {
                SizeInfo::Fixed(item_size) => index as i64 * item_size.max(1) as i64,
                SizeInfo::Variable(ledger) => ledger.accumulator_before(index) as i64,
            };
        }

        self.prev_range = range;
        Ok(continuous)
    }

    /// Releases every slot: clears the live index and rebuilds the free
    /// lists with all slots parked off-screen.
    fn release_all(&mut self) {
        self.live.clear();
        self.unused.clear();
        for s in 0..self.slots.len() {
            let slot = &mut self.slots[s];
            slot.used = false;
            slot.position = OFF_SCREEN;
            slot.parked = true;
            self.unused.entry(slot.kind.clone()).or_default().push(s);
        }
    }

    /// Steady continuous pass: drop used slots whose item left the window.
    ///
    /// When the data changed, each slot's index is first re-resolved by key
    /// so reordering does not strand a slot on a stale index.
    fn revalidate<T>(
        &mut self,
        items: &[T],
        range: WindowRange,
        identity: &Identity<T, K, V>,
        check_item: bool,
    ) {
        for s in 0..self.slots.len() {
            if !self.slots[s].used {
                continue;
            }
            if check_item {
                let key = &self.slots[s].key;
                let found = items
                    .iter()
                    .enumerate()
                    .position(|(i, item)| identity.key_of(i, item).as_ref() == Some(key));
                match found {
                    Some(index) => self.slots[s].index = index,
                    None => {
                        self.release(s);
                        continue;
                    }
                }
            }
            let index = self.slots[s].index;
            if index < range.start_index || index >= range.end_index {
                self.release(s);
            }
        }
    }

    /// Releases one slot for real: off-screen, unused, out of the live index.
    fn release(&mut self, s: usize) {
        let slot = &mut self.slots[s];
        slot.used = false;
        slot.position = OFF_SCREEN;
        let key = slot.key.clone();
        if self.live.get(&key) == Some(&s) {
            self.live.remove(&key);
        }
        self.park(s);
    }

    /// Parks a slot in its kind's free list without touching its state.
    fn park(&mut self, s: usize) {
        let slot = &mut self.slots[s];
        if slot.parked {
            return;
        }
        slot.parked = true;
        let kind = slot.kind.clone();
        self.unused.entry(kind).or_default().push(s);
    }

    fn pop_free(&mut self, kind: &V) -> Option<usize> {
        let s = self.unused.get_mut(kind)?.pop()?;
        self.slots[s].parked = false;
        Some(s)
    }

    /// Reads the free list at `cursor` without removing the entry.
    fn peek_free(&self, kind: &V, cursor: usize) -> Option<usize> {
        self.unused.get(kind)?.get(cursor).copied()
    }

    fn rebind(&mut self, s: usize, index: usize, key: K, kind: V) -> usize {
        let slot = &mut self.slots[s];
        slot.index = index;
        slot.key = key;
        slot.kind = kind;
        slot.used = true;
        s
    }

    /// Rebinds a slot that stays in its free list (jump passes).
    fn rebind_parked(&mut self, s: usize, index: usize, key: K, kind: V) -> usize {
        self.rebind(s, index, key, kind);
        self.slots[s].parked = true;
        s
    }

    fn alloc(
        &mut self,
        index: usize,
        key: K,
        kind: V,
        items_limit: usize,
    ) -> Result<usize, RecyclerError> {
        if self.slots.len() >= items_limit {
            rwarn!(pool = self.slots.len(), limit = items_limit, "pool ceiling hit");
            return Err(RecyclerError::Configuration {
                rendered: self.slots.len() + 1,
                limit: items_limit,
            });
        }
        let id = self.next_id;
        self.next_id += 1;
        self.slots.push(ViewSlot {
            id,
            index,
            key,
            kind,
            position: 0,
            used: true,
            parked: false,
        });
        Ok(self.slots.len() - 1)
    }
}
