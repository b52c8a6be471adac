use alloc::vec::Vec;

use crate::ledger::SizeLedger;
use crate::pool::ViewPool;
use crate::window::{compute_window, SizeInfo};
use crate::{
    ItemKey, RecyclerError, RecyclerOptions, SlotKey, ViewId, Viewport, Window, WindowRange,
};

/// One live (or parked) view slot, as seen by the render layer.
///
/// Iterate these in pool order and key the drawn output by `id`: the id is
/// stable for the slot's whole life, so recycling reuses the host's existing
/// node instead of tearing it down. Inactive slots should be kept around at
/// their off-screen position.
#[derive(Debug)]
pub struct ViewRef<'a, T, K, V> {
    pub item: &'a T,
    pub index: usize,
    pub key: &'a K,
    pub kind: &'a V,
    /// Offset along the scroll axis, or [`crate::OFF_SCREEN`] when inactive.
    pub position: i64,
    pub active: bool,
    pub id: ViewId,
}

/// Outcome of a [`Recycler::refresh`] pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciliation {
    /// Whether the new window overlapped the previous one. A discontinuous
    /// pass should be followed by a settle correction (see
    /// [`crate::ScrollSync`]).
    pub continuous: bool,
    pub range: WindowRange,
    /// Total scrollable extent; `None` while prerendering.
    pub extent: Option<u64>,
}

/// The windowing and view-recycling engine.
///
/// One `Recycler` is constructed per scrollable region and owns its pool,
/// size ledger and viewport state; all mutation goes through its public
/// operations. It never stores the host collection: operations that need the
/// items borrow them per call, so the host keeps full ownership.
#[derive(Debug)]
pub struct Recycler<T, K = ItemKey, V = ()> {
    options: RecyclerOptions<T, K, V>,
    ledger: SizeLedger<K>,
    pool: ViewPool<K, V>,
    viewport: Option<Viewport>,
    window: Window,
}

impl<T, K: SlotKey, V: SlotKey> Recycler<T, K, V> {
    pub fn new(options: RecyclerOptions<T, K, V>) -> Self {
        rdebug!(
            item_size = options.item_size,
            buffer = options.buffer,
            items_limit = options.items_limit,
            "Recycler::new"
        );
        Self {
            options,
            ledger: SizeLedger::new(),
            pool: ViewPool::new(),
            viewport: None,
            window: Window::default(),
        }
    }

    pub fn options(&self) -> &RecyclerOptions<T, K, V> {
        &self.options
    }

    pub fn set_options(&mut self, options: RecyclerOptions<T, K, V>) {
        self.options = options;
        self.ledger.invalidate();
    }

    /// Updates the viewport (from a scroll or resize event). The change takes
    /// effect on the next [`Self::refresh`].
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    /// Drops the viewport, returning to the prerender context: the next pass
    /// renders the first `prerender` items and reports an unknown extent.
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The window computed by the last refresh.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn range(&self) -> WindowRange {
        self.window.range
    }

    /// Total scrollable extent from the last refresh (`None` while
    /// prerendering).
    pub fn total_extent(&self) -> Option<u64> {
        self.window.extent
    }

    /// Recomputes the window and reconciles the slot pool against `items`.
    ///
    /// Pass `data_changed = true` whenever the collection itself was
    /// mutated/replaced (not for plain scrolls): it forces a full ledger
    /// rebuild and re-resolves each live slot's index by key, tolerating
    /// reordering.
    ///
    /// Call this once per frame at most; coalescing bursts of scroll events
    /// into frames is the job of [`crate::ScrollSync`].
    pub fn refresh(&mut self, items: &[T], data_changed: bool) -> Result<Reconciliation, RecyclerError> {
        if data_changed {
            self.ledger.invalidate();
        }

        let sizes = match self.options.item_size {
            Some(item_size) => SizeInfo::Fixed(item_size),
            None => {
                if self.ledger.is_dirty() || self.ledger.len() != items.len() {
                    let identity = self.options.identity.clone();
                    self.ledger.rebuild(
                        items,
                        |index, item| identity.key_of(index, item),
                        self.options.size_of.as_deref(),
                        self.options.min_item_size,
                    );
                }
                SizeInfo::Variable(&self.ledger)
            }
        };

        let window = compute_window(
            self.viewport,
            items.len(),
            sizes,
            self.options.buffer,
            self.options.prerender,
            self.options.items_limit,
        )?;

        let continuous = self.pool.reconcile(
            items,
            window.range,
            &self.options.identity,
            sizes,
            data_changed,
            self.options.items_limit,
        )?;

        self.window = window;
        if self.options.emit_update {
            if let Some(cb) = &self.options.on_update {
                cb(window.range.start_index, window.range.end_index);
            }
        }

        Ok(Reconciliation {
            continuous,
            range: window.range,
            extent: window.extent,
        })
    }

    /// Scroll offset that brings the item at `index` to the leading edge.
    ///
    /// Variable mode reads the table built by the last refresh.
    pub fn scroll_offset_for_index(&self, index: usize) -> u64 {
        match self.options.item_size {
            Some(item_size) => index as u64 * item_size.max(1) as u64,
            None => self.ledger.accumulator_before(index),
        }
    }

    /// Writes a measured size for `key` into the ledger.
    ///
    /// Returns `true` when the layout changed, in which case the caller must
    /// run another [`Self::refresh`]; an unchanged size returns `false`, so
    /// measurement-triggered passes reach a fixed point. Fixed-size mode
    /// ignores measurements.
    pub fn measure(&mut self, key: K, size: u32) -> bool {
        if self.options.item_size.is_some() {
            return false;
        }
        self.ledger.record(key, size)
    }

    /// Number of items with neither a measured nor a structural size
    /// (variable mode). Scroll-to-end cannot finalize until this drains.
    pub fn unknown_size_len(&self) -> usize {
        self.ledger.unknown_len()
    }

    pub fn measured_size(&self, key: &K) -> Option<u32> {
        self.ledger.measured_size(key)
    }

    pub fn is_size_valid(&self, key: &K) -> bool {
        self.ledger.is_valid(key)
    }

    pub fn measurement_len(&self) -> usize {
        self.ledger.measurement_len()
    }

    /// Marks every cached size as needing remeasure, keeping current values
    /// for layout in the meantime.
    pub fn invalidate_measurements(&mut self) {
        self.ledger.invalidate_measurements();
    }

    pub fn reset_measurements(&mut self) {
        self.ledger.reset_measurements();
    }

    /// Evicts cached sizes not matching `pred`. See
    /// [`SizeLedger::retain_measurements`].
    pub fn retain_measurements(&mut self, pred: impl FnMut(&K) -> bool) {
        self.ledger.retain_measurements(pred);
    }

    /// Number of slots ever allocated (the pool's high-water mark).
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of slots currently displaying an item.
    pub fn live_len(&self) -> usize {
        self.pool.live_len()
    }

    /// Iterates every slot (live and parked) in stable pool order.
    ///
    /// `items` must be the same collection the last refresh saw. Slots whose
    /// recorded index no longer exists (the collection shrank since) are
    /// skipped.
    pub fn for_each_view<'a>(&'a self, items: &'a [T], mut f: impl FnMut(ViewRef<'a, T, K, V>)) {
        for slot in self.pool.slots() {
            let Some(item) = items.get(slot.index) else {
                continue;
            };
            f(ViewRef {
                item,
                index: slot.index,
                key: &slot.key,
                kind: &slot.kind,
                position: slot.position,
                active: slot.used,
                id: slot.id,
            });
        }
    }

    /// Collects the current views into `out` (clears `out` first).
    pub fn collect_views<'a>(&'a self, items: &'a [T], out: &mut Vec<ViewRef<'a, T, K, V>>) {
        out.clear();
        self.for_each_view(items, |view| out.push(view));
    }
}
