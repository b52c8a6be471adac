use recycler::{
    ItemKey, Reconciliation, Recycler, RecyclerError, RecyclerOptions, SlotKey,
};

use crate::context::{ScrollEvent, SharedContext};
use crate::measure::{ItemBounds, MeasurementController};

/// Progress of a scroll-to-end operation.
///
/// The true bottom offset is unknown until every visible item has been
/// measured, so the host keeps applying `target` and polling once per frame
/// until the operation settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollToEnd {
    /// Apply `target`, let measurements land, poll again next frame.
    Pending { target: u64 },
    /// All sizes known; `target` is final.
    Settled { target: u64 },
}

/// A variable-size list whose item sizes are measured after first render.
///
/// Wraps a [`Recycler`] together with the shared container/item context and
/// the measurement controller, wired the way a dynamic scroller needs them:
/// data changes broadcast an update event so visible items re-measure, and
/// deactivating the container parks measurement work until it is shown
/// again.
#[derive(Debug)]
pub struct DynamicList<T, K = ItemKey, V = ()> {
    list: Recycler<T, K, V>,
    context: SharedContext<K>,
    measurer: MeasurementController<K>,
    scrolling_to_end: bool,
}

impl<T, K: SlotKey, V: SlotKey> DynamicList<T, K, V> {
    /// Builds the dynamic front end over variable-size options.
    ///
    /// Fails with [`RecyclerError::MissingCapability`] when the options carry
    /// a fixed item size (nothing to measure) or no `min_item_size` (there
    /// would be no placeholder extent for unmeasured items, so the list could
    /// not scroll to unmeasured regions at all).
    pub fn new(options: RecyclerOptions<T, K, V>) -> Result<Self, RecyclerError> {
        if options.item_size.is_some() {
            return Err(RecyclerError::MissingCapability(
                "dynamic sizing requires variable-size options (item_size = None)",
            ));
        }
        if options.min_item_size.is_none() {
            return Err(RecyclerError::MissingCapability(
                "dynamic sizing requires min_item_size as the unmeasured placeholder",
            ));
        }
        let axis = options.axis;
        Ok(Self {
            list: Recycler::new(options),
            context: SharedContext::new(),
            measurer: MeasurementController::new(axis),
            scrolling_to_end: false,
        })
    }

    pub fn recycler(&self) -> &Recycler<T, K, V> {
        &self.list
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<T, K, V> {
        &mut self.list
    }

    pub fn context(&self) -> &SharedContext<K> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SharedContext<K> {
        &mut self.context
    }

    pub fn measurer(&self) -> &MeasurementController<K> {
        &self.measurer
    }

    pub fn measurer_mut(&mut self) -> &mut MeasurementController<K> {
        &mut self.measurer
    }

    /// Recomputes the window and reconciles slots; see [`Recycler::refresh`].
    ///
    /// A data change additionally broadcasts an update event so item drivers
    /// re-measure anything without a valid size.
    pub fn refresh(
        &mut self,
        items: &[T],
        data_changed: bool,
    ) -> Result<Reconciliation, RecyclerError> {
        let pass = self.list.refresh(items, data_changed)?;
        if data_changed {
            self.context.publish(&ScrollEvent::Update { force: true });
        }
        Ok(pass)
    }

    /// Forces a remeasure round. With `clear`, every cached size is
    /// invalidated first (current values keep the layout until new
    /// measurements land).
    pub fn force_update(&mut self, clear: bool) {
        if clear {
            self.list.invalidate_measurements();
        }
        self.context.publish(&ScrollEvent::Update { force: true });
    }

    /// Asks one item to recompute its size (e.g. its content changed without
    /// a collection update).
    pub fn remeasure(&mut self, key: K) {
        self.context.publish(&ScrollEvent::Remeasure(key));
    }

    /// Cached size for an item, 0 when not measured yet.
    pub fn item_size_of(&self, key: &K) -> u32 {
        self.list.measured_size(key).unwrap_or(0)
    }

    /// Schedules a measurement of `key`; see
    /// [`MeasurementController::request`]. Deferred automatically while the
    /// container is inactive.
    pub fn request_measurement(&mut self, key: K) -> bool {
        self.measurer.request(self.context.is_active(), key)
    }

    /// Completes a measurement with the painted bounds; see
    /// [`MeasurementController::complete`]. A `true` return means the layout
    /// changed and the caller must refresh again.
    pub fn complete_measurement(&mut self, scheduled_for: K, current: &K, bounds: ItemBounds) -> bool {
        self.measurer
            .complete(&mut self.list, scheduled_for, current, bounds)
    }

    /// Shows or hides the container. Reactivation replays every measurement
    /// that was deferred while hidden.
    pub fn set_active(&mut self, active: bool) {
        self.context.set_active(active);
        if active {
            for key in self.measurer.take_deferred() {
                self.context.publish(&ScrollEvent::Remeasure(key));
            }
        }
    }

    /// Starts a scroll-to-end operation. Returns `false` when one is already
    /// in flight.
    pub fn begin_scroll_to_end(&mut self) -> bool {
        if self.scrolling_to_end {
            return false;
        }
        self.scrolling_to_end = true;
        true
    }

    /// One scroll-to-end step; call once per frame while pending.
    ///
    /// Each step refreshes, aims `target` at the current maximum scroll
    /// offset, and settles only once no item is missing a size; until then
    /// the bottom keeps moving as measurements replace placeholders.
    pub fn poll_scroll_to_end(&mut self, items: &[T]) -> Result<ScrollToEnd, RecyclerError> {
        let pass = self.list.refresh(items, false)?;
        let extent = pass.extent.unwrap_or(0);
        let viewport_extent = self.list.viewport().map(|v| v.extent()).unwrap_or(0);
        let target = extent.saturating_sub(viewport_extent);

        if self.list.unknown_size_len() == 0 {
            self.scrolling_to_end = false;
            Ok(ScrollToEnd::Settled { target })
        } else {
            Ok(ScrollToEnd::Pending { target })
        }
    }

    pub fn is_scrolling_to_end(&self) -> bool {
        self.scrolling_to_end
    }
}
