use alloc::vec::Vec;

use recycler::{Recycler, ScrollAxis, SlotKey};

/// Painted bounding box of an item, as reported by the render layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemBounds {
    pub width: f64,
    pub height: f64,
}

impl ItemBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along the scroll axis.
    pub fn along(&self, axis: ScrollAxis) -> f64 {
        match axis {
            ScrollAxis::Vertical => self.height,
            ScrollAxis::Horizontal => self.width,
        }
    }
}

/// Drives post-render measurement of visible items.
///
/// The host asks to measure a slot's item after painting it
/// ([`Self::request`]), reads the painted bounds, and completes the
/// measurement ([`Self::complete`]). Completion is asynchronous from the
/// engine's point of view: the slot may have been reassigned in between, so
/// results are discarded unless the key captured at request time still names
/// the item under measurement.
#[derive(Clone, Debug, Default)]
pub struct MeasurementController<K> {
    axis: ScrollAxis,
    /// Keys with a measurement in flight; duplicate requests are dropped.
    pending: Vec<K>,
    /// Requests that arrived while the container was inactive, replayed on
    /// reactivation.
    deferred: Vec<K>,
}

impl<K: SlotKey> MeasurementController<K> {
    pub fn new(axis: ScrollAxis) -> Self {
        Self {
            axis,
            pending: Vec::new(),
            deferred: Vec::new(),
        }
    }

    pub fn axis(&self) -> ScrollAxis {
        self.axis
    }

    /// Schedules a measurement of `key`.
    ///
    /// Returns `true` when the host should read the item's painted bounds
    /// (after the pending paint). Returns `false` when the same key is
    /// already in flight, or when the container is inactive: an off-screen
    /// or frozen container reports collapsed boxes, so the request is parked
    /// until [`Self::take_deferred`] replays it.
    pub fn request(&mut self, active: bool, key: K) -> bool {
        if !active {
            if !self.deferred.contains(&key) {
                self.deferred.push(key);
            }
            return false;
        }
        if self.pending.contains(&key) {
            return false;
        }
        self.pending.push(key);
        true
    }

    /// Completes a measurement scheduled for `scheduled_for`.
    ///
    /// `current` is the key now bound to the measured slot; when it differs,
    /// the slot was recycled while the measurement was in flight and the
    /// result is discarded. Extents are rounded to integer units; collapsed
    /// boxes are ignored.
    ///
    /// Returns `true` when the ledger changed, in which case the caller must
    /// run another `refresh`; the loop terminates because an unchanged size
    /// never reports a change.
    pub fn complete<T, V: SlotKey>(
        &mut self,
        list: &mut Recycler<T, K, V>,
        scheduled_for: K,
        current: &K,
        bounds: ItemBounds,
    ) -> bool {
        self.pending.retain(|k| k != &scheduled_for);
        if scheduled_for != *current {
            return false;
        }
        let size = round_unit(bounds.along(self.axis));
        if size == 0 {
            return false;
        }
        list.measure(scheduled_for, size)
    }

    /// Drains the requests deferred while the container was inactive.
    pub fn take_deferred(&mut self) -> Vec<K> {
        core::mem::take(&mut self.deferred)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }
}

fn round_unit(extent: f64) -> u32 {
    if extent <= 0.0 {
        return 0;
    }
    (extent + 0.5) as u32
}
