use crate::Viewport;

impl Viewport {
    /// Viewport read from the host container's own scroll state
    /// (element-scroll mode).
    pub fn from_element(scroll_offset: u64, client_extent: u32) -> Self {
        Self {
            start: scroll_offset,
            end: scroll_offset.saturating_add(client_extent as u64),
        }
    }

    /// Viewport for page mode, where the scroll source is an ancestor or the
    /// document.
    ///
    /// `bounds_start` is the host element's leading edge relative to the
    /// window origin (may be negative once scrolled past), `bounds_extent`
    /// the host's full extent, and `window_extent` the window's visible
    /// extent. The result is the host's visible portion, clamped so
    /// `start >= 0` and `start + size <= bounds_extent`.
    pub fn from_page(bounds_start: i64, bounds_extent: u64, window_extent: u64) -> Self {
        let mut start = -bounds_start;
        let mut size = window_extent as i64;
        if start < 0 {
            size += start;
            start = 0;
        }
        if start + size > bounds_extent as i64 {
            size = bounds_extent as i64 - start;
        }
        if size < 0 {
            size = 0;
        }
        Self {
            start: start as u64,
            end: (start + size) as u64,
        }
    }
}

/// Debounce policy the host should apply to its resize observer.
///
/// The engine does not observe element sizes itself; it only forwards this
/// configuration to whatever observer the host wires up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeObserverConfig {
    pub delay_ms: u64,
    /// Fire once immediately on attach instead of waiting for the first
    /// change.
    pub immediate: bool,
}

impl Default for ResizeObserverConfig {
    fn default() -> Self {
        Self {
            delay_ms: 150,
            immediate: false,
        }
    }
}

/// Coalesces scroll/resize notifications to one recomputation per frame, and
/// schedules the post-jump settle pass.
///
/// Some browsers drop the final scroll event of a burst; after a
/// discontinuous pass, a correction is scheduled [`Self::SETTLE_DELAY_MS`]
/// later to catch the real resting position. Any newer scroll event
/// supersedes a pending correction. Time is caller-provided, so the engine
/// stays clock-free.
///
/// ```
/// # use recycler::ScrollSync;
/// let mut sync = ScrollSync::new();
/// if sync.note_scroll() {
///     // schedule a frame callback; inside it:
///     sync.begin_frame();
///     // ... run Recycler::refresh, then:
///     sync.finish_frame(false, 16); // discontinuous at t=16ms
/// }
/// assert!(sync.take_settle_due(130)); // re-run the scroll handler
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSync {
    dirty: bool,
    settle_at_ms: Option<u64>,
}

impl ScrollSync {
    /// Quiet period after a jump before the correction pass fires.
    pub const SETTLE_DELAY_MS: u64 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a scroll or resize event. Returns `true` when the caller
    /// should schedule a frame callback (at most one per frame is live).
    pub fn note_scroll(&mut self) -> bool {
        self.settle_at_ms = None;
        if self.dirty {
            return false;
        }
        self.dirty = true;
        true
    }

    /// Enters the scheduled frame callback. Returns `false` if nothing is
    /// pending (spurious wakeup).
    pub fn begin_frame(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        true
    }

    /// Reports the outcome of the frame's reconciliation pass. A
    /// discontinuous pass schedules the settle correction.
    pub fn finish_frame(&mut self, continuous: bool, now_ms: u64) {
        if !continuous {
            self.settle_at_ms = Some(now_ms + Self::SETTLE_DELAY_MS);
        }
    }

    /// Whether the settle correction is due; consumes it when so. The caller
    /// reacts exactly as to a fresh scroll event.
    pub fn take_settle_due(&mut self, now_ms: u64) -> bool {
        match self.settle_at_ms {
            Some(at) if now_ms >= at => {
                self.settle_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn settle_pending(&self) -> bool {
        self.settle_at_ms.is_some()
    }
}
