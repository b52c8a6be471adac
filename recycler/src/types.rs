/// Scroll axis of the virtualized list.
///
/// The engine itself is axis-agnostic: it works in abstract units along one
/// dimension. The axis is carried as configuration so measurement code can
/// pick the right extent out of a reported bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// The visible span along the scroll axis, before buffer expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub start: u64,
    /// Exclusive end offset (`start + visible extent`).
    pub end: u64,
}

impl Viewport {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn extent(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Expands the span symmetrically by `buffer` units, saturating at zero.
    pub fn expand(&self, buffer: u32) -> Self {
        Self {
            start: self.start.saturating_sub(buffer as u64),
            end: self.end.saturating_add(buffer as u64),
        }
    }
}

/// A contiguous index range `[start_index, end_index)` of items deemed
/// visible (including buffer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Whether two ranges share at least one boundary or index.
    ///
    /// This is the continuity test for pool reconciliation: an overlapping
    /// update is a continuous scroll, anything else is a jump.
    pub fn overlaps(&self, other: &WindowRange) -> bool {
        self.start_index <= other.end_index && self.end_index >= other.start_index
    }
}

/// Result of a windowing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub range: WindowRange,
    /// Total scrollable extent. `None` in a prerender context, where no
    /// viewport exists yet and the extent cannot be known before measurement.
    pub extent: Option<u64>,
}

/// Default key type for lists keyed by a numeric id or by index.
pub type ItemKey = u64;

/// Pool-internal identity of a view slot, stable for render diffing.
pub type ViewId = u64;

/// Sentinel position for released slots, far off-screen so in-flight CSS
/// transitions never flash stale content inside the viewport.
pub const OFF_SCREEN: i64 = -9999;
