use alloc::sync::Arc;

use crate::viewport::ResizeObserverConfig;
use crate::{Identity, ItemKey, ScrollAxis};

/// Callback fired after a reconciliation pass when `emit_update` is set.
///
/// Arguments are the new `(start_index, end_index)` window.
pub type OnUpdateCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Resolves the structural size carried on an item (if any), e.g. a size
/// field on the record. `None` falls through to `min_item_size`.
pub type SizeResolver<T> = Arc<dyn Fn(&T) -> Option<u32> + Send + Sync>;

/// Configuration for [`crate::Recycler`].
///
/// Cheap to clone: resolver slots are `Arc`s, so hosts can tweak a field and
/// call `Recycler::set_options` without reallocating closures.
pub struct RecyclerOptions<T, K = ItemKey, V = ()> {
    pub identity: Identity<T, K, V>,

    /// Fixed item size, or `None` for variable-size mode backed by the
    /// cumulative-offset table.
    pub item_size: Option<u32>,
    /// Placeholder size for items that have not been measured yet
    /// (variable-size mode only). Items resolving to 0 are skipped entirely
    /// until measured.
    pub min_item_size: Option<u32>,
    /// Structural per-item size, consulted after the measured-size cache.
    pub size_of: Option<SizeResolver<T>>,

    /// Extra units rendered past each viewport edge.
    pub buffer: u32,
    /// Hard ceiling on concurrently rendered items; exceeding it is a fatal
    /// configuration error rather than an unbounded allocation.
    pub items_limit: usize,
    /// Whether the scroll source is an ancestor/document instead of the host
    /// element. Passed through to the host's viewport plumbing; the engine
    /// itself only sees the resulting [`crate::Viewport`].
    pub page_mode: bool,
    /// Number of leading items rendered when no viewport exists yet.
    pub prerender: usize,

    pub emit_update: bool,
    pub on_update: Option<OnUpdateCallback>,

    pub axis: ScrollAxis,
    /// Debounce policy forwarded to the host's resize observer.
    pub resize_observer: ResizeObserverConfig,
}

impl<T, K, V> RecyclerOptions<T, K, V> {
    /// Options for fixed-size items. A zero `item_size` is treated as 1.
    pub fn fixed(item_size: u32, identity: Identity<T, K, V>) -> Self {
        let mut options = Self::variable(identity);
        options.item_size = Some(item_size.max(1));
        options
    }

    /// Options for variable-size items (structural or measured sizes).
    pub fn variable(identity: Identity<T, K, V>) -> Self {
        Self {
            identity,
            item_size: None,
            min_item_size: None,
            size_of: None,
            buffer: 200,
            items_limit: 1000,
            page_mode: false,
            prerender: 0,
            emit_update: false,
            on_update: None,
            axis: ScrollAxis::Vertical,
            resize_observer: ResizeObserverConfig::default(),
        }
    }

    pub fn with_min_item_size(mut self, min_item_size: u32) -> Self {
        self.min_item_size = Some(min_item_size);
        self
    }

    pub fn with_size_of(mut self, size_of: impl Fn(&T) -> Option<u32> + Send + Sync + 'static) -> Self {
        self.size_of = Some(Arc::new(size_of));
        self
    }

    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_items_limit(mut self, items_limit: usize) -> Self {
        self.items_limit = items_limit;
        self
    }

    pub fn with_page_mode(mut self, page_mode: bool) -> Self {
        self.page_mode = page_mode;
        self
    }

    pub fn with_prerender(mut self, prerender: usize) -> Self {
        self.prerender = prerender;
        self
    }

    pub fn with_on_update(mut self, on_update: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.emit_update = true;
        self.on_update = Some(Arc::new(on_update));
        self
    }

    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_resize_observer(mut self, resize_observer: ResizeObserverConfig) -> Self {
        self.resize_observer = resize_observer;
        self
    }
}

impl<T, K, V> Clone for RecyclerOptions<T, K, V> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            item_size: self.item_size,
            min_item_size: self.min_item_size,
            size_of: self.size_of.clone(),
            buffer: self.buffer,
            items_limit: self.items_limit,
            page_mode: self.page_mode,
            prerender: self.prerender,
            emit_update: self.emit_update,
            on_update: self.on_update.clone(),
            axis: self.axis,
            resize_observer: self.resize_observer,
        }
    }
}

impl<T, K, V> core::fmt::Debug for RecyclerOptions<T, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclerOptions")
            .field("item_size", &self.item_size)
            .field("min_item_size", &self.min_item_size)
            .field("buffer", &self.buffer)
            .field("items_limit", &self.items_limit)
            .field("page_mode", &self.page_mode)
            .field("prerender", &self.prerender)
            .field("emit_update", &self.emit_update)
            .field("axis", &self.axis)
            .field("resize_observer", &self.resize_observer)
            .finish_non_exhaustive()
    }
}
