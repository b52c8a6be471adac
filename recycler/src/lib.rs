//! A headless windowing and view-recycling engine for virtual scrolling.
//!
//! Given a large ordered collection, the engine renders only the indices that
//! intersect the viewport (plus a buffer), and assigns them to a small, bounded
//! pool of reusable view slots instead of materializing one slot per item.
//! Items may have a fixed size, a structural size carried on the item, or an
//! unknown size that is measured lazily after first render (see the
//! `recycler-dynamic` crate for the measurement front end).
//!
//! It is UI-agnostic. A DOM/TUI/GUI layer is expected to provide:
//! - the viewport (scroll offset and visible extent, or page-mode bounds)
//! - scroll/resize notifications (coalesced through [`ScrollSync`])
//! - drawing of each live [`ViewRef`] and, for dynamic sizing, measured extents
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod identity;
mod ledger;
mod options;
mod pool;
mod recycler;
mod types;
mod viewport;
mod window;


pub use error::RecyclerError;
pub use identity::{Identity, SlotKey};
pub use ledger::{SizeEntry, SizeLedger};
pub use options::{OnUpdateCallback, RecyclerOptions, SizeResolver};
pub use recycler::{Reconciliation, Recycler, ViewRef};
pub use types::{ItemKey, ScrollAxis, ViewId, Viewport, Window, WindowRange, OFF_SCREEN};
pub use viewport::{ResizeObserverConfig, ScrollSync};
