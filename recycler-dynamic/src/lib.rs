//! Dynamic size measurement front end for the `recycler` crate.
//!
//! The core engine lays items out from structural sizes; this crate drives
//! the case where sizes are unknown until the host has painted each item:
//!
//! - post-render measurement with staleness checks ([`MeasurementController`])
//! - the shared container/item context with activity flag and update events
//!   ([`SharedContext`])
//! - scroll-to-end that waits for every pending measurement ([`DynamicList`])
//! - keyed per-item state that survives recycling ([`KeyedState`])
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings): hosts report painted bounds and apply returned scroll offsets.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod context;
mod keyed;
mod measure;
mod scroller;

#[cfg(test)]
mod tests;

pub use context::{ScrollEvent, SharedContext, SubscriptionId};
pub use keyed::KeyedState;
pub use measure::{ItemBounds, MeasurementController};
pub use scroller::{DynamicList, ScrollToEnd};
