use crate::ledger::SizeLedger;
use crate::{RecyclerError, SlotKey, Viewport, Window, WindowRange};

/// Size information available to a windowing pass.
#[derive(Debug)]
pub(crate) enum SizeInfo<'a, K> {
    Fixed(u32),
    Variable(&'a SizeLedger<K>),
}

// Manual `Copy`/`Clone` without the spurious `K: Copy`/`K: Clone` bound that
// `derive` would add: the enum only ever holds a `u32` or a shared reference,
// never an owned `K`.
impl<K> Clone for SizeInfo<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for SizeInfo<'_, K> {}

/// Maps a (buffered) viewport to the visible index window and total extent.
///
/// `viewport` is `None` in a prerender context with no live viewport, which
/// yields the first `prerender` items and an unknown extent.
pub(crate) fn compute_window<K: SlotKey>(
    viewport: Option<Viewport>,
    count: usize,
    sizes: SizeInfo<'_, K>,
    buffer: u32,
    prerender: usize,
    items_limit: usize,
) -> Result<Window, RecyclerError> {
    let window = if count == 0 {
        Window {
            range: WindowRange::new(0, 0),
            extent: Some(0),
        }
    } else {
        match viewport {
            None => Window {
                range: WindowRange::new(0, prerender.min(count)),
                extent: None,
            },
            Some(viewport) => {
                let span = viewport.expand(buffer);
                match sizes {
                    SizeInfo::Fixed(item_size) => fixed_window(span, count, item_size),
                    SizeInfo::Variable(ledger) => variable_window(span, count, ledger),
                }
            }
        }
    };

    if window.range.len() > items_limit {
        rwarn!(
            rendered = window.range.len(),
            limit = items_limit,
            "window exceeds items limit"
        );
        return Err(RecyclerError::Configuration {
            rendered: window.range.len(),
            limit: items_limit,
        });
    }
    Ok(window)
}

fn fixed_window(span: Viewport, count: usize, item_size: u32) -> Window {
    let item_size = item_size.max(1) as u64;
    let start_index = (span.start / item_size) as usize;
    let end_index = (span.end.div_ceil(item_size) as usize).min(count);
    Window {
        range: WindowRange::new(start_index.min(count), end_index),
        extent: Some(count as u64 * item_size),
    }
}

fn variable_window<K: SlotKey>(span: Viewport, count: usize, ledger: &SizeLedger<K>) -> Window {
    debug_assert!(!ledger.is_dirty(), "windowing over a stale ledger");
    debug_assert_eq!(ledger.len(), count, "ledger length out of sync");

    let start_index = ledger.start_index_for(span.start).min(count - 1);

    // Forward scan is bounded by the resulting window, not the collection:
    // it stops at the first accumulator past the span, then takes one more
    // to include the partially visible boundary item.
    let mut end_index = start_index;
    while end_index < count && ledger.accumulator_at(end_index) < span.end {
        end_index += 1;
    }
    end_index = (end_index + 1).min(count);

    Window {
        range: WindowRange::new(start_index, end_index),
        extent: Some(ledger.total()),
    }
}
