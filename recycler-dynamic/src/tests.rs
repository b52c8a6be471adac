use crate::*;

use alloc::vec;
use alloc::vec::Vec;
use std::sync::{Arc, Mutex};

use recycler::{Identity, Recycler, RecyclerError, RecyclerOptions, ScrollAxis, Viewport};

#[derive(Clone, Debug, PartialEq)]
struct Note {
    id: u64,
}

fn notes(n: usize) -> Vec<Note> {
    (0..n as u64).map(|id| Note { id }).collect()
}

fn dynamic_options() -> RecyclerOptions<Note, u64, ()> {
    RecyclerOptions::variable(Identity::keyed(|n: &Note| Some(n.id))).with_min_item_size(20)
}

fn position_of(list: &Recycler<Note, u64, ()>, items: &[Note], key: u64) -> Option<i64> {
    let mut found = None;
    list.for_each_view(items, |v| {
        if v.active && *v.key == key {
            found = Some(v.position);
        }
    });
    found
}

#[test]
fn new_rejects_options_without_dynamic_size_state() {
    let fixed = RecyclerOptions::fixed(24, Identity::keyed(|n: &Note| Some(n.id)));
    assert!(matches!(
        DynamicList::new(fixed).unwrap_err(),
        RecyclerError::MissingCapability(_)
    ));

    let no_min = RecyclerOptions::variable(Identity::keyed(|n: &Note| Some(n.id)));
    assert!(matches!(
        DynamicList::new(no_min).unwrap_err(),
        RecyclerError::MissingCapability(_)
    ));

    assert!(DynamicList::new(dynamic_options()).is_ok());
}

#[test]
fn measurement_updates_layout_and_reaches_fixed_point() {
    let items = notes(10);
    let mut dl = DynamicList::new(dynamic_options()).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 100));
    dl.refresh(&items, false).unwrap();

    // Placeholder layout: every item 20 units tall.
    assert_eq!(position_of(dl.recycler(), &items, 3), Some(60));
    assert_eq!(dl.recycler().unknown_size_len(), 10);

    assert!(dl.request_measurement(2));
    let changed = dl.complete_measurement(2, &2, ItemBounds::new(300.0, 47.4));
    assert!(changed);
    dl.refresh(&items, false).unwrap();

    // 47.4 rounds to 47; everything below item 2 shifts by the difference.
    assert_eq!(dl.item_size_of(&2), 47);
    assert_eq!(position_of(dl.recycler(), &items, 3), Some(40 + 47));
    assert_eq!(dl.recycler().unknown_size_len(), 9);

    // Re-reporting the identical extent is the fixed point.
    assert!(dl.request_measurement(2));
    assert!(!dl.complete_measurement(2, &2, ItemBounds::new(300.0, 47.0)));
}

#[test]
fn horizontal_axis_reads_width() {
    let items = notes(4);
    let mut dl = DynamicList::new(dynamic_options().with_axis(ScrollAxis::Horizontal)).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 100));
    dl.refresh(&items, false).unwrap();

    dl.request_measurement(0);
    assert!(dl.complete_measurement(0, &0, ItemBounds::new(120.5, 16.0)));
    assert_eq!(dl.item_size_of(&0), 121);
}

#[test]
fn stale_measurement_is_discarded() {
    let items = notes(10);
    let mut dl = DynamicList::new(dynamic_options()).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 100));
    dl.refresh(&items, false).unwrap();

    dl.request_measurement(4);
    // The slot was recycled to item 9 before the measurement resolved.
    assert!(!dl.complete_measurement(4, &9, ItemBounds::new(0.0, 64.0)));
    assert_eq!(dl.item_size_of(&4), 0);
    assert_eq!(dl.recycler().unknown_size_len(), 10);

    // Collapsed boxes (hidden container mid-flight) are ignored too.
    dl.request_measurement(4);
    assert!(!dl.complete_measurement(4, &4, ItemBounds::new(0.0, 0.0)));
}

#[test]
fn inactive_requests_are_deferred_and_replayed() {
    let mut dl = DynamicList::<Note>::new(dynamic_options()).unwrap();

    let replayed: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&replayed);
    let sub = dl.context_mut().subscribe(move |event| {
        if let ScrollEvent::Remeasure(key) = event {
            sink.lock().unwrap().push(*key);
        }
    });

    dl.set_active(false);
    assert!(!dl.request_measurement(6));
    assert!(!dl.request_measurement(7));
    assert!(!dl.request_measurement(6)); // deduped
    assert_eq!(dl.measurer().deferred_len(), 2);

    dl.set_active(true);
    assert_eq!(*replayed.lock().unwrap(), vec![6, 7]);
    assert_eq!(dl.measurer().deferred_len(), 0);

    assert!(dl.context_mut().unsubscribe(sub));
    assert!(!dl.context_mut().unsubscribe(sub));
}

#[test]
fn data_change_broadcasts_forced_update() {
    let items = notes(5);
    let mut dl = DynamicList::new(dynamic_options()).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 100));

    let forced = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&forced);
    dl.context_mut().subscribe(move |event| {
        if matches!(event, ScrollEvent::Update { force: true }) {
            *sink.lock().unwrap() += 1;
        }
    });

    dl.refresh(&items, false).unwrap();
    assert_eq!(*forced.lock().unwrap(), 0);
    dl.refresh(&items, true).unwrap();
    assert_eq!(*forced.lock().unwrap(), 1);
}

#[test]
fn force_update_invalidates_but_keeps_layout() {
    let items = notes(5);
    let mut dl = DynamicList::new(dynamic_options()).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 200));
    dl.refresh(&items, false).unwrap();

    dl.request_measurement(1);
    dl.complete_measurement(1, &1, ItemBounds::new(0.0, 50.0));
    dl.refresh(&items, false).unwrap();
    assert!(dl.recycler().is_size_valid(&1));

    dl.force_update(true);
    assert!(!dl.recycler().is_size_valid(&1));
    dl.refresh(&items, false).unwrap();
    // Stale size still lays the list out until the remeasure lands.
    assert_eq!(position_of(dl.recycler(), &items, 2), Some(20 + 50));
}

#[test]
fn scroll_to_end_waits_for_all_measurements() {
    let items = notes(5);
    let mut dl = DynamicList::new(dynamic_options()).unwrap();
    dl.recycler_mut().set_viewport(Viewport::new(0, 60));

    assert!(dl.begin_scroll_to_end());
    assert!(!dl.begin_scroll_to_end()); // already in flight

    // Placeholders only: 5 * 20 = 100, so the tentative bottom is 40.
    let step = dl.poll_scroll_to_end(&items).unwrap();
    assert_eq!(step, ScrollToEnd::Pending { target: 40 });
    assert!(dl.is_scrolling_to_end());

    for id in 0..5u64 {
        dl.request_measurement(id);
        dl.complete_measurement(id, &id, ItemBounds::new(0.0, 30.0));
    }

    // All measured: 5 * 30 = 150, final bottom 90.
    let step = dl.poll_scroll_to_end(&items).unwrap();
    assert_eq!(step, ScrollToEnd::Settled { target: 90 });
    assert!(!dl.is_scrolling_to_end());
}

#[test]
fn keyed_state_persists_across_recycling() {
    let mut state: KeyedState<u64, usize> = KeyedState::new();

    *state.get_or_insert_with(10, || 0) += 1;
    *state.get_or_insert_with(10, || 0) += 1;
    *state.get_or_insert_with(11, || 5) += 1;

    assert_eq!(state.get(&10), Some(&2));
    assert_eq!(state.get(&11), Some(&6));
    assert_eq!(state.len(), 2);

    assert_eq!(state.evict(&10), Some(2));
    assert_eq!(state.get(&10), None);

    state.retain(|&k| k != 11);
    assert!(state.is_empty());
}
