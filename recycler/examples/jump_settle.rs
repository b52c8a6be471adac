// Example: coalescing scroll bursts and settling after a programmatic jump.
use recycler::{Identity, Recycler, RecyclerOptions, ScrollSync, Viewport};

fn main() {
    let items: Vec<u64> = (0..50_000).collect();
    let mut list = Recycler::new(RecyclerOptions::fixed(18, Identity::by_value()));
    let mut sync = ScrollSync::new();

    // A burst of scroll events lands within one frame; only the first one
    // schedules work.
    for offset in [100u64, 130, 170] {
        if sync.note_scroll() {
            println!("frame scheduled at offset {offset}");
        }
        list.set_viewport(Viewport::from_element(offset, 400));
    }

    let mut now_ms = 16;
    if sync.begin_frame() {
        let pass = list.refresh(&items, false).unwrap();
        sync.finish_frame(pass.continuous, now_ms);
        println!("after burst: {:?} continuous={}", pass.range, pass.continuous);
    }

    // Programmatic jump to an index: discontinuous, so a settle correction
    // fires after the quiet period in case the browser swallowed the last
    // scroll event.
    let target = list.scroll_offset_for_index(40_000);
    list.set_viewport(Viewport::from_element(target, 400));
    sync.note_scroll();
    now_ms += 16;
    if sync.begin_frame() {
        let pass = list.refresh(&items, false).unwrap();
        sync.finish_frame(pass.continuous, now_ms);
        println!("after jump: {:?} continuous={}", pass.range, pass.continuous);
    }

    now_ms += ScrollSync::SETTLE_DELAY_MS;
    if sync.take_settle_due(now_ms) {
        let pass = list.refresh(&items, false).unwrap();
        println!("settle pass: {:?} continuous={}", pass.range, pass.continuous);
    }
}
