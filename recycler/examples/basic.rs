// Example: fixed-size windowing over a large list.
use recycler::{Identity, Recycler, RecyclerOptions, Viewport};

#[derive(Debug)]
struct Message {
    id: u64,
    text: String,
}

fn main() {
    let items: Vec<Message> = (0..100_000)
        .map(|i| Message {
            id: i,
            text: format!("message #{i}"),
        })
        .collect();

    let mut list = Recycler::new(RecyclerOptions::fixed(
        24,
        Identity::keyed(|m: &Message| Some(m.id)),
    ));

    list.set_viewport(Viewport::from_element(48_000, 600));
    let pass = list.refresh(&items, false).unwrap();
    println!(
        "window={:?} extent={:?} pool={} live={}",
        pass.range,
        pass.extent,
        list.pool_len(),
        list.live_len()
    );

    list.for_each_view(&items, |view| {
        if view.active {
            println!("slot {:>3} @ {:>6}: {}", view.id, view.position, view.item.text);
        }
    });
}
