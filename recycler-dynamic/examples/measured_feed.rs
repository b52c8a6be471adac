// Example: a feed whose row heights are only known after painting.
use recycler::{Identity, RecyclerOptions, Viewport};
use recycler_dynamic::{DynamicList, ItemBounds, ScrollToEnd};

#[derive(Debug)]
struct Post {
    id: u64,
    body: String,
}

// Stand-in for the render layer: "paints" a post and reports its box.
fn paint(post: &Post) -> ItemBounds {
    let lines = 1 + post.body.len() / 40;
    ItemBounds::new(320.0, 24.0 * lines as f64 + 16.0)
}

fn measure_visible(feed: &mut DynamicList<Post>, posts: &[Post]) -> bool {
    let mut painted = Vec::new();
    feed.recycler().for_each_view(posts, |view| {
        if view.active && !feed.recycler().is_size_valid(view.key) {
            painted.push((*view.key, paint(view.item)));
        }
    });
    let mut changed = false;
    for (key, bounds) in painted {
        if feed.request_measurement(key) {
            changed |= feed.complete_measurement(key, &key, bounds);
        }
    }
    changed
}

fn main() {
    let posts: Vec<Post> = (0..15)
        .map(|id| Post {
            id,
            body: "lorem ".repeat(3 + (id as usize * 7) % 20),
        })
        .collect();

    let mut feed = DynamicList::new(
        RecyclerOptions::variable(Identity::keyed(|p: &Post| Some(p.id))).with_min_item_size(40),
    )
    .unwrap();
    feed.recycler_mut().set_viewport(Viewport::from_element(0, 480));
    feed.refresh(&posts, false).unwrap();
    println!(
        "placeholders: window={:?} extent={:?} unmeasured={}",
        feed.recycler().range(),
        feed.recycler().total_extent(),
        feed.recycler().unknown_size_len()
    );

    // Jump to the bottom. The target keeps moving while measurements replace
    // the placeholder sizes; the poll settles once nothing is unmeasured.
    feed.begin_scroll_to_end();
    loop {
        let step = feed.poll_scroll_to_end(&posts).unwrap();
        let target = match step {
            ScrollToEnd::Pending { target } | ScrollToEnd::Settled { target } => target,
        };
        feed.recycler_mut()
            .set_viewport(Viewport::from_element(target, 480));
        feed.refresh(&posts, false).unwrap();
        measure_visible(&mut feed, &posts);

        match step {
            ScrollToEnd::Pending { target } => println!("pending, tentative bottom {target}"),
            ScrollToEnd::Settled { target } => {
                println!("settled at offset {target}");
                break;
            }
        }
    }
}
