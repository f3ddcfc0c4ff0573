//! Integration tests for hover previews driven by pointer movement

use std::time::Duration;

use tubekeys::player::input::{HoverTracker, Region};
use tubekeys::preview::{PreviewEvent, PreviewScheduler, Thumbnail};

const INTERVAL: Duration = Duration::from_millis(1000);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Two entries on rows 0 and 1, three ready images each.
fn setup() -> (PreviewScheduler<&'static str>, HoverTracker<&'static str>) {
    let mut previews = PreviewScheduler::new(INTERVAL);
    let mut hover = HoverTracker::new();
    for (row, key) in ["first", "second"].into_iter().enumerate() {
        previews.register(
            key,
            (1..=3)
                .map(|n| Thumbnail::ready(format!("{}/{}.jpg", key, n)))
                .collect(),
        );
        hover.set_region(key, Region::new(0, row as u16, 20, 1));
    }
    (previews, hover)
}

/// Feed a pointer move through the tracker into the scheduler.
fn move_to(
    previews: &mut PreviewScheduler<&'static str>,
    hover: &mut HoverTracker<&'static str>,
    col: u16,
    row: u16,
    now: Duration,
) -> Option<PreviewEvent<&'static str>> {
    let change = hover.pointer_moved(col, row);
    if let Some(key) = change.left {
        previews.hover_end(&key);
    }
    change.entered.and_then(|key| previews.hover_start(&key, now))
}

#[test]
fn hovering_cycles_through_images_in_ring_order() {
    let (mut previews, mut hover) = setup();

    let first = move_to(&mut previews, &mut hover, 5, 0, ms(0));
    assert_eq!(first, Some(PreviewEvent::Shown { key: "first", index: 0 }));

    let mut shown = Vec::new();
    for t in [1000, 2000, 3000] {
        for event in previews.tick(ms(t)) {
            if let PreviewEvent::Shown { index, .. } = event {
                shown.push(index);
            }
        }
    }
    assert_eq!(shown, vec![1, 2, 0]);
}

#[test]
fn leaving_before_first_tick_leaves_nothing_behind() {
    let (mut previews, mut hover) = setup();

    move_to(&mut previews, &mut hover, 5, 0, ms(0));
    move_to(&mut previews, &mut hover, 50, 10, ms(200));

    assert_eq!(previews.pending_timers(), 0);
    assert_eq!(previews.current(&"first"), None);
    assert!(previews.tick(ms(5000)).is_empty());
}

#[test]
fn moving_between_entries_switches_slideshows() {
    let (mut previews, mut hover) = setup();

    move_to(&mut previews, &mut hover, 5, 0, ms(0));
    previews.tick(ms(1000));
    assert_eq!(previews.current(&"first"), Some(1));

    let entered = move_to(&mut previews, &mut hover, 5, 1, ms(1500));
    assert_eq!(entered, Some(PreviewEvent::Shown { key: "second", index: 0 }));
    assert!(!previews.is_running(&"first"));
    assert_eq!(previews.current(&"first"), None);
    assert_eq!(previews.pending_timers(), 1);
}

#[test]
fn re_hover_restarts_from_first_image() {
    let (mut previews, mut hover) = setup();

    move_to(&mut previews, &mut hover, 5, 0, ms(0));
    previews.tick(ms(1000));
    previews.tick(ms(2000));
    assert_eq!(previews.current(&"first"), Some(2));

    move_to(&mut previews, &mut hover, 50, 10, ms(2100));
    let again = move_to(&mut previews, &mut hover, 5, 0, ms(2200));
    assert_eq!(again, Some(PreviewEvent::Shown { key: "first", index: 0 }));

    // The timer from the first session must not fire
    assert!(previews.tick(ms(3000)).is_empty());
    assert_eq!(previews.next_deadline(), Some(ms(3200)));
}

#[test]
fn deferred_images_are_loaded_on_demand() {
    let mut previews = PreviewScheduler::new(INTERVAL);
    previews.register(
        "entry",
        vec![
            Thumbnail::ready("entry/1.jpg"),
            Thumbnail::deferred("entry/2.jpg"),
        ],
    );

    previews.hover_start(&"entry", ms(0));
    let events = previews.tick(ms(1000));
    assert_eq!(
        events,
        vec![PreviewEvent::Load {
            key: "entry",
            index: 1,
            src: "entry/2.jpg".to_string()
        }]
    );
    // Still showing the first image while the second loads
    assert_eq!(previews.current(&"entry"), Some(0));
    assert_eq!(previews.pending_timers(), 0);

    let shown = previews.image_loaded(&"entry", 1, ms(1300));
    assert_eq!(shown, Some(PreviewEvent::Shown { key: "entry", index: 1 }));
    assert_eq!(previews.next_deadline(), Some(ms(2300)));
}
