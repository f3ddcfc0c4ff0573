//! Integration tests for key dispatch against a full session

use tubekeys::player::{
    Action, Control, Dispatch, KeyBindingTable, KeyDispatcher, KeyPress, MediaElement, Page,
    SuppressDefaults,
};

use crate::helpers::{full_page, session, TestSession};

fn installed_dispatcher() -> KeyDispatcher {
    let mut dispatcher =
        KeyDispatcher::new(KeyBindingTable::defaults()).with_hook(SuppressDefaults::player_keys());
    assert!(dispatcher.install());
    dispatcher
}

fn press(dispatcher: &KeyDispatcher, key: &str, s: &mut TestSession) -> Dispatch {
    let mut event = KeyPress::new(key);
    dispatcher.dispatch(&mut event, s)
}

#[test]
fn seek_keys_move_by_seek_offset() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));

    press(&dispatcher, "L", &mut s);
    assert_eq!(s.media.current_time(), 60.0);
    press(&dispatcher, "j", &mut s);
    assert_eq!(s.media.current_time(), 50.0);
    press(&dispatcher, "ArrowRight", &mut s);
    assert_eq!(s.media.current_time(), 60.0);
    press(&dispatcher, "H", &mut s);
    assert_eq!(s.media.current_time(), 0.0);
    // Clamped at the start
    press(&dispatcher, "h", &mut s);
    assert_eq!(s.media.current_time(), 0.0);
}

#[test]
fn frame_keys_step_one_frame() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));
    s.media.set_current_time(10.0);

    press(&dispatcher, ".", &mut s);
    assert!((s.media.current_time() - 10.04).abs() < 1e-9);
    press(&dispatcher, ",", &mut s);
    assert!((s.media.current_time() - 10.0).abs() < 1e-9);
}

#[test]
fn speed_keys_walk_the_menu_and_clamp() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));

    for expected in [1.25, 1.5, 1.75, 2.0, 2.0] {
        press(&dispatcher, ">", &mut s);
        assert_eq!(s.media.playback_rate(), expected);
    }
    press(&dispatcher, "<", &mut s);
    assert_eq!(s.media.playback_rate(), 1.75);
}

#[test]
fn chapter_keys_navigate_chapters() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));
    s.media.set_current_time(120.0);

    press(&dispatcher, "n", &mut s);
    assert_eq!(s.media.current_time(), 300.0);
    press(&dispatcher, "p", &mut s);
    assert_eq!(s.media.current_time(), 95.0);
    press(&dispatcher, "p", &mut s);
    assert_eq!(s.media.current_time(), 0.0);
}

#[test]
fn chapter_keys_without_chapters_are_not_applied() {
    let dispatcher = installed_dispatcher();
    let mut s = session(Page::default());
    s.media.set_current_time(42.0);

    let result = press(&dispatcher, "n", &mut s);
    assert_eq!(
        result,
        Dispatch::Handled {
            action: Action::Chapter(1),
            applied: false
        }
    );
    assert_eq!(s.media.current_time(), 42.0);
}

#[test]
fn volume_keys_clamp_to_range() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));
    s.media.set_volume(0.98);

    press(&dispatcher, "+", &mut s);
    assert_eq!(s.media.volume(), 1.0);

    s.media.set_volume(0.02);
    press(&dispatcher, "-", &mut s);
    assert_eq!(s.media.volume(), 0.0);
}

#[test]
fn player_buttons_go_through_the_host_and_suppress_defaults() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(None));

    for key in [" ", "k", "m", "f", "c"] {
        let mut event = KeyPress::new(key);
        dispatcher.dispatch(&mut event, &mut s);
        assert!(event.default_prevented(), "{:?} should be suppressed", key);
    }
    assert_eq!(
        s.host.pressed,
        vec![
            Control::Play,
            Control::Play,
            Control::Mute,
            Control::Fullscreen,
            Control::Captions
        ]
    );
}

#[test]
fn playlist_next_falls_back_to_suggestion_once() {
    let dispatcher = installed_dispatcher();
    // Highlight on the last entry: no next
    let mut s = session(full_page(Some(2)));

    press(&dispatcher, "N", &mut s);
    assert_eq!(s.host.opened, vec!["s1".to_string()]);
}

#[test]
fn playlist_keys_open_neighbours() {
    let dispatcher = installed_dispatcher();
    let mut s = session(full_page(Some(1)));

    press(&dispatcher, "N", &mut s);
    press(&dispatcher, "P", &mut s);
    assert_eq!(s.host.opened, vec!["c".to_string(), "a".to_string()]);
}

#[test]
fn unbound_and_uninstalled_keys_do_nothing() {
    let mut dispatcher = KeyDispatcher::new(KeyBindingTable::defaults());
    let mut s = session(full_page(None));

    assert_eq!(press(&dispatcher, "L", &mut s), Dispatch::Inactive);
    assert_eq!(s.media.current_time(), 0.0);

    dispatcher.install();
    assert!(!dispatcher.install());
    assert_eq!(press(&dispatcher, "z", &mut s), Dispatch::Unbound);
    assert!(s.host.pressed.is_empty());
}

#[test]
fn jump_to_timestamp_pauses_seeks_and_resumes() {
    let mut s = session(full_page(None));
    s.media.set_paused(false);

    assert_eq!(s.jump_to("4m22.5s"), Some(262.5));
    assert_eq!(s.media.current_time(), 262.5);
    assert!(!s.media.paused());

    assert_eq!(s.jump_to("later"), None);
    assert_eq!(s.media.current_time(), 262.5);
}
