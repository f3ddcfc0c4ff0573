//! Integration tests for configuration wiring

use tubekeys::player::{Action, Dispatch, KeyPress, MediaElement};
use tubekeys::Config;

use crate::helpers::{full_page, session, temp_config};

#[test]
fn configured_dispatcher_uses_overrides_and_seek_offset() {
    let (_dir, path) = temp_config(
        r#"
[player]
seek_offset = 5.0
suppress_defaults = ["x"]

[keys]
"x" = "seek 2"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    let mut dispatcher = config.dispatcher();
    dispatcher.install();

    let mut s = session(full_page(None)).with_seek_offset(config.player.seek_offset);
    let mut event = KeyPress::new("x");
    let result = dispatcher.dispatch(&mut event, &mut s);

    assert_eq!(
        result,
        Dispatch::Handled {
            action: Action::Seek(2),
            applied: true
        }
    );
    assert!(event.default_prevented());
    assert_eq!(s.media.current_time(), 10.0);

    // Space is no longer in the suppressed set
    let mut space = KeyPress::new(" ");
    dispatcher.dispatch(&mut space, &mut s);
    assert!(!space.default_prevented());
}

#[test]
fn configured_speed_menu_replaces_defaults() {
    let (_dir, path) = temp_config("[player]\nspeed_rates = [0.5, 1.0, 3.0]\n");
    let config = Config::load_from(&path).unwrap();

    let mut page = full_page(None);
    page.speed_menu = config.speed_menu();
    let mut s = session(page);

    s.cycle_speed(1);
    assert_eq!(s.media.playback_rate(), 3.0);
    s.cycle_speed(-2);
    assert_eq!(s.media.playback_rate(), 0.5);
}

#[test]
fn preview_interval_comes_from_config() {
    let (_dir, path) = temp_config("[preview]\ninterval_ms = 250\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.preview_interval().as_millis(), 250);
}
