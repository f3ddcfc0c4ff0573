//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use tubekeys::player::{
    Chapter, ChapterList, Control, Entry, FrameRateTable, Host, MediaState, Page, Playlist,
    Session,
};

/// Host that records every side effect.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub pressed: Vec<Control>,
    pub opened: Vec<String>,
}

impl Host for RecordingHost {
    fn press(&mut self, control: Control) {
        self.pressed.push(control);
    }

    fn open(&mut self, entry: &Entry) {
        self.opened.push(entry.id.clone());
    }
}

/// A page with three chapters, a three-entry playlist and two suggestions.
pub fn full_page(highlighted: Option<usize>) -> Page {
    Page {
        chapters: Some(ChapterList::new(vec![
            Chapter::new(0.0, "Intro"),
            Chapter::new(95.0, "Setup"),
            Chapter::new(300.0, "Results"),
        ])),
        playlist: Some(Playlist::new(
            vec![
                Entry::new("a", "First"),
                Entry::new("b", "Second"),
                Entry::new("c", "Third"),
            ],
            highlighted,
        )),
        suggestions: vec![Entry::new("s1", "Suggested"), Entry::new("s2", "Other")],
        ..Page::default()
    }
}

pub type TestSession = Session<MediaState, RecordingHost>;

/// Ten minutes of media at 25 fps.
pub fn session(page: Page) -> TestSession {
    let media = MediaState::new(600.0, FrameRateTable::single(25.0));
    Session::new(media, page, RecordingHost::default())
}

/// Temporary config file with the given content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

/// The tubekeys binary with its config pointed at `config`.
pub fn tubekeys(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tubekeys").expect("binary should build");
    cmd.env("TUBEKEYS_CONFIG", config).env_remove("RUST_LOG");
    cmd
}
