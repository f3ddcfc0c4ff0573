//! Playback logic for the player.
//!
//! This module handles seeking, chapter markers, timestamp parsing and the
//! cyclic selector shared by speed and chapter navigation.

mod cycle;
mod markers;
mod seeking;
mod timestamp;

pub use cycle::cycle;
pub use markers::{parse_chapters, Chapter, ChapterList};
pub use seeking::{
    adjust_volume, jump_to, seek_absolute, seek_frames, seek_relative, seek_to, set_rate,
};
pub use timestamp::{parse_timestamp, TimestampError};
