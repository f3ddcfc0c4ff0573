//! Playback session: one media element, the page around it, and the host.
//!
//! Key actions run against a session. Every mutation of the media goes
//! through the transport functions in `playback`; navigation resolvers
//! return `false` when the structure they need is absent.

use tracing::debug;

use crate::player::navigation::{Control, Host, Page};
use crate::player::playback::{self, cycle};
use crate::player::state::MediaElement;

/// Seconds moved by a single `seek 1` when nothing else is configured.
pub const DEFAULT_SEEK_OFFSET: f64 = 10.0;

/// A media element bound to its page and host.
#[derive(Debug)]
pub struct Session<M, H> {
    pub media: M,
    pub page: Page,
    pub host: H,
    /// Seconds per seek step
    pub seek_offset: f64,
}

impl<M: MediaElement, H: Host> Session<M, H> {
    pub fn new(media: M, page: Page, host: H) -> Self {
        Self {
            media,
            page,
            host,
            seek_offset: DEFAULT_SEEK_OFFSET,
        }
    }

    /// Builder-style seek offset override.
    pub fn with_seek_offset(mut self, seconds: f64) -> Self {
        self.seek_offset = seconds;
        self
    }

    /// Seek by `steps` times the seek offset.
    pub fn seek(&mut self, steps: i64) {
        playback::seek_relative(&mut self.media, self.seek_offset * steps as f64);
    }

    /// Step frames at the active quality level's frame rate.
    pub fn seek_frames(&mut self, count: i64) -> bool {
        playback::seek_frames(&mut self.media, count)
    }

    pub fn adjust_volume(&mut self, delta: f64) {
        playback::adjust_volume(&mut self.media, delta);
    }

    /// Follow a timestamp link (pause, seek, resume).
    pub fn jump_to(&mut self, spec: &str) -> Option<f64> {
        playback::jump_to(&mut self.media, spec)
    }

    /// Move `step` entries through the speed menu from the effective rate.
    pub fn cycle_speed(&mut self, step: i64) {
        let current = self.media.playback_rate();
        let rate = cycle(self.page.speed_menu.rates(), step, |r| *r <= current).copied();
        if let Some(rate) = rate {
            debug!(from = current, to = rate, "speed change");
            playback::set_rate(&mut self.media, rate);
        }
    }

    /// Move `step` chapters from the one containing the playhead.
    ///
    /// # Returns
    /// `false` when the video has no chapters.
    pub fn cycle_chapter(&mut self, step: i64) -> bool {
        let Some(chapters) = self.page.chapters() else {
            return false;
        };
        let current = self.media.current_time();
        let Some(target) = cycle(chapters.as_slice(), step, |c| c.start_time <= current) else {
            return false;
        };
        debug!(chapter = %target.label, start = target.start_time, "chapter jump");
        playback::seek_to(&mut self.media, target.start_time);
        true
    }

    /// Open the playlist entry before the highlighted one.
    pub fn playlist_previous(&mut self) -> bool {
        match self.page.playlist_previous() {
            Some(entry) => {
                self.host.open(entry);
                true
            }
            None => false,
        }
    }

    /// Open the playlist entry after the highlighted one.
    pub fn playlist_next(&mut self) -> bool {
        match self.page.playlist_next() {
            Some(entry) => {
                self.host.open(entry);
                true
            }
            None => false,
        }
    }

    /// Open the first suggested video.
    pub fn play_first_suggestion(&mut self) -> bool {
        match self.page.first_suggestion() {
            Some(entry) => {
                self.host.open(entry);
                true
            }
            None => false,
        }
    }

    /// Next playlist entry, or the first suggestion when there is none.
    pub fn play_next(&mut self) -> bool {
        self.playlist_next() || self.play_first_suggestion()
    }

    pub fn press(&mut self, control: Control) {
        self.host.press(control);
    }
}
