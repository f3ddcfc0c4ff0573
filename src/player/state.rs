//! Media state management
//!
//! Contains the `MediaElement` trait through which all playback mutations
//! flow, the in-memory `MediaState` substrate, and the shared types used
//! across player modules.

use std::collections::BTreeMap;

use tracing::debug;

/// Result of processing an input event in the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
}

/// Playback position, rate and volume of the embedded media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaPosition {
    /// Current playback time in seconds
    pub current_time: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Playback speed multiplier (1.0 = normal)
    pub playback_rate: f64,
    /// Volume in `[0, 1]`
    pub volume: f64,
    /// Whether playback is paused
    pub paused: bool,
}

impl MediaPosition {
    /// A paused position at the start of a media of the given length.
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration: duration.max(0.0),
            playback_rate: 1.0,
            volume: 1.0,
            paused: true,
        }
    }
}

/// Nominal frame rates per quality level of an adaptive stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRateTable {
    levels: BTreeMap<usize, f64>,
    active: usize,
}

impl FrameRateTable {
    /// Create an empty table with level 0 active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a single active level running at `fps`.
    pub fn single(fps: f64) -> Self {
        let mut table = Self::new();
        table.insert(0, fps);
        table
    }

    /// Record the frame rate of a quality level. Non-positive rates are ignored.
    pub fn insert(&mut self, level: usize, fps: f64) {
        if fps.is_finite() && fps > 0.0 {
            self.levels.insert(level, fps);
        }
    }

    /// Switch the active quality level.
    pub fn set_active(&mut self, level: usize) {
        self.active = level;
    }

    /// Currently active quality level.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Frame rate of the active level, if known.
    pub fn active_rate(&self) -> Option<f64> {
        self.levels.get(&self.active).copied()
    }
}

/// The playback substrate: a mutable position/rate/volume record plus a
/// read-only frame-rate lookup.
///
/// Setters apply the substrate's own bounds; callers do not clamp.
pub trait MediaElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    fn paused(&self) -> bool;
    fn set_paused(&mut self, paused: bool);

    /// Frame rate of the currently active quality level.
    fn frame_rate(&self) -> Option<f64>;
}

/// In-memory media element used by the demo and by tests.
#[derive(Debug, Clone)]
pub struct MediaState {
    position: MediaPosition,
    frame_rates: FrameRateTable,
}

impl MediaState {
    /// Slowest rate the substrate accepts.
    pub const MIN_RATE: f64 = 0.0625;
    /// Fastest rate the substrate accepts.
    pub const MAX_RATE: f64 = 16.0;

    /// Create a paused media of `duration` seconds.
    pub fn new(duration: f64, frame_rates: FrameRateTable) -> Self {
        Self {
            position: MediaPosition::new(duration),
            frame_rates,
        }
    }

    /// Snapshot of the current position record.
    pub fn position(&self) -> MediaPosition {
        self.position
    }

    /// Mutable access to the quality level table.
    pub fn frame_rates_mut(&mut self) -> &mut FrameRateTable {
        &mut self.frame_rates
    }
}

impl MediaElement for MediaState {
    fn current_time(&self) -> f64 {
        self.position.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        if seconds.is_nan() {
            debug!("ignoring NaN seek target");
            return;
        }
        self.position.current_time = seconds.clamp(0.0, self.position.duration);
    }

    fn playback_rate(&self) -> f64 {
        self.position.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if !(Self::MIN_RATE..=Self::MAX_RATE).contains(&rate) {
            debug!(rate, "playback rate out of range, ignored");
            return;
        }
        self.position.playback_rate = rate;
    }

    fn volume(&self) -> f64 {
        self.position.volume
    }

    fn set_volume(&mut self, volume: f64) {
        if !(0.0..=1.0).contains(&volume) {
            debug!(volume, "volume out of range, ignored");
            return;
        }
        self.position.volume = volume;
    }

    fn paused(&self) -> bool {
        self.position.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.position.paused = paused;
    }

    fn frame_rate(&self) -> Option<f64> {
        self.frame_rates.active_rate()
    }
}
