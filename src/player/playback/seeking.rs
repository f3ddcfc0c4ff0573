//! Time transport: the only code path that mutates a `MediaElement`.
//!
//! Relative, frame and absolute seeks, plus volume and rate changes. Bounds
//! belong to the media element; nothing here clamps position or rate.

use tracing::{debug, warn};

use super::timestamp::parse_timestamp;
use crate::player::state::MediaElement;

/// Move the playhead by `offset` seconds.
pub fn seek_relative<M: MediaElement + ?Sized>(media: &mut M, offset: f64) {
    let target = media.current_time() + offset;
    media.set_current_time(target);
}

/// Seek to an absolute position in seconds.
pub fn seek_to<M: MediaElement + ?Sized>(media: &mut M, seconds: f64) {
    media.set_current_time(seconds);
}

/// Step `count` frames forward (or backward when negative) at the active
/// quality level's frame rate.
///
/// # Returns
/// `false` without touching the position when no frame rate is known.
pub fn seek_frames<M: MediaElement + ?Sized>(media: &mut M, count: i64) -> bool {
    let Some(fps) = media.frame_rate() else {
        debug!("no frame rate for active level, frame step skipped");
        return false;
    };
    seek_relative(media, count as f64 / fps);
    true
}

/// Seek to a timestamp such as `"1h03m12s"` or `"45"`.
///
/// # Returns
/// The target in seconds, or `None` (position untouched) when the timestamp
/// is malformed.
pub fn seek_absolute<M: MediaElement + ?Sized>(media: &mut M, spec: &str) -> Option<f64> {
    match parse_timestamp(spec) {
        Ok(seconds) => {
            seek_to(media, seconds);
            Some(seconds)
        }
        Err(e) => {
            warn!("ignoring seek: {}", e);
            None
        }
    }
}

/// Follow a timestamp link: pause, seek, then resume playback.
///
/// Malformed timestamps leave the media completely untouched.
pub fn jump_to<M: MediaElement + ?Sized>(media: &mut M, spec: &str) -> Option<f64> {
    let seconds = match parse_timestamp(spec) {
        Ok(seconds) => seconds,
        Err(e) => {
            warn!("ignoring timestamp link: {}", e);
            return None;
        }
    };
    media.set_paused(true);
    seek_to(media, seconds);
    media.set_paused(false);
    Some(seconds)
}

/// Change volume by `delta`, clamped to `[0, 1]`.
pub fn adjust_volume<M: MediaElement + ?Sized>(media: &mut M, delta: f64) {
    let volume = (media.volume() + delta).clamp(0.0, 1.0);
    media.set_volume(volume);
}

/// Set the playback rate as-is.
pub fn set_rate<M: MediaElement + ?Sized>(media: &mut M, rate: f64) {
    media.set_playback_rate(rate);
}
