//! Hover previews for video entries.
//!
//! - `slideshow`: per-entry Idle/Running state machine cycling preview images
//! - `timer`: cancellable timers on a caller-driven clock

mod slideshow;
mod timer;

pub use slideshow::{PreviewEvent, PreviewScheduler, Thumbnail, DEFAULT_INTERVAL};
pub use timer::{TimerId, TimerQueue};
