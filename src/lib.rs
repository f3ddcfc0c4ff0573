//! tubekeys - keyboard and hover playback controls for a video front end
//!
//! The library holds the control layer: a generic cyclic selector, the
//! time transport over a `MediaElement`, chapter/speed/playlist navigation,
//! the key binding dispatcher and the hover preview scheduler, plus the
//! small collaborators they lean on (preferences, display formatting,
//! dev auto-reload).

pub mod cli;
pub mod config;
pub mod format;
pub mod player;
pub mod prefs;
pub mod preview;
pub mod reload;

pub use config::Config;
