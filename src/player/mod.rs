//! Player control layer
//!
//! Turns key presses into playback operations on an embedded media element
//! and navigation on the page around it.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `state`: the `MediaElement` trait and the in-memory `MediaState`
//! - `playback/`: cyclic selection, seeking, timestamps and chapters
//! - `navigation`: speed menu, playlist, suggestions and the `Host` trait
//! - `session`: one player plus its page, the target of every action
//! - `input/`: key bindings, dispatch and hover tracking
//! - `render/`: terminal rendering for the demo
//! - `native`: the interactive terminal demo
//!
//! # Usage
//!
//! ```
//! use tubekeys::player::{
//!     FrameRateTable, KeyBindingTable, KeyDispatcher, KeyPress, MediaElement, MediaState,
//!     Page, Session,
//! };
//! # use tubekeys::player::{Control, Entry, Host};
//! # #[derive(Default)]
//! # struct NoHost;
//! # impl Host for NoHost {
//! #     fn press(&mut self, _: Control) {}
//! #     fn open(&mut self, _: &Entry) {}
//! # }
//!
//! let media = MediaState::new(600.0, FrameRateTable::single(25.0));
//! let mut session = Session::new(media, Page::default(), NoHost);
//! let mut dispatcher = KeyDispatcher::new(KeyBindingTable::defaults());
//! dispatcher.install();
//!
//! dispatcher.dispatch(&mut KeyPress::new("L"), &mut session);
//! assert_eq!(session.media.current_time(), 60.0);
//! ```

pub mod input;
mod native;
pub mod navigation;
pub mod playback;
pub mod render;
pub mod session;
pub mod state;

pub use input::{
    Action, Dispatch, KeyBindingTable, KeyDispatcher, KeyPress, PreDispatchHook, SuppressDefaults,
};
pub use native::{run_demo, DemoHost, DemoOptions};
pub use navigation::{Control, Entry, Host, Page, Playlist, SpeedMenu};
pub use playback::{cycle, parse_timestamp, Chapter, ChapterList};
pub use session::Session;
pub use state::{FrameRateTable, InputResult, MediaElement, MediaPosition, MediaState};
