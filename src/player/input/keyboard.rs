//! Keyboard shortcuts for the player.
//!
//! A `KeyBindingTable` maps normalized key identifiers to `Action`s and is
//! frozen once built. The `KeyDispatcher` looks every key press up in that
//! table after giving an optional pre-dispatch hook the chance to suppress
//! the platform's own handling of the key.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::player::navigation::{Control, Host};
use crate::player::session::Session;
use crate::player::state::MediaElement;

/// Keys whose default handling by the embedded controller is suppressed.
pub const DEFAULT_SUPPRESSED: &[&str] = &[" ", "k", "m", "f", "c", "ArrowLeft", "ArrowRight"];

/// Volume change for the `-`/`+` keys.
pub const DEFAULT_VOLUME_STEP: f64 = 0.05;

/// Errors from parsing an action string such as `"seek -6"`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionParseError {
    #[error("Action is empty")]
    Empty,

    #[error("Unknown action '{name}'")]
    Unknown { name: String },

    #[error("Action '{action}' needs an argument")]
    MissingArgument { action: &'static str },

    #[error("Action '{action}' does not take an argument")]
    UnexpectedArgument { action: &'static str },

    #[error("Invalid argument '{value}' for action '{action}'")]
    InvalidArgument { action: &'static str, value: String },
}

/// Something a key can trigger. Carries its own arguments so it runs with
/// nothing but the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Action {
    /// Press a player button
    Press(Control),
    /// Seek by N seek offsets
    Seek(i64),
    /// Step N frames
    Frames(i64),
    /// Move N entries through the speed menu
    Speed(i64),
    /// Move N chapters
    Chapter(i64),
    /// Change volume by the given amount
    Volume(f64),
    PlaylistPrevious,
    /// Next playlist entry, falling back to the first suggestion
    PlaylistNext,
    Suggestion,
}

impl Action {
    /// Run the action against a session.
    ///
    /// # Returns
    /// `false` when the action was not applicable (no chapters, no next
    /// entry, unknown frame rate).
    pub fn run<M: MediaElement, H: Host>(&self, session: &mut Session<M, H>) -> bool {
        match *self {
            Self::Press(control) => {
                session.press(control);
                true
            }
            Self::Seek(steps) => {
                session.seek(steps);
                true
            }
            Self::Frames(count) => session.seek_frames(count),
            Self::Speed(step) => {
                session.cycle_speed(step);
                true
            }
            Self::Chapter(step) => session.cycle_chapter(step),
            Self::Volume(delta) => {
                session.adjust_volume(delta);
                true
            }
            Self::PlaylistPrevious => session.playlist_previous(),
            Self::PlaylistNext => session.play_next(),
            Self::Suggestion => session.play_first_suggestion(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Press(control) => control.name(),
            Self::Seek(_) => "seek",
            Self::Frames(_) => "frames",
            Self::Speed(_) => "speed",
            Self::Chapter(_) => "chapter",
            Self::Volume(_) => "volume",
            Self::PlaylistPrevious => "playlist-previous",
            Self::PlaylistNext => "playlist-next",
            Self::Suggestion => "suggestion",
        }
    }

    /// Short human description for the help overlay and `keys` listing.
    pub fn describe(&self) -> String {
        match *self {
            Self::Press(Control::Play) => "Play / pause".to_string(),
            Self::Press(Control::Mute) => "Mute / unmute".to_string(),
            Self::Press(Control::Fullscreen) => "Toggle fullscreen".to_string(),
            Self::Press(Control::Captions) => "Toggle captions".to_string(),
            Self::Seek(n) => format!("Seek {:+} step(s)", n),
            Self::Frames(n) => format!("Step {:+} frame(s)", n),
            Self::Speed(n) if n < 0 => "Slower".to_string(),
            Self::Speed(_) => "Faster".to_string(),
            Self::Chapter(n) if n < 0 => "Previous chapter".to_string(),
            Self::Chapter(_) => "Next chapter".to_string(),
            Self::Volume(d) => format!("Volume {:+}", d),
            Self::PlaylistPrevious => "Previous in playlist".to_string(),
            Self::PlaylistNext => "Next in playlist or suggestion".to_string(),
            Self::Suggestion => "Play first suggestion".to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seek(n) | Self::Frames(n) | Self::Speed(n) | Self::Chapter(n) => {
                write!(f, "{} {}", self.name(), n)
            }
            Self::Volume(d) => write!(f, "{} {}", self.name(), d),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or(ActionParseError::Empty)?;
        let arg = parts.next();

        let unit = |action: Action| match arg {
            None => Ok(action),
            Some(_) => Err(ActionParseError::UnexpectedArgument {
                action: action.name(),
            }),
        };
        let int = |action: &'static str| -> Result<i64, ActionParseError> {
            let value = arg.ok_or(ActionParseError::MissingArgument { action })?;
            value
                .parse::<i64>()
                .map_err(|_| ActionParseError::InvalidArgument {
                    action,
                    value: value.to_string(),
                })
        };

        let action = match name {
            "toggle-play" => unit(Self::Press(Control::Play))?,
            "mute" => unit(Self::Press(Control::Mute))?,
            "fullscreen" => unit(Self::Press(Control::Fullscreen))?,
            "captions" => unit(Self::Press(Control::Captions))?,
            "playlist-previous" => unit(Self::PlaylistPrevious)?,
            "playlist-next" => unit(Self::PlaylistNext)?,
            "suggestion" => unit(Self::Suggestion)?,
            "seek" => Self::Seek(int("seek")?),
            "frames" => Self::Frames(int("frames")?),
            "speed" => Self::Speed(int("speed")?),
            "chapter" => Self::Chapter(int("chapter")?),
            "volume" => {
                let value = arg.ok_or(ActionParseError::MissingArgument { action: "volume" })?;
                match value.parse::<f64>() {
                    Ok(delta) if delta.is_finite() => Self::Volume(delta),
                    _ => {
                        return Err(ActionParseError::InvalidArgument {
                            action: "volume",
                            value: value.to_string(),
                        })
                    }
                }
            }
            other => {
                return Err(ActionParseError::Unknown {
                    name: other.to_string(),
                })
            }
        };

        if let Some(extra) = parts.next() {
            return Err(ActionParseError::InvalidArgument {
                action: action.name(),
                value: extra.to_string(),
            });
        }
        Ok(action)
    }
}

impl TryFrom<String> for Action {
    type Error = ActionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

/// Immutable mapping from normalized key identifiers to actions.
///
/// Keys are case-sensitive: `"n"` and `"N"` are different bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyBindingTable {
    bindings: BTreeMap<String, Action>,
}

impl KeyBindingTable {
    /// Build a table from `(key, action)` pairs. Later pairs win.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Action)>) -> Self {
        Self {
            bindings: pairs.into_iter().map(|(k, a)| (k.into(), a)).collect(),
        }
    }

    /// The standard bindings, mostly following the big video site's layout
    /// with a few vim-flavoured additions.
    pub fn defaults() -> Self {
        Self::with_volume_step(DEFAULT_VOLUME_STEP)
    }

    /// Standard bindings with a custom `-`/`+` volume step.
    pub fn with_volume_step(step: f64) -> Self {
        use Action::*;

        Self::from_pairs([
            (" ", Press(Control::Play)),
            ("k", Press(Control::Play)),
            ("m", Press(Control::Mute)),
            ("f", Press(Control::Fullscreen)),
            ("c", Press(Control::Captions)),
            ("j", Seek(-1)),
            ("l", Seek(1)),
            ("ArrowLeft", Seek(-1)),
            ("ArrowRight", Seek(1)),
            (",", Frames(-1)),
            (".", Frames(1)),
            ("<", Speed(-1)),
            (">", Speed(1)),
            ("P", PlaylistPrevious),
            ("N", PlaylistNext),
            ("h", Seek(-1)),
            ("H", Seek(-6)),
            ("J", Seek(-6)),
            ("L", Seek(6)),
            ("-", Volume(-step)),
            ("+", Volume(step)),
            ("p", Chapter(-1)),
            ("n", Chapter(1)),
        ])
    }

    /// Return a new table with `overrides` layered on top.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a Action)>,
    ) -> Self {
        for (key, action) in overrides {
            self.bindings.insert(key.clone(), *action);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Action)> {
        self.bindings.iter().map(|(k, a)| (k.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A single key press routed to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    key: String,
    default_prevented: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_prevented: false,
        }
    }

    /// Normalized key identifier
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stop the platform's default handling of this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Inspects a key press before it is looked up in the binding table.
pub trait PreDispatchHook {
    fn before_dispatch(&self, event: &mut KeyPress);
}

impl<F: Fn(&mut KeyPress)> PreDispatchHook for F {
    fn before_dispatch(&self, event: &mut KeyPress) {
        self(event)
    }
}

/// Suppress default handling for a fixed set of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressDefaults {
    keys: BTreeSet<String>,
}

impl SuppressDefaults {
    pub fn new<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The keys the embedded media controller also reacts to.
    pub fn player_keys() -> Self {
        Self::new(DEFAULT_SUPPRESSED.iter().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl PreDispatchHook for SuppressDefaults {
    fn before_dispatch(&self, event: &mut KeyPress) {
        if self.keys.contains(event.key()) {
            event.prevent_default();
        }
    }
}

/// Outcome of dispatching a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// Dispatcher not installed; the event was left untouched
    Inactive,
    /// No binding for the key; the event passes through
    Unbound,
    /// A bound action ran
    Handled { action: Action, applied: bool },
}

/// Routes key presses to their bound actions.
///
/// Starts uninstalled. `install` is idempotent, so the bindings can never be
/// registered twice.
pub struct KeyDispatcher {
    bindings: KeyBindingTable,
    hook: Option<Box<dyn PreDispatchHook>>,
    installed: bool,
}

impl KeyDispatcher {
    pub fn new(bindings: KeyBindingTable) -> Self {
        Self {
            bindings,
            hook: None,
            installed: false,
        }
    }

    /// Attach a pre-dispatch hook.
    pub fn with_hook(mut self, hook: impl PreDispatchHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Start handling key presses.
    ///
    /// # Returns
    /// `true` on the first call, `false` if already installed.
    pub fn install(&mut self) -> bool {
        if self.installed {
            debug!("key dispatcher already installed");
            return false;
        }
        self.installed = true;
        debug!(bindings = self.bindings.len(), "key dispatcher installed");
        true
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn bindings(&self) -> &KeyBindingTable {
        &self.bindings
    }

    /// Handle one key press synchronously.
    pub fn dispatch<M: MediaElement, H: Host>(
        &self,
        event: &mut KeyPress,
        session: &mut Session<M, H>,
    ) -> Dispatch {
        if !self.installed {
            return Dispatch::Inactive;
        }

        if let Some(hook) = &self.hook {
            hook.before_dispatch(event);
        }

        match self.bindings.get(event.key()) {
            Some(action) => {
                let applied = action.run(session);
                trace!(key = event.key(), %action, applied, "key dispatched");
                Dispatch::Handled { action, applied }
            }
            None => Dispatch::Unbound,
        }
    }
}

impl fmt::Debug for KeyDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDispatcher")
            .field("bindings", &self.bindings)
            .field("hook", &self.hook.is_some())
            .field("installed", &self.installed)
            .finish()
    }
}
