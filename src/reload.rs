//! Development auto-reload signal handling.
//!
//! The dev server pushes `page` when templates or scripts change and
//! `style` when only stylesheets changed. When the connection drops the
//! client probes until the server is back, then reloads the whole page.

use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info};

/// How often to probe a restarting server.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(250);

/// What changed on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadSignal {
    Page,
    Style,
}

impl FromStr for ReloadSignal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "style" => Ok(Self::Style),
            _ => Err(()),
        }
    }
}

/// Connection-level events seen by the reload client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadEvent {
    /// Text message on the reload channel
    Message(String),
    /// The reload channel closed
    Closed,
    /// A probe connection succeeded
    Alive,
}

/// What the page should do in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadAction {
    ReloadPage,
    RefreshStyles,
}

/// Connection state of the reload client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadState {
    Connected,
    /// Probing every [`RECONNECT_INTERVAL`]
    Reconnecting,
}

/// Turns reload channel events into page actions.
#[derive(Debug, Clone)]
pub struct ReloadClient {
    state: ReloadState,
}

impl ReloadClient {
    pub fn new() -> Self {
        Self {
            state: ReloadState::Connected,
        }
    }

    pub fn state(&self) -> ReloadState {
        self.state
    }

    /// Whether the caller should keep probing at [`RECONNECT_INTERVAL`].
    pub fn wants_probe(&self) -> bool {
        self.state == ReloadState::Reconnecting
    }

    pub fn handle(&mut self, event: ReloadEvent) -> Option<ReloadAction> {
        match (self.state, event) {
            (ReloadState::Connected, ReloadEvent::Message(text)) => {
                match text.parse::<ReloadSignal>() {
                    Ok(ReloadSignal::Page) => Some(ReloadAction::ReloadPage),
                    Ok(ReloadSignal::Style) => Some(ReloadAction::RefreshStyles),
                    Err(()) => {
                        debug!(message = %text, "ignoring unknown reload message");
                        None
                    }
                }
            }
            (ReloadState::Connected, ReloadEvent::Closed) => {
                info!("reload channel closed, waiting for server");
                self.state = ReloadState::Reconnecting;
                None
            }
            (ReloadState::Reconnecting, ReloadEvent::Alive) => {
                self.state = ReloadState::Connected;
                Some(ReloadAction::ReloadPage)
            }
            _ => None,
        }
    }
}

impl Default for ReloadClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace any query string of a stylesheet URL with `?stamp` so the
/// browser fetches it again.
pub fn bust_cache(href: &str, stamp: u64) -> String {
    let base = href.split_once('?').map_or(href, |(base, _)| base);
    format!("{}?{}", base, stamp)
}
