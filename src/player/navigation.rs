//! Page structure consumed by navigation: speed menu, playlist, suggestions.
//!
//! Everything here is an immutable value object built once when the page is
//! set up. Lookups report absence with `Option` rather than failing, so
//! callers can fall back to another action.

use crate::player::playback::ChapterList;

/// Playback rates offered by the player's speed menu.
pub const DEFAULT_RATES: [f64; 5] = [1.0, 1.25, 1.5, 1.75, 2.0];

/// A video entry in a playlist or suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Video identifier used to open the entry
    pub id: String,
    /// Display title
    pub title: String,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Player buttons that can be pressed on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Play,
    Mute,
    Fullscreen,
    Captions,
}

impl Control {
    /// Name used in action strings and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "toggle-play",
            Self::Mute => "mute",
            Self::Fullscreen => "fullscreen",
            Self::Captions => "captions",
        }
    }
}

/// Side effects delegated to the page hosting the player.
pub trait Host {
    /// Activate one of the player's buttons.
    fn press(&mut self, control: Control);

    /// Navigate to an entry.
    fn open(&mut self, entry: &Entry);
}

/// Selectable playback multipliers, sorted ascending. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedMenu {
    rates: Vec<f64>,
}

impl SpeedMenu {
    /// Build a menu from `rates`.
    ///
    /// Non-positive and non-finite rates are dropped; an empty result falls
    /// back to [`DEFAULT_RATES`].
    pub fn new(rates: impl IntoIterator<Item = f64>) -> Self {
        let mut rates: Vec<f64> = rates
            .into_iter()
            .filter(|r| r.is_finite() && *r > 0.0)
            .collect();
        if rates.is_empty() {
            rates = DEFAULT_RATES.to_vec();
        }
        rates.sort_by(|a, b| a.total_cmp(b));
        rates.dedup();
        Self { rates }
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}

impl Default for SpeedMenu {
    fn default() -> Self {
        Self::new(DEFAULT_RATES)
    }
}

/// Playlist entries with the currently playing one highlighted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    entries: Vec<Entry>,
    highlighted: Option<usize>,
}

impl Playlist {
    /// Create a playlist. An out-of-range highlight is treated as none.
    pub fn new(entries: Vec<Entry>, highlighted: Option<usize>) -> Self {
        let highlighted = highlighted.filter(|i| *i < entries.len());
        Self {
            entries,
            highlighted,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn highlighted(&self) -> Option<&Entry> {
        self.highlighted.and_then(|i| self.entries.get(i))
    }

    /// Entry immediately before the highlighted one.
    pub fn previous(&self) -> Option<&Entry> {
        let current = self.highlighted?;
        self.entries.get(current.checked_sub(1)?)
    }

    /// Entry immediately after the highlighted one.
    pub fn next(&self) -> Option<&Entry> {
        self.entries.get(self.highlighted? + 1)
    }
}

/// Everything navigation needs to know about the current page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub chapters: Option<ChapterList>,
    pub speed_menu: SpeedMenu,
    pub playlist: Option<Playlist>,
    pub suggestions: Vec<Entry>,
}

impl Page {
    /// Chapters for the active video, only when there is at least one.
    pub fn chapters(&self) -> Option<&ChapterList> {
        self.chapters.as_ref().filter(|c| !c.is_empty())
    }

    pub fn playlist_previous(&self) -> Option<&Entry> {
        self.playlist.as_ref()?.previous()
    }

    pub fn playlist_next(&self) -> Option<&Entry> {
        self.playlist.as_ref()?.next()
    }

    pub fn first_suggestion(&self) -> Option<&Entry> {
        self.suggestions.first()
    }
}
