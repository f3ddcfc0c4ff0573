//! Hover-triggered thumbnail slideshow.
//!
//! While the pointer stays over an entry, its preview images are shown one
//! after another at a fixed cadence, wrapping around. Images whose source
//! was deferred are materialized the first time they come up, and an image
//! that is still loading only becomes current once `image_loaded` reports
//! it. Ending the hover cancels everything and clears the marker.
//!
//! Every hover session gets a fresh number. Ticks and load completions
//! carry or are checked against it, so nothing from an ended hover can
//! advance a later one.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, trace};

use super::timer::{TimerId, TimerQueue};

/// Time each preview image stays current.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// One preview image of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    src: Option<String>,
    deferred: Option<String>,
    loaded: bool,
}

impl Thumbnail {
    /// An image that is already loaded.
    pub fn ready(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            deferred: None,
            loaded: true,
        }
    }

    /// An image with a source set but still loading.
    pub fn loading(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            deferred: None,
            loaded: false,
        }
    }

    /// An image whose source is only assigned when first shown.
    pub fn deferred(src: impl Into<String>) -> Self {
        Self {
            src: None,
            deferred: Some(src.into()),
            loaded: false,
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Swap a deferred source in. Returns `true` if it was deferred.
    fn materialize(&mut self) -> bool {
        match self.deferred.take() {
            Some(src) => {
                self.src = Some(src);
                true
            }
            None => false,
        }
    }
}

/// Something the host has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent<K> {
    /// Image `index` is now the current one
    Shown { key: K, index: usize },
    /// Image `index` must be loaded; report back with `image_loaded`
    Load { key: K, index: usize, src: String },
    /// The slideshow went idle and the marker was cleared
    Stopped { key: K },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading { index: usize },
    Waiting { timer: TimerId },
}

#[derive(Debug, Clone)]
struct Slideshow {
    thumbnails: Vec<Thumbnail>,
    current: Option<usize>,
    hovered: bool,
    session: u64,
    phase: Phase,
}

impl Slideshow {
    fn new(thumbnails: Vec<Thumbnail>) -> Self {
        Self {
            thumbnails,
            current: None,
            hovered: false,
            session: 0,
            phase: Phase::Idle,
        }
    }
}

/// Drives the slideshows of every entry on the page.
#[derive(Debug, Clone)]
pub struct PreviewScheduler<K> {
    interval: Duration,
    entries: HashMap<K, Slideshow>,
    timers: TimerQueue<(K, u64)>,
}

impl<K: Clone + Eq + Hash + std::fmt::Debug> PreviewScheduler<K> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            entries: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Add an entry with its preview images, replacing any previous ones.
    pub fn register(&mut self, key: K, thumbnails: Vec<Thumbnail>) {
        if let Some(mut old) = self.entries.insert(key, Slideshow::new(thumbnails)) {
            stop(&mut old, &mut self.timers);
        }
    }

    /// Drop an entry that is no longer on screen.
    pub fn remove(&mut self, key: &K) {
        if let Some(mut entry) = self.entries.remove(key) {
            stop(&mut entry, &mut self.timers);
        }
    }

    /// Pointer entered the entry: restart from the first image.
    pub fn hover_start(&mut self, key: &K, now: Duration) -> Option<PreviewEvent<K>> {
        let entry = self.entries.get_mut(key)?;
        // Never trust an earlier session to have cleaned up
        stop(entry, &mut self.timers);
        entry.session += 1;
        entry.hovered = true;
        debug!(?key, session = entry.session, "hover started");
        advance(entry, key, &mut self.timers, self.interval, now)
    }

    /// Pointer left the entry: cancel the timer and clear the marker.
    pub fn hover_end(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.hovered = false;
            stop(entry, &mut self.timers);
            debug!(?key, "hover ended");
        }
    }

    /// Report that image `index` of an entry finished loading.
    pub fn image_loaded(
        &mut self,
        key: &K,
        index: usize,
        now: Duration,
    ) -> Option<PreviewEvent<K>> {
        let entry = self.entries.get_mut(key)?;
        entry.thumbnails.get_mut(index)?.loaded = true;

        if entry.phase == (Phase::Loading { index }) {
            return Some(show(entry, key, index, &mut self.timers, self.interval, now));
        }
        None
    }

    /// Fire every timer due at `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<PreviewEvent<K>> {
        let mut events = Vec::new();

        while let Some((id, (key, session))) = self.timers.pop_due(now) {
            let Some(entry) = self.entries.get_mut(&key) else {
                continue;
            };
            if entry.session != session || entry.phase != (Phase::Waiting { timer: id }) {
                trace!(?key, "stale preview tick ignored");
                continue;
            }
            if !entry.hovered {
                stop(entry, &mut self.timers);
                events.push(PreviewEvent::Stopped { key });
                continue;
            }
            if let Some(event) = advance(entry, &key, &mut self.timers, self.interval, now) {
                events.push(event);
            }
        }
        events
    }

    /// Index of the current image of an entry.
    pub fn current(&self, key: &K) -> Option<usize> {
        self.entries.get(key)?.current
    }

    /// Whether the entry's slideshow is running (showing or loading).
    pub fn is_running(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.phase != Phase::Idle)
    }

    pub fn thumbnail(&self, key: &K, index: usize) -> Option<&Thumbnail> {
        self.entries.get(key)?.thumbnails.get(index)
    }

    /// Number of timers still pending across all entries.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<K: Clone + Eq + Hash + std::fmt::Debug> Default for PreviewScheduler<K> {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// Move to the next image in ring order, waiting for it to load if needed.
fn advance<K: Clone>(
    entry: &mut Slideshow,
    key: &K,
    timers: &mut TimerQueue<(K, u64)>,
    interval: Duration,
    now: Duration,
) -> Option<PreviewEvent<K>> {
    let len = entry.thumbnails.len();
    if len == 0 {
        return None;
    }
    let next = entry.current.map_or(0, |c| (c + 1) % len);
    let thumb = &mut entry.thumbnails[next];
    thumb.materialize();

    if thumb.loaded {
        return Some(show(entry, key, next, timers, interval, now));
    }

    let src = thumb.src.clone().unwrap_or_default();
    entry.phase = Phase::Loading { index: next };
    Some(PreviewEvent::Load {
        key: key.clone(),
        index: next,
        src,
    })
}

/// Make `index` current and schedule the next tick while hovered.
fn show<K: Clone>(
    entry: &mut Slideshow,
    key: &K,
    index: usize,
    timers: &mut TimerQueue<(K, u64)>,
    interval: Duration,
    now: Duration,
) -> PreviewEvent<K> {
    entry.current = Some(index);
    if !entry.hovered {
        stop(entry, timers);
        return PreviewEvent::Stopped { key: key.clone() };
    }

    if let Phase::Waiting { timer } = entry.phase {
        timers.cancel(timer);
    }
    let timer = timers.schedule(now + interval, (key.clone(), entry.session));
    entry.phase = Phase::Waiting { timer };
    PreviewEvent::Shown {
        key: key.clone(),
        index,
    }
}

/// Back to idle: no timer, no marker.
fn stop<K>(entry: &mut Slideshow, timers: &mut TimerQueue<(K, u64)>) {
    if let Phase::Waiting { timer } = entry.phase {
        timers.cancel(timer);
    }
    entry.phase = Phase::Idle;
    entry.current = None;
}
