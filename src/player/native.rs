//! Terminal demo of the playback controls.
//!
//! Plays a synthetic video in raw mode: the configured key bindings drive
//! the session, hovering an "Up next" row with the mouse runs its preview
//! slideshow, and volume and speed are remembered across runs. Edits to the
//! config file are picked up while the demo runs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::format::{compact_number, day_date, from_timestamp, grouped_number, relative_date};
use crate::player::input::{key_press, Dispatch, HoverTracker, KeyDispatcher, Region};
use crate::player::navigation::{Control, Entry, Host, Page, Playlist};
use crate::player::playback::parse_chapters;
use crate::player::render::{
    render_help, render_progress_bar, render_separator_line, render_status_bar, StatusInfo,
};
use crate::player::session::Session;
use crate::player::state::{FrameRateTable, InputResult, MediaElement, MediaState};
use crate::prefs::{Lifetime, PreferenceStore};
use crate::preview::{PreviewEvent, PreviewScheduler, Thumbnail};
use crate::reload::{bust_cache, ReloadAction, ReloadClient, ReloadEvent, RECONNECT_INTERVAL};

/// Row of the first "Up next" entry.
const LIST_TOP: u16 = 3;

/// Frame time of the render loop.
const FRAME: Duration = Duration::from_millis(50);

/// Settings for a demo run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoOptions {
    /// Length of the synthetic video in seconds
    pub duration: f64,
    /// Frame rate of the synthetic video
    pub fps: f64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            duration: 600.0,
            fps: 30.0,
        }
    }
}

/// Host side of the demo: remembers button presses until the loop applies
/// them, and which entry was opened last.
#[derive(Debug, Default)]
pub struct DemoHost {
    pending: Vec<Control>,
    pub muted: bool,
    pub captions: bool,
    pub fullscreen: bool,
    pub opened: Option<Entry>,
}

impl Host for DemoHost {
    fn press(&mut self, control: Control) {
        self.pending.push(control);
    }

    fn open(&mut self, entry: &Entry) {
        info!(id = %entry.id, "opening entry");
        self.opened = Some(entry.clone());
    }
}

impl DemoHost {
    /// Apply pressed buttons the way the page's controls would.
    pub fn apply<M: MediaElement>(&mut self, media: &mut M) {
        for control in self.pending.drain(..) {
            match control {
                Control::Play => media.set_paused(!media.paused()),
                Control::Mute => self.muted = !self.muted,
                Control::Captions => self.captions = !self.captions,
                Control::Fullscreen => self.fullscreen = !self.fullscreen,
            }
        }
    }
}

/// The sample page: a short playlist, three chapters and some suggestions.
pub fn demo_page(duration: f64) -> Page {
    let chapters = parse_chapters(&format!(
        "0:Intro,{}:Walkthrough,{}:Wrap-up",
        (duration * 0.2).floor(),
        (duration * 0.8).floor()
    ));
    let playlist = Playlist::new(
        vec![
            Entry::new("pl-1", "Getting started"),
            Entry::new("pl-2", "Keyboard controls"),
            Entry::new("pl-3", "Hover previews"),
        ],
        Some(1),
    );
    Page {
        chapters: Some(chapters),
        playlist: Some(playlist),
        suggestions: vec![
            Entry::new("sg-1", "Frame stepping explained"),
            Entry::new("sg-2", "Playback speed tricks"),
            Entry::new("sg-3", "Chapters and timestamps"),
        ],
        ..Page::default()
    }
}

/// Listing details of an "Up next" entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStats {
    pub views: i64,
    /// Upload time in unix seconds
    pub uploaded: i64,
}

impl EntryStats {
    /// Row form: `1.2M views · 2 days ago`.
    pub fn summary(&self, now: DateTime<Utc>) -> Option<String> {
        let uploaded = from_timestamp(self.uploaded)?;
        Some(format!(
            "{} views · {}",
            compact_number(self.views),
            relative_date(uploaded, now)
        ))
    }

    /// Hover form: `1,234,567 views · Jun 13, 2024`.
    pub fn detail(&self) -> Option<String> {
        let uploaded = from_timestamp(self.uploaded)?;
        Some(format!(
            "{} views · {}",
            grouped_number(self.views),
            day_date(uploaded)
        ))
    }
}

/// View counts and upload ages of the demo suggestions, relative to `now`.
pub fn demo_stats(now: DateTime<Utc>) -> Vec<EntryStats> {
    let ago = |age: chrono::Duration| (now - age).timestamp();
    vec![
        EntryStats {
            views: 1_234_567,
            uploaded: ago(chrono::Duration::days(2)),
        },
        EntryStats {
            views: 48_213,
            uploaded: ago(chrono::Duration::days(40)),
        },
        EntryStats {
            views: 912,
            uploaded: ago(chrono::Duration::hours(5)),
        },
    ]
}

/// Preview images for a suggestion: the first is ready, the rest load on
/// first display.
pub fn demo_thumbnails(entry: &Entry) -> Vec<Thumbnail> {
    stamped_thumbnails(entry, None)
}

/// [`demo_thumbnails`] with `?stamp` on every source so each image is
/// fetched again.
fn stamped_thumbnails(entry: &Entry, stamp: Option<u64>) -> Vec<Thumbnail> {
    (1..=3)
        .map(|n| {
            let mut src = format!("{}/{}.jpg", entry.id, n);
            if let Some(stamp) = stamp {
                src = bust_cache(&src, stamp);
            }
            if n == 1 {
                Thumbnail::ready(src)
            } else {
                Thumbnail::deferred(src)
            }
        })
        .collect()
}

/// Move the playlist highlight to `entry` if it belongs to the playlist.
fn follow_playlist(page: &mut Page, entry: &Entry) {
    let moved = page.playlist.as_ref().and_then(|playlist| {
        let idx = playlist.entries().iter().position(|e| e.id == entry.id)?;
        Some(Playlist::new(playlist.entries().to_vec(), Some(idx)))
    });
    if moved.is_some() {
        page.playlist = moved;
    }
}

/// Advance playback by `elapsed` wall time. Pauses at the end.
pub fn advance_media<M: MediaElement>(media: &mut M, duration: f64, elapsed: Duration) {
    if media.paused() {
        return;
    }
    let next = media.current_time() + elapsed.as_secs_f64() * media.playback_rate();
    media.set_current_time(next);
    if next >= duration {
        media.set_paused(true);
    }
}

/// Run the preview's load requests to completion, as if every image loaded
/// instantly.
fn settle_preview(
    previews: &mut PreviewScheduler<usize>,
    mut pending: Vec<PreviewEvent<usize>>,
    now: Duration,
) {
    while let Some(event) = pending.pop() {
        if let PreviewEvent::Load { key, index, src } = event {
            debug!(key, index, %src, "loading preview image");
            if let Some(next) = previews.image_loaded(&key, index, now) {
                pending.push(next);
            }
        }
    }
}

/// Size and modification time of a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Watches the config file on a [`ReloadClient`]: an edit is a `style`
/// signal, a new file a `page` signal, and a file that disappears is a
/// closed channel that reloads everything once the file is back.
struct ConfigWatch {
    path: PathBuf,
    seen: Option<FileStamp>,
    client: ReloadClient,
    next_check: Duration,
}

impl ConfigWatch {
    fn new(path: PathBuf) -> Self {
        let seen = FileStamp::of(&path);
        Self {
            path,
            seen,
            client: ReloadClient::new(),
            next_check: Duration::ZERO,
        }
    }

    /// Check the file at most every [`RECONNECT_INTERVAL`].
    fn poll(&mut self, now: Duration) -> Option<ReloadAction> {
        if now < self.next_check {
            return None;
        }
        self.next_check = now + RECONNECT_INTERVAL;

        let current = FileStamp::of(&self.path);
        let event = match (self.seen, current) {
            (Some(_), None) => Some(ReloadEvent::Closed),
            (None, Some(_)) if self.client.wants_probe() => Some(ReloadEvent::Alive),
            (None, Some(_)) => Some(ReloadEvent::Message("page".to_string())),
            (Some(before), Some(after)) if before != after => {
                Some(ReloadEvent::Message("style".to_string()))
            }
            _ => None,
        };
        self.seen = current;
        event.and_then(|event| self.client.handle(event))
    }
}

struct DemoState {
    session: Session<MediaState, DemoHost>,
    dispatcher: KeyDispatcher,
    previews: PreviewScheduler<usize>,
    hover: HoverTracker<usize>,
    stats: Vec<EntryStats>,
    watch: Option<ConfigWatch>,
    message: Option<String>,
    show_help: bool,
}

impl DemoState {
    fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        if key.kind == KeyEventKind::Release {
            return InputResult::Continue;
        }
        if self.show_help {
            self.show_help = false;
            return InputResult::Continue;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return InputResult::Quit
            }
            KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
            KeyCode::Char('?') => {
                self.show_help = true;
                return InputResult::Continue;
            }
            _ => {}
        }

        let Some(mut press) = key_press(&key) else {
            return InputResult::Continue;
        };
        match self.dispatcher.dispatch(&mut press, &mut self.session) {
            Dispatch::Handled { action, applied } => {
                self.message = (!applied).then(|| format!("{}: nothing to do", action));
            }
            Dispatch::Unbound | Dispatch::Inactive => {}
        }
        self.session.host.apply(&mut self.session.media);

        if let Some(entry) = self.session.host.opened.take() {
            self.message = Some(format!("Opened \"{}\"", entry.title));
            follow_playlist(&mut self.session.page, &entry);
            self.session.media.set_current_time(0.0);
        }
        InputResult::Continue
    }

    fn hover_changed(&mut self, left: Option<usize>, entered: Option<usize>, now: Duration) {
        if let Some(key) = left {
            self.previews.hover_end(&key);
        }
        if let Some(key) = entered {
            let events = self.previews.hover_start(&key, now).into_iter().collect();
            settle_preview(&mut self.previews, events, now);
        }
    }

    /// Apply a config change. A style refresh swaps the key bindings and
    /// refetches preview images; a page reload also resets the speed menu
    /// and seek offset.
    fn apply_reload(
        &mut self,
        action: ReloadAction,
        config: Result<Config>,
        now: Duration,
        stamp: u64,
    ) {
        let config = match config {
            Ok(config) => config,
            Err(e) => {
                warn!("keeping previous config: {:#}", e);
                self.message = Some(format!("Config error: {:#}", e));
                return;
            }
        };

        let mut dispatcher = config.dispatcher();
        dispatcher.install();
        self.dispatcher = dispatcher;

        for (i, entry) in self.session.page.suggestions.iter().enumerate() {
            self.previews.register(i, stamped_thumbnails(entry, Some(stamp)));
        }
        if let Some(&key) = self.hover.hovered() {
            let events = self.previews.hover_start(&key, now).into_iter().collect();
            settle_preview(&mut self.previews, events, now);
        }

        match action {
            ReloadAction::RefreshStyles => {
                self.message = Some("Key bindings reloaded".to_string());
            }
            ReloadAction::ReloadPage => {
                self.session.page.speed_menu = config.speed_menu();
                self.session.seek_offset = config.player.seek_offset;
                self.message = Some("Config reloaded".to_string());
            }
        }
        info!(?action, "config applied");
    }

    fn render(&self, stdout: &mut io::Stdout, width: u16, height: u16) -> Result<()> {
        if self.show_help {
            return render_help(stdout, width, height, self.dispatcher.bindings());
        }

        let position = self.session.media.position();
        let title = self
            .session
            .page
            .playlist
            .as_ref()
            .and_then(|p| p.highlighted())
            .map_or("Untitled", |e| e.title.as_str());

        execute!(stdout, Clear(ClearType::All), MoveTo(1, 0))?;
        write!(stdout, "\x1b[1mtubekeys demo: {}\x1b[0m", title)?;
        execute!(stdout, MoveTo(1, LIST_TOP - 1))?;
        write!(stdout, "\x1b[90mUp next\x1b[0m")?;

        let now = Utc::now();
        let suggestions = &self.session.page.suggestions;
        for (i, entry) in suggestions.iter().enumerate() {
            execute!(stdout, MoveTo(3, LIST_TOP + i as u16))?;
            let marker = if self.hover.hovered() == Some(&i) { ">" } else { " " };
            write!(stdout, "{} {}", marker, entry.title)?;
            if let Some(summary) = self.stats.get(i).and_then(|s| s.summary(now)) {
                write!(stdout, "  \x1b[90m{}\x1b[0m", summary)?;
            }
            if let Some(index) = self.previews.current(&i) {
                let src = self
                    .previews
                    .thumbnail(&i, index)
                    .and_then(|t| t.src())
                    .unwrap_or("");
                write!(stdout, "  \x1b[36m[preview {}]\x1b[0m", src)?;
            }
        }
        let detail = self
            .hover
            .hovered()
            .and_then(|&i| self.stats.get(i))
            .and_then(EntryStats::detail);
        if let Some(detail) = detail {
            execute!(stdout, MoveTo(5, LIST_TOP + suggestions.len() as u16 + 1))?;
            write!(stdout, "\x1b[90m{}\x1b[0m", detail)?;
        }

        let chapters = self
            .session
            .page
            .chapters()
            .map_or(&[][..], |c| c.as_slice());
        let info = StatusInfo {
            chapter: self
                .session
                .page
                .chapters()
                .and_then(|c| c.at(position.current_time))
                .map(|c| c.label.as_str()),
            muted: self.session.host.muted,
            captions: self.session.host.captions,
            message: self.message.as_deref(),
        };

        let bottom = height.saturating_sub(1);
        render_progress_bar(
            stdout,
            width,
            bottom.saturating_sub(2),
            position.current_time,
            position.duration,
            chapters,
        )?;
        render_separator_line(stdout, width, bottom.saturating_sub(1))?;
        render_status_bar(stdout, width, bottom, &position, &info)?;
        stdout.flush()?;
        Ok(())
    }
}

fn open_preferences() -> PreferenceStore {
    match PreferenceStore::default_path().map(PreferenceStore::load) {
        Some(Ok(store)) => store,
        Some(Err(e)) => {
            warn!("ignoring preferences: {}", e);
            PreferenceStore::in_memory()
        }
        None => PreferenceStore::in_memory(),
    }
}

/// Switches the terminal into and out of the demo's input mode.
trait TerminalMode {
    fn enter(&mut self) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;
}

/// Raw mode with mouse capture and a hidden cursor.
struct RawTerminal;

impl TerminalMode for RawTerminal {
    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), Hide, EnableMouseCapture)
    }

    fn leave(&mut self) -> io::Result<()> {
        let screen = execute!(
            io::stdout(),
            DisableMouseCapture,
            Show,
            Clear(ClearType::All),
            MoveTo(0, 0)
        );
        let raw = disable_raw_mode();
        screen.and(raw)
    }
}

/// Leaves the terminal mode on drop unless `leave` already ran.
struct TerminalGuard<T: TerminalMode> {
    terminal: T,
    active: bool,
}

impl<T: TerminalMode> TerminalGuard<T> {
    fn enter(terminal: T) -> io::Result<Self> {
        let mut guard = Self {
            terminal,
            active: true,
        };
        guard.terminal.enter()?;
        Ok(guard)
    }

    fn leave(mut self) -> io::Result<()> {
        self.active = false;
        self.terminal.leave()
    }
}

impl<T: TerminalMode> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.terminal.leave();
        }
    }
}

/// Run `body` with the terminal in demo mode and restore it on every
/// path. Returns the first error.
fn run_in_terminal<T: TerminalMode>(terminal: T, body: impl FnOnce() -> Result<()>) -> Result<()> {
    let guard = TerminalGuard::enter(terminal)?;
    let run = body();
    let leave = guard.leave();
    run.and(leave.map_err(Into::into))
}

fn remember(prefs: &mut PreferenceStore, media: &MediaState) {
    let position = media.position();
    let stored = prefs
        .store("volume", &position.volume, Lifetime::Long)
        .and_then(|_| prefs.store("speed", &position.playback_rate, Lifetime::Long))
        .and_then(|_| prefs.save());
    if let Err(e) = stored {
        warn!("failed to save preferences: {}", e);
    }
}

/// Run the interactive demo until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn run_demo(config: &Config, options: DemoOptions) -> Result<()> {
    let mut prefs = open_preferences();
    let mut media = MediaState::new(options.duration, FrameRateTable::single(options.fps));
    media.set_volume(prefs.retrieve("volume", 1.0));
    media.set_playback_rate(prefs.retrieve("speed", 1.0));

    let mut page = demo_page(options.duration);
    page.speed_menu = config.speed_menu();

    let mut previews = PreviewScheduler::new(config.preview_interval());
    let mut hover = HoverTracker::new();
    for (i, entry) in page.suggestions.iter().enumerate() {
        previews.register(i, demo_thumbnails(entry));
        hover.set_region(i, Region::new(3, LIST_TOP + i as u16, 60, 1));
    }

    let mut dispatcher = config.dispatcher();
    dispatcher.install();

    let watch = match Config::config_path() {
        Ok(path) => Some(ConfigWatch::new(path)),
        Err(e) => {
            warn!("not watching config: {}", e);
            None
        }
    };

    let mut state = DemoState {
        session: Session::new(media, page, DemoHost::default())
            .with_seek_offset(config.player.seek_offset),
        dispatcher,
        previews,
        hover,
        stats: demo_stats(Utc::now()),
        watch,
        message: None,
        show_help: false,
    };

    let mut stdout = io::stdout();
    let result = run_in_terminal(RawTerminal, || event_loop(&mut state, &mut stdout));
    remember(&mut prefs, &state.session.media);
    result
}

#[cfg(not(tarpaulin_include))]
fn event_loop(state: &mut DemoState, stdout: &mut io::Stdout) -> Result<()> {
    let start = Instant::now();
    let mut last = start;

    loop {
        let (width, height) = terminal::size()?;
        state.render(stdout, width, height)?;

        if event::poll(FRAME)? {
            let now = start.elapsed();
            match event::read()? {
                Event::Key(key) => {
                    if state.handle_key(key) == InputResult::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    let change = state.hover.handle_mouse_event(&mouse);
                    if !change.is_empty() {
                        state.hover_changed(change.left, change.entered, now);
                    }
                }
                _ => {}
            }
        }

        let now = start.elapsed();
        let events = state.previews.tick(now);
        settle_preview(&mut state.previews, events, now);

        if let Some((action, path)) = state
            .watch
            .as_mut()
            .and_then(|w| Some((w.poll(now)?, w.path.clone())))
        {
            let stamp = Utc::now().timestamp().unsigned_abs();
            state.apply_reload(action, Config::load_from(&path), now, stamp);
        }

        let tick = Instant::now();
        let duration = state.session.media.position().duration;
        advance_media(&mut state.session.media, duration, tick - last);
        last = tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::anyhow;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn demo_state(config: &Config) -> DemoState {
        let mut dispatcher = config.dispatcher();
        dispatcher.install();
        let media = MediaState::new(600.0, FrameRateTable::single(30.0));
        DemoState {
            session: Session::new(media, demo_page(600.0), DemoHost::default()),
            dispatcher,
            previews: PreviewScheduler::default(),
            hover: HoverTracker::new(),
            stats: Vec::new(),
            watch: None,
            message: None,
            show_help: false,
        }
    }

    /// Records enter/leave calls and fails where told to.
    #[derive(Clone, Default)]
    struct FakeTerminal {
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_enter: bool,
        fail_leave: bool,
    }

    impl TerminalMode for FakeTerminal {
        fn enter(&mut self) -> io::Result<()> {
            self.calls.borrow_mut().push("enter");
            if self.fail_enter {
                return Err(io::Error::new(io::ErrorKind::Other, "no tty"));
            }
            Ok(())
        }

        fn leave(&mut self) -> io::Result<()> {
            self.calls.borrow_mut().push("leave");
            if self.fail_leave {
                return Err(io::Error::new(io::ErrorKind::Other, "stuck"));
            }
            Ok(())
        }
    }

    #[test]
    fn demo_page_has_chapters_playlist_and_suggestions() {
        let page = demo_page(600.0);
        let chapters = page.chapters().unwrap();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters.as_slice()[1].start_time, 120.0);
        assert_eq!(page.playlist_next().map(|e| e.id.as_str()), Some("pl-3"));
        assert_eq!(page.first_suggestion().map(|e| e.id.as_str()), Some("sg-1"));
    }

    #[test]
    fn host_applies_pending_presses() {
        let mut media = MediaState::new(60.0, FrameRateTable::single(30.0));
        let mut host = DemoHost::default();
        host.press(Control::Play);
        host.press(Control::Mute);
        host.press(Control::Captions);
        host.apply(&mut media);

        assert!(!media.paused());
        assert!(host.muted);
        assert!(host.captions);
        assert!(!host.fullscreen);

        // Pending presses are consumed
        host.apply(&mut media);
        assert!(!media.paused());
    }

    #[test]
    fn advance_media_respects_rate_and_end() {
        let mut media = MediaState::new(10.0, FrameRateTable::single(30.0));
        advance_media(&mut media, 10.0, Duration::from_secs(1));
        assert_eq!(media.current_time(), 0.0);

        media.set_paused(false);
        media.set_playback_rate(2.0);
        advance_media(&mut media, 10.0, Duration::from_secs(2));
        assert_eq!(media.current_time(), 4.0);

        advance_media(&mut media, 10.0, Duration::from_secs(5));
        assert_eq!(media.current_time(), 10.0);
        assert!(media.paused());
    }

    #[test]
    fn follow_playlist_moves_highlight() {
        let mut page = demo_page(600.0);
        let next = page.playlist_next().cloned().unwrap();
        follow_playlist(&mut page, &next);
        assert_eq!(page.playlist_next(), None);
        assert_eq!(page.playlist_previous().map(|e| e.id.as_str()), Some("pl-2"));
    }

    #[test]
    fn settle_preview_loads_deferred_images() {
        let mut previews = PreviewScheduler::new(Duration::from_millis(100));
        previews.register(0usize, demo_thumbnails(&Entry::new("sg-1", "x")));

        let first = previews.hover_start(&0, Duration::ZERO);
        assert_eq!(first, Some(PreviewEvent::Shown { key: 0, index: 0 }));

        let events = previews.tick(Duration::from_millis(100));
        settle_preview(&mut previews, events, Duration::from_millis(100));
        assert_eq!(previews.current(&0), Some(1));
        assert_eq!(
            previews.thumbnail(&0, 1).and_then(|t| t.src()),
            Some("sg-1/2.jpg")
        );
    }

    #[test]
    fn key_handling_drives_the_session() {
        let mut state = demo_state(&Config::default());

        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(state.handle_key(press('k')), InputResult::Continue);
        assert!(!state.session.media.paused());

        state.handle_key(press('l'));
        assert_eq!(state.session.media.current_time(), 10.0);

        state.handle_key(press('N'));
        assert_eq!(state.message.as_deref(), Some("Opened \"Hover previews\""));
        assert_eq!(state.session.media.current_time(), 0.0);

        state.handle_key(press('?'));
        assert!(state.show_help);
        state.handle_key(press('x'));
        assert!(!state.show_help);

        assert_eq!(state.handle_key(press('q')), InputResult::Quit);
    }

    #[test]
    fn terminal_is_restored_when_the_loop_fails() {
        let terminal = FakeTerminal::default();
        let calls = terminal.calls.clone();

        let result = run_in_terminal(terminal, || Err(anyhow!("read failed")));

        assert_eq!(result.unwrap_err().to_string(), "read failed");
        assert_eq!(*calls.borrow(), vec!["enter", "leave"]);
    }

    #[test]
    fn terminal_is_restored_when_entering_fails() {
        let terminal = FakeTerminal {
            fail_enter: true,
            ..FakeTerminal::default()
        };
        let calls = terminal.calls.clone();
        let mut ran = false;

        let result = run_in_terminal(terminal, || {
            ran = true;
            Ok(())
        });

        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(*calls.borrow(), vec!["enter", "leave"]);
    }

    #[test]
    fn loop_error_wins_over_leave_error() {
        let terminal = FakeTerminal {
            fail_leave: true,
            ..FakeTerminal::default()
        };
        let calls = terminal.calls.clone();

        let result = run_in_terminal(terminal.clone(), || Err(anyhow!("read failed")));
        assert_eq!(result.unwrap_err().to_string(), "read failed");

        let result = run_in_terminal(terminal, || Ok(()));
        assert_eq!(result.unwrap_err().to_string(), "stuck");

        // Leave runs once per run, never again on drop
        assert_eq!(*calls.borrow(), vec!["enter", "leave", "enter", "leave"]);
    }

    #[test]
    fn remember_persists_volume_and_speed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = PreferenceStore::load(&path).unwrap();
        let mut media = MediaState::new(60.0, FrameRateTable::single(30.0));
        media.set_volume(0.4);
        media.set_playback_rate(1.5);

        remember(&mut prefs, &media);

        let reloaded = PreferenceStore::load(&path).unwrap();
        assert_eq!(reloaded.retrieve("volume", 1.0), 0.4);
        assert_eq!(reloaded.retrieve("speed", 1.0), 1.5);
    }

    #[test]
    fn entry_stats_render_short_and_long_forms() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let stats = demo_stats(now);
        let summaries: Vec<_> = stats.iter().filter_map(|s| s.summary(now)).collect();
        assert_eq!(
            summaries,
            vec![
                "1.2M views · 2 days ago",
                "48K views · May 2024",
                "912 views · 5 hr. ago"
            ]
        );
        assert_eq!(
            stats[0].detail().as_deref(),
            Some("1,234,567 views · Jun 13, 2024")
        );
    }

    #[test]
    fn stamped_thumbnails_bust_the_cache() {
        let thumbs = stamped_thumbnails(&Entry::new("sg-2", "x"), Some(42));
        let srcs: Vec<_> = thumbs.iter().filter_map(Thumbnail::src).collect();
        assert_eq!(srcs, vec!["sg-2/1.jpg?42", "sg-2/2.jpg?42", "sg-2/3.jpg?42"]);
        assert!(thumbs[1].is_deferred());
    }

    #[test]
    fn config_watch_reports_edits_as_style_refresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let mut watch = ConfigWatch::new(path.clone());

        assert_eq!(watch.poll(ms(0)), None);
        fs::write(&path, "[keys]\n").unwrap();
        // Not yet due
        assert_eq!(watch.poll(ms(100)), None);
        assert_eq!(watch.poll(ms(250)), Some(ReloadAction::RefreshStyles));
        assert_eq!(watch.poll(ms(500)), None);
    }

    #[test]
    fn config_watch_reloads_after_file_returns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let mut watch = ConfigWatch::new(path.clone());

        fs::remove_file(&path).unwrap();
        assert_eq!(watch.poll(ms(0)), None);
        assert!(watch.client.wants_probe());
        assert_eq!(watch.poll(ms(250)), None);

        fs::write(&path, "[player]\n").unwrap();
        assert_eq!(watch.poll(ms(500)), Some(ReloadAction::ReloadPage));
        assert!(!watch.client.wants_probe());
    }

    #[test]
    fn config_watch_treats_new_file_as_page_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut watch = ConfigWatch::new(path.clone());

        assert_eq!(watch.poll(ms(0)), None);
        fs::write(&path, "").unwrap();
        assert_eq!(watch.poll(ms(250)), Some(ReloadAction::ReloadPage));
    }

    #[test]
    fn style_refresh_swaps_bindings_and_refetches_previews() {
        let mut state = demo_state(&Config::default());
        for (i, entry) in demo_page(600.0).suggestions.iter().enumerate() {
            state.previews.register(i, demo_thumbnails(entry));
        }

        let config: Config = toml::from_str("[keys]\n\"x\" = \"seek 2\"\n").unwrap();
        state.apply_reload(ReloadAction::RefreshStyles, Ok(config), ms(0), 42);

        let press = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        state.handle_key(press);
        assert_eq!(state.session.media.current_time(), 20.0);
        assert_eq!(
            state.previews.thumbnail(&0, 0).and_then(|t| t.src()),
            Some("sg-1/1.jpg?42")
        );
        assert_eq!(state.message.as_deref(), Some("Key bindings reloaded"));
    }

    #[test]
    fn page_reload_applies_seek_offset_and_bad_config_is_kept_out() {
        let mut state = demo_state(&Config::default());

        let config: Config = toml::from_str("[player]\nseek_offset = 3.0\n").unwrap();
        state.apply_reload(ReloadAction::ReloadPage, Ok(config), ms(0), 1);
        assert_eq!(state.session.seek_offset, 3.0);
        assert_eq!(state.message.as_deref(), Some("Config reloaded"));

        state.apply_reload(ReloadAction::ReloadPage, Err(anyhow!("bad toml")), ms(0), 2);
        assert_eq!(state.session.seek_offset, 3.0);
        assert_eq!(state.message.as_deref(), Some("Config error: bad toml"));
    }
}
