//! Chapter markers for the active video.
//!
//! Chapters come from the timeline UI and are kept sorted by start time so
//! the cyclic selector can locate the chapter containing the playhead.

/// A chapter start point on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Start time in seconds
    pub start_time: f64,
    /// Chapter title
    pub label: String,
}

impl Chapter {
    pub fn new(start_time: f64, label: impl Into<String>) -> Self {
        Self {
            start_time,
            label: label.into(),
        }
    }
}

/// Ordered chapter list, sorted by start time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterList {
    chapters: Vec<Chapter>,
}

impl ChapterList {
    /// Build a list from chapters in any order.
    ///
    /// Chapters with a non-finite start time are dropped.
    pub fn new(mut chapters: Vec<Chapter>) -> Self {
        chapters.retain(|c| c.start_time.is_finite());
        chapters.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Self { chapters }
    }

    pub fn as_slice(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// The chapter containing `time`, if the playhead has reached any.
    pub fn at(&self, time: f64) -> Option<&Chapter> {
        self.chapters.iter().rev().find(|c| c.start_time <= time)
    }
}

/// Parse a chapter listing of the form `"0:Intro,95:Setup,310.5:Results"`.
///
/// Entries without a parseable start time are skipped. The label is
/// optional.
pub fn parse_chapters(spec: &str) -> ChapterList {
    let chapters = spec
        .split(',')
        .filter_map(|item| {
            let item = item.trim();
            let (time, label) = item.split_once(':').unwrap_or((item, ""));
            let start_time = time.trim().parse::<f64>().ok()?;
            Some(Chapter::new(start_time, label.trim()))
        })
        .collect();
    ChapterList::new(chapters)
}
