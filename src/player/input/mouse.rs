//! Pointer hover tracking for preview entries.
//!
//! Entries occupy rectangular regions of the screen. Each pointer move is
//! hit-tested against them and reported as at most one hover-end and one
//! hover-start.

use crossterm::event::{MouseEvent, MouseEventKind};

/// A rectangular screen area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(col: u16, row: u16, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    /// Whether the cell at (`col`, `row`) lies inside the region.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.col
            && row >= self.row
            && (col - self.col) < self.width
            && (row - self.row) < self.height
    }
}

/// Hover transition produced by a pointer move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverChange<K> {
    /// Entry the pointer stopped hovering
    pub left: Option<K>,
    /// Entry the pointer started hovering
    pub entered: Option<K>,
}

impl<K> HoverChange<K> {
    fn none() -> Self {
        Self {
            left: None,
            entered: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Tracks which entry region the pointer is over.
#[derive(Debug, Clone)]
pub struct HoverTracker<K> {
    regions: Vec<(K, Region)>,
    hovered: Option<K>,
}

impl<K: Clone + PartialEq> HoverTracker<K> {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            hovered: None,
        }
    }

    /// Register (or move) an entry's region.
    pub fn set_region(&mut self, key: K, region: Region) {
        match self.regions.iter_mut().find(|(k, _)| *k == key) {
            Some((_, r)) => *r = region,
            None => self.regions.push((key, region)),
        }
    }

    /// Forget an entry, ending its hover if it was hovered.
    pub fn remove(&mut self, key: &K) -> HoverChange<K> {
        self.regions.retain(|(k, _)| k != key);
        if self.hovered.as_ref() == Some(key) {
            return HoverChange {
                left: self.hovered.take(),
                entered: None,
            };
        }
        HoverChange::none()
    }

    pub fn hovered(&self) -> Option<&K> {
        self.hovered.as_ref()
    }

    /// Hit-test a pointer position.
    pub fn pointer_moved(&mut self, col: u16, row: u16) -> HoverChange<K> {
        let under = self
            .regions
            .iter()
            .find(|(_, r)| r.contains(col, row))
            .map(|(k, _)| k.clone());

        if under == self.hovered {
            return HoverChange::none();
        }
        let left = std::mem::replace(&mut self.hovered, under.clone());
        HoverChange {
            left,
            entered: under,
        }
    }

    /// The pointer left the screen entirely.
    pub fn pointer_left(&mut self) -> HoverChange<K> {
        HoverChange {
            left: self.hovered.take(),
            entered: None,
        }
    }

    /// Feed a terminal mouse event. Only moves and drags affect hover.
    pub fn handle_mouse_event(&mut self, mouse: &MouseEvent) -> HoverChange<K> {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer_moved(mouse.column, mouse.row)
            }
            _ => HoverChange::none(),
        }
    }
}

impl<K: Clone + PartialEq> Default for HoverTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
