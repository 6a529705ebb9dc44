//! Chapter navigation: previous/next link computation, the full-reader
//! overlay state machine, and the desk page's display-order flip.

use crate::models::Chapter;
use crate::query::encode_component;

/// Relative URL of the chapter page for one chapter of a novel.
pub fn chapter_href(novel_id: &str, index: usize) -> String {
    format!("ch.html?id={}&ch={}", encode_component(novel_id), index)
}

/// Relative URL of the novel-detail page.
pub fn novel_href(novel_id: &str) -> String {
    format!("desk.html?id={}", encode_component(novel_id))
}

/// A navigation control: either an enabled link or a disabled,
/// non-interactive placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: Option<String>,
}

impl NavLink {
    pub fn is_enabled(&self) -> bool {
        self.href.is_some()
    }
}

/// Position of the current chapter within the novel's sequence. Assumes a
/// valid `index < count`; the page controller bounds-checks before building
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterNav {
    pub index: usize,
    pub count: usize,
}

impl ChapterNav {
    pub fn new(index: usize, count: usize) -> Self {
        Self { index, count }
    }

    pub fn prev_index(&self) -> Option<usize> {
        (self.index > 0).then(|| self.index - 1)
    }

    pub fn next_index(&self) -> Option<usize> {
        (self.index + 1 < self.count).then(|| self.index + 1)
    }

    pub fn prev_link(&self, novel_id: &str) -> NavLink {
        NavLink {
            href: self.prev_index().map(|i| chapter_href(novel_id, i)),
        }
    }

    pub fn next_link(&self, novel_id: &str) -> NavLink {
        NavLink {
            href: self.next_index().map(|i| chapter_href(novel_id, i)),
        }
    }
}

/// Lifecycle of the in-page full-reader modal. The backdrop click plays a
/// short fade-out before removal; the explicit close controls remove it
/// immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReaderOverlay {
    #[default]
    Closed,
    Open,
    Closing,
}

impl ReaderOverlay {
    pub fn open(&mut self) {
        if matches!(self, ReaderOverlay::Closed) {
            *self = ReaderOverlay::Open;
        }
    }

    pub fn close(&mut self) {
        *self = ReaderOverlay::Closed;
    }

    pub fn backdrop_click(&mut self) {
        if matches!(self, ReaderOverlay::Open) {
            *self = ReaderOverlay::Closing;
        }
    }

    pub fn fade_finished(&mut self) {
        if matches!(self, ReaderOverlay::Closing) {
            *self = ReaderOverlay::Closed;
        }
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self, ReaderOverlay::Closed)
    }
}

/// Keyboard-driven navigation events on the chapter page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Navigate(String),
}

/// Escape navigates back to the novel-detail page. It deliberately does
/// not close the reader overlay, matching the shipped behavior.
pub fn on_key_down(key: &str, novel_id: &str) -> Option<KeyAction> {
    (key == "Escape").then(|| KeyAction::Navigate(novel_href(novel_id)))
}

/// Display order of the desk page's chapter list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterOrder {
    /// Insertion order as served by the API.
    #[default]
    Newest,
    /// Reversed insertion order.
    Oldest,
}

impl ChapterOrder {
    pub fn toggle(self) -> Self {
        match self {
            ChapterOrder::Newest => ChapterOrder::Oldest,
            ChapterOrder::Oldest => ChapterOrder::Newest,
        }
    }

    /// Rows in display order. Each row keeps its canonical insertion index
    /// so chapter links stay stable when the list is reversed.
    pub fn apply<'a>(self, chapters: &'a [Chapter]) -> Vec<(usize, &'a Chapter)> {
        let mut rows: Vec<(usize, &Chapter)> = chapters.iter().enumerate().collect();
        if matches!(self, ChapterOrder::Oldest) {
            rows.reverse();
        }
        rows
    }
}
