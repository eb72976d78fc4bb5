//! The atomic unit of paragraph content: a styled run of characters.

use core_text::{Style, char_width, str_width};

/// A word is a parallel pair of character and style sequences plus a cached
/// display width. The width cache is kept exact by every mutator; `len` is
/// always derived from the backing storage.
///
/// The `line` field is the visual line index the word landed on during the
/// most recent layout pass. It is only meaningful immediately after
/// [`crate::Paragraph::reflow`] (or a render) and must be treated as stale
/// until refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    data: Vec<char>,
    styles: Vec<Style>,
    width: usize,
    line: usize,
}

impl Word {
    /// Build a word from parallel character/style runs, computing the width
    /// cache. Panics if the runs disagree in length (a programming error).
    pub fn from_runs(data: Vec<char>, styles: Vec<Style>) -> Self {
        assert_eq!(data.len(), styles.len(), "character/style runs must pair up");
        let width = str_width(&data);
        Self {
            data,
            styles,
            width,
            line: 0,
        }
    }

    /// Character count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cached display width in terminal cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Visual line from the most recent layout pass.
    pub fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    pub fn chars(&self) -> &[char] {
        &self.data
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Insert one styled character at `at` (0..=len).
    pub fn insert(&mut self, at: usize, ch: char, style: Style) {
        self.data.insert(at, ch);
        self.styles.insert(at, style);
        self.width += char_width(ch);
    }

    /// Append another word's run onto this one (word-merge on delete at a
    /// boundary).
    pub fn append(&mut self, other: Word) {
        self.width += other.width;
        self.data.extend(other.data);
        self.styles.extend(other.styles);
    }

    /// Remove the characters in `[start, end)`.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let removed: usize = self.data[start..end].iter().copied().map(char_width).sum();
        self.data.drain(start..end);
        self.styles.drain(start..end);
        self.width -= removed;
    }

    /// Split at `at`, leaving `[0, at)` here and returning the tail. Both
    /// halves get exact width caches.
    pub fn split_off(&mut self, at: usize) -> Word {
        let tail_data: Vec<char> = self.data.split_off(at);
        let tail_styles: Vec<Style> = self.styles.split_off(at);
        let tail = Word::from_runs(tail_data, tail_styles);
        self.width -= tail.width;
        tail
    }

    /// Text content, styles discarded. Useful for assertions and logging.
    pub fn text(&self) -> String {
        self.data.iter().collect()
    }
}
