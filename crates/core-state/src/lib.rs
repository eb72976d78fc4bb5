//! Document-level state: the open buffers, which one is current, and the
//! sidebar's directory tree over their names.

mod dired;
mod persist;

pub use dired::{DirEntry, DirTree};
pub use persist::LoadError;

use core_doc::Buffer;
use tracing::debug;

#[derive(Debug)]
pub struct State {
    bufs: Vec<Buffer>,
    current: usize,
    /// Path the document saves to. Empty until the first save is named.
    filename: String,
    root: DirTree,
}

impl Default for State {
    /// A document with one empty, untitled buffer.
    fn default() -> Self {
        Self::from_parts(String::new(), vec![Buffer::new("untitled")], 0)
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a state from loaded parts. `current` must be in range.
    pub(crate) fn from_parts(filename: String, bufs: Vec<Buffer>, current: usize) -> Self {
        debug_assert!(current < bufs.len());
        let root = DirTree::build(&bufs, None);
        Self {
            bufs,
            current,
            filename,
            root,
        }
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.bufs
    }

    pub fn buffers_mut(&mut self) -> &mut [Buffer] {
        &mut self.bufs
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn cur_buf(&self) -> &Buffer {
        &self.bufs[self.current]
    }

    pub fn cur_buf_mut(&mut self) -> &mut Buffer {
        &mut self.bufs[self.current]
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Open a fresh buffer and make it current.
    pub fn new_buffer(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        debug!(name = %name, "new buffer");
        self.bufs.push(Buffer::new(name));
        self.current = self.bufs.len() - 1;
        self.regenerate_dired();
        self.current
    }

    pub fn change_buffer(&mut self, idx: usize) {
        if idx < self.bufs.len() {
            self.current = idx;
        }
    }

    /// True when any buffer has unsaved edits.
    pub fn any_dirty(&self) -> bool {
        self.bufs.iter().any(Buffer::is_dirty)
    }

    /// Total word count across all buffers.
    pub fn word_count(&self) -> usize {
        self.bufs.iter().map(Buffer::word_count).sum()
    }

    pub fn dired(&self) -> &DirTree {
        &self.root
    }

    pub fn dired_mut(&mut self) -> &mut DirTree {
        &mut self.root
    }

    /// Rebuild the sidebar tree after buffer names changed, keeping
    /// expansion state for directories that survive.
    pub fn regenerate_dired(&mut self) {
        self.root = DirTree::build(&self.bufs, Some(&self.root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_untitled_buffer() {
        let state = State::new();
        assert_eq!(state.buffers().len(), 1);
        assert_eq!(state.cur_buf().name(), "untitled");
        assert!(state.any_dirty());
    }

    #[test]
    fn new_buffer_becomes_current() {
        let mut state = State::new();
        let idx = state.new_buffer("notes/today");
        assert_eq!(state.current(), idx);
        assert_eq!(state.cur_buf().name(), "notes/today");
    }

    #[test]
    fn change_buffer_ignores_out_of_range() {
        let mut state = State::new();
        state.change_buffer(7);
        assert_eq!(state.current(), 0);
    }
}
