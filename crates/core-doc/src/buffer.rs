//! Buffer: an ordered element sequence plus the cursor and scroll state.
//!
//! The buffer owns the element list and applies the [`EditRequest`]s that
//! elements answer commands with. `cy` addresses the focused element and may
//! equal the element count: that virtual past-end position is where typing
//! appends new paragraphs. `sy` is the first element considered for
//! rendering; `caret.sey` scrolls within the focused element when it is
//! taller than the viewport.

use core_text::Style;
use tracing::debug;

use crate::Command;
use crate::element::{Caret, EditCtx, EditRequest, Element};
use crate::header::Header;
use crate::paragraph::Paragraph;
use crate::rule::Rule;
use crate::surface::{CursorPos, NullSurface, Surface};

#[derive(Debug, Clone, Default)]
pub struct Buffer {
    name: String,
    elems: Vec<Element>,
    /// Focused element index; `elems.len()` is the virtual past-end slot.
    cy: usize,
    /// First element index considered for rendering.
    sy: usize,
    caret: Caret,
    /// Style mask applied to newly typed paragraph characters.
    style: Style,
    /// Cached buffer-wide word count, maintained incrementally by edits and
    /// recomputed on structural deletes.
    words: usize,
    dirty: bool,
}

/// Saved cursor state for operations that must not disturb the caret.
#[derive(Debug, Clone, Copy)]
pub struct Excursion {
    cy: usize,
    caret: Caret,
}

impl Buffer {
    /// Fresh unsaved buffer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirty: true,
            ..Self::default()
        }
    }

    /// Buffer reconstructed from storage. Clean until edited.
    pub fn from_elems(name: impl Into<String>, elems: Vec<Element>) -> Self {
        let words = elems.iter().map(Element::word_count).sum();
        Self {
            name: name.into(),
            elems,
            words,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn elems(&self) -> &[Element] {
        &self.elems
    }

    pub fn elem_count(&self) -> usize {
        self.elems.len()
    }

    pub fn cy(&self) -> usize {
        self.cy
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn word_count(&self) -> usize {
        self.words
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn save_excursion(&self) -> Excursion {
        Excursion {
            cy: self.cy,
            caret: self.caret,
        }
    }

    pub fn load_excursion(&mut self, e: Excursion) {
        self.cy = e.cy;
        self.caret = e.caret;
    }

    /// Focus the next element, entering at its start; from the last element
    /// this moves to the virtual past-end slot, and from there it is a no-op.
    pub fn next_elem(&mut self, column_hint: usize) {
        if self.cy < self.elems.len() {
            self.cy += 1;
        } else {
            return;
        }
        if self.cy < self.elems.len() {
            self.elems[self.cy].start_of(&mut self.caret, column_hint);
        } else {
            self.caret.zero();
        }
    }

    /// Focus the previous element, entering at its end.
    pub fn prev_elem(&mut self, column_hint: usize) {
        if self.cy > 0 {
            self.cy -= 1;
        } else {
            return;
        }
        self.elems[self.cy].end_of(&mut self.caret, column_hint);
    }

    /// Insert an element at the focused slot (append when past-end). Focus
    /// is left on the inserted element's index.
    pub fn insert_elem(&mut self, elem: Element) {
        self.dirty = true;
        debug!(at = self.cy, "insert element");
        if self.cy == self.elems.len() {
            self.elems.push(elem);
        } else {
            self.elems.insert(self.cy, elem);
        }
    }

    /// Delete the focused element and refocus the one that slides into its
    /// slot (or the past-end slot).
    pub fn delete_elem(&mut self) {
        self.dirty = true;
        if self.cy < self.elems.len() {
            debug!(at = self.cy, "delete element");
            self.elems.remove(self.cy);
            self.recount_words();
        }
        if self.cy == self.elems.len() {
            self.caret.zero();
        } else {
            self.elems[self.cy].start_of(&mut self.caret, 0);
        }
    }

    fn recount_words(&mut self) {
        self.words = self.elems.iter().map(Element::word_count).sum();
    }

    /// Recompute every paragraph's line cache for a new column budget.
    pub fn reflow(&mut self, width: usize) {
        for elem in &mut self.elems {
            if let Element::Paragraph(p) = elem {
                p.reflow(width);
            }
        }
    }

    /// Apply one logical command. Buffer-level commands are handled here;
    /// anything else goes to the focused element, whose cross-element
    /// effects come back as an [`EditRequest`].
    pub fn command(&mut self, width: usize, cmd: &Command) {
        match *cmd {
            Command::ToggleBold => self.style ^= Style::BOLD,
            Command::ToggleItalic => self.style ^= Style::ITALIC,
            Command::ToggleUnderline => self.style ^= Style::UNDERLINE,

            Command::InsertRule => {
                let e = self.save_excursion();
                if self.cy < self.elems.len() {
                    self.cy += 1;
                }
                self.insert_elem(Element::Rule(Rule));
                self.load_excursion(e);
            }

            Command::InsertHeader(level) => {
                self.insert_elem(Element::Header(Header::new(level)));
                self.caret.zero();
            }

            Command::DeleteElement => self.delete_elem(),

            Command::NextElement => {
                if self.cy < self.elems.len() {
                    self.next_elem(0);
                }
            }

            Command::PrevElement => {
                if self.cy > 0 {
                    self.prev_elem(0);
                }
            }

            Command::ElementStart => {
                if self.cy < self.elems.len() {
                    self.caret.zero();
                }
            }

            Command::BufferStart => {
                self.caret.zero();
                self.cy = 0;
                self.sy = 0;
            }

            Command::BufferEnd => {
                self.caret.zero();
                self.cy = self.elems.len();
            }

            _ if self.cy < self.elems.len() => {
                let cy = self.cy;
                let mut ctx = EditCtx {
                    caret: &mut self.caret,
                    style: self.style,
                    width,
                    dirty: &mut self.dirty,
                    words: &mut self.words,
                };
                if let Some(req) = self.elems[cy].key_event(&mut ctx, cmd) {
                    self.apply(width, req);
                }
            }

            // Past-end slot: navigation back in, or append a new paragraph.
            _ => match *cmd {
                Command::LineUp => self.prev_elem(0),
                Command::CharBackward => self.prev_elem(width),
                Command::Newline => {
                    self.insert_elem(Element::Paragraph(Paragraph::default()));
                    self.cy += 1;
                }
                Command::Insert(ch) => {
                    let chars: Vec<char> = if ch == ' ' { Vec::new() } else { vec![ch] };
                    let p = Paragraph::from_chars(&chars, self.style);
                    self.caret.zero();
                    if let Some(last) = p.words().last() {
                        self.caret.cei = p.word_count() - 1;
                        self.caret.cex = last.len();
                    }
                    self.words += p.word_count();
                    self.insert_elem(Element::Paragraph(p));
                }
                _ => {}
            },
        }
    }

    fn apply(&mut self, width: usize, req: EditRequest) {
        match req {
            EditRequest::MoveNext { hint } => self.next_elem(hint),
            EditRequest::MovePrev { hint } => self.prev_elem(hint),
            EditRequest::NewParagraphBelow => {
                self.cy += 1;
                self.insert_elem(Element::Paragraph(Paragraph::default()));
                self.caret.zero();
            }
            EditRequest::DeleteSelf => self.delete_elem(),
            EditRequest::MergeForward => self.merge_forward(),
            EditRequest::MergeBackward => self.merge_backward(width),
        }
    }

    /// Join the following element onto the focused paragraph. Headers block
    /// the merge; rules and empty paragraphs are consumed without adding
    /// content. Cursor and focus stay put.
    fn merge_forward(&mut self) {
        if self.cy + 1 >= self.elems.len() {
            return;
        }
        if self.elems[self.cy + 1].is_header() {
            return;
        }
        debug!(at = self.cy, "merge forward");
        let next = self.elems.remove(self.cy + 1);
        if let Element::Paragraph(other) = next
            && let Element::Paragraph(cur) = &mut self.elems[self.cy]
        {
            cur.absorb(other);
        }
        self.dirty = true;
        self.recount_words();
    }

    /// Backspace at the very start of a paragraph: join it onto the previous
    /// element. The empty-neighbor cases collapse to a plain delete; a
    /// preceding rule is removed; a preceding header blocks the merge.
    fn merge_backward(&mut self, width: usize) {
        if self.cy == 0 {
            return;
        }
        let _ = width;
        match &self.elems[self.cy - 1] {
            Element::Header(_) => {}
            Element::Rule(_) => {
                debug!(at = self.cy, "merge backward over rule");
                self.cy -= 1;
                self.delete_elem();
            }
            Element::Paragraph(prev) => {
                let prev_words = prev.word_count();
                let cur_words = self.elems[self.cy].word_count();
                debug!(at = self.cy, "merge backward");
                if prev_words == 0 {
                    // Empty predecessor: just drop it.
                    self.prev_elem(0);
                    self.delete_elem();
                } else if cur_words == 0 {
                    // Empty self: drop it and land at the predecessor's end.
                    let last_len = match &self.elems[self.cy - 1] {
                        Element::Paragraph(p) => p.words().last().map_or(0, |w| w.len()),
                        _ => 0,
                    };
                    self.delete_elem();
                    self.cy -= 1;
                    self.caret.cei = prev_words - 1;
                    self.caret.cex = last_len;
                } else {
                    // Real merge: predecessor absorbs this paragraph and the
                    // cursor lands at the join point.
                    let Element::Paragraph(cur) = self.elems.remove(self.cy) else {
                        unreachable!("merge backward only requested by paragraphs");
                    };
                    let Element::Paragraph(prev) = &mut self.elems[self.cy - 1] else {
                        unreachable!("predecessor checked above");
                    };
                    prev.absorb(cur);
                    self.dirty = true;
                    self.recount_words();
                    self.cy -= 1;
                    self.caret.zero();
                    self.caret.cei = prev_words;
                    self.caret.cex = 0;
                }
            }
        }
    }

    /// Resolve a click at screen coordinates to a cursor position. Walks the
    /// same layout the renderer produced; a hit on the blank line between
    /// elements focuses the element above at its end.
    pub fn click(
        &mut self,
        width: usize,
        origin_x: isize,
        click_x: isize,
        click_y: isize,
        view_rows: usize,
    ) -> bool {
        if self.sy > self.cy {
            self.sy = self.cy;
        }
        let mut y = 0usize;
        let mut idx = self.sy;
        while y < view_rows && idx < self.elems.len() {
            let (dy, found) =
                self.elems[idx].click(&mut self.caret, width, origin_x, y as isize, click_x, click_y);
            if found {
                self.cy = idx;
                return true;
            }
            y += dy;
            if click_y == y as isize {
                self.cy = idx;
                self.elems[self.cy].end_of(&mut self.caret, width);
                return true;
            }
            y += 1;
            idx += 1;
        }
        false
    }

    /// One layout pass from the current scroll state. Returns the cursor
    /// position; a sentinel far right of the text column means the focused
    /// element was not reached.
    fn attempt_render(
        &mut self,
        width: usize,
        surface: &mut dyn Surface,
        origin_x: isize,
        view_rows: usize,
    ) -> CursorPos {
        let mut cursor = CursorPos {
            x: origin_x + 2 * width.max(1) as isize,
            y: 0,
        };
        let mut y = 0usize;
        let mut idx = self.sy;
        while y < view_rows && idx < self.elems.len() {
            let focus = idx == self.cy;
            let lines = self.elems[idx].render(
                &mut self.caret,
                width,
                surface,
                origin_x,
                y as isize,
                focus,
                &mut cursor,
            );
            y += lines;
            y += 1;
            idx += 1;
        }
        if self.cy == self.elems.len() {
            cursor.x = origin_x;
            cursor.y = y as isize;
        }
        cursor
    }

    /// Render the buffer, first adjusting scroll state until the cursor is
    /// inside the viewport, then painting the final layout.
    pub fn render(
        &mut self,
        width: usize,
        surface: &mut dyn Surface,
        origin_x: isize,
        view_rows: usize,
    ) -> CursorPos {
        if self.sy > self.cy {
            self.sy = self.cy;
        }
        let mut cur = self.attempt_render(width, &mut NullSurface, origin_x, view_rows);
        while cur.x > origin_x + width as isize || cur.y >= view_rows as isize {
            if self.sy == self.cy {
                self.caret.sey += 1;
            } else {
                self.sy = (self.sy + 5).min(self.cy);
            }
            cur = self.attempt_render(width, &mut NullSurface, origin_x, view_rows);
        }
        while cur.y < 0 && self.caret.sey > 0 {
            self.caret.sey -= 1;
            cur = self.attempt_render(width, &mut NullSurface, origin_x, view_rows);
        }
        self.attempt_render(width, surface, origin_x, view_rows)
    }

    /// Serialized element lines, in order.
    pub fn serialize_elems(&self) -> impl Iterator<Item = String> + '_ {
        self.elems.iter().map(Element::serialize)
    }
}
