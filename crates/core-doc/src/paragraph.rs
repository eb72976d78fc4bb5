//! Paragraph element: an ordered word sequence, word-wrapped to the column
//! budget.
//!
//! The paragraph owns the interesting parts of the cursor state machine:
//! visual-line navigation driven by the per-word line cache, the column-hint
//! mechanism that preserves the screen column across vertical moves, and the
//! word-granular editing operations (split on space, merge on delete at a
//! boundary, kill to start/end of visual line).

use core_text::{Style, char_width};

use crate::Command;
use crate::element::{Caret, EditCtx, EditRequest};
use crate::layout::{Placement, placements};
use crate::surface::{CursorPos, Ink, Surface};
use crate::word::Word;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    words: Vec<Word>,
    /// Screen column of the cursor from the last focused render; the source
    /// of the column hint used by vertical motion.
    column: usize,
}

impl Paragraph {
    /// Build a paragraph by splitting raw characters on spaces. Runs of
    /// spaces never produce empty words.
    pub fn from_chars(data: &[char], style: Style) -> Self {
        let mut words = Vec::new();
        let mut run: Vec<char> = Vec::new();
        for &ch in data {
            if ch == ' ' {
                if !run.is_empty() {
                    let styles = vec![style; run.len()];
                    words.push(Word::from_runs(std::mem::take(&mut run), styles));
                }
            } else {
                run.push(ch);
            }
        }
        if !run.is_empty() {
            let styles = vec![style; run.len()];
            words.push(Word::from_runs(run, styles));
        }
        Self { words, column: 0 }
    }

    /// Unstyled paragraph from plain text.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::from_chars(&chars, Style::empty())
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Take another paragraph's words onto the end of this one.
    pub fn absorb(&mut self, other: Paragraph) {
        self.words.extend(other.words);
    }

    /// Recompute the per-word visual line cache for the given budget and
    /// return the number of rows occupied. Layout is always recomputed from
    /// scratch; one character can reflow every following word.
    pub fn reflow(&mut self, budget: usize) -> usize {
        let placed: Vec<Placement> = placements(&self.words, budget).collect();
        let mut rows = 1;
        for p in placed {
            self.words[p.index].set_line(p.row);
            rows = p.row + 1;
        }
        rows
    }

    /// Resolve the column hint on the visual line the caret's word last
    /// rendered on: walk the line's words accumulating display width until
    /// the hint is met, then scan character widths for the exact offset.
    /// Hints beyond the line clamp to its end.
    pub fn try_column(&self, caret: &mut Caret, target: usize) {
        let n = self.words.len();
        if n == 0 {
            return;
        }
        let cei = caret.cei.min(n - 1);
        let line = self.words[cei].line();
        let mut candidate = cei;
        for i in (0..=cei).rev() {
            if self.words[i].line() != line {
                break;
            }
            candidate = i;
        }
        if target == 0 {
            caret.cei = candidate;
            caret.cex = 0;
            return;
        }
        let mut column = 0usize;
        caret.cei = candidate;
        while candidate < n {
            let word = &self.words[candidate];
            if word.line() != line {
                break;
            }
            if column + word.width() >= target {
                caret.cei = candidate;
                caret.cex = 0;
                while column < target {
                    column += char_width(word.chars()[caret.cex]);
                    caret.cex += 1;
                }
                break;
            }
            caret.cei = candidate;
            caret.cex = word.len();
            column += word.width();
            candidate += 1;
            column += 1; // separator cell
        }
    }

    pub fn start_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        if self.words.is_empty() {
            return;
        }
        self.try_column(caret, column_hint);
    }

    pub fn end_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        if self.words.is_empty() {
            return;
        }
        caret.cei = self.words.len() - 1;
        self.try_column(caret, column_hint);
    }

    pub fn render(
        &mut self,
        caret: &mut Caret,
        width: usize,
        surface: &mut dyn Surface,
        origin_x: isize,
        origin_y: isize,
        focus: bool,
        cursor: &mut CursorPos,
    ) -> usize {
        if focus {
            cursor.x = origin_x;
            cursor.y = origin_y;
        }
        let sey = caret.sey;
        let mut last_row = 0usize;
        let placed: Vec<Placement> = placements(&self.words, width).collect();
        for p in &placed {
            self.words[p.index].set_line(p.row);
            last_row = p.row;
            let y = origin_y + p.row as isize - sey as isize;
            if focus && p.index == caret.cei {
                cursor.x = origin_x + p.col as isize;
                cursor.y = y;
            }
            let word = &self.words[p.index];
            let mut sx = p.col;
            for (j, (&ch, &st)) in word.chars().iter().zip(word.styles()).enumerate() {
                if focus && p.index == caret.cei && j == caret.cex {
                    cursor.x = origin_x + sx as isize;
                    cursor.y = y;
                    caret.cey = p.row.saturating_sub(sey);
                }
                let x = origin_x + sx as isize;
                if y >= 0 && x >= 0 {
                    surface.put(x as usize, y as usize, ch, Ink::Text(st));
                }
                sx += char_width(ch);
            }
            if focus && p.index == caret.cei && caret.cex == word.len() {
                cursor.x = origin_x + sx as isize;
                cursor.y = y;
                caret.cey = p.row.saturating_sub(sey);
            }
        }
        if focus {
            self.column = (cursor.x - origin_x).max(0) as usize;
        }
        (1 + last_row).saturating_sub(sey)
    }

    /// Inverse of `render`: replay the identical wrap walk and map a screen
    /// coordinate to the nearest (word, offset) pair.
    pub fn click(
        &self,
        caret: &mut Caret,
        width: usize,
        origin_x: isize,
        origin_y: isize,
        click_x: isize,
        click_y: isize,
    ) -> (usize, bool) {
        let sey = caret.sey;
        let row_signed = click_y - origin_y + sey as isize;
        let target = if row_signed >= 0 {
            Some(row_signed as usize)
        } else {
            None
        };
        let x_rel = click_x - origin_x;
        let n = self.words.len();

        if n == 0 {
            let lines = 1usize.saturating_sub(sey);
            if target == Some(0) {
                Self::place(caret, 0, 0, 0);
                return (lines, true);
            }
            return (lines, false);
        }

        let mut hit: Option<(usize, usize, usize)> = None;
        let placed: Vec<Placement> = placements(&self.words, width).collect();
        let mut prev: Option<Placement> = None;
        for p in &placed {
            let word = &self.words[p.index];
            // The walk left the target row without an exact hit: clamp to
            // the end of the row's last word. Covers both break-before-word
            // and separator-overflow breaks.
            if hit.is_none()
                && let (Some(t), Some(q)) = (target, prev)
                && p.row > q.row
                && q.row == t
            {
                hit = Some((q.index, self.words[q.index].len(), t));
            }
            // Click left of the margin clamps to the row's first word.
            if hit.is_none()
                && let Some(t) = target
                && p.row == t
                && x_rel < 0
            {
                hit = Some((p.index, 0, t));
            }
            let mut sx = p.col;
            for (j, &ch) in word.chars().iter().enumerate() {
                if hit.is_none()
                    && let Some(t) = target
                    && p.row == t
                    && x_rel == sx as isize
                {
                    hit = Some((p.index, j, t));
                }
                sx += char_width(ch);
            }
            // The separator column reads as "end of the preceding word".
            if p.index + 1 < n
                && sx + 1 <= width
                && hit.is_none()
                && let Some(t) = target
                && p.row == t
                && x_rel == sx as isize
            {
                hit = Some((p.index, word.len(), t));
            }
            prev = Some(*p);
        }
        let last_row = placed.last().map_or(0, |p| p.row);
        if hit.is_none() && target == Some(last_row) {
            hit = Some((n - 1, self.words[n - 1].len(), last_row));
        }

        let lines = (1 + last_row).saturating_sub(sey);
        match hit {
            Some((cei, cex, row)) => {
                Self::place(caret, cei, cex, row);
                (lines, true)
            }
            None => (lines, false),
        }
    }

    fn place(caret: &mut Caret, cei: usize, cex: usize, row: usize) {
        let keep = caret.sey;
        caret.zero();
        caret.sey = keep;
        caret.cei = cei;
        caret.cex = cex;
        caret.cey = row.saturating_sub(keep);
    }

    pub fn key_event(&mut self, ctx: &mut EditCtx, cmd: &Command) -> Option<EditRequest> {
        let n = self.words.len();
        match *cmd {
            Command::LineStart => self.try_column(ctx.caret, 0),
            Command::LineEnd => self.try_column(ctx.caret, ctx.width),

            Command::ElementEnd => {
                if n != 0 {
                    ctx.caret.cei = n - 1;
                    ctx.caret.cex = self.words[n - 1].len();
                }
            }

            Command::KillToEnd => {
                if n == 0 || ctx.caret.cei == n {
                    return None;
                }
                let (cei, cex) = (ctx.caret.cei, ctx.caret.cex);
                self.try_column(ctx.caret, ctx.width);
                if cei == ctx.caret.cei && cex == ctx.caret.cex {
                    // Already at end of the visual line.
                } else if cei == ctx.caret.cei {
                    let end = ctx.caret.cex;
                    self.words[cei].delete_range(cex, end);
                    ctx.caret.cex = cex;
                    ctx.touch();
                } else {
                    // Truncate the boundary word, then drop the covered ones.
                    let end = self.words[cei].len();
                    self.words[cei].delete_range(cex, end);
                    let removed = self.words.drain(cei + 1..=ctx.caret.cei).count();
                    *ctx.words -= removed;
                    ctx.caret.cei = cei;
                    ctx.caret.cex = cex;
                    ctx.touch();
                }
            }

            Command::KillToStart => {
                if n == 0 || (ctx.caret.cei == 0 && ctx.caret.cex == 0) {
                    return None;
                }
                let (cei, cex) = (ctx.caret.cei, ctx.caret.cex);
                self.try_column(ctx.caret, 0);
                if cei == ctx.caret.cei && cex == ctx.caret.cex {
                    // Already at start of the visual line.
                } else if cei == ctx.caret.cei {
                    self.words[cei].delete_range(0, cex);
                    ctx.caret.cex = 0;
                    ctx.touch();
                } else {
                    let start = ctx.caret.cei;
                    self.words[cei].delete_range(0, cex);
                    let removed = self.words.drain(start..cei).count();
                    *ctx.words -= removed;
                    ctx.caret.cei = start;
                    ctx.caret.cex = 0;
                    ctx.touch();
                }
            }

            Command::LineUp => {
                if n == 0 {
                    return Some(EditRequest::MovePrev { hint: 0 });
                }
                if ctx.caret.cei >= n {
                    ctx.caret.cei = n - 1;
                }
                let line = self.words[ctx.caret.cei].line();
                if line == 0 {
                    return Some(EditRequest::MovePrev { hint: self.column });
                }
                while ctx.caret.cei > 0 && self.words[ctx.caret.cei].line() == line {
                    ctx.caret.cei -= 1;
                }
                self.try_column(ctx.caret, self.column);
            }

            Command::LineDown => {
                if n == 0 {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
                if ctx.caret.cei >= n {
                    return Some(EditRequest::MoveNext { hint: self.column });
                }
                let line = self.words[ctx.caret.cei].line();
                ctx.caret.cei += 1;
                while ctx.caret.cei < n {
                    if self.words[ctx.caret.cei].line() > line {
                        self.try_column(ctx.caret, self.column);
                        return None;
                    }
                    ctx.caret.cei += 1;
                }
                return Some(EditRequest::MoveNext { hint: self.column });
            }

            Command::CharBackward => {
                if ctx.caret.cex == 0 {
                    if ctx.caret.cei == 0 {
                        return Some(EditRequest::MovePrev { hint: ctx.width });
                    }
                    ctx.caret.cei -= 1;
                    ctx.caret.cex = self.words[ctx.caret.cei].len();
                } else {
                    ctx.caret.cex -= 1;
                }
            }

            Command::CharForward => {
                if n == 0 {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
                if ctx.caret.cex == self.words[ctx.caret.cei].len() {
                    ctx.caret.cei += 1;
                    ctx.caret.cex = 0;
                    if ctx.caret.cei == n {
                        return Some(EditRequest::MoveNext { hint: 0 });
                    }
                } else {
                    ctx.caret.cex += 1;
                }
            }

            Command::WordForward => {
                if n == 0 || ctx.caret.cei == n {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
                if ctx.caret.cex < self.words[ctx.caret.cei].len() {
                    ctx.caret.cex = self.words[ctx.caret.cei].len();
                } else if ctx.caret.cei == n - 1 {
                    return Some(EditRequest::MoveNext { hint: 0 });
                } else {
                    ctx.caret.cei += 1;
                    ctx.caret.cex = self.words[ctx.caret.cei].len();
                }
            }

            Command::WordBackward => {
                if n == 0 || (ctx.caret.cei == 0 && ctx.caret.cex == 0) {
                    return Some(EditRequest::MovePrev { hint: ctx.width });
                }
                if ctx.caret.cex == 0 {
                    ctx.caret.cei -= 1;
                }
                ctx.caret.cex = 0;
            }

            Command::DeleteForward => {
                if n == 0 {
                    return Some(EditRequest::DeleteSelf);
                }
                let at_end = ctx.caret.cei == n
                    || (ctx.caret.cei == n - 1 && ctx.caret.cex == self.words[n - 1].len());
                if at_end {
                    return Some(EditRequest::MergeForward);
                }
                if ctx.caret.cei < n - 1 && ctx.caret.cex == self.words[ctx.caret.cei].len() {
                    let w = self.words.remove(ctx.caret.cei + 1);
                    self.words[ctx.caret.cei].append(w);
                    *ctx.words -= 1;
                    ctx.touch();
                } else if ctx.caret.cex < self.words[ctx.caret.cei].len() {
                    let at = ctx.caret.cex;
                    self.words[ctx.caret.cei].delete_range(at, at + 1);
                    ctx.touch();
                }
            }

            Command::Backspace => {
                if ctx.caret.cei == 0 && ctx.caret.cex == 0 {
                    return Some(EditRequest::MergeBackward);
                }
                if ctx.caret.cex == 0 {
                    let prev_len = self.words[ctx.caret.cei - 1].len();
                    let w = self.words.remove(ctx.caret.cei);
                    self.words[ctx.caret.cei - 1].append(w);
                    *ctx.words -= 1;
                    ctx.caret.cei -= 1;
                    ctx.caret.cex = prev_len;
                    ctx.touch();
                } else {
                    let at = ctx.caret.cex;
                    self.words[ctx.caret.cei].delete_range(at - 1, at);
                    ctx.caret.cex -= 1;
                    ctx.touch();
                }
            }

            Command::Newline => return Some(EditRequest::NewParagraphBelow),

            Command::Insert(' ') => {
                if ctx.caret.cei < n && !self.words[ctx.caret.cei].is_empty() {
                    let at = ctx.caret.cex;
                    let tail = if at < self.words[ctx.caret.cei].len() {
                        self.words[ctx.caret.cei].split_off(at)
                    } else {
                        Word::default()
                    };
                    self.words.insert(ctx.caret.cei + 1, tail);
                    *ctx.words += 1;
                    ctx.caret.cei += 1;
                    ctx.caret.cex = 0;
                    ctx.touch();
                }
            }

            Command::Insert(ch) => {
                if ctx.caret.cei >= self.words.len() {
                    self.words.push(Word::default());
                    ctx.caret.cei = self.words.len() - 1;
                    *ctx.words += 1;
                }
                let at = ctx.caret.cex;
                self.words[ctx.caret.cei].insert(at, ch, ctx.style);
                ctx.caret.cex += 1;
                ctx.touch();
            }

            _ => {}
        }
        None
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push('p');
        for word in &self.words {
            let mut sty = Style::empty();
            for (&ch, &st) in word.chars().iter().zip(word.styles()) {
                st.write_toggles_from(sty, &mut out);
                sty = st;
                out.push(ch);
            }
            out.push(' ');
        }
        out
    }

    /// Parse the payload after the `p` tag: words separated by literal
    /// spaces, styles reconstructed by replaying the XOR toggles. A missing
    /// trailing separator still yields the final word.
    pub fn deserialize(payload: &str) -> Self {
        let mut words = Vec::new();
        let mut sty = Style::empty();
        let mut data: Vec<char> = Vec::new();
        let mut styles: Vec<Style> = Vec::new();
        for ch in payload.chars() {
            if ch == ' ' {
                words.push(Word::from_runs(
                    std::mem::take(&mut data),
                    std::mem::take(&mut styles),
                ));
                sty = Style::empty();
            } else if let Some(bit) = Style::toggled_by(ch) {
                sty ^= bit;
            } else {
                data.push(ch);
                styles.push(sty);
            }
        }
        if !data.is_empty() {
            words.push(Word::from_runs(data, styles));
        }
        Self { words, column: 0 }
    }
}
