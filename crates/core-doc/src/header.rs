//! Header element: a level (0-6) and a flat character sequence.
//!
//! Headers carry no per-character styling; the renderer paints the whole
//! line in the header ink. The level digit is painted in the left margin and
//! the text is centered within the column budget.

use core_text::char_width;

use crate::element::{Caret, EditCtx, EditRequest};
use crate::surface::{CursorPos, Ink, Surface};
use crate::Command;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    level: u8,
    data: Vec<char>,
}

impl Header {
    /// New empty header. Level 0 is the untitled sentinel.
    pub fn new(level: u8) -> Self {
        Self {
            level,
            data: Vec::new(),
        }
    }

    pub fn with_text(level: u8, text: &str) -> Self {
        Self {
            level,
            data: text.chars().collect(),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn text(&self) -> String {
        self.data.iter().collect()
    }

    /// Column the centered text starts at, clamped to a two-cell margin for
    /// the level digit. Render and click share this so hits cannot drift.
    fn anchor(&self, origin_x: isize, width: usize) -> isize {
        let anchor = origin_x + width as isize / 2 - (self.data.len() as isize - 1) / 2;
        anchor.max(origin_x + 2)
    }

    pub fn render(
        &self,
        caret: &Caret,
        width: usize,
        surface: &mut dyn Surface,
        origin_x: isize,
        origin_y: isize,
        focus: bool,
        cursor: &mut CursorPos,
    ) -> usize {
        let digit = (b'0' + self.level) as char;
        if origin_x >= 0 && origin_y >= 0 {
            surface.put(origin_x as usize, origin_y as usize, digit, Ink::Header);
        }

        let anchor = self.anchor(origin_x, width);
        let mut sx = 0usize;
        for (i, &ch) in self.data.iter().enumerate() {
            if sx >= width {
                break;
            }
            if focus && caret.cex == i {
                cursor.x = anchor + sx as isize;
                cursor.y = origin_y;
            }
            let x = anchor + sx as isize;
            if x >= 0 && origin_y >= 0 {
                surface.put(x as usize, origin_y as usize, ch, Ink::Header);
            }
            sx += char_width(ch);
        }
        if focus && caret.cex >= self.data.len() {
            cursor.x = anchor + sx as isize;
            cursor.y = origin_y;
        }
        1
    }

    pub fn click(
        &self,
        caret: &mut Caret,
        width: usize,
        origin_x: isize,
        origin_y: isize,
        click_x: isize,
        click_y: isize,
    ) -> (usize, bool) {
        if click_y != origin_y {
            return (1, false);
        }
        caret.zero();

        let anchor = self.anchor(origin_x, width);
        let mut sx = 0usize;
        for (i, &ch) in self.data.iter().enumerate() {
            if sx >= width {
                break;
            }
            if click_x == anchor + sx as isize {
                caret.cex = i;
            }
            sx += char_width(ch);
        }
        if click_x >= anchor + sx as isize {
            caret.cex = self.data.len();
        }
        (1, true)
    }

    pub fn start_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        caret.cex = column_hint.min(self.data.len());
    }

    pub fn end_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        caret.cex = column_hint.min(self.data.len());
    }

    pub fn key_event(&mut self, ctx: &mut EditCtx, cmd: &Command) -> Option<EditRequest> {
        let len = self.data.len();
        match *cmd {
            Command::Insert(ch) => {
                self.data.insert(ctx.caret.cex, ch);
                ctx.caret.cex += 1;
                ctx.touch();
            }
            Command::LineUp => return Some(EditRequest::MovePrev { hint: ctx.caret.cex }),
            Command::LineDown => return Some(EditRequest::MoveNext { hint: ctx.caret.cex }),
            Command::CharForward => {
                if ctx.caret.cex < len {
                    ctx.caret.cex += 1;
                } else {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
            }
            Command::CharBackward => {
                if ctx.caret.cex > 0 {
                    ctx.caret.cex -= 1;
                } else {
                    return Some(EditRequest::MovePrev { hint: ctx.width });
                }
            }
            Command::WordBackward => {
                if ctx.caret.cex == 0 {
                    return Some(EditRequest::MovePrev { hint: ctx.width });
                }
                while ctx.caret.cex > 0 && self.data[ctx.caret.cex - 1] == ' ' {
                    ctx.caret.cex -= 1;
                }
                if ctx.caret.cex == 0 {
                    return Some(EditRequest::MovePrev { hint: ctx.width });
                }
                while ctx.caret.cex > 0 && self.data[ctx.caret.cex - 1] != ' ' {
                    ctx.caret.cex -= 1;
                }
            }
            Command::WordForward => {
                if ctx.caret.cex >= len {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
                while ctx.caret.cex < len && self.data[ctx.caret.cex] == ' ' {
                    ctx.caret.cex += 1;
                }
                if ctx.caret.cex >= len {
                    return Some(EditRequest::MoveNext { hint: 0 });
                }
                while ctx.caret.cex < len && self.data[ctx.caret.cex] != ' ' {
                    ctx.caret.cex += 1;
                }
            }
            Command::DeleteForward => {
                if ctx.caret.cex < len {
                    self.data.remove(ctx.caret.cex);
                    ctx.touch();
                }
            }
            Command::Backspace => {
                if ctx.caret.cex > 0 {
                    self.data.remove(ctx.caret.cex - 1);
                    ctx.caret.cex -= 1;
                    ctx.touch();
                }
            }
            Command::KillToStart => {
                if ctx.caret.cex > 0 {
                    self.data.drain(..ctx.caret.cex);
                    ctx.caret.cex = 0;
                    ctx.touch();
                }
            }
            Command::KillToEnd => {
                if ctx.caret.cex < len {
                    self.data.truncate(ctx.caret.cex);
                    ctx.touch();
                }
            }
            Command::LineStart => ctx.caret.cex = 0,
            Command::LineEnd | Command::ElementEnd => ctx.caret.cex = len,
            Command::Newline => return Some(EditRequest::NewParagraphBelow),
            _ => {}
        }
        None
    }

    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(2 + self.data.len());
        out.push('h');
        out.push((b'0' + self.level) as char);
        out.extend(self.data.iter());
        out
    }

    /// Parse the payload after the `h` tag: a level digit then raw text.
    pub fn deserialize(payload: &str) -> Option<Self> {
        let mut chars = payload.chars();
        let digit = chars.next()?;
        let level = digit.to_digit(10)?;
        Some(Self {
            level: level as u8,
            data: chars.collect(),
        })
    }
}
