//! Element sum type and the caret/edit plumbing shared by all variants.
//!
//! Elements never reach back into the buffer that owns them. An edit is
//! handed the pieces of buffer state it may touch ([`EditCtx`]) and answers
//! with an optional [`EditRequest`] when the effect crosses the element
//! boundary (move focus, open a paragraph, merge, self-delete). The buffer
//! applies requests; the element never sees its neighbors.

use core_text::Style;
use thiserror::Error;

use crate::Command;
use crate::header::Header;
use crate::paragraph::Paragraph;
use crate::rule::Rule;
use crate::surface::{CursorPos, Surface};

/// Intra-element cursor state. `cex` is a character offset inside the word
/// (or header text, or rule row) addressed by `cei`; `cey` is the cursor's
/// screen row relative to the element's visible top; `sey` is how many of
/// the element's leading visual lines are scrolled off-screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub cex: usize,
    pub cei: usize,
    pub cey: usize,
    pub sey: usize,
}

impl Caret {
    /// Reset every field. Callers that must survive a scroll keep `sey`
    /// around the call themselves.
    pub fn zero(&mut self) {
        *self = Self::default();
    }
}

/// The slice of buffer state an element may touch while handling a command.
pub struct EditCtx<'a> {
    pub caret: &'a mut Caret,
    /// Style applied to newly inserted paragraph characters.
    pub style: Style,
    /// Column budget, used to clamp and as the end-of-line column hint.
    pub width: usize,
    pub dirty: &'a mut bool,
    /// Buffer-wide word count, kept incrementally.
    pub words: &'a mut usize,
}

impl EditCtx<'_> {
    pub fn touch(&mut self) {
        *self.dirty = true;
    }
}

/// Effect of a command that the element cannot apply by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRequest {
    /// Move focus to the next element, entering at its start with the given
    /// column hint.
    MoveNext { hint: usize },
    /// Move focus to the previous element, entering at its end.
    MovePrev { hint: usize },
    /// Open an empty paragraph below this element and focus it.
    NewParagraphBelow,
    /// Remove this element entirely.
    DeleteSelf,
    /// Join the following element onto this one.
    MergeForward,
    /// Join this element onto the preceding one.
    MergeBackward,
}

/// Failure to parse one serialized element line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty element line")]
    Empty,
    #[error("unknown element tag {0:?}")]
    UnknownTag(char),
    #[error("header line missing level digit")]
    HeaderLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Header(Header),
    Rule(Rule),
    Paragraph(Paragraph),
}

impl Element {
    pub fn is_header(&self) -> bool {
        matches!(self, Element::Header(_))
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, Element::Rule(_))
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, Element::Paragraph(_))
    }

    /// Words contributed to the buffer-wide count.
    pub fn word_count(&self) -> usize {
        match self {
            Element::Paragraph(p) => p.word_count(),
            _ => 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
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
        match self {
            Element::Header(h) => h.render(caret, width, surface, origin_x, origin_y, focus, cursor),
            Element::Rule(r) => r.render(caret, width, surface, origin_x, origin_y, focus, cursor),
            Element::Paragraph(p) => {
                p.render(caret, width, surface, origin_x, origin_y, focus, cursor)
            }
        }
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
        match self {
            Element::Header(h) => h.click(caret, width, origin_x, origin_y, click_x, click_y),
            Element::Rule(r) => r.click(caret, width, origin_x, origin_y, click_x, click_y),
            Element::Paragraph(p) => p.click(caret, width, origin_x, origin_y, click_x, click_y),
        }
    }

    /// Place the caret at the element's start, honoring the column hint.
    pub fn start_of(&self, caret: &mut Caret, column_hint: usize) {
        match self {
            Element::Header(h) => h.start_of(caret, column_hint),
            Element::Rule(r) => r.start_of(caret, column_hint),
            Element::Paragraph(p) => p.start_of(caret, column_hint),
        }
    }

    /// Place the caret on the element's last visual line, honoring the hint.
    pub fn end_of(&self, caret: &mut Caret, column_hint: usize) {
        match self {
            Element::Header(h) => h.end_of(caret, column_hint),
            Element::Rule(r) => r.end_of(caret, column_hint),
            Element::Paragraph(p) => p.end_of(caret, column_hint),
        }
    }

    pub fn key_event(&mut self, ctx: &mut EditCtx, cmd: &Command) -> Option<EditRequest> {
        match self {
            Element::Header(h) => h.key_event(ctx, cmd),
            Element::Rule(r) => r.key_event(ctx, cmd),
            Element::Paragraph(p) => p.key_event(ctx, cmd),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            Element::Header(h) => h.serialize(),
            Element::Rule(r) => r.serialize(),
            Element::Paragraph(p) => p.serialize(),
        }
    }

    /// Parse one serialized element line: a tag character followed by the
    /// variant payload.
    pub fn deserialize(line: &str) -> Result<Self, ParseError> {
        let mut chars = line.chars();
        let tag = chars.next().ok_or(ParseError::Empty)?;
        let payload = &line[tag.len_utf8()..];
        match tag {
            'h' => Header::deserialize(payload)
                .map(Element::Header)
                .ok_or(ParseError::HeaderLevel),
            'r' => Ok(Element::Rule(Rule)),
            'p' => Ok(Element::Paragraph(Paragraph::deserialize(payload))),
            other => Err(ParseError::UnknownTag(other)),
        }
    }
}
