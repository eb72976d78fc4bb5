//! The three-attribute style bitmask and its on-disk toggle encoding.
//!
//! A paragraph character carries any combination of bold, italic, and
//! underline. The persisted form never stores a style per character; instead
//! specific control bytes are emitted immediately before a character whose
//! style differs from the previous character's, and each control byte XORs a
//! single attribute bit. Decoding replays the toggles in order.

use bitflags::bitflags;

bitflags! {
    /// Character attribute mask. Bit values are part of the file format's
    /// toggle semantics and must stay stable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Style: u8 {
        const UNDERLINE = 1 << 0;
        const ITALIC = 1 << 1;
        const BOLD = 1 << 2;
    }
}

/// Control byte toggling [`Style::BOLD`].
pub const TOGGLE_BOLD: char = '\u{02}';
/// Control byte toggling [`Style::ITALIC`].
pub const TOGGLE_ITALIC: char = '\u{09}';
/// Control byte toggling [`Style::UNDERLINE`].
pub const TOGGLE_UNDERLINE: char = '\u{15}';

impl Style {
    /// The attribute bit a serialized control byte toggles, if `ch` is one.
    pub fn toggled_by(ch: char) -> Option<Style> {
        match ch {
            TOGGLE_BOLD => Some(Style::BOLD),
            TOGGLE_ITALIC => Some(Style::ITALIC),
            TOGGLE_UNDERLINE => Some(Style::UNDERLINE),
            _ => None,
        }
    }

    /// Append the control bytes that carry the transition `from -> self`.
    pub fn write_toggles_from(self, from: Style, out: &mut String) {
        let diff = from ^ self;
        if diff.contains(Style::ITALIC) {
            out.push(TOGGLE_ITALIC);
        }
        if diff.contains(Style::BOLD) {
            out.push(TOGGLE_BOLD);
        }
        if diff.contains(Style::UNDERLINE) {
            out.push(TOGGLE_UNDERLINE);
        }
    }
}
