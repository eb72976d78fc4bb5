//! Display-width accounting and styled-text primitives.
//!
//! Everything above this crate measures text in terminal cells, never in
//! characters: wide (East Asian full-width) characters occupy two cells and
//! zero-width combining marks occupy none. All width decisions flow through
//! `char_width` so layout, caret placement, and hit-testing can never drift
//! apart on what a character costs.

use unicode_width::UnicodeWidthChar;

pub mod style;
pub use style::Style;

/// Terminal cell width of a single character.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Sum of cell widths over a character sequence.
pub fn str_width(chars: &[char]) -> usize {
    chars.iter().copied().map(char_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_one_cell() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
    }

    #[test]
    fn cjk_is_two_cells() {
        assert_eq!(char_width('漢'), 2);
        assert_eq!(str_width(&['漢', '字']), 4);
    }

    #[test]
    fn combining_mark_is_zero_cells() {
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(str_width(&['e', '\u{0301}']), 1);
    }
}
