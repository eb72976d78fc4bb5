//! Word-wrap placement shared by rendering, hit-testing, and cache refresh.
//!
//! The wrap walk is deliberately a single code path: render, click, and
//! `Paragraph::reflow` all consume the same placement sequence, so a row
//! decision made while painting can never diverge from the one made while
//! resolving a click. The walk is re-run from scratch on every request; a
//! one-character edit can reflow every subsequent word, so there is nothing
//! worth caching beyond the per-word line numbers written back by callers.
//!
//! Breaking policy:
//! * break before a word whenever placing it would exceed the budget, even
//!   at column 0 (an over-wide word lands alone on its own row, never
//!   hyphenated);
//! * break immediately after a word when the one-cell separator following it
//!   would overflow, rather than deferring the break to the next word.

use crate::word::Word;

/// Where one word landed: its index, visual row, and starting column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub row: usize,
    pub col: usize,
}

/// Iterator over word placements under a column budget.
pub struct Placements<'a> {
    words: &'a [Word],
    budget: usize,
    index: usize,
    row: usize,
    col: usize,
}

impl Iterator for Placements<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        if self.index >= self.words.len() {
            return None;
        }
        let width = self.words[self.index].width();
        if self.col + width > self.budget {
            self.row += 1;
            self.col = 0;
        }
        let placed = Placement {
            index: self.index,
            row: self.row,
            col: self.col,
        };
        self.col += width;
        if self.index + 1 < self.words.len() {
            // Separator cell between words; a separator that would overflow
            // forces the break here instead of before the next word.
            if self.col + 1 > self.budget {
                self.row += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
        self.index += 1;
        Some(placed)
    }
}

/// Lazy placement walk for `words` under `budget` columns.
pub fn placements(words: &[Word], budget: usize) -> Placements<'_> {
    Placements {
        words,
        budget,
        index: 0,
        row: 0,
        col: 0,
    }
}

/// Number of visual rows the words occupy. Zero words still occupy one row.
pub fn rows(words: &[Word], budget: usize) -> usize {
    placements(words, budget).last().map_or(1, |p| p.row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Style;

    fn word(s: &str) -> Word {
        Word::from_runs(s.chars().collect(), vec![Style::empty(); s.chars().count()])
    }

    fn place(words: &[Word], budget: usize) -> Vec<(usize, usize, usize)> {
        placements(words, budget)
            .map(|p| (p.index, p.row, p.col))
            .collect()
    }

    #[test]
    fn fits_on_one_row_with_separators() {
        let words = vec![word("hello"), word("world")];
        assert_eq!(place(&words, 79), vec![(0, 0, 0), (1, 0, 6)]);
        assert_eq!(rows(&words, 79), 1);
    }

    #[test]
    fn breaks_before_word_that_would_overflow() {
        // "aaaa bbbb" at budget 6: second word cannot fit after "aaaa ".
        let words = vec![word("aaaa"), word("bbbb")];
        assert_eq!(place(&words, 6), vec![(0, 0, 0), (1, 1, 0)]);
    }

    #[test]
    fn breaks_after_word_when_separator_overflows() {
        // "abc de" at budget 3: "abc" exactly fills the row, the separator
        // after it overflows, so "de" starts at column 0 of the next row.
        let words = vec![word("abc"), word("de")];
        assert_eq!(place(&words, 3), vec![(0, 0, 0), (1, 1, 0)]);
    }

    #[test]
    fn overwide_word_sits_alone_unhyphenated() {
        let words = vec![word("tiny"), word("extraordinarily"), word("x")];
        let placed = place(&words, 8);
        assert_eq!(placed[0], (0, 0, 0));
        // The over-wide word breaks onto its own row and is not split.
        assert_eq!(placed[1], (1, 1, 0));
        assert_eq!(placed[2], (2, 2, 0));
    }

    #[test]
    fn overwide_first_word_breaks_even_at_column_zero() {
        let words = vec![word("enormous"), word("b")];
        let placed = place(&words, 4);
        assert_eq!(placed[0], (0, 1, 0));
        assert_eq!(placed[1], (1, 2, 0));
    }

    #[test]
    fn zero_words_occupy_one_row() {
        assert_eq!(rows(&[], 40), 1);
    }

    #[test]
    fn wide_characters_count_as_two_cells() {
        // Each CJK word is 4 cells wide; two of them plus a separator need 9.
        let words = vec![word("漢字"), word("漢字")];
        assert_eq!(place(&words, 9), vec![(0, 0, 0), (1, 0, 5)]);
        assert_eq!(place(&words, 8), vec![(0, 0, 0), (1, 1, 0)]);
    }

    #[test]
    fn long_run_wraps_deterministically() {
        let words: Vec<Word> = (0..200).map(|_| word("x")).collect();
        // Budget 20: ten "x " pairs per row (last word on a row has no
        // separator column charged past the budget).
        let placed = place(&words, 20);
        assert_eq!(placed.len(), 200);
        let max_row = placed.iter().map(|&(_, r, _)| r).max().unwrap();
        assert!(max_row > 0);
        // Row indices never decrease and columns restart at zero on each row.
        for pair in placed.windows(2) {
            let (_, r0, _) = pair[0];
            let (_, r1, c1) = pair[1];
            assert!(r1 >= r0);
            if r1 > r0 {
                assert_eq!(c1, 0);
            }
        }
    }
}
