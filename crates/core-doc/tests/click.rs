//! Mouse resolution against rendered layout.
//!
//! The click walk replays the renderer's wrap walk, so every cell the
//! renderer painted must resolve to the position that painted it.

use core_doc::{Buffer, Command, Element, GridSurface, Header, Paragraph, Rule, placements};

fn doc(elems: Vec<Element>) -> Buffer {
    Buffer::from_elems("doc", elems)
}

#[test]
fn every_word_origin_resolves_to_that_word() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text(
        "the quick brown fox jumps over lazy dog",
    ))]);
    let mut grid = GridSurface::new(12, 10);
    buf.render(12, &mut grid, 0, 10);

    let Element::Paragraph(p) = &buf.elems()[0] else {
        unreachable!()
    };
    let placed: Vec<_> = placements(p.words(), 12).collect();
    for pl in placed {
        assert!(buf.click(12, 0, pl.col as isize, pl.row as isize, 10));
        let caret = buf.caret();
        assert_eq!(
            (buf.cy(), caret.cei, caret.cex),
            (0, pl.index, 0),
            "click at ({}, {})",
            pl.col,
            pl.row
        );
    }
}

#[test]
fn click_past_line_end_snaps_to_last_word_of_row() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text(
        "aaaa bbbb cccc",
    ))]);
    let mut grid = GridSurface::new(20, 5);
    // Budget 9: "aaaa bbbb" on row 0, "cccc" on row 1.
    buf.render(9, &mut grid, 0, 5);

    assert!(buf.click(9, 0, 15, 1, 5));
    let caret = buf.caret();
    assert_eq!((caret.cei, caret.cex), (2, 4));
}

#[test]
fn click_left_of_margin_snaps_to_row_start() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text(
        "aaaa bbbb cccc",
    ))]);
    buf.render(9, &mut GridSurface::new(20, 5), 5, 5);
    // Text column starts at x=5; a click at x=1 on row 1 lands on "cccc".
    assert!(buf.click(9, 5, 1, 1, 5));
    let caret = buf.caret();
    assert_eq!((caret.cei, caret.cex), (2, 0));
}

#[test]
fn separator_cell_reads_as_end_of_previous_word() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text("ab cd"))]);
    buf.render(79, &mut GridSurface::new(80, 3), 0, 3);
    assert!(buf.click(79, 0, 2, 0, 3));
    let caret = buf.caret();
    assert_eq!((caret.cei, caret.cex), (0, 2));
}

#[test]
fn click_on_gap_line_focuses_element_above() {
    let mut buf = doc(vec![
        Element::Paragraph(Paragraph::from_text("first")),
        Element::Paragraph(Paragraph::from_text("second one")),
    ]);
    buf.render(79, &mut GridSurface::new(80, 6), 0, 6);
    // Layout: row 0 first paragraph, row 1 gap, row 2 second paragraph.
    assert!(buf.click(79, 0, 30, 3, 6));
    assert_eq!(buf.cy(), 1);
    let caret = buf.caret();
    assert_eq!((caret.cei, caret.cex), (1, 3));
}

#[test]
fn click_on_rule_keeps_horizontal_offset() {
    let mut buf = doc(vec![
        Element::Paragraph(Paragraph::from_text("text")),
        Element::Rule(Rule),
    ]);
    buf.render(40, &mut GridSurface::new(40, 5), 0, 5);
    // Rule renders on row 2 (paragraph, gap, rule).
    assert!(buf.click(40, 0, 7, 2, 5));
    assert_eq!(buf.cy(), 1);
    assert_eq!(buf.caret().cex, 7);
}

#[test]
fn click_on_header_resolves_against_centered_text() {
    let mut buf = doc(vec![
        Element::Header(Header::with_text(1, "Title")),
        Element::Paragraph(Paragraph::from_text("body")),
    ]);
    let mut grid = GridSurface::new(40, 5);
    buf.render(40, &mut grid, 0, 5);
    // Find where the renderer put the 'T' and click one cell to its right.
    let row = grid.row(0);
    let t_at = row.find('T').unwrap();
    assert!(buf.click(40, 0, t_at as isize + 1, 0, 5));
    assert_eq!(buf.cy(), 0);
    assert_eq!(buf.caret().cex, 1);
}

#[test]
fn click_below_everything_misses() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text("short"))]);
    buf.render(79, &mut GridSurface::new(80, 10), 0, 10);
    let before = (buf.cy(), buf.caret());
    assert!(!buf.click(79, 0, 3, 8, 10));
    assert_eq!((buf.cy(), buf.caret()), before);
}

#[test]
fn render_and_click_agree_after_an_edit() {
    let mut buf = doc(vec![Element::Paragraph(Paragraph::from_text(
        "words get moved around when budgets shrink",
    ))]);
    buf.render(79, &mut GridSurface::new(80, 4), 0, 4);
    // Delete a word, then narrow the budget; the next render and the click
    // that follows must both see the new layout.
    buf.command(14, &Command::WordForward);
    buf.command(14, &Command::KillToStart);
    let mut grid = GridSurface::new(14, 6);
    buf.render(14, &mut grid, 0, 6);

    let Element::Paragraph(p) = &buf.elems()[0] else {
        unreachable!()
    };
    let placed: Vec<_> = placements(p.words(), 14).collect();
    let last = placed.last().copied().unwrap();
    assert!(buf.click(14, 0, last.col as isize, last.row as isize, 6));
    assert_eq!(buf.caret().cei, last.index);
}
