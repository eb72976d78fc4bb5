//! Glyph sink contract between the document model and the renderer.
//!
//! The model never paints a terminal itself; it emits positioned glyphs with
//! a logical ink and reports where the cursor should sit. The real terminal
//! renderer and any headless consumer (tests, the CLI) implement [`Surface`].

use core_text::Style;

/// Logical appearance of an emitted glyph. Mapping inks to concrete colors
/// and attributes is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// Paragraph text with its character style mask.
    Text(Style),
    /// Header text (including the level digit in the margin).
    Header,
    /// Horizontal rule glyphs.
    Rule,
}

/// Receiver for positioned glyphs. Coordinates are terminal cells; the model
/// only emits cells that are on-screen (non-negative).
pub trait Surface {
    fn put(&mut self, x: usize, y: usize, ch: char, ink: Ink);
}

/// Discards glyphs. For callers that only need layout results or the cursor
/// position.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn put(&mut self, _x: usize, _y: usize, _ch: char, _ink: Ink) {}
}

/// Fixed-size character grid capturing emitted glyphs. Used by tests and
/// headless tooling to assert on rendered output.
#[derive(Debug, Clone)]
pub struct GridSurface {
    pub width: usize,
    pub height: usize,
    cells: Vec<char>,
    inks: Vec<Option<Ink>>,
}

impl GridSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            inks: vec![None; width * height],
        }
    }

    pub fn glyph(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    pub fn ink(&self, x: usize, y: usize) -> Option<Ink> {
        self.inks[y * self.width + x]
    }

    /// One row of the grid as a string (trailing blanks included).
    pub fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }
}

impl Surface for GridSurface {
    fn put(&mut self, x: usize, y: usize, ch: char, ink: Ink) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = ch;
            self.inks[y * self.width + x] = Some(ink);
        }
    }
}

/// On-screen cursor position reported by a render. Coordinates may be
/// negative while the focused element is partially scrolled off-screen; the
/// render loop uses that to adjust scroll state before painting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub x: isize,
    pub y: isize,
}
