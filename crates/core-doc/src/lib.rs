//! Structured document model: buffers of headers, rules, and word-wrapped
//! paragraphs.
//!
//! The model is word-oriented rather than character-oriented. A paragraph is
//! a sequence of styled words; layout assigns each word to a visual line
//! under a column budget, and the cursor addresses a word plus a character
//! offset within it. Rendering, mouse resolution, and reflow all replay the
//! identical wrap walk, so what the renderer painted is exactly what a click
//! resolves against.
//!
//! Nothing here touches a terminal. Output goes through the [`Surface`]
//! trait and input arrives as logical [`Command`]s; the binary and the tests
//! drive the model the same way.

mod buffer;
mod command;
mod element;
mod header;
mod layout;
mod paragraph;
mod rule;
mod surface;
mod word;

pub use core_text::Style;

pub use buffer::{Buffer, Excursion};
pub use command::Command;
pub use element::{Caret, EditCtx, EditRequest, Element, ParseError};
pub use header::Header;
pub use layout::{Placement, Placements, placements, rows};
pub use paragraph::Paragraph;
pub use rule::Rule;
pub use surface::{CursorPos, GridSurface, Ink, NullSurface, Surface};
pub use word::Word;
