//! Horizontal rule element.
//!
//! A rule has no content; the cursor may still rest on it at a horizontal
//! offset so that vertical motion through the rule preserves the visual
//! column. The offset is never persisted.

use crate::element::{Caret, EditCtx, EditRequest};
use crate::surface::{CursorPos, Ink, Surface};
use crate::Command;

const RULE_GLYPH: char = '─';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rule;

impl Rule {
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
        if focus {
            cursor.x = origin_x + caret.cex as isize;
            cursor.y = origin_y;
        }
        if origin_y >= 0 {
            for i in 0..width {
                let x = origin_x + i as isize;
                if x >= 0 {
                    surface.put(x as usize, origin_y as usize, RULE_GLYPH, Ink::Rule);
                }
            }
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
        caret.cex = (click_x - origin_x).clamp(0, width as isize) as usize;
        (1, true)
    }

    pub fn start_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        caret.cex = column_hint;
    }

    pub fn end_of(&self, caret: &mut Caret, column_hint: usize) {
        caret.zero();
        caret.cex = column_hint;
    }

    pub fn key_event(&mut self, ctx: &mut EditCtx, cmd: &Command) -> Option<EditRequest> {
        match cmd {
            Command::LineStart => ctx.caret.cex = 0,
            Command::LineEnd | Command::ElementEnd => ctx.caret.cex = ctx.width,
            Command::LineUp | Command::WordBackward => {
                return Some(EditRequest::MovePrev { hint: ctx.caret.cex });
            }
            Command::LineDown | Command::WordForward => {
                return Some(EditRequest::MoveNext { hint: ctx.caret.cex });
            }
            Command::Backspace | Command::DeleteForward => {
                return Some(EditRequest::DeleteSelf);
            }
            Command::Newline => return Some(EditRequest::NewParagraphBelow),
            _ => {}
        }
        None
    }

    pub fn serialize(&self) -> String {
        "r".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GridSurface;
    use core_text::Style;

    #[test]
    fn render_fills_budget_with_rule_glyphs() {
        let rule = Rule;
        let caret = Caret {
            cex: 3,
            ..Caret::default()
        };
        let mut grid = GridSurface::new(10, 1);
        let mut cursor = CursorPos { x: 0, y: 0 };
        let lines = rule.render(&caret, 10, &mut grid, 0, 0, true, &mut cursor);
        assert_eq!(lines, 1);
        assert_eq!(grid.row(0), "──────────");
        assert_eq!(cursor, CursorPos { x: 3, y: 0 });
    }

    #[test]
    fn click_clamps_offset_to_budget() {
        let rule = Rule;
        let mut caret = Caret::default();
        let (_, hit) = rule.click(&mut caret, 10, 2, 0, 30, 0);
        assert!(hit);
        assert_eq!(caret.cex, 10);
        let (_, hit) = rule.click(&mut caret, 10, 2, 0, 0, 0);
        assert!(hit);
        assert_eq!(caret.cex, 0);
    }

    #[test]
    fn delete_requests_element_removal() {
        let mut rule = Rule;
        let mut caret = Caret::default();
        let (mut dirty, mut words) = (false, 0);
        let mut ctx = EditCtx {
            caret: &mut caret,
            style: Style::empty(),
            width: 10,
            dirty: &mut dirty,
            words: &mut words,
        };
        assert!(matches!(
            rule.key_event(&mut ctx, &Command::Backspace),
            Some(EditRequest::DeleteSelf)
        ));
    }
}
