//! Logical command vocabulary.
//!
//! The input loop (an external collaborator) maps raw key and mouse events
//! into these tokens; the document core consumes them without ever seeing a
//! key code. The set is closed: every command either mutates the focused
//! element, moves the cursor, or operates on the buffer's element sequence.

/// One logical editing or navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert a character at the cursor. A space is the word splitter inside
    /// paragraphs; headers take it literally.
    Insert(char),
    /// Open a new paragraph below the current element.
    Newline,
    Backspace,
    DeleteForward,
    CharForward,
    CharBackward,
    /// Skip separator characters, then a run of non-separators.
    WordForward,
    WordBackward,
    LineUp,
    LineDown,
    /// Start of the current visual line.
    LineStart,
    /// End of the current visual line.
    LineEnd,
    /// End of the focused element's content.
    ElementEnd,
    /// Start of the focused element (cursor state re-zeroed).
    ElementStart,
    KillToEnd,
    KillToStart,
    NextElement,
    PrevElement,
    BufferStart,
    BufferEnd,
    /// Insert a horizontal rule above the cursor row, visually in place.
    InsertRule,
    /// Insert a header of the given level (0 is the untitled sentinel).
    InsertHeader(u8),
    /// Delete the element at the cursor row.
    DeleteElement,
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
}
