//! End-to-end editing scenarios driven purely through logical commands.

use core_doc::{Buffer, Command, Element, Style};

const W: usize = 79;

fn type_str(buf: &mut Buffer, text: &str) {
    for ch in text.chars() {
        buf.command(W, &Command::Insert(ch));
    }
}

fn serialized(buf: &Buffer) -> Vec<String> {
    buf.serialize_elems().collect()
}

#[test]
fn typed_text_serializes_with_word_separators() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "hello world");
    assert_eq!(serialized(&buf), ["phello world "]);
}

#[test]
fn styled_run_survives_a_round_trip() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "plain ");
    buf.command(W, &Command::ToggleBold);
    type_str(&mut buf, "bo");
    buf.command(W, &Command::ToggleItalic);
    type_str(&mut buf, "th");
    buf.command(W, &Command::ToggleBold);
    buf.command(W, &Command::ToggleItalic);
    type_str(&mut buf, " tail");

    let line = serialized(&buf).remove(0);
    let back = Element::deserialize(&line).unwrap();
    let Element::Paragraph(p) = back else {
        panic!("expected a paragraph");
    };
    assert_eq!(p.word_count(), 3);
    let styles = p.words()[1].styles();
    assert_eq!(styles[0], Style::BOLD);
    assert_eq!(styles[1], Style::BOLD);
    assert_eq!(styles[2], Style::BOLD | Style::ITALIC);
    assert_eq!(styles[3], Style::BOLD | Style::ITALIC);
    assert_eq!(p.words()[2].styles()[0], Style::empty());
}

#[test]
fn document_with_all_element_kinds_round_trips() {
    let mut buf = Buffer::new("draft");
    buf.command(W, &Command::InsertHeader(1));
    type_str(&mut buf, "Title");
    buf.command(W, &Command::Newline);
    type_str(&mut buf, "body text");
    buf.command(W, &Command::InsertRule);

    let lines = serialized(&buf);
    assert_eq!(lines, ["h1Title", "pbody text ", "r"]);

    let elems: Vec<Element> = lines
        .iter()
        .map(|l| Element::deserialize(l).unwrap())
        .collect();
    let reloaded = Buffer::from_elems("draft", elems);
    assert_eq!(reloaded.word_count(), 2);
    assert_eq!(serialized(&reloaded), lines);
    assert!(!reloaded.is_dirty());
}

#[test]
fn kill_to_end_stops_at_the_visual_line() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "aaaa bbbb cccc");
    // Budget 9 wraps as "aaaa bbbb" / "cccc".
    buf.reflow(9);
    buf.command(9, &Command::BufferStart);
    buf.command(9, &Command::CharForward);
    buf.command(9, &Command::CharForward);
    buf.command(9, &Command::KillToEnd);
    assert_eq!(serialized(&buf), ["paa cccc "]);
    assert_eq!(buf.word_count(), 2);
    let caret = buf.caret();
    assert_eq!((caret.cei, caret.cex), (0, 2));
}

#[test]
fn word_count_tracks_splits_merges_and_kills() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "one two three");
    assert_eq!(buf.word_count(), 3);
    buf.command(W, &Command::Backspace); // "thre"
    assert_eq!(buf.word_count(), 3);
    buf.command(W, &Command::WordBackward);
    buf.command(W, &Command::Backspace); // joins "two" and "thre"
    assert_eq!(buf.word_count(), 2);
    buf.command(W, &Command::Insert(' ')); // splits them again
    assert_eq!(buf.word_count(), 3);
    buf.command(W, &Command::KillToStart);
    assert_eq!(buf.word_count(), 1);
}

#[test]
fn deleting_the_last_element_leaves_the_past_end_slot() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "solo");
    buf.command(W, &Command::DeleteElement);
    assert_eq!(buf.elem_count(), 0);
    assert_eq!(buf.cy(), 0);
    assert_eq!(buf.word_count(), 0);
    // Typing starts a fresh paragraph.
    type_str(&mut buf, "again");
    assert_eq!(buf.elem_count(), 1);
    assert_eq!(buf.word_count(), 1);
}

#[test]
fn header_takes_spaces_literally() {
    let mut buf = Buffer::new("draft");
    buf.command(W, &Command::InsertHeader(3));
    type_str(&mut buf, "two words");
    assert_eq!(serialized(&buf), ["h3two words"]);
    assert_eq!(buf.word_count(), 0);
}

#[test]
fn backspace_at_buffer_start_changes_nothing() {
    let mut buf = Buffer::new("draft");
    type_str(&mut buf, "text");
    buf.command(W, &Command::BufferStart);
    let before = serialized(&buf);
    let caret = buf.caret();
    buf.command(W, &Command::Backspace);
    assert_eq!(serialized(&buf), before);
    assert_eq!(buf.caret(), caret);
    assert_eq!(buf.cy(), 0);
}
