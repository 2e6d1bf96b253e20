//! Plain-text rendering of notes.

use jotter_core::Note;
use std::io::{self, Write};

const PREVIEW_CHARS: usize = 40;

/// One line per note: position, completion marker, title and preview.
pub fn write_note_list<W: Write>(out: &mut W, notes: &[Note]) -> io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "No notes yet.");
    }
    for (position, note) in notes.iter().enumerate() {
        let preview = preview(&note.content);
        if preview.is_empty() {
            writeln!(out, "{position:>3} {} {}", marker(note), note.title)?;
        } else {
            writeln!(out, "{position:>3} {} {} - {preview}", marker(note), note.title)?;
        }
    }
    Ok(())
}

/// Detail view of a single note.
pub fn write_note_detail<W: Write>(out: &mut W, note: &Note) -> io::Result<()> {
    writeln!(out, "id:        {}", note.id)?;
    writeln!(out, "title:     {}", note.title)?;
    writeln!(out, "completed: {}", if note.is_completed { "yes" } else { "no" })?;
    writeln!(out)?;
    writeln!(out, "{}", note.content)
}

fn marker(note: &Note) -> &'static str {
    if note.is_completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Collapses whitespace and cuts to `PREVIEW_CHARS`, appending `...`.
fn preview(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= PREVIEW_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::{preview, write_note_detail, write_note_list};
    use jotter_core::Note;

    fn rendered(notes: &[Note]) -> String {
        let mut out = Vec::new();
        write_note_list(&mut out, notes).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_marks_completed_notes() {
        let open = Note::new("Milk", "Buy milk");
        let mut done = Note::new("Bread", "");
        done.toggle_completion();

        let text = rendered(&[open, done]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["  0 [ ] Milk - Buy milk", "  1 [x] Bread"]);
    }

    #[test]
    fn empty_list_prints_placeholder() {
        assert_eq!(rendered(&[]), "No notes yet.\n");
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(preview("a\n\n  b"), "a b");
        let long = "x".repeat(60);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 43);
    }

    #[test]
    fn detail_shows_id_and_body() {
        let note = Note::new("Milk", "Buy milk");
        let mut out = Vec::new();
        write_note_detail(&mut out, &note).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&note.id.to_string()));
        assert!(text.contains("completed: no"));
        assert!(text.ends_with("Buy milk\n"));
    }
}
