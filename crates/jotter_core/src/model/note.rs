//! Note domain model.
//!
//! # Responsibility
//! - Define the record persisted inside the notes blob.
//! - Fix the serialized field names used on disk.
//!
//! # Invariants
//! - `id` is generated once and never changes.
//! - New notes start with `is_completed == false`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one note.
pub type NoteId = Uuid;

/// One user note.
///
/// Serialized field names (`id`, `title`, `content`, `isCompleted`) are part
/// of the stored blob format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub is_completed: bool,
}

impl Note {
    /// Creates an open note with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates an open note with a caller-provided id.
    pub fn with_id(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            is_completed: false,
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completion(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn new_note_is_open_with_fresh_id() {
        let first = Note::new("a", "b");
        let second = Note::new("a", "b");
        assert!(!first.is_completed);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn serialized_field_names_are_stable() {
        let note = Note::new("Milk", "Buy milk");
        let value = serde_json::to_value(&note).expect("note should serialize");
        let object = value.as_object().expect("note should be a json object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["content", "id", "isCompleted", "title"]);
        assert_eq!(object["id"], note.id.to_string());
    }

    #[test]
    fn toggle_completion_is_an_involution() {
        let mut note = Note::new("t", "c");
        assert!(note.toggle_completion());
        assert!(!note.toggle_completion());
    }
}
