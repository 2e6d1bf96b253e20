//! Domain model for notes.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId` that is never reused.

pub mod note;
