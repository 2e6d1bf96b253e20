//! Core domain logic for Jotter.
//! This crate is the single source of truth for note invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod service;
pub mod text;

pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::note::{Note, NoteId};
pub use prefs::{PreferenceStore, PrefsError, PrefsResult, SqlitePreferenceStore};
pub use service::note_store::{NoteStore, NoteStoreError, NOTES_PREFERENCE_KEY};
pub use text::lemmatizer::{DictionaryTagger, LemmaTagger, LemmaToken};
pub use text::normalizer::TextNormalizer;
