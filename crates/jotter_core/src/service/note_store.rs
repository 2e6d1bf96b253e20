//! Write-through notes store.
//!
//! # Responsibility
//! - Own the ordered in-memory notes collection.
//! - Persist the whole collection as one JSON blob after every mutation.
//!
//! # Invariants
//! - No two notes share an id.
//! - New notes are appended; deletions keep the relative order of survivors.
//! - A failed lookup mutates nothing and persists nothing.
//! - `add` stores the raw title/content while `update` stores normalized
//!   forms. `add` still runs the normalizer and drops the result; unifying
//!   the two paths needs a product decision first.

use crate::model::note::{Note, NoteId};
use crate::prefs::PreferenceStore;
use crate::text::lemmatizer::{DictionaryTagger, LemmaTagger};
use crate::text::normalizer::TextNormalizer;
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Preference key holding the serialized notes collection.
pub const NOTES_PREFERENCE_KEY: &str = "saved_notes";

/// Error for note use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// No note in the collection carries this id.
    NoteNotFound(NoteId),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for NoteStoreError {}

/// Single source of truth for the notes collection.
pub struct NoteStore<P: PreferenceStore, T: LemmaTagger = DictionaryTagger> {
    prefs: P,
    normalizer: TextNormalizer<T>,
    notes: Vec<Note>,
    unsaved_changes: bool,
}

impl<P: PreferenceStore> NoteStore<P, DictionaryTagger> {
    /// Loads the store with the built-in English normalizer.
    pub fn open(prefs: P) -> Self {
        Self::load(prefs, TextNormalizer::english())
    }
}

impl<P: PreferenceStore, T: LemmaTagger> NoteStore<P, T> {
    /// Builds a store and restores the persisted collection.
    ///
    /// Never fails: a missing, unreadable or undecodable blob yields an
    /// empty collection.
    pub fn load(prefs: P, normalizer: TextNormalizer<T>) -> Self {
        let mut store = Self {
            prefs,
            normalizer,
            notes: Vec::new(),
            unsaved_changes: false,
        };
        store.restore();
        store
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Whether the last persist attempt failed, leaving storage behind the
    /// in-memory collection.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Appends a new open note and persists.
    ///
    /// The note keeps `title` and `content` exactly as given.
    pub fn add(&mut self, title: impl Into<String>, content: impl Into<String>) -> Note {
        let title = title.into();
        let content = content.into();
        let _discarded = (
            self.normalizer.normalize(&title),
            self.normalizer.normalize(&content),
        );

        let mut note = Note::new(title, content);
        while self.position_of(note.id).is_some() {
            note.id = Uuid::new_v4();
        }
        self.notes.push(note.clone());
        info!(
            "event=note_add module=store status=ok count={}",
            self.notes.len()
        );
        self.persist();
        note
    }

    /// Replaces title and content of `id` with their normalized forms.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is unknown; nothing is changed or persisted.
    pub fn update(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<&Note, NoteStoreError> {
        let position = self.require_position(id, "note_update")?;
        let title = self.normalizer.normalize(title);
        let content = self.normalizer.normalize(content);

        let note = &mut self.notes[position];
        note.title = title;
        note.content = content;
        info!("event=note_update module=store status=ok position={position}");
        self.persist();
        Ok(&self.notes[position])
    }

    /// Flips the completion flag of `id` and returns its new value.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is unknown; nothing is changed or persisted.
    pub fn toggle_completion(&mut self, id: NoteId) -> Result<bool, NoteStoreError> {
        let position = self.require_position(id, "note_toggle")?;
        let completed = self.notes[position].toggle_completion();
        info!(
            "event=note_toggle module=store status=ok position={position} completed={completed}"
        );
        self.persist();
        Ok(completed)
    }

    /// Removes the notes at `positions` in one batch and persists once.
    ///
    /// Duplicate positions count once; positions past the end are ignored.
    /// Returns how many notes were removed. Nothing is persisted when that
    /// number is zero.
    pub fn delete<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let requested: BTreeSet<usize> = positions.into_iter().collect();
        let len = self.notes.len();
        let ignored = requested.iter().filter(|&&position| position >= len).count();
        if ignored > 0 {
            warn!(
                "event=note_delete module=store status=partial ignored_positions={ignored} len={len}"
            );
        }

        let mut position = 0;
        self.notes.retain(|_| {
            let keep = !requested.contains(&position);
            position += 1;
            keep
        });

        let removed = len - self.notes.len();
        if removed == 0 {
            return 0;
        }
        info!(
            "event=note_delete module=store status=ok removed={removed} count={}",
            self.notes.len()
        );
        self.persist();
        removed
    }

    fn require_position(&self, id: NoteId, event: &str) -> Result<usize, NoteStoreError> {
        self.position_of(id).ok_or_else(|| {
            warn!("event={event} module=store status=error error_code=note_not_found");
            NoteStoreError::NoteNotFound(id)
        })
    }

    fn restore(&mut self) {
        let blob = match self.prefs.read(NOTES_PREFERENCE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("event=notes_load module=store status=empty");
                return;
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=error error_code=read_failed error={err}"
                );
                return;
            }
        };

        let decoded: Vec<Note> = match serde_json::from_str(&blob) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=error error_code=decode_failed bytes={} error={err}",
                    blob.len()
                );
                return;
            }
        };

        let mut seen = HashSet::with_capacity(decoded.len());
        let total = decoded.len();
        self.notes = decoded
            .into_iter()
            .filter(|note| seen.insert(note.id))
            .collect();
        if self.notes.len() != total {
            warn!(
                "event=notes_load module=store status=partial dropped_duplicates={}",
                total - self.notes.len()
            );
        }
        info!(
            "event=notes_load module=store status=ok count={}",
            self.notes.len()
        );
    }

    /// Overwrites the stored blob with the whole collection.
    ///
    /// Failures are logged and leave `has_unsaved_changes()` set; the
    /// in-memory mutation is kept.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.notes)
            .map_err(|err| format!("encode_failed error={err}"))
            .and_then(|blob| {
                self.prefs
                    .write(NOTES_PREFERENCE_KEY, &blob)
                    .map_err(|err| format!("write_failed error={err}"))
            });

        match result {
            Ok(()) => {
                self.unsaved_changes = false;
                debug!(
                    "event=notes_persist module=store status=ok count={}",
                    self.notes.len()
                );
            }
            Err(details) => {
                self.unsaved_changes = true;
                error!("event=notes_persist module=store status=error error_code={details}");
            }
        }
    }
}
