//! The in-memory notes collection and its write-through mutations.

use crate::core::note::clamp_font_zoom;
use crate::core::query::{filter_and_sort, FilterOption, QueryState, SortOption};
use crate::{Clock, Note, NoteDraft, NotePatch, NotesPersistence, SystemClock};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Result of [`NotesStore::update_note`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The note was replaced; carries the new value.
    Updated(Note),
    /// No note has that id; nothing was changed or written.
    NotFound,
}

/// Result of [`NotesStore::delete_note`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// A store shared between the front end and background autosave tasks.
///
/// Every mutation and the write it triggers happen under this one lock.
pub type SharedNotesStore<P> = Arc<Mutex<NotesStore<P>>>;

/// The authoritative notes collection plus the current query parameters.
///
/// Mutations write the full collection through the injected
/// [`NotesPersistence`] before returning. Persistence failures are logged and
/// swallowed: memory keeps the change and disk catches up on the next
/// successful write. Queries never touch persistence.
pub struct NotesStore<P: NotesPersistence> {
    notes: Vec<Note>,
    query: QueryState,
    persistence: P,
    clock: Arc<dyn Clock>,
}

impl<P: NotesPersistence> NotesStore<P> {
    /// Opens the store with the wall clock and loads the persisted collection.
    pub fn open(persistence: P) -> Self {
        Self::with_clock(persistence, Arc::new(SystemClock))
    }

    /// Opens the store with an explicit clock and loads the persisted collection.
    ///
    /// If loading fails the error is logged and the store starts empty.
    pub fn with_clock(persistence: P, clock: Arc<dyn Clock>) -> Self {
        let notes = match persistence.load() {
            Ok(notes) => {
                log::debug!("loaded {} notes", notes.len());
                notes
            }
            Err(e) => {
                log::error!("Error loading notes: {e}");
                Vec::new()
            }
        };

        Self {
            notes,
            query: QueryState::default(),
            persistence,
            clock,
        }
    }

    /// Wraps the store for sharing with autosave tasks.
    pub fn into_shared(self) -> SharedNotesStore<P> {
        Arc::new(Mutex::new(self))
    }

    /// All notes in storage order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Creates a note from `draft`, persists the collection and returns the new note.
    ///
    /// The title is not validated here; an empty title is stored as-is.
    pub fn add_note(&mut self, draft: NoteDraft) -> Note {
        let now = self.clock.now_millis();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            color: draft.color,
            important: draft.important,
            font_zoom: clamp_font_zoom(draft.font_zoom),
            created_at: now,
            updated_at: now,
        };

        self.notes.push(note.clone());
        log::debug!("added note {}", note.id);
        self.persist();
        note
    }

    /// Overlays `patch` on the note with `note_id` and persists the collection.
    ///
    /// `updated_at` becomes the current time, or stays put if the clock reads
    /// earlier than the previous value. An unknown id is not an error.
    pub fn update_note(&mut self, note_id: &str, patch: NotePatch) -> UpdateOutcome {
        let now = self.clock.now_millis();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == note_id) else {
            log::debug!("update skipped, no note {note_id}");
            return UpdateOutcome::NotFound;
        };

        patch.apply_to(note);
        note.updated_at = now.max(note.updated_at);
        let updated = note.clone();

        log::debug!("updated note {note_id}");
        self.persist();
        UpdateOutcome::Updated(updated)
    }

    /// Removes the note with `note_id` and persists the resulting collection.
    pub fn delete_note(&mut self, note_id: &str) -> DeleteOutcome {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != note_id);
        let outcome = if self.notes.len() < before {
            log::debug!("deleted note {note_id}");
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        };

        self.persist();
        outcome
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query.search_query = query.into();
    }

    pub fn set_filter_option(&mut self, option: FilterOption) {
        self.query.filter_option = option;
    }

    pub fn set_sort_option(&mut self, option: SortOption) {
        self.query.sort_option = option;
    }

    /// The visible list under the current query, recomputed on every call.
    pub fn filtered_and_sorted_notes(&self) -> Vec<Note> {
        filter_and_sort(&self.notes, &self.query)
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.notes) {
            log::error!("Error saving notes: {e}");
        }
    }
}
