//! Core library for Jotter, a local-first, single-user note-taking application.
//!
//! The primary entry point is [`NotesStore`], which holds the notes collection
//! in memory and writes it through to local storage on every mutation.
//! Storage is scoped per device: [`DeviceIdentity`] generates a random
//! identifier once per storage origin and every other key is derived from it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use jotter_core::{DeviceIdentity, LocalNotesPersistence, NoteDraft, NotesStore, SqliteStore};
//!
//! let kv = Arc::new(SqliteStore::open_or_create("jotter.db")?);
//! let mut store = NotesStore::open(LocalNotesPersistence::new(DeviceIdentity::new(kv)));
//! let note = store.add_note(NoteDraft { title: "Hello".into(), ..Default::default() });
//! assert_eq!(store.filtered_and_sorted_notes()[0].id, note.id);
//! # Ok::<(), jotter_core::JotterError>(())
//! ```
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    autosave::{AutosaveConfig, Debouncer, DEFAULT_AUTOSAVE_DELAY, DEFAULT_SAVE_LATENCY},
    clock::{Clock, ManualClock, SystemClock},
    device::{DeviceIdentity, DEVICE_ID_KEY},
    editor::{schedule_autosave, EditorSession, ZOOM_STEP},
    error::{JotterError, Result},
    note::{
        clamp_font_zoom, Note, NoteDraft, NotePatch, DEFAULT_FONT_ZOOM, MAX_FONT_ZOOM,
        MIN_FONT_ZOOM,
    },
    palette,
    persistence::{LocalNotesPersistence, NotesPersistence},
    preferences::ZoomPreference,
    query::{filter_and_sort, FilterOption, QueryState, SortOption},
    storage::{KeyValueStore, MemoryStore, SqliteStore},
    store::{DeleteOutcome, NotesStore, SharedNotesStore, UpdateOutcome},
};
