//! Internal domain modules for the Jotter core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod autosave;
pub mod clock;
pub mod device;
pub mod editor;
pub mod error;
pub mod note;
pub mod palette;
pub mod persistence;
pub mod preferences;
pub mod query;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use autosave::{AutosaveConfig, Debouncer};
#[doc(inline)]
pub use clock::{Clock, ManualClock, SystemClock};
#[doc(inline)]
pub use device::DeviceIdentity;
#[doc(inline)]
pub use editor::{schedule_autosave, EditorSession};
#[doc(inline)]
pub use error::{JotterError, Result};
#[doc(inline)]
pub use note::{Note, NoteDraft, NotePatch};
#[doc(inline)]
pub use persistence::{LocalNotesPersistence, NotesPersistence};
#[doc(inline)]
pub use preferences::ZoomPreference;
#[doc(inline)]
pub use query::{FilterOption, QueryState, SortOption};
#[doc(inline)]
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
#[doc(inline)]
pub use store::{DeleteOutcome, NotesStore, SharedNotesStore, UpdateOutcome};
