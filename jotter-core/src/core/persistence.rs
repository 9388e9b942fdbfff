//! Serialization of the notes collection to its identity-scoped key.

use crate::{DeviceIdentity, Note, Result};

/// Loads and saves the whole notes collection.
///
/// The store depends only on these two operations, so a different backend
/// can be swapped in without touching it.
pub trait NotesPersistence: Send {
    /// Returns the persisted collection, or an empty one if nothing has been
    /// written yet.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JotterError::Json`] if the stored document is not a
    /// valid notes array, or a storage error if it cannot be read.
    fn load(&self) -> Result<Vec<Note>>;

    /// Overwrites the persisted collection with `notes`.
    fn save(&self, notes: &[Note]) -> Result<()>;
}

/// [`NotesPersistence`] over a [`crate::KeyValueStore`], under `notes_<deviceId>`.
///
/// Nothing is cached: every call resolves the key and reads or writes the
/// full JSON array. Loaded notes are not validated.
#[derive(Clone)]
pub struct LocalNotesPersistence {
    identity: DeviceIdentity,
}

impl LocalNotesPersistence {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }
}

impl NotesPersistence for LocalNotesPersistence {
    fn load(&self) -> Result<Vec<Note>> {
        let key = self.identity.notes_key()?;
        match self.identity.store().get(&key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        let key = self.identity.notes_key()?;
        let json = serde_json::to_string(notes)?;
        self.identity.store().set(&key, &json)
    }
}
