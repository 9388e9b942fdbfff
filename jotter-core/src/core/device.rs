//! Stable per-origin device identity for Jotter.

use crate::{KeyValueStore, Result};
use std::sync::Arc;
use uuid::Uuid;

/// Fixed, non-namespaced key holding the device identifier.
pub const DEVICE_ID_KEY: &str = "deviceUserId";
const NOTES_KEY_PREFIX: &str = "notes_";
const ZOOM_KEY_PREFIX: &str = "zoom_";

/// Hands out the device identifier of one storage origin and the keys
/// derived from it.
///
/// The identifier is a random UUID generated on first use and written under
/// [`DEVICE_ID_KEY`]; it is never rotated. Cloning is cheap and every clone
/// reads the same origin.
#[derive(Clone)]
pub struct DeviceIdentity {
    store: Arc<dyn KeyValueStore>,
}

impl DeviceIdentity {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns this origin's device identifier, generating and persisting one
    /// on first call.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the underlying [`KeyValueStore`].
    pub fn device_id(&self) -> Result<String> {
        if let Some(existing) = self.store.get(DEVICE_ID_KEY)? {
            if !existing.is_empty() {
                return Ok(existing);
            }
        }

        let device_id = Uuid::new_v4().to_string();
        self.store.set(DEVICE_ID_KEY, &device_id)?;
        log::info!("generated new device id {device_id}");
        Ok(device_id)
    }

    /// Key of the JSON-encoded notes collection: `notes_<deviceId>`.
    pub fn notes_key(&self) -> Result<String> {
        Ok(format!("{NOTES_KEY_PREFIX}{}", self.device_id()?))
    }

    /// Key of the last-used font zoom: `zoom_<deviceId>`.
    pub fn zoom_key(&self) -> Result<String> {
        Ok(format!("{ZOOM_KEY_PREFIX}{}", self.device_id()?))
    }

    /// The origin this identity is bound to.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, SqliteStore};
    use tempfile::NamedTempFile;

    #[test]
    fn test_device_id_is_stable() {
        let identity = DeviceIdentity::new(Arc::new(MemoryStore::new()));

        let id1 = identity.device_id().unwrap();
        let id2 = identity.device_id().unwrap();

        assert_eq!(id1, id2, "Device ID should be stable");
        assert!(Uuid::parse_str(&id1).is_ok(), "Device ID should be a UUID");
    }

    #[test]
    fn test_device_id_survives_reopen() {
        let temp = NamedTempFile::new().unwrap();
        let first = {
            let store = Arc::new(SqliteStore::create(temp.path()).unwrap());
            DeviceIdentity::new(store).device_id().unwrap()
        };

        let store = Arc::new(SqliteStore::open(temp.path()).unwrap());
        let second = DeviceIdentity::new(store).device_id().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_device_id_differs_across_origins() {
        let a = DeviceIdentity::new(Arc::new(MemoryStore::new()));
        let b = DeviceIdentity::new(Arc::new(MemoryStore::new()));

        assert_ne!(a.device_id().unwrap(), b.device_id().unwrap());
    }

    #[test]
    fn test_existing_id_is_returned_unchanged() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEVICE_ID_KEY, "legacy-id").unwrap();

        let identity = DeviceIdentity::new(store);
        assert_eq!(identity.device_id().unwrap(), "legacy-id");
    }

    #[test]
    fn test_derived_keys() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEVICE_ID_KEY, "abc").unwrap();
        let identity = DeviceIdentity::new(store);

        assert_eq!(identity.notes_key().unwrap(), "notes_abc");
        assert_eq!(identity.zoom_key().unwrap(), "zoom_abc");
    }
}
