//! The last-used font zoom, stored under `zoom_<deviceId>`.
//!
//! This is independent of any note's own `font_zoom`; the editor uses it as
//! the starting zoom for new notes.

use crate::core::note::{clamp_font_zoom, DEFAULT_FONT_ZOOM};
use crate::{DeviceIdentity, Result};

#[derive(Clone)]
pub struct ZoomPreference {
    identity: DeviceIdentity,
}

impl ZoomPreference {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self { identity }
    }

    /// Returns the stored zoom, clamped into range, or the default if none is
    /// stored or it cannot be read.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(Some(zoom)) => clamp_font_zoom(zoom),
            Ok(None) => DEFAULT_FONT_ZOOM,
            Err(e) => {
                log::warn!("failed to read zoom preference, using default: {e}");
                DEFAULT_FONT_ZOOM
            }
        }
    }

    fn try_load(&self) -> Result<Option<u32>> {
        let key = self.identity.zoom_key()?;
        match self.identity.store().get(&key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stores `zoom` (clamped) as a JSON integer and returns the stored value.
    pub fn save(&self, zoom: u32) -> Result<u32> {
        let zoom = clamp_font_zoom(zoom);
        let key = self.identity.zoom_key()?;
        self.identity
            .store()
            .set(&key, &serde_json::to_string(&zoom)?)?;
        Ok(zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, ZoomPreference) {
        let store = Arc::new(MemoryStore::new());
        let prefs = ZoomPreference::new(DeviceIdentity::new(store.clone()));
        (store, prefs)
    }

    #[test]
    fn test_default_when_unset() {
        let (_, prefs) = setup();
        assert_eq!(prefs.load(), 100);
    }

    #[test]
    fn test_save_and_load() {
        let (store, prefs) = setup();
        assert_eq!(prefs.save(130).unwrap(), 130);
        assert_eq!(prefs.load(), 130);

        let key = DeviceIdentity::new(store.clone()).zoom_key().unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("130"));
    }

    #[test]
    fn test_save_clamps() {
        let (_, prefs) = setup();
        assert_eq!(prefs.save(400).unwrap(), 200);
        assert_eq!(prefs.load(), 200);
    }

    #[test]
    fn test_out_of_range_stored_value_is_clamped_on_read() {
        let (store, prefs) = setup();
        let key = DeviceIdentity::new(store.clone()).zoom_key().unwrap();
        store.set(&key, "20").unwrap();
        assert_eq!(prefs.load(), 50);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let (store, prefs) = setup();
        let key = DeviceIdentity::new(store.clone()).zoom_key().unwrap();
        store.set(&key, "\"big\"").unwrap();
        assert_eq!(prefs.load(), 100);
    }
}
