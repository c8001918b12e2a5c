use web_sys::Storage;

use crate::{KeyValueStore, StoreError};

/// `window.localStorage`.
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| {
            let msg = format!("{e:?}");
            // browsers throw a DOMException named QuotaExceededError
            if msg.contains("QuotaExceeded") {
                StoreError::QuotaExceeded {
                    key: key.to_owned(),
                    limit: None,
                }
            } else {
                StoreError::Unavailable(msg)
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
