use carvalue_core::errors::CoreError;
use carvalue_core::storage::traits::KeyValueStore;
use web_sys::{Storage, Window};

use crate::dom::js_error;

/// [`KeyValueStore`] over `window.localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open(window: &Window) -> Result<Self, CoreError> {
        let storage = window
            .local_storage()
            .map_err(|e| CoreError::Storage(js_error(e)))?
            .ok_or_else(|| CoreError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| CoreError::Storage(js_error(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CoreError::Storage(format!("write '{key}': {}", js_error(e))))
    }

    fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CoreError::Storage(js_error(e)))
    }
}
