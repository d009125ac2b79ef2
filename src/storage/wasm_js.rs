//! Browser `localStorage` backend.

use super::{NoteStorage, StorageError};
#[cfg(feature = "tracing")]
use tracing::error;
use web_sys::Storage;

/// Implementation of [`NoteStorage`] over `window.localStorage`.
///
/// Keys are written as given, without a prefix, so the slot stays readable by other
/// scripts on the same origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    /// Creates a new instance of [`LocalStorage`].
    pub fn new() -> Self {
        Self
    }

    fn get_local_storage(&self) -> Result<Storage, StorageError> {
        match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable(
                "LocalStorage not available".to_string(),
            )),
            Err(e) => {
                #[cfg(feature = "tracing")]
                error!("Could not find local storage: {e:?}");
                Err(StorageError::from(e))
            }
        }
    }
}

impl NoteStorage for LocalStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let local_storage = self.get_local_storage()?;
        Ok(local_storage.get_item(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let local_storage = self.get_local_storage()?;
        local_storage.set_item(key, value).map_err(|e| {
            #[cfg(feature = "tracing")]
            error!("Could not set item in local storage: {e:?}");
            StorageError::from(e)
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let local_storage = self.get_local_storage()?;
        Ok(local_storage.remove_item(key)?)
    }
}

impl From<LocalStorage> for super::StorageType {
    fn from(storage: LocalStorage) -> Self {
        super::StorageType::LocalStorage(storage)
    }
}
