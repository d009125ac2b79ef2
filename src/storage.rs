//! Key-value backends the note slot is persisted into.
//!
//! In the browser notes live in `window.localStorage`. Native builds can keep them in JSON
//! files on disk, and [`MemoryStorage`] is available everywhere for embedding and testing.

use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "wasm-js")]
pub mod wasm_js;

#[cfg(feature = "native")]
pub use native::FileStorage;
#[cfg(feature = "wasm-js")]
pub use wasm_js::LocalStorage;

/// A key for storing the serialized note collection.
pub const KEY_STORAGE_NOTES: &str = "notes";

/// Errors raised by a storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached, e.g. local storage is disabled.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// An exception thrown by a browser API.
    #[error("Web API error: {0}")]
    WebSys(String),
    /// A filesystem failure.
    #[error("File error: {0}")]
    File(String),
}

#[cfg(feature = "wasm-js")]
impl From<wasm_bindgen::JsValue> for StorageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        StorageError::WebSys(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::File(err.to_string())
    }
}

/// Trait for persisting string values under string keys.
pub trait NoteStorage {
    /// Retrieves a stored value by key.
    ///
    /// # Returns
    /// * `Ok(Some(value))` if the key exists in storage
    /// * `Ok(None)` if the key does not exist
    /// * `Err(StorageError)` if an error occurred
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores a value under the key, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a stored value by key. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: NoteStorage + ?Sized> NoteStorage for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: NoteStorage + ?Sized> NoteStorage for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory implementation of [`NoteStorage`]. Contents are lost with the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty [`MemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteStorage for MemoryStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Enum for selecting the type of storage to use for a [`Notebook`](crate::Notebook).
#[derive(Debug, Clone)]
pub enum StorageType {
    #[cfg(feature = "wasm-js")]
    LocalStorage(LocalStorage),
    #[cfg(feature = "native")]
    File(FileStorage),
    Memory(MemoryStorage),
}

impl Default for StorageType {
    #[cfg(feature = "wasm-js")]
    fn default() -> Self {
        StorageType::LocalStorage(LocalStorage::new())
    }

    #[cfg(not(feature = "wasm-js"))]
    fn default() -> Self {
        StorageType::Memory(MemoryStorage::new())
    }
}

impl NoteStorage for StorageType {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            #[cfg(feature = "wasm-js")]
            StorageType::LocalStorage(storage) => storage.get(key),
            #[cfg(feature = "native")]
            StorageType::File(storage) => storage.get(key),
            StorageType::Memory(storage) => storage.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            #[cfg(feature = "wasm-js")]
            StorageType::LocalStorage(storage) => storage.set(key, value),
            #[cfg(feature = "native")]
            StorageType::File(storage) => storage.set(key, value),
            StorageType::Memory(storage) => storage.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            #[cfg(feature = "wasm-js")]
            StorageType::LocalStorage(storage) => storage.remove(key),
            #[cfg(feature = "native")]
            StorageType::File(storage) => storage.remove(key),
            StorageType::Memory(storage) => storage.remove(key),
        }
    }
}

impl From<MemoryStorage> for StorageType {
    fn from(storage: MemoryStorage) -> Self {
        StorageType::Memory(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.set("test", "value").unwrap();
        let value = storage.get("test").unwrap();
        assert_eq!(value, Some("value".to_string()));
        storage.remove("test").unwrap();
        assert_eq!(storage.get("test").unwrap(), None);
        storage.remove("test").unwrap();
    }

    #[test]
    fn test_storage_type_delegates() {
        let mut storage = StorageType::from(MemoryStorage::new());
        storage.set("test", "value").unwrap();
        assert_eq!(storage.get("test").unwrap(), Some("value".to_string()));
        storage.remove("test").unwrap();
        assert_eq!(storage.get("test").unwrap(), None);
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn NoteStorage> = Box::new(MemoryStorage::new());
        storage.set("notes", "[]").unwrap();
        assert_eq!(storage.get("notes").unwrap().as_deref(), Some("[]"));
    }
}
