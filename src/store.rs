//! Reads and writes the whole note collection to a single storage slot.

use crate::{
    note::Note,
    storage::{KEY_STORAGE_NOTES, NoteStorage, StorageError},
};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::debug;

/// The error type for the note store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An error from the storage backend.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// The slot holds data that is not a valid note collection, or a note cannot be written.
    #[error("Malformed note data: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(feature = "wasm-js")]
impl From<StoreError> for wasm_bindgen::JsValue {
    fn from(err: StoreError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Owner of the serialized note collection.
///
/// This is the only component that touches the slot. Every save rewrites it entirely.
#[derive(Debug, Clone)]
pub struct NoteStore<S> {
    storage: S,
    key: String,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Creates a store over the default `notes` slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, KEY_STORAGE_NOTES)
    }

    /// Creates a store over a custom slot.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The slot this store reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored collection. An absent or empty slot yields no notes.
    ///
    /// Fails with [`StoreError::Malformed`] when the slot does not hold a JSON array of notes
    /// with valid dates; nothing is recovered from partially valid data.
    pub fn load(&mut self) -> Result<Vec<Note>, StoreError> {
        let notes = match self.storage.get(&self.key)? {
            Some(serialized) if !serialized.is_empty() => serde_json::from_str(&serialized)?,
            _ => Vec::new(),
        };
        #[cfg(feature = "tracing")]
        debug!("Loaded {} notes from `{}`", notes.len(), self.key);
        Ok(notes)
    }

    /// Overwrites the slot with the given collection.
    pub fn save(&mut self, notes: &[Note]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(notes)?;
        self.storage.set(&self.key, &serialized)?;
        Ok(())
    }

    /// Removes the slot altogether.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)?;
        Ok(())
    }

    /// Gives access to the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};

    fn note(content: &str, millis: i64) -> Note {
        Note::new(content, Utc.timestamp_millis_opt(millis).unwrap())
    }

    #[test]
    fn test_load_absent_slot_is_empty() {
        let mut store = NoteStore::new(MemoryStorage::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_empty_string_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY_STORAGE_NOTES, "").unwrap();
        let mut store = NoteStore::new(storage);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_notes() {
        let notes = vec![
            note("second", 1_706_782_530_250),
            note("", 1_706_782_000_001),
        ];
        let mut store = NoteStore::new(MemoryStorage::new());
        store.save(&notes).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, notes);
        assert_eq!(loaded[0].date, notes[0].date);
    }

    #[test]
    fn test_save_then_load_keeps_sub_millisecond_dates() {
        let notes = vec![Note::new(
            "a",
            Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap(),
        )];
        let mut store = NoteStore::new(MemoryStorage::new());
        store.save(&notes).unwrap();
        assert_eq!(store.load().unwrap(), notes);
    }

    #[test]
    fn test_save_out_of_range_date_keeps_slot() {
        let mut store = NoteStore::new(MemoryStorage::new());
        let kept = vec![note("kept", 1)];
        store.save(&kept).unwrap();

        let far = Note::new("far", Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(store.save(&[far]), Err(StoreError::Malformed(_))));
        assert_eq!(store.load().unwrap(), kept);
    }

    #[test]
    fn test_save_overwrites_slot() {
        let mut store = NoteStore::new(MemoryStorage::new());
        store.save(&[note("a", 1), note("b", 2)]).unwrap();
        store.save(&[note("c", 3)]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "c");
    }

    #[test]
    fn test_load_reads_browser_format() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                KEY_STORAGE_NOTES,
                r#"[{"id":"7b1e","date":"2024-02-01T10:15:30.250Z","content":"Olá"}]"#,
            )
            .unwrap();
        let mut store = NoteStore::new(storage);
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].id.as_str(), "7b1e");
        assert_eq!(loaded[0].date.timestamp_millis(), 1_706_782_530_250);
        assert_eq!(loaded[0].content, "Olá");
    }

    #[test]
    fn test_load_malformed_fails() {
        let mut storage = MemoryStorage::new();
        storage.set(KEY_STORAGE_NOTES, "{not json").unwrap();
        let mut store = NoteStore::new(storage);
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_load_bad_date_fails() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                KEY_STORAGE_NOTES,
                r#"[{"id":"1","date":"not a date","content":"x"}]"#,
            )
            .unwrap();
        let mut store = NoteStore::new(storage);
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_custom_key_and_clear() {
        let mut store = NoteStore::with_key(MemoryStorage::new(), "archive");
        assert_eq!(store.key(), "archive");
        store.save(&[note("a", 1)]).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
        let mut storage = store.into_storage();
        assert_eq!(storage.get("archive").unwrap(), None);
    }
}
