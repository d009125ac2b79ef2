//! File-based storage implementation for native environments.
//!
//! Every key is persisted as its own JSON document inside a directory, which keeps the
//! note slot readable and easy to back up.

use super::{NoteStorage, StorageError};
use std::{fs, io::ErrorKind, path::PathBuf};

const STORAGE_FILE_EXTENSION: &str = "json";

/// File-based storage backend that persists values to files on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    /// Creates a new instance of [`FileStorage`].
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory where the storage files will be stored. It is created on
    ///   the first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn ensure_directory(&self) -> Result<(), StorageError> {
        if self.directory.as_os_str().is_empty() {
            return Ok(()); // current directory
        }
        fs::create_dir_all(&self.directory)?;
        Ok(())
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{STORAGE_FILE_EXTENSION}", sanitize_key(key)))
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

impl NoteStorage for FileStorage {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_directory()?;
        fs::write(self.file_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.file_path(key)) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}

impl From<FileStorage> for super::StorageType {
    fn from(storage: FileStorage) -> Self {
        super::StorageType::File(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_directory() -> PathBuf {
        let mut path = std::env::temp_dir();
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("local-notes-test-{unique}"));
        path
    }

    #[test]
    fn file_storage_persists_strings() {
        let dir = temp_directory();
        let mut storage = FileStorage::new(dir.clone());
        storage.set("notes", "[]").expect("store value");
        let retrieved = storage.get("notes").expect("read value");
        assert_eq!(retrieved.as_deref(), Some("[]"));
        assert!(dir.join("notes.json").exists());
        storage.remove("notes").expect("remove");
        let after_remove = storage.get("notes").expect("read missing");
        assert!(after_remove.is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn file_storage_missing_directory_reads_none() {
        let dir = temp_directory();
        let mut storage = FileStorage::new(dir.clone());
        assert_eq!(storage.get("notes").expect("read missing"), None);
        storage.remove("notes").expect("remove missing");
        assert!(!dir.exists());
    }

    #[test]
    fn file_storage_sanitizes_keys() {
        let dir = temp_directory();
        let mut storage = FileStorage::new(dir.clone());
        storage.set("a/b:c", "value").expect("store value");
        assert!(dir.join("a_b_c.json").exists());
        assert_eq!(
            storage.get("a/b:c").expect("read value").as_deref(),
            Some("value")
        );
        let _ = fs::remove_dir_all(dir);
    }
}
