//! Note-taking core for single-page web applications.
//!
//! Notes are short texts, typed or dictated, kept newest first in a [`Notebook`] and
//! persisted as one JSON array in `window.localStorage`. Dictation goes through the
//! browser's speech recognition into a [`NoteEditor`] draft.
//!
//! This crate is intended for use in front-end WebAssembly environments. With the
//! `native` feature notes can be kept in files instead, which is also how the logic is
//! exercised outside a browser.
//!
//! # Usage
//! ```
//! use local_notes::{Notebook, NotebookOptions, storage::MemoryStorage};
//!
//! let mut notebook = Notebook::load(MemoryStorage::new(), NotebookOptions::default()).unwrap();
//! let note = notebook.create("buy milk");
//! notebook.update(&note.id, "buy oat milk");
//! assert_eq!(notebook.search("OAT").len(), 1);
//!
//! notebook.delete(&note.id);
//! assert!(notebook.is_empty());
//! notebook.restore();
//! assert_eq!(notebook.notes()[0].content, "buy oat milk");
//! ```

pub mod callback;
pub mod clock;
pub mod editor;
pub mod note;
pub mod notebook;
pub mod notice;
pub mod relative_time;
pub mod speech;
pub mod storage;
pub mod store;

pub use clock::Clock;
pub use editor::{EditorMode, NoteEditor, NoteEditorOptions};
pub use note::{Note, NoteId};
pub use notebook::{Notebook, NotebookOptions};
pub use notice::{Notice, NoticeAction, NoticeLevel};
pub use relative_time::{format_distance, format_distance_to_now};
pub use speech::{RecordingState, SpeechCapture, SpeechConfig, SpeechError, SpeechRecognizer};
pub use storage::{NoteStorage, StorageError, StorageType};
pub use store::{NoteStore, StoreError};
