//! The in-memory note collection and the operations on it.

use crate::{
    callback::OnNotice,
    clock::Clock,
    note::{Note, NoteId},
    notice::Notice,
    storage::{NoteStorage, StorageType},
    store::{NoteStore, StoreError},
};
#[cfg(feature = "tracing")]
use tracing::{debug, error};

/// Options for [`Notebook::load`].
#[derive(Debug, Clone, Default, bon::Builder)]
#[builder(on(String, into))]
pub struct NotebookOptions {
    /// The storage slot holding the collection. Defaults to `notes`.
    pub storage_key: Option<String>,

    /// Timestamp source for created and edited notes. Defaults to the system clock.
    #[builder(into)]
    pub clock: Option<Clock>,

    /// Callback receiving delete and restore notices.
    #[builder(into)]
    pub on_notice: Option<OnNotice>,
}

/// The sole owner of the note collection.
///
/// Notes are kept newest first. The collection is sorted by date once, when it is loaded;
/// after that creates, edits and restores put their note at the front. Every mutation
/// rewrites the whole collection to storage.
///
/// The last deleted note is kept in a single-slot undo buffer until the next delete
/// replaces it, so it can be restored again after being deleted again.
#[derive(Debug)]
pub struct Notebook<S = StorageType> {
    notes: Vec<Note>,
    deleted: Option<Note>,
    store: NoteStore<S>,
    clock: Clock,
    on_notice: Option<OnNotice>,
}

impl Notebook<StorageType> {
    /// Loads the notebook from the default storage, `localStorage` in the browser.
    pub fn open(options: NotebookOptions) -> Result<Self, StoreError> {
        Self::load(StorageType::default(), options)
    }
}

impl<S: NoteStorage> Notebook<S> {
    /// Loads the stored collection and sorts it newest first.
    ///
    /// Malformed stored data is fatal and returned as [`StoreError::Malformed`].
    pub fn load(storage: S, options: NotebookOptions) -> Result<Self, StoreError> {
        let mut store = match options.storage_key {
            Some(key) => NoteStore::with_key(storage, key),
            None => NoteStore::new(storage),
        };
        let mut notes = store.load()?;
        notes.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            notes,
            deleted: None,
            store,
            clock: options.clock.unwrap_or_default(),
            on_notice: options.on_notice,
        })
    }

    /// The current collection, in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note held in the undo buffer, if any.
    pub fn deleted(&self) -> Option<&Note> {
        self.deleted.as_ref()
    }

    /// Adds a new note at the front of the collection.
    pub fn create(&mut self, content: impl Into<String>) -> Note {
        let note = Note::new(content, self.clock.now());
        self.notes.insert(0, note.clone());
        #[cfg(feature = "tracing")]
        debug!("Created note {}", note.id);
        self.persist();
        note
    }

    /// Replaces the content of a note and refreshes its date, moving it to the front.
    ///
    /// Returns `None` without touching storage if no note has the given id.
    pub fn update(&mut self, id: &NoteId, content: impl Into<String>) -> Option<Note> {
        let index = self.position(id)?;
        let mut note = self.notes.remove(index);
        note.content = content.into();
        note.date = self.clock.now();
        self.notes.insert(0, note.clone());
        self.persist();
        Some(note)
    }

    /// Removes a note and keeps it in the undo buffer, replacing whatever was there.
    ///
    /// Raises a notice offering to restore it. Returns `None` if no note has the given id.
    pub fn delete(&mut self, id: &NoteId) -> Option<Note> {
        let index = self.position(id)?;
        let note = self.notes.remove(index);
        self.deleted = Some(note.clone());
        #[cfg(feature = "tracing")]
        debug!("Deleted note {}", note.id);
        self.persist();
        self.notify(Notice::note_deleted());
        Some(note)
    }

    /// Puts the note from the undo buffer back at the front of the collection.
    ///
    /// The buffer keeps its note afterwards. Returns `None` if the buffer is empty or
    /// the note is already in the collection.
    pub fn restore(&mut self) -> Option<Note> {
        let note = self.deleted.clone()?;
        if self.position(&note.id).is_some() {
            return None;
        }
        self.notes.insert(0, note.clone());
        self.persist();
        self.notify(Notice::note_restored());
        Some(note)
    }

    /// Notes whose content contains `query`, ignoring case.
    ///
    /// An empty query returns the whole collection in its current order.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        let query = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| note.content.to_lowercase().contains(&query))
            .collect()
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    // Write failures are logged only; the in-memory collection stays authoritative.
    fn persist(&mut self) {
        if let Err(_e) = self.store.save(&self.notes) {
            #[cfg(feature = "tracing")]
            error!("Could not persist notes: {_e}");
        }
    }

    fn notify(&self, notice: Notice) {
        if let Some(on_notice) = &self.on_notice {
            on_notice.call(notice);
        }
    }
}
