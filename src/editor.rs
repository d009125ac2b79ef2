//! State behind the "new note" editing surface.

use crate::{
    callback::{OnNotice, OnSpeechError},
    note::Note,
    notebook::Notebook,
    notice::Notice,
    speech::{
        RecordingState, SpeechCapture, SpeechCaptureOptions, SpeechConfig, SpeechError,
        SpeechRecognizer,
    },
    storage::NoteStorage,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Which input the surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Offer the choice between dictating and typing.
    #[default]
    Choose,
    Text,
    Audio,
}

/// Options for [`NoteEditor::new`].
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct NoteEditorOptions {
    /// Recognition settings used in [`EditorMode::Audio`].
    pub speech_config: Option<SpeechConfig>,

    /// Callback receiving the editor's notices: saved notes and missing speech support.
    #[builder(into)]
    pub on_notice: Option<OnNotice>,

    /// Callback for recognition errors while recording.
    #[builder(into)]
    pub on_speech_error: Option<OnSpeechError>,
}

/// Draft, input mode and speech capture of the surface for writing a new note.
///
/// While recording, every recognition result replaces the draft with the running
/// transcript.
#[derive(Debug)]
pub struct NoteEditor<R: SpeechRecognizer> {
    mode: EditorMode,
    draft: Arc<Mutex<String>>,
    capture: SpeechCapture<R>,
    on_notice: Option<OnNotice>,
}

impl<R: SpeechRecognizer> NoteEditor<R> {
    pub fn new(recognizer: R, options: NoteEditorOptions) -> Self {
        let draft = Arc::new(Mutex::new(String::new()));
        let sink = draft.clone();
        let capture = SpeechCapture::new(
            recognizer,
            move |transcript: String| *sink.lock() = transcript,
            SpeechCaptureOptions {
                config: options.speech_config,
                on_error: options.on_speech_error,
                on_notice: options.on_notice.clone(),
            },
        );
        Self {
            mode: EditorMode::Choose,
            draft,
            capture,
            on_notice: options.on_notice,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches the input mode.
    pub fn open(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// The current draft.
    pub fn content(&self) -> String {
        self.draft.lock().clone()
    }

    /// Replaces the draft with typed text.
    pub fn set_content(&mut self, content: impl Into<String>) {
        *self.draft.lock() = content.into();
    }

    pub fn recording_state(&self) -> RecordingState {
        self.capture.state()
    }

    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    /// Starts dictating into the draft.
    pub fn start_recording(&mut self) -> Result<(), SpeechError> {
        self.capture.start()
    }

    /// Stops dictating. The final result for speech already heard still updates the draft.
    pub fn stop_recording(&mut self) {
        self.capture.stop();
    }

    /// Creates a note from the draft, then clears the draft and returns to [`EditorMode::Choose`].
    pub fn save<S: NoteStorage>(&mut self, notebook: &mut Notebook<S>) -> Note {
        self.capture.cancel();
        let content = std::mem::take(&mut *self.draft.lock());
        let note = notebook.create(content);
        self.mode = EditorMode::Choose;
        if let Some(on_notice) = &self.on_notice {
            on_notice.call(Notice::note_created());
        }
        note
    }

    /// Discards the draft, stops any recording and returns to [`EditorMode::Choose`].
    pub fn close(&mut self) {
        self.capture.cancel();
        self.draft.lock().clear();
        self.mode = EditorMode::Choose;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notebook::NotebookOptions,
        notice::NoticeLevel,
        speech::tests::ScriptedRecognizer,
        storage::MemoryStorage,
    };

    fn notebook() -> Notebook<MemoryStorage> {
        Notebook::load(MemoryStorage::new(), NotebookOptions::default()).unwrap()
    }

    #[test]
    fn test_typed_note_is_saved() {
        let mut notebook = notebook();
        let mut editor =
            NoteEditor::new(ScriptedRecognizer::default(), NoteEditorOptions::default());
        assert_eq!(editor.mode(), EditorMode::Choose);

        editor.open(EditorMode::Text);
        editor.set_content("buy milk");
        let note = editor.save(&mut notebook);

        assert_eq!(note.content, "buy milk");
        assert_eq!(notebook.notes(), &[note]);
        assert_eq!(editor.content(), "");
        assert_eq!(editor.mode(), EditorMode::Choose);
    }

    #[test]
    fn test_dictated_note_is_saved() {
        let mut notebook = notebook();
        let recognizer = ScriptedRecognizer::default();
        let mut editor = NoteEditor::new(recognizer.clone(), NoteEditorOptions::default());

        editor.open(EditorMode::Audio);
        editor.start_recording().unwrap();
        assert_eq!(editor.recording_state(), RecordingState::Recording);
        recognizer.hear(&["comprar"]);
        recognizer.hear(&["comprar", " leite de aveia"]);
        assert_eq!(editor.content(), "comprar leite de aveia");

        let note = editor.save(&mut notebook);
        assert_eq!(note.content, "comprar leite de aveia");
        assert!(!editor.is_recording());
        assert_eq!(recognizer.inner.lock().aborts, 1);
    }

    #[test]
    fn test_late_result_fills_draft_until_saved() {
        let mut notebook = notebook();
        let recognizer = ScriptedRecognizer::default();
        let mut editor = NoteEditor::new(recognizer.clone(), NoteEditorOptions::default());
        editor.open(EditorMode::Audio);
        editor.start_recording().unwrap();
        recognizer.hear(&["comprar"]);

        editor.stop_recording();
        recognizer.hear(&["comprar", " pão"]);
        assert_eq!(editor.content(), "comprar pão");

        let note = editor.save(&mut notebook);
        assert_eq!(note.content, "comprar pão");
        recognizer.hear(&["tarde demais"]);
        assert_eq!(editor.content(), "");
    }

    #[test]
    fn test_close_resets_everything() {
        let recognizer = ScriptedRecognizer::default();
        let mut editor = NoteEditor::new(recognizer.clone(), NoteEditorOptions::default());
        editor.open(EditorMode::Audio);
        editor.start_recording().unwrap();
        recognizer.hear(&["rascunho"]);

        editor.close();
        assert_eq!(editor.mode(), EditorMode::Choose);
        assert_eq!(editor.content(), "");
        assert_eq!(editor.recording_state(), RecordingState::Idle);
        assert_eq!(recognizer.inner.lock().aborts, 1);
    }

    #[test]
    fn test_notices() {
        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink = notices.clone();
        let options = NoteEditorOptions::builder()
            .on_notice(move |notice: Notice| sink.lock().push(notice))
            .build();
        let mut editor = NoteEditor::new(ScriptedRecognizer::unsupported(), options);

        editor.open(EditorMode::Audio);
        assert_eq!(editor.start_recording(), Err(SpeechError::Unsupported));
        assert!(!editor.is_recording());

        editor.set_content("typed instead");
        editor.save(&mut notebook());

        let notices = notices.lock();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[1].level, NoticeLevel::Success);
        assert_eq!(notices[1].message, "Nota criada com sucesso");
    }
}
