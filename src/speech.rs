//! Continuous speech-to-text capture feeding a note draft.
//!
//! [`SpeechCapture`] is a two-state machine, Idle and Recording, over a
//! [`SpeechRecognizer`]. Each recognizer instance owns its own session, so several
//! editing surfaces can capture independently.

use crate::{
    callback::{OnNotice, OnSpeechError, OnTranscript},
    notice::Notice,
};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::{debug, error};

#[cfg(feature = "wasm-js")]
pub mod wasm_js;

#[cfg(feature = "wasm-js")]
pub use wasm_js::BrowserRecognizer;

/// Locale notes are dictated in.
pub const DEFAULT_LANG: &str = "pt-BR";

/// The error type for speech capture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The platform has no speech recognition capability.
    #[error("Speech recognition is not supported")]
    Unsupported,
    /// The recognition service refused to start.
    #[error("Could not start speech recognition: {0}")]
    Start(String),
}

#[cfg(feature = "wasm-js")]
impl From<SpeechError> for wasm_bindgen::JsValue {
    fn from(err: SpeechError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Whether a capture session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

/// Settings handed to the recognition service.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
#[builder(on(String, into))]
pub struct SpeechConfig {
    /// BCP 47 language tag to recognize.
    #[builder(default = DEFAULT_LANG.to_string())]
    pub lang: String,
    /// Keep listening through pauses until explicitly stopped.
    #[builder(default = true)]
    pub continuous: bool,
    /// Deliver provisional results while the user is still speaking.
    #[builder(default = true)]
    pub interim_results: bool,
    #[builder(default = 1)]
    pub max_alternatives: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Callbacks a recognizer reports to while a session runs.
#[derive(Debug, Clone)]
pub struct SpeechHandlers {
    pub on_transcript: OnTranscript,
    pub on_error: OnSpeechError,
}

/// A platform speech-to-text capability.
pub trait SpeechRecognizer {
    /// Returns `true` if recognition can be started on this platform.
    fn is_supported(&self) -> bool;

    /// Starts a session. Every result must be reported as the full transcript so far.
    fn start(&mut self, config: &SpeechConfig, handlers: SpeechHandlers) -> Result<(), SpeechError>;

    /// Stops listening. Results for speech already heard may still be reported afterwards.
    fn stop(&mut self);

    /// Stops the session, if any, and discards its pending results. No handler is called
    /// after this returns.
    fn abort(&mut self) {
        self.stop();
    }
}

impl<T: SpeechRecognizer + ?Sized> SpeechRecognizer for Box<T> {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    fn start(
        &mut self,
        config: &SpeechConfig,
        handlers: SpeechHandlers,
    ) -> Result<(), SpeechError> {
        (**self).start(config, handlers)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

/// Joins recognized segments into the running transcript.
pub fn transcript<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .fold(String::new(), |mut text, segment| {
            text.push_str(segment.as_ref());
            text
        })
}

/// Options for [`SpeechCapture::new`].
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct SpeechCaptureOptions {
    /// Recognition settings. Defaults to continuous pt-BR recognition with interim results.
    pub config: Option<SpeechConfig>,

    /// Callback for errors reported by the recognition service while recording.
    #[builder(into)]
    pub on_error: Option<OnSpeechError>,

    /// Callback receiving the notice raised when recognition is unsupported.
    #[builder(into)]
    pub on_notice: Option<OnNotice>,
}

/// Drives a [`SpeechRecognizer`] through the Idle → Recording → Idle cycle.
#[derive(Debug)]
pub struct SpeechCapture<R: SpeechRecognizer> {
    recognizer: R,
    config: SpeechConfig,
    state: RecordingState,
    on_transcript: OnTranscript,
    on_error: Option<OnSpeechError>,
    on_notice: Option<OnNotice>,
}

impl<R: SpeechRecognizer> SpeechCapture<R> {
    /// Creates an idle capture. `on_transcript` receives the full transcript on every result.
    pub fn new(
        recognizer: R,
        on_transcript: impl Into<OnTranscript>,
        options: SpeechCaptureOptions,
    ) -> Self {
        Self {
            recognizer,
            config: options.config.unwrap_or_default(),
            state: RecordingState::Idle,
            on_transcript: on_transcript.into(),
            on_error: options.on_error,
            on_notice: options.on_notice,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Starts recording. Does nothing if already recording.
    ///
    /// If the platform cannot recognize speech, an error notice is raised and the
    /// capture stays idle. Recognition errors after a successful start are logged and
    /// forwarded; the session is not restarted.
    pub fn start(&mut self) -> Result<(), SpeechError> {
        if self.is_recording() {
            return Ok(());
        }
        if !self.recognizer.is_supported() {
            if let Some(on_notice) = &self.on_notice {
                on_notice.call(Notice::speech_unsupported());
            }
            return Err(SpeechError::Unsupported);
        }

        let forward = self.on_error.clone();
        let on_error = OnSpeechError::from(move |message: String| {
            #[cfg(feature = "tracing")]
            error!("Speech recognition error: {message}");
            if let Some(forward) = &forward {
                forward.call(message);
            }
        });
        let handlers = SpeechHandlers {
            on_transcript: self.on_transcript.clone(),
            on_error,
        };
        self.recognizer.start(&self.config, handlers)?;
        self.state = RecordingState::Recording;
        #[cfg(feature = "tracing")]
        debug!("Speech capture started ({})", self.config.lang);
        Ok(())
    }

    /// Stops recording and returns to idle. The final result for speech already heard
    /// still reaches `on_transcript`.
    pub fn stop(&mut self) {
        if self.is_recording() {
            self.recognizer.stop();
            #[cfg(feature = "tracing")]
            debug!("Speech capture stopped");
        }
        self.state = RecordingState::Idle;
    }

    /// Stops recording and drops any result still in flight.
    pub fn cancel(&mut self) {
        self.recognizer.abort();
        self.state = RecordingState::Idle;
    }
}

impl<R: SpeechRecognizer> Drop for SpeechCapture<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}
