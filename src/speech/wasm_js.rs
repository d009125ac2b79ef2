//! Browser speech recognition through the Web Speech API.

use super::{SpeechConfig, SpeechError, SpeechHandlers, SpeechRecognizer, transcript};
use gloo_events::EventListener;
use gloo_utils::window;
use js_sys::{Array, Function, Reflect};
#[cfg(feature = "tracing")]
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::SpeechRecognition;

// Chromium still only exposes the prefixed constructor.
const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

/// A running recognition together with the listeners bound to it.
struct Session {
    recognition: SpeechRecognition,
    _listeners: [EventListener; 2],
}

/// [`SpeechRecognizer`] backed by the browser's `SpeechRecognition`.
///
/// A stopped session keeps its listeners until the next start or abort, so the final
/// result the browser delivers after `stop` still reaches the handlers.
#[derive(Default)]
pub struct BrowserRecognizer {
    session: Option<Session>,
    finishing: Option<Session>,
}

impl std::fmt::Debug for BrowserRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserRecognizer")
            .field("recording", &self.session.is_some())
            .finish()
    }
}

impl BrowserRecognizer {
    /// Creates a new instance of [`BrowserRecognizer`].
    pub fn new() -> Self {
        Self::default()
    }

    fn constructor() -> Option<Function> {
        let window = window();
        CONSTRUCTORS.iter().find_map(|name| {
            Reflect::get(&window, &JsValue::from_str(name))
                .ok()
                .filter(JsValue::is_function)
                .map(|value| value.unchecked_into::<Function>())
        })
    }
}

impl SpeechRecognizer for BrowserRecognizer {
    fn is_supported(&self) -> bool {
        Self::constructor().is_some()
    }

    fn start(
        &mut self,
        config: &SpeechConfig,
        handlers: SpeechHandlers,
    ) -> Result<(), SpeechError> {
        self.abort();

        let constructor = Self::constructor().ok_or(SpeechError::Unsupported)?;
        let recognition: SpeechRecognition = Reflect::construct(&constructor, &Array::new())
            .map_err(|e| SpeechError::Start(js_message(&e)))?
            .unchecked_into();
        recognition.set_lang(&config.lang);
        recognition.set_continuous(config.continuous);
        recognition.set_interim_results(config.interim_results);
        recognition.set_max_alternatives(config.max_alternatives);

        let on_transcript = handlers.on_transcript;
        let on_result = EventListener::new(&recognition, "result", move |event| {
            let results = Reflect::get(event, &JsValue::from_str("results")).unwrap_or_default();
            on_transcript.call(transcript(result_segments(&results)));
        });

        let on_error = handlers.on_error;
        let on_failure = EventListener::new(&recognition, "error", move |event| {
            let code = Reflect::get(event, &JsValue::from_str("error"))
                .ok()
                .and_then(|code| code.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            on_error.call(code);
        });

        recognition.start().map_err(|e| {
            #[cfg(feature = "tracing")]
            error!("Could not start speech recognition: {e:?}");
            SpeechError::Start(js_message(&e))
        })?;

        self.session = Some(Session {
            recognition,
            _listeners: [on_result, on_failure],
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.recognition.stop();
            self.finishing = Some(session);
        }
    }

    fn abort(&mut self) {
        for session in [self.session.take(), self.finishing.take()].into_iter().flatten() {
            session.recognition.abort();
        }
    }
}

impl Drop for BrowserRecognizer {
    fn drop(&mut self) {
        self.abort();
    }
}

/// The best transcript of every result in a `SpeechRecognitionResultList`.
fn result_segments(results: &JsValue) -> Vec<String> {
    if results.is_undefined() || results.is_null() {
        return Vec::new();
    }
    Array::from(results)
        .iter()
        .filter_map(|result| {
            let alternative = Reflect::get_u32(&result, 0).ok()?;
            Reflect::get(&alternative, &JsValue::from_str("transcript"))
                .ok()?
                .as_string()
        })
        .collect()
}

fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
