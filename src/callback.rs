//! Callback handlers for notices, speech transcripts and recognition errors.

use crate::notice::Notice;
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type OnNoticeInner = Box<dyn FnMut(Notice) + Send>;

/// The callback executed whenever a user-visible [`Notice`] is raised.
///
/// # Usage
/// ```
/// use local_notes::{callback::OnNotice, notice::Notice};
///
/// let on_notice = OnNotice::from(|notice: Notice| {
///     // Show a toast
/// });
/// ```
#[derive(Clone)]
pub struct OnNotice(pub(crate) Arc<Mutex<OnNoticeInner>>);

impl OnNotice {
    pub(crate) fn call(&self, notice: Notice) {
        (*self.0.lock())(notice);
    }
}

impl<F> From<F> for OnNotice
where
    F: FnMut(Notice) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnNotice(Arc::new(Mutex::new(Box::new(f))))
    }
}

impl std::fmt::Debug for OnNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OnNotice(<callback>)")
    }
}

pub(crate) type OnTranscriptInner = Box<dyn FnMut(String) + Send>;

/// The callback executed with the full running transcript on every recognition result.
///
/// The transcript replaces whatever was delivered before, it is never a delta.
#[derive(Clone)]
pub struct OnTranscript(pub(crate) Arc<Mutex<OnTranscriptInner>>);

impl OnTranscript {
    pub(crate) fn call(&self, transcript: String) {
        (*self.0.lock())(transcript);
    }
}

impl<F> From<F> for OnTranscript
where
    F: FnMut(String) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnTranscript(Arc::new(Mutex::new(Box::new(f))))
    }
}

impl std::fmt::Debug for OnTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OnTranscript(<callback>)")
    }
}

pub(crate) type OnSpeechErrorInner = Box<dyn FnMut(String) + Send>;

/// The callback executed when the recognition service reports an error.
#[derive(Clone)]
pub struct OnSpeechError(pub(crate) Arc<Mutex<OnSpeechErrorInner>>);

impl OnSpeechError {
    pub(crate) fn call(&self, error: String) {
        (*self.0.lock())(error);
    }
}

impl<F> From<F> for OnSpeechError
where
    F: FnMut(String) + Send + 'static,
{
    fn from(f: F) -> Self {
        OnSpeechError(Arc::new(Mutex::new(Box::new(f))))
    }
}

impl std::fmt::Debug for OnSpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OnSpeechError(<callback>)")
    }
}
