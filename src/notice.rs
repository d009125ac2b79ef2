//! User-visible notifications raised by note and capture operations.

use std::time::Duration;

pub(crate) const MSG_NOTE_CREATED: &str = "Nota criada com sucesso";
pub(crate) const MSG_NOTE_DELETED: &str = "Nota excluída";
pub(crate) const MSG_NOTE_RESTORED: &str = "Nota restaurada com sucesso";
pub(crate) const MSG_SPEECH_UNSUPPORTED: &str =
    "Infelizmente seu navegador não suporta a API de gravação";

/// How long the restore offer stays on screen after a delete.
pub const RESTORE_OFFER_DURATION: Duration = Duration::from_millis(7000);

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// An action the user may trigger from a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Bring back the most recently deleted note with
    /// [`Notebook::restore`](crate::Notebook::restore).
    Restore,
}

impl NoticeAction {
    /// The button label shown for the action.
    pub fn label(&self) -> &'static str {
        match self {
            NoticeAction::Restore => "Restaurar",
        }
    }
}

/// A notification for the presentation layer to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub action: Option<NoticeAction>,
    /// How long to show the notice. `None` leaves it to the presentation layer.
    pub duration: Option<Duration>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            action: None,
            duration: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            action: None,
            duration: None,
        }
    }

    pub(crate) fn note_created() -> Self {
        Self::success(MSG_NOTE_CREATED)
    }

    pub(crate) fn note_deleted() -> Self {
        Self {
            action: Some(NoticeAction::Restore),
            duration: Some(RESTORE_OFFER_DURATION),
            ..Self::error(MSG_NOTE_DELETED)
        }
    }

    pub(crate) fn note_restored() -> Self {
        Self::success(MSG_NOTE_RESTORED)
    }

    pub(crate) fn speech_unsupported() -> Self {
        Self::error(MSG_SPEECH_UNSUPPORTED)
    }
}
