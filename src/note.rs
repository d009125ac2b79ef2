//! The note record and its stored JSON shape.

use chrono::{DateTime, SubsecRound, Utc};
use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a note. Unique within a collection and never changed after creation.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Clone,
    AsRef,
    Display,
    From,
)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh random (v4 UUID) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A user-authored text record.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Note {
    /// The identifier of the note.
    pub id: NoteId,
    /// When the note was created or last edited. Notes are ordered by this, newest first.
    ///
    /// Stored with millisecond precision in the years 0 through 9999.
    #[serde(with = "js_date")]
    pub date: DateTime<Utc>,
    /// The note text. May be empty.
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated id. The date is truncated to milliseconds.
    pub fn new(content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::generate(),
            date: date.trunc_subsecs(3),
            content: content.into(),
        }
    }
}

/// (De)serializes timestamps the way `Date.prototype.toJSON` writes them,
/// e.g. `2024-02-01T10:15:30.250Z`.
///
/// Years outside 0..=9999 have no four-digit form and are refused on write.
mod js_date {
    use chrono::{DateTime, Datelike, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !(0..=9999).contains(&date.year()) {
            return Err(S::Error::custom(format!("date `{date}` is out of range")));
        }
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&value)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid date `{value}`: {e}")))
    }
}
