//! Data Transfer Objects
//!
//! Request and response types for the Notes API endpoints.
//! Response bodies are decoded into these types at the client boundary; a
//! body that does not fit is reported as [`ApiError::Schema`](super::ApiError::Schema).

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================
// IDENTIFIERS & TIMESTAMPS
// ============================================

/// Backend identifier of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NoteId)
    }
}

/// ISO-8601 timestamp as sent by the backend.
///
/// Values without an offset are taken as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| {
                let utc: DateTime<Utc> = naive.and_utc();
                Self(utc.into())
            })
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.into())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw:?}")))
    }
}

// ============================================
// NOTE DTOs
// ============================================

/// A note as listed by `GET /notes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// `GET /notes` response
#[derive(Debug, Deserialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

/// `POST /notes` request
#[derive(Debug, Clone, Serialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Partial update for `PUT /notes/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NoteChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Response to create and update requests
#[derive(Debug, Clone, Deserialize)]
pub struct NoteSaved {
    pub id: NoteId,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// SHARING DTOs
// ============================================

/// `POST /notes/{id}/share` response
#[derive(Debug, Clone, Deserialize)]
pub struct ShareResponse {
    pub share_url: String,
    #[serde(default)]
    pub share_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /share/{token}` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SharedNote {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub shared_at: Option<Timestamp>,
}

// ============================================
// MISC
// ============================================

/// `GET /welcome` response
#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
