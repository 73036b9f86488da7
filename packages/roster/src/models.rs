//! # Wire models for the character backend
//!
//! Defines the records exchanged with the `/characters` REST surface and the
//! envelopes the backend wraps them in. Everything here is
//! `Serialize + Deserialize` so the same types serve the HTTP client in the
//! `api` crate and the in-memory backend used by tests.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Character`] | One record: server-assigned `id`, first and last name, optional occupation. |
//! | [`CharacterUpdate`] | The full-replacement body sent with `PUT /characters/{id}`. |
//! | [`Page`] / [`PageMeta`] | A page of records plus the pagination metadata returned by `GET /characters`. |
//! | [`Reply`] | Either the expected payload or one of the two backend signals (`error`, `message`). |
//! | [`Acknowledgement`] | The `{ message }` / `{ error }` body returned by update and delete. |
//!
//! The backend reports every outcome through a JSON body, whatever the HTTP
//! status, so callers decode [`Reply`] and [`Acknowledgement`] unconditionally.

use serde::{Deserialize, Serialize};

/// Server-assigned character identifier.
pub type CharacterId = i64;

/// A character record as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub first_name: String,
    pub last_name: String,
    /// Absent and `null` both decode to `None`.
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Body of an update request. Always a full replacement of the three fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterUpdate {
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
}

/// Pagination metadata attached to a list response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u32>,
}

/// A single page of records: `{ data: [...], meta: {...} }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Character>,
    pub meta: PageMeta,
}

/// A backend response that either carries the expected payload or one of the
/// backend's two signals.
///
/// Variant order matters for decoding: a body with an `error` field is an
/// error even if it also has a `message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Error { error: String },
    Message { message: String },
    Data(T),
}

impl<T> Reply<T> {
    pub fn data(value: T) -> Self {
        Reply::Data(value)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Reply::Error { error: text.into() }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Reply::Message {
            message: text.into(),
        }
    }

    /// The server-authored text of an `error` or `message` signal.
    pub fn signal(&self) -> Option<&str> {
        match self {
            Reply::Error { error } => Some(error),
            Reply::Message { message } => Some(message),
            Reply::Data(_) => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Reply::Data(value) => Some(value),
            _ => None,
        }
    }
}

/// Response body of update and delete requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Acknowledgement {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }

    /// Text to show the user: the message if present, otherwise the error.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}
