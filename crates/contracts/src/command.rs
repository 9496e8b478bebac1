//! Command payload and dispatch target types

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Content type stamped on every outbound message
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Command payload handed over by the caller
///
/// `Raw` strings go on the wire unmodified; `Structured` values are
/// JSON-encoded at publish time. Ownership is transient: the core never
/// persists a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandPayload {
    /// Pre-encoded or opaque text, sent verbatim
    Raw(String),
    /// Structured value, canonically JSON-encoded before transmission
    Structured(serde_json::Value),
}

impl CommandPayload {
    /// Wire encoding of the payload
    ///
    /// # Errors
    /// Returns a serialize error when a structured value cannot be encoded
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        match self {
            Self::Raw(text) => Ok(text.as_bytes().to_vec()),
            Self::Structured(value) => {
                serde_json::to_vec(value).map_err(|e| CoreError::serialize(e.to_string()))
            }
        }
    }
}

impl From<&str> for CommandPayload {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for CommandPayload {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<serde_json::Value> for CommandPayload {
    fn from(value: serde_json::Value) -> Self {
        Self::Structured(value)
    }
}

/// Where a command is addressed
///
/// Determines which routing key is computed and, for `NamedQueue`, whether a
/// queue is declared before the publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchTarget {
    /// A single computer inside a room
    Computer {
        computer_id: String,
        room_id: String,
    },
    /// Every computer in a room
    Room { room_id: String },
    /// A named queue, declared lazily before publish
    NamedQueue { queue: String },
}
