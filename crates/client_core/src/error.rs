use std::fmt;

use shared::{domain::DraftError, error::StoreErrorBody};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FetchAll,
    Insert,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one failure kind the gateway reports, whatever went wrong underneath.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("storage operation {operation} failed: {reason}")]
pub struct StoreError {
    pub operation: StoreOperation,
    pub status: Option<u16>,
    pub reason: String,
}

impl StoreError {
    pub fn new(operation: StoreOperation, reason: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            reason: reason.into(),
        }
    }

    pub fn transport(operation: StoreOperation, err: reqwest::Error) -> Self {
        Self::new(operation, format!("request failed: {err}"))
    }

    pub fn decode(operation: StoreOperation, err: impl fmt::Display) -> Self {
        Self::new(operation, format!("malformed response: {err}"))
    }

    pub fn rejected(operation: StoreOperation, err: DraftError) -> Self {
        Self::new(operation, format!("invalid artist: {err}"))
    }

    /// Non-2xx reply; `raw_body` is decoded as the store's error JSON when possible.
    pub fn status(operation: StoreOperation, status: u16, raw_body: &str) -> Self {
        let reason = match serde_json::from_str::<StoreErrorBody>(raw_body) {
            Ok(body) if !body.message.is_empty() => format!("HTTP {status}: {body}"),
            _ if raw_body.trim().is_empty() => format!("HTTP {status}"),
            _ => format!("HTTP {status}: {}", raw_body.trim()),
        };
        Self {
            operation,
            status: Some(status),
            reason,
        }
    }
}
