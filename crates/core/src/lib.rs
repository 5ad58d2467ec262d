//! Shared primitives for all Rust crates in Talentra.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Talentra crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier assigned by the remote store to a persisted record.
///
/// Once a record carries an id it is immutable client-side; update and
/// delete operations require one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a validated record identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::MissingIdentity(
                "record id must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant; never leaves the client.
    #[error("validation error: {0}")]
    Validation(String),

    /// Update or delete attempted without a resolved record id.
    #[error("missing identity: {0}")]
    MissingIdentity(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote store rejected or failed a call.
    #[error("remote error: {0}")]
    Remote(String),

    /// The remote store answered with an unexpected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
