//! Storage operation errors

use idskill_core::SkillError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create HTTP client for Box: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Box {operation} timed out")]
    Timeout { operation: &'static str },

    #[error("Failed to send Box {operation} request: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Box {operation} failed: {status} - {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse Box {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    pub(crate) fn from_send(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            StorageError::Timeout { operation }
        } else {
            StorageError::Request { operation, source }
        }
    }

    pub(crate) fn from_decode(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            StorageError::Timeout { operation }
        } else {
            StorageError::Decode { operation, source }
        }
    }
}

impl From<StorageError> for SkillError {
    fn from(err: StorageError) -> Self {
        SkillError::Storage(Box::new(err))
    }
}
