//! Verification client errors

use idskill_core::SkillError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Failed to create HTTP client for AssureID: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("AssureID {operation} timed out")]
    Timeout { operation: &'static str },

    #[error("Failed to send AssureID {operation} request: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("AssureID {operation} failed: {status} - {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse AssureID {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("AssureID returned an empty document instance id")]
    EmptyInstanceId,
}

/// Result type for verification operations
pub type VerificationResult<T> = Result<T, VerificationError>;

impl VerificationError {
    pub(crate) fn from_send(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            VerificationError::Timeout { operation }
        } else {
            VerificationError::Request { operation, source }
        }
    }

    pub(crate) fn from_decode(operation: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            VerificationError::Timeout { operation }
        } else {
            VerificationError::Decode { operation, source }
        }
    }
}

impl From<VerificationError> for SkillError {
    fn from(err: VerificationError) -> Self {
        SkillError::Verification(Box::new(err))
    }
}
