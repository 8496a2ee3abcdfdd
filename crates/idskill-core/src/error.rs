//! Error types module
//!
//! `SkillError` is the single failure type of a skill invocation. Client
//! crates keep their own typed errors and convert into it at the
//! orchestration boundary.

/// Boxed error used to carry a client error as the source of a `SkillError`
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected outcomes such as an empty file
    Debug,
    /// Recoverable or operator-actionable issues such as an inactive subscription
    Warn,
    /// Unexpected remote failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Invalid skill invocation: {0}")]
    InvalidEvent(String),

    #[error("File {file_id} has no content")]
    EmptyFile { file_id: String },

    #[error("AssureID subscription is not active")]
    SubscriptionInactive,

    #[error("Verification service error: {0}")]
    Verification(#[source] BoxError),

    #[error("Storage error: {0}")]
    Storage(#[source] BoxError),
}

impl SkillError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            SkillError::InvalidEvent(_) => "INVALID_EVENT",
            SkillError::EmptyFile { .. } => "EMPTY_FILE",
            SkillError::SubscriptionInactive => "SUBSCRIPTION_INACTIVE",
            SkillError::Verification(_) => "VERIFICATION_ERROR",
            SkillError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            SkillError::InvalidEvent(_) | SkillError::EmptyFile { .. } => LogLevel::Debug,
            SkillError::SubscriptionInactive => LogLevel::Warn,
            SkillError::Verification(_) | SkillError::Storage(_) => LogLevel::Error,
        }
    }

    /// Message shown to end users on the file's status card
    pub fn client_message(&self) -> String {
        match self {
            SkillError::InvalidEvent(_) => "The skill invocation could not be read.".to_string(),
            SkillError::EmptyFile { .. } => "The file is empty and could not be analyzed.".to_string(),
            SkillError::SubscriptionInactive => {
                "The identity verification subscription is not active.".to_string()
            }
            SkillError::Verification(_) => {
                "The identity document could not be analyzed.".to_string()
            }
            SkillError::Storage(_) => "The file could not be read or updated.".to_string(),
        }
    }
}
