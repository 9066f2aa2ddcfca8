//! Domain-level error taxonomy for Doorlot.

use doorlot_state::StorageError;

/// Errors produced by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("range holds {available} slots but {requested} participants were selected")]
    RangeInsufficient { requested: usize, available: u64 },

    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("participant selected more than once: {0}")]
    DuplicateParticipant(String),
}

/// Doorlot domain errors.
#[derive(Debug, thiserror::Error)]
pub enum DoorlotError {
    #[error("assignment failed: {0}")]
    Assign(#[from] AssignError),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("stored data is corrupt: {0}")]
    CorruptData(String),

    #[error("name must not be empty")]
    InvalidName,

    #[error("username and password must not be empty")]
    InvalidAccount,

    #[error("user already exists: {0}")]
    UserExists(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("invalid credentials for user: {0}")]
    InvalidCredentials(String),

    #[error("credential hashing failed: {0}")]
    CredentialHash(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for DoorlotError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Corrupt { .. } => DoorlotError::CorruptData(err.to_string()),
            other => DoorlotError::StorageUnavailable(other.to_string()),
        }
    }
}

/// Result type for Doorlot domain operations.
pub type Result<T> = std::result::Result<T, DoorlotError>;
