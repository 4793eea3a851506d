//! Error types shared across the grievance engine.

/// Error kinds surfaced by every component contract.
///
/// Each contract fails fast with the most specific applicable kind; nothing
/// catches and downgrades an error from another component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrievanceError {
    /// No authenticated principal
    #[error("not authenticated")]
    Unauthorized,

    /// Principal authenticated but lacks rights for this record or action
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Empty required text or malformed enum value
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown lifecycle state requested
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Referenced grievance or comment does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// External store call failed; never retried by this engine
    #[error("record store failure: {0}")]
    UpstreamFailure(String),
}

pub type Result<T> = std::result::Result<T, GrievanceError>;
