//! Error types for building mergers and option adapters.

/// Errors raised while preparing a merge. The merge itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("invalid unescape pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("no unescape patterns configured")]
    NoPatterns,

    #[error("options record must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    #[error("failed to serialize options record: {0}")]
    Serialize(String),

    #[error("unknown element kind `{0}`")]
    UnknownKind(String),
}
