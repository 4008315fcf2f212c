use thiserror::Error;

/// Errors raised when a [`Value`](crate::Value) is read as the wrong kind
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    #[error("Invalid Value Data Access (trying {expected} value access. actual {actual})")]
    Access {
        expected: &'static str,
        actual: String,
    },

    #[error("Index {index} out of range (size={size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Value cannot be represented as JSON: {0}")]
    Json(String),
}
