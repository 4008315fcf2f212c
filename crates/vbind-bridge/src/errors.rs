use thiserror::Error;
use vbind_manifest::ManifestError;
use vbind_value::ValueTypeError;

/// Errors that can occur while extracting, binding or writing process values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("Value not found: argument '{name}' is absent or is not {expected}")]
    ArgumentNotFound { name: String, expected: &'static str },

    #[error("Value conversion failed: {0}")]
    Conversion(String),

    #[error("Value type error: {0}")]
    Type(#[from] ValueTypeError),

    #[error("Function takes {expected} arguments but the manifest declares {declared}")]
    ArityMismatch { expected: usize, declared: usize },

    #[error("Output capsule rejected the write: {0}")]
    Sink(String),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

impl BridgeError {
    pub(crate) fn not_found(name: &str, expected: &'static str) -> Self {
        BridgeError::ArgumentNotFound {
            name: name.to_string(),
            expected,
        }
    }
}
