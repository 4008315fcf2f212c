use thiserror::Error;
use vbind_value::ValueTypeError;

/// Errors that can occur while building or reading manifests
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManifestError {
    #[error("Unknown argument type '{0}'")]
    UnknownArgumentType(String),

    #[error("Default value of argument '{name}' is {actual}, but the declared type is {declared}")]
    DefaultTypeMismatch {
        name: String,
        declared: &'static str,
        actual: &'static str,
    },

    #[error("Manifest field '{field}' is missing or invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Container '{0}' is not declared in this component")]
    UnknownContainer(String),

    #[error("Argument '{name}' is missing when calling '{process}'")]
    ArgumentMissing { process: String, name: String },

    #[error("Value error: {0}")]
    Value(#[from] ValueTypeError),
}
