//! Argument descriptors shared by process and container manifests

use crate::errors::ManifestError;
use std::fmt;
use vbind_value::{Object, Value};

// =============================================================================
// ARGUMENT TYPE
// =============================================================================

/// Declared type tag of an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ArgumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ArgumentType::Bool => "bool",
            ArgumentType::Int => "int",
            ArgumentType::Float => "float",
            ArgumentType::String => "string",
            ArgumentType::Array => "array",
            ArgumentType::Object => "object",
        }
    }

    /// The argument type a value would be declared as, if any
    pub fn of(value: &Value) -> Option<ArgumentType> {
        match value {
            Value::Bool(_) => Some(ArgumentType::Bool),
            Value::Int(_) => Some(ArgumentType::Int),
            Value::Double(_) => Some(ArgumentType::Float),
            Value::String(_) => Some(ArgumentType::String),
            Value::List(_) => Some(ArgumentType::Array),
            Value::Object(_) => Some(ArgumentType::Object),
            Value::Null | Value::Bytes(_) | Value::Error(_) => None,
        }
    }

    /// Whether `value` is an acceptable default for this type.
    /// Integers are accepted for float arguments.
    pub fn accepts(self, value: &Value) -> bool {
        match ArgumentType::of(value) {
            Some(found) if found == self => true,
            Some(ArgumentType::Int) => self == ArgumentType::Float,
            _ => false,
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ArgumentType {
    type Error = ManifestError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bool" => Ok(ArgumentType::Bool),
            "int" => Ok(ArgumentType::Int),
            "float" => Ok(ArgumentType::Float),
            "string" => Ok(ArgumentType::String),
            "array" => Ok(ArgumentType::Array),
            "object" => Ok(ArgumentType::Object),
            other => Err(ManifestError::UnknownArgumentType(other.to_string())),
        }
    }
}

// =============================================================================
// ARGUMENT MANIFEST
// =============================================================================

/// One declared argument: type tag, name, description and advertised default
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentManifest {
    pub type_name: ArgumentType,
    pub name: String,
    pub description: String,
    pub default: Value,
}

impl ArgumentManifest {
    pub fn new(
        type_name: ArgumentType,
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        ArgumentManifest {
            type_name,
            name: name.into(),
            description: description.into(),
            default: default.into(),
        }
    }

    /// Like [`ArgumentManifest::new`], but rejects a default whose kind does
    /// not match the declared type
    pub fn new_checked(
        type_name: ArgumentType,
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> Result<Self, ManifestError> {
        let argument = Self::new(type_name, name, description, default);
        if !type_name.accepts(&argument.default) {
            return Err(ManifestError::DefaultTypeMismatch {
                name: argument.name,
                declared: type_name.as_str(),
                actual: argument.default.type_str(),
            });
        }
        Ok(argument)
    }

    /// `{name, type, description, default}`
    pub fn into_value(self) -> Value {
        let mut value = Value::object();
        value.set("name", self.name);
        value.set("type", self.type_name.as_str());
        value.set("description", self.description);
        value.set("default", self.default);
        value
    }
}

impl From<ArgumentManifest> for Value {
    fn from(argument: ArgumentManifest) -> Self {
        argument.into_value()
    }
}

impl TryFrom<&Value> for ArgumentManifest {
    type Error = ManifestError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let name = required_str(value, "name")?;
        let type_name = ArgumentType::try_from(required_str(value, "type")?.as_str())?;
        let description = value.at("description").string_or("");
        let default = value.get("default").cloned().unwrap_or_default();
        ArgumentManifest::new_checked(type_name, name, description, default)
    }
}

pub(crate) fn required_str(value: &Value, field: &str) -> Result<String, ManifestError> {
    match value.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ManifestError::InvalidField {
            field: field.to_string(),
            reason: format!("expected string, found {}", other.type_str()),
        }),
        None => Err(ManifestError::InvalidField {
            field: field.to_string(),
            reason: "field is absent".to_string(),
        }),
    }
}

pub(crate) fn arguments_value(arguments: Vec<ArgumentManifest>) -> Value {
    arguments.into_iter().map(ArgumentManifest::into_value).collect()
}

pub(crate) fn arguments_from_value(
    value: &Value,
) -> Result<Vec<ArgumentManifest>, ManifestError> {
    // "args" is accepted as an alias on input; output always uses "arguments"
    let list = match value.get("arguments").or_else(|| value.get("args")) {
        Some(list) => list,
        None => return Ok(Vec::new()),
    };
    let items = list.as_list().map_err(|e| ManifestError::InvalidField {
        field: "arguments".to_string(),
        reason: e.to_string(),
    })?;
    items.iter().map(ArgumentManifest::try_from).collect()
}

// =============================================================================
// BUILDER
// =============================================================================

/// Fluent `add_*_arg` methods for manifests that declare arguments.
///
/// Arguments are appended in call order, which is the binding order.
pub trait WithArguments: Sized {
    fn add_argument(self, argument: ArgumentManifest) -> Self;

    fn add_bool_arg(self, name: &str, description: &str, default: bool) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::Bool, name, description, default))
    }

    fn add_int_arg(self, name: &str, description: &str, default: i64) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::Int, name, description, default))
    }

    fn add_float_arg(self, name: &str, description: &str, default: f64) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::Float, name, description, default))
    }

    fn add_string_arg(self, name: &str, description: &str, default: &str) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::String, name, description, default))
    }

    fn add_array_arg(self, name: &str, description: &str, default: Vec<Value>) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::Array, name, description, default))
    }

    fn add_object_arg(self, name: &str, description: &str, default: Object) -> Self {
        self.add_argument(ArgumentManifest::new(ArgumentType::Object, name, description, default))
    }
}
