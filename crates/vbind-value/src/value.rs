//! The `Value` variant, its kind tag, constructors and typed accessors.

use crate::errors::ValueTypeError;
use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered string-keyed map used by [`Value::Object`]
pub type Object = IndexMap<String, Value>;

/// Kind tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    Bytes,
    List,
    Object,
    Error,
}

impl ValueKind {
    /// Type name used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Bytes => "byte",
            ValueKind::List => "list",
            ValueKind::Object => "object",
            ValueKind::Error => "error",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-describing dynamic value
///
/// Container variants own their elements: cloning deep-copies, and
/// [`Value::take`] moves the payload out leaving `Null` behind. Object
/// equality ignores member order.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Object(Object),
    Error(String),
}

impl Value {
    /// Empty list
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// Empty object
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
            Value::Error(_) => ValueKind::Error,
        }
    }

    pub fn type_str(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Build the access fault for reading `self` as `expected`
    pub(crate) fn mismatch(&self, expected: ValueKind) -> ValueTypeError {
        let actual = match self {
            Value::Error(message) => format!("Error({})", message),
            other => other.type_str().to_string(),
        };
        ValueTypeError::Access {
            expected: expected.as_str(),
            actual,
        }
    }

    pub fn as_bool(&self) -> Result<bool, ValueTypeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, ValueTypeError> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    pub fn as_double(&self) -> Result<f64, ValueTypeError> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(other.mismatch(ValueKind::Double)),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueTypeError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], ValueTypeError> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.mismatch(ValueKind::Bytes)),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], ValueTypeError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut Vec<Value>, ValueTypeError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    pub fn as_object(&self) -> Result<&Object, ValueTypeError> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, ValueTypeError> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    /// Message carried by an `Error` value
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Error(message) => Some(message),
            _ => None,
        }
    }

    // ===== Tolerant accessors =====
    //
    // These never fail: a kind mismatch or an Error value yields the default.

    pub fn bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    pub fn int_or(&self, default: i64) -> i64 {
        self.as_int().unwrap_or(default)
    }

    /// Like [`Value::as_double`], but integers are widened
    pub fn double_or(&self, default: f64) -> f64 {
        match self {
            Value::Double(d) => *d,
            Value::Int(i) => *i as f64,
            _ => default,
        }
    }

    pub fn string_or(&self, default: &str) -> String {
        self.as_str().unwrap_or(default).to_string()
    }

    /// Element count of a list, object or byte array; zero otherwise
    pub fn len(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::Bytes(data) => data.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the value out, leaving `Null` in its place
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

// ===== Conversions =====

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::List(value.into_iter().map(Value::Int).collect())
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::List(value.into_iter().map(Value::Double).collect())
    }
}

impl From<Vec<bool>> for Value {
    fn from(value: Vec<bool>) -> Self {
        Value::List(value.into_iter().map(Value::Bool).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::List(value.into_iter().map(Value::String).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        value.into_iter().map(Value::from).collect()
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Vec<(&str, Value)>> for Value {
    fn from(pairs: Vec<(&str, Value)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip() {
        assert_eq!(Value::from(true).as_bool(), Ok(true));
        assert_eq!(Value::from(42_i32).as_int(), Ok(42));
        assert_eq!(Value::from(-7_i64).as_int(), Ok(-7));
        assert_eq!(Value::from(2.5_f64).as_double(), Ok(2.5));
        assert_eq!(Value::from(0.5_f32).as_double(), Ok(0.5));
        assert_eq!(Value::from("hello").as_str(), Ok("hello"));
        assert_eq!(Value::bytes(vec![1_u8, 2, 3]).as_bytes(), Ok(&[1_u8, 2, 3][..]));
    }

    #[test]
    fn test_kind_is_exclusive() {
        let v = Value::from(1_i64);
        assert!(v.is_int());
        assert!(!v.is_double() && !v.is_bool() && !v.is_null() && !v.is_error());
        assert_eq!(v.kind(), ValueKind::Int);
        assert_eq!(Value::bytes(Vec::new()).type_str(), "byte");
    }

    #[test]
    fn test_typed_access_mismatch_names_kinds() {
        let err = Value::from("text").as_int();
        assert!(
            err.as_ref()
                .is_err_and(|e| e.to_string().contains("trying int value access. actual string")),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn test_error_value_raises_on_typed_access() {
        let err = Value::error("boom").as_bool();
        assert_eq!(
            err,
            Err(ValueTypeError::Access {
                expected: "bool",
                actual: "Error(boom)".to_string()
            })
        );
    }

    #[test]
    fn test_tolerant_accessors_return_defaults() {
        assert_eq!(Value::from("x").int_or(5), 5);
        assert_eq!(Value::error("bad").string_or("fallback"), "fallback");
        assert!(Value::Null.bool_or(true));
        assert!((Value::from(3_i64).double_or(0.0) - 3.0).abs() < f64::EPSILON);
        assert!((Value::from("3").double_or(1.5) - 1.5).abs() < f64::EPSILON);
        assert_eq!(Value::from("kept").string_or("fallback"), "kept");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Value::from(vec![("a", Value::from(vec![1_i64, 2]))]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        if let Ok(map) = copy.as_object_mut() {
            map.insert("b".to_string(), Value::from(true));
        }
        assert_ne!(copy, original);
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn test_take_leaves_null() {
        let mut source = Value::from(vec!["x", "y"]);
        let moved = source.take();
        assert!(source.is_null());
        assert_eq!(moved.len(), 2);
    }

    #[test]
    fn test_equality_rules() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::from(1_i64), Value::from(1.0_f64));
        assert_eq!(Value::error("m"), Value::error("m"));
        assert_ne!(Value::error("m"), Value::error("n"));

        let ab: Value = vec![("a", Value::from(1_i64)), ("b", Value::from(2_i64))].into();
        let ba: Value = vec![("b", Value::from(2_i64)), ("a", Value::from(1_i64))].into();
        assert_eq!(ab, ba, "object equality should ignore key order");

        let l1 = Value::from(vec![1_i64, 2]);
        let l2 = Value::from(vec![2_i64, 1]);
        assert_ne!(l1, l2, "list equality is ordered");
    }

    #[test]
    fn test_collect_builds_containers() {
        let list: Value = (0..3_i64).map(Value::from).collect();
        assert_eq!(list.as_list().map(<[Value]>::len), Ok(3));

        let obj: Value = [("k", Value::from("v"))].into_iter().collect();
        assert!(obj.is_object());
        assert_eq!(obj.len(), 1);
    }
}
