//! Keyed, indexed and dotted-path access.
//!
//! Read access returns `Cow<Value>`: borrowed on success, an owned
//! `Value::Error` on failure. Nothing here panics.

use crate::errors::ValueTypeError;
use crate::value::{Value, ValueKind};
use std::borrow::Cow;

impl Value {
    /// Look up `key` in an object without producing a diagnostic
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(items) => items.get(index),
            _ => None,
        }
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::List(items) => items.get_mut(index),
            _ => None,
        }
    }

    /// Replace list element `index` in place; the list keeps its length
    pub fn set_index(
        &mut self,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<(), ValueTypeError> {
        match self {
            Value::List(items) => {
                let size = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(ValueTypeError::IndexOutOfRange { index, size })?;
                *slot = value.into();
                Ok(())
            }
            other => Err(other.mismatch(ValueKind::List)),
        }
    }

    /// Object member `key`, or an Error value describing why it is unavailable
    pub fn at(&self, key: &str) -> Cow<'_, Value> {
        match self {
            Value::Object(map) => match map.get(key) {
                Some(found) => Cow::Borrowed(found),
                None => Cow::Owned(Value::error(format!(
                    "Value::at(\"{key}\") failed. But key (\"{key}\") is not included. Value is {}.",
                    self
                ))),
            },
            Value::Error(message) => Cow::Owned(Value::error(format!(
                "Value::at(\"{key}\") failed. Value is error type. ({message})"
            ))),
            other => Cow::Owned(Value::error(format!(
                "Value::at(\"{key}\") failed. Value is not object type. But value type is {}",
                other.type_str()
            ))),
        }
    }

    /// List element `index`, or an Error value describing why it is unavailable
    pub fn at_index(&self, index: usize) -> Cow<'_, Value> {
        match self {
            Value::List(items) => match items.get(index) {
                Some(found) => Cow::Borrowed(found),
                None => Cow::Owned(Value::error(format!(
                    "Value::at({index}) failed. Index out of range (size={}). Value is {}.",
                    items.len(),
                    self
                ))),
            },
            Value::Error(message) => Cow::Owned(Value::error(format!(
                "Value::at({index}) failed. Value is error type. ({message})"
            ))),
            other => Cow::Owned(Value::error(format!(
                "Value::at({index}) failed. Value is not list type. But value type is {}",
                other.type_str()
            ))),
        }
    }

    /// Dotted-path traversal: `"a.b.0"` walks object keys and list indices.
    ///
    /// The first failing segment ends the walk and its diagnostic is returned.
    pub fn at_path(&self, path: &str) -> Cow<'_, Value> {
        let mut current = self;
        for segment in path.split('.') {
            let next = match (current, segment.parse::<usize>()) {
                (Value::List(_), Ok(index)) => current.at_index(index),
                _ => current.at(segment),
            };
            match next {
                Cow::Borrowed(found) => current = found,
                failed @ Cow::Owned(_) => return failed,
            }
        }
        Cow::Borrowed(current)
    }

    /// Mutable slot at a dotted path, creating object members along the way.
    ///
    /// Numeric segments address existing list elements, as in [`Value::at_path`].
    /// `Null` segments are coerced to objects; any other kind, or an index past
    /// the end of a list, fails and leaves `self` untouched.
    pub fn entry(&mut self, path: &str) -> Result<&mut Value, ValueTypeError> {
        let mut current = self;
        for segment in path.split('.') {
            if current.is_null() {
                *current = Value::object();
            }
            current = match (current, segment.parse::<usize>()) {
                (Value::List(items), Ok(index)) => {
                    let size = items.len();
                    items
                        .get_mut(index)
                        .ok_or(ValueTypeError::IndexOutOfRange { index, size })?
                }
                (Value::Object(map), _) => map.entry(segment.to_string()).or_default(),
                (other, _) => return Err(other.mismatch(ValueKind::Object)),
            };
        }
        Ok(current)
    }

    /// Assign at a dotted path.
    ///
    /// Numeric segments assign into existing list elements. A list is never
    /// replaced: an out-of-range index or a key segment on a list drops the
    /// assignment. A segment that holds a scalar is turned into an Error value
    /// and the assignment is dropped. Use [`Value::entry`] to observe failures.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut current = self;
        for segment in path.split('.') {
            if current.is_null() {
                *current = Value::object();
            }
            current = match (current, segment.parse::<usize>()) {
                (Value::List(items), Ok(index)) => match items.get_mut(index) {
                    Some(slot) => slot,
                    None => return,
                },
                (Value::Object(map), _) => map.entry(segment.to_string()).or_default(),
                (Value::List(_), Err(_)) => return,
                (other, _) => {
                    *other = Value::error(format!(
                        "Value::set(\"{path}\") failed. Value is not object type. But value type is {}",
                        other.type_str()
                    ));
                    return;
                }
            };
        }
        *current = value.into();
    }

    /// Append to a list, coercing `Null` to an empty list first
    pub fn push(&mut self, value: impl Into<Value>) {
        if self.is_null() {
            *self = Value::list();
        }
        match self {
            Value::List(items) => items.push(value.into()),
            other => {
                *other = Value::error(format!(
                    "Value::push() failed. Value is not list type. But value type is {}",
                    other.type_str()
                ));
            }
        }
    }

    /// Insert into a list at `index`, coercing `Null` to an empty list first
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        if self.is_null() {
            *self = Value::list();
        }
        match self {
            Value::List(items) if index <= items.len() => items.insert(index, value.into()),
            Value::List(items) => {
                let size = items.len();
                *self = Value::error(format!(
                    "Value::insert({index}) failed. Index out of range (size={size})."
                ));
            }
            other => {
                *other = Value::error(format!(
                    "Value::insert({index}) failed. Value is not list type. But value type is {}",
                    other.type_str()
                ));
            }
        }
    }

    /// Remove an object member, preserving the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.shift_remove(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut v = Value::object();
        v.set("name", "pump");
        v.set("spec.rate", 12_i64);
        v.set("spec.tags", vec!["a", "b"]);
        v
    }

    #[test]
    fn test_at_existing_key_borrows() {
        let v = sample();
        assert!(matches!(v.at("name"), Cow::Borrowed(Value::String(s)) if s == "pump"));
    }

    #[test]
    fn test_at_missing_key_is_error_value() {
        let v = sample();
        let missing = v.at("nope");
        assert!(missing.is_error());
        assert!(
            missing.error_message().is_some_and(|m| m.contains("\"nope\"")),
            "diagnostic should name the key: {:?}",
            missing
        );
    }

    #[test]
    fn test_at_on_non_object_is_error_value() {
        let v = Value::from(3_i64);
        let result = v.at("key");
        assert!(result
            .error_message()
            .is_some_and(|m| m.contains("key") && m.contains("int")));
    }

    #[test]
    fn test_at_index_out_of_range() {
        let v = Value::from(vec![1_i64]);
        assert_eq!(v.at_index(0).as_int(), Ok(1));
        assert_eq!(v.get_index(0), Some(&Value::Int(1)));
        assert_eq!(v.get_index(4), None);
        assert!(v
            .at_index(4)
            .error_message()
            .is_some_and(|m| m.contains("size=1")));
    }

    #[test]
    fn test_at_path_walks_nested_values() {
        let v = sample();
        assert_eq!(v.at_path("spec.rate").as_int(), Ok(12));
        assert_eq!(v.at_path("spec.tags.1").as_str(), Ok("b"));
    }

    #[test]
    fn test_at_path_degrades_to_error() {
        let v = sample();
        let result = v.at_path("spec.rate.deeper.still");
        assert!(result.is_error());
        assert!(result.error_message().is_some_and(|m| m.contains("deeper")));
    }

    #[test]
    fn test_independent_failures_keep_their_messages() {
        let v = sample();
        let first = v.at("first");
        let second = v.at("second");
        assert!(first.error_message().is_some_and(|m| m.contains("first")));
        assert!(second.error_message().is_some_and(|m| m.contains("second")));
    }

    #[test]
    fn test_set_coerces_null_to_object() {
        let mut v = Value::Null;
        v.set("a.b", true);
        assert_eq!(v.at_path("a.b").as_bool(), Ok(true));
    }

    #[test]
    fn test_set_through_scalar_turns_segment_into_error() {
        let mut v = sample();
        v.set("name.first", "x");
        assert!(v.at("name").is_error());
        assert_eq!(v.at_path("spec.rate").as_int(), Ok(12));
    }

    #[test]
    fn test_set_assigns_into_list_elements() {
        let mut v = sample();
        v.set("spec.tags.1", "z");
        assert!(v.at_path("spec.tags").is_list());
        assert_eq!(v.at_path("spec.tags.0").as_str(), Ok("a"));
        assert_eq!(v.at_path("spec.tags.1").as_str(), Ok("z"));

        v.set("spec.tags.5", "late");
        v.set("spec.tags.first", "x");
        assert_eq!(*v.at_path("spec.tags"), Value::from(vec!["a", "z"]));
    }

    #[test]
    fn test_entry_reports_index_out_of_range() {
        let mut v = sample();
        assert!(matches!(
            v.entry("spec.tags.2"),
            Err(ValueTypeError::IndexOutOfRange { index: 2, size: 2 })
        ));
        if let Ok(slot) = v.entry("spec.tags.0") {
            *slot = Value::from("first");
        }
        assert_eq!(v.at_path("spec.tags.0").as_str(), Ok("first"));
        assert_eq!(v.at_path("spec.tags").len(), 2);
    }

    #[test]
    fn test_set_index_and_get_index_mut() {
        let mut v = Value::from(vec![1_i64, 2, 3]);
        assert!(v.set_index(1, 20_i64).is_ok());
        if let Some(slot) = v.get_index_mut(2) {
            *slot = Value::from(30_i64);
        }
        assert_eq!(v, Value::from(vec![1_i64, 20, 30]));

        assert!(matches!(
            v.set_index(3, 4_i64),
            Err(ValueTypeError::IndexOutOfRange { index: 3, size: 3 })
        ));
        assert_eq!(v.len(), 3);
        assert!(v.get_index_mut(3).is_none());

        let mut text = Value::from("text");
        assert!(text.set_index(0, 1_i64).is_err());
        assert_eq!(text, Value::from("text"));
    }

    #[test]
    fn test_entry_copy_on_first_write() {
        let mut v = Value::Null;
        if let Ok(slot) = v.entry("counter") {
            *slot = Value::from(1_i64);
        }
        if let Ok(slot) = v.entry("counter") {
            *slot = Value::from(slot.int_or(0) + 1);
        }
        assert_eq!(v.at("counter").as_int(), Ok(2));
        assert!(Value::from(1_i64).entry("x").is_err());
    }

    #[test]
    fn test_push_and_insert() {
        let mut v = Value::Null;
        v.push(1_i64);
        v.push(3_i64);
        v.insert(1, 2_i64);
        assert_eq!(v, Value::from(vec![1_i64, 2, 3]));

        v.insert(10, 4_i64);
        assert!(v.is_error());

        let mut s = Value::from("text");
        s.push(1_i64);
        assert!(s.error_message().is_some_and(|m| m.contains("string")));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut v: Value = vec![
            ("a", Value::from(1_i64)),
            ("b", Value::from(2_i64)),
            ("c", Value::from(3_i64)),
        ]
        .into();
        assert_eq!(v.remove("b"), Some(Value::from(2_i64)));
        let keys: Vec<String> = v.object_map(|k, _| k.to_string());
        assert_eq!(keys, vec!["a", "c"]);
    }
}
