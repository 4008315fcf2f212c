//! In-memory gateway backed by `serde_json`.
//!
//! `CapsuleMap` is the named argument collection and `OutputCapsule` the
//! result slot. The CLI and the tests drive bound processes through these.

use crate::errors::BridgeError;
use crate::gateway::{ArgumentSource, HostKind, HostValue, ResultSink, ValueSink};
use serde_json::{Map, Number, Value as Json};
use vbind_value::Value;

// =============================================================================
// HOST VALUE
// =============================================================================

impl HostValue for Json {
    fn kind(&self) -> HostKind {
        match self {
            Json::Null => HostKind::Null,
            Json::Bool(_) => HostKind::Bool,
            Json::Number(n) if n.is_f64() => HostKind::Float,
            Json::Number(_) => HostKind::Int,
            Json::String(_) => HostKind::String,
            Json::Array(_) => HostKind::Array,
            Json::Object(_) => HostKind::Object,
        }
    }

    fn get_int(&self) -> Option<i64> {
        self.as_i64()
    }

    fn get_uint(&self) -> Option<u64> {
        self.as_u64()
    }

    fn get_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    /// Any number reads as a float
    fn get_float(&self) -> Option<f64> {
        self.as_f64()
    }

    fn get_string(&self) -> Option<&str> {
        self.as_str()
    }

    fn array_for_each(
        &self,
        f: &mut dyn FnMut(&dyn HostValue) -> Result<(), BridgeError>,
    ) -> Result<(), BridgeError> {
        if let Json::Array(items) = self {
            for item in items {
                f(item)?;
            }
        }
        Ok(())
    }

    fn object_for_each(
        &self,
        f: &mut dyn FnMut(&str, &dyn HostValue) -> Result<(), BridgeError>,
    ) -> Result<(), BridgeError> {
        if let Json::Object(map) = self {
            for (key, item) in map {
                f(key, item)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// VALUE SINK
// =============================================================================

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn float_json(value: f64) -> Result<Json, BridgeError> {
    Number::from_f64(value)
        .map(Json::Number)
        .ok_or_else(|| BridgeError::Sink(format!("non-finite float {}", value)))
}

fn object_put<'a>(
    sink: &'a mut Json,
    key: &str,
    value: Json,
) -> Result<&'a mut Json, BridgeError> {
    match sink {
        Json::Object(map) => {
            let slot = map.entry(key).or_insert(Json::Null);
            *slot = value;
            Ok(slot)
        }
        other => Err(BridgeError::Sink(format!(
            "cannot set '{}' on a {} sink",
            key,
            json_kind(other)
        ))),
    }
}

fn array_put(sink: &mut Json, value: Json) -> Result<&mut Json, BridgeError> {
    match sink {
        Json::Array(items) => {
            items.push(value);
            items
                .last_mut()
                .ok_or_else(|| BridgeError::Sink("array push was lost".to_string()))
        }
        other => Err(BridgeError::Sink(format!(
            "cannot push onto a {} sink",
            json_kind(other)
        ))),
    }
}

impl ValueSink for Json {
    fn object_set_bool(&mut self, key: &str, value: bool) -> Result<(), BridgeError> {
        object_put(self, key, Json::Bool(value)).map(|_| ())
    }

    fn object_set_int(&mut self, key: &str, value: i64) -> Result<(), BridgeError> {
        object_put(self, key, Json::from(value)).map(|_| ())
    }

    fn object_set_float(&mut self, key: &str, value: f64) -> Result<(), BridgeError> {
        object_put(self, key, float_json(value)?).map(|_| ())
    }

    fn object_set_string(&mut self, key: &str, value: &str) -> Result<(), BridgeError> {
        object_put(self, key, Json::from(value)).map(|_| ())
    }

    fn object_set_empty_object(&mut self, key: &str) -> Result<&mut dyn ValueSink, BridgeError> {
        object_put(self, key, Json::Object(Map::new())).map(|slot| slot as &mut dyn ValueSink)
    }

    fn object_set_empty_array(&mut self, key: &str) -> Result<&mut dyn ValueSink, BridgeError> {
        object_put(self, key, Json::Array(Vec::new())).map(|slot| slot as &mut dyn ValueSink)
    }

    fn array_push_bool(&mut self, value: bool) -> Result<(), BridgeError> {
        array_put(self, Json::Bool(value)).map(|_| ())
    }

    fn array_push_int(&mut self, value: i64) -> Result<(), BridgeError> {
        array_put(self, Json::from(value)).map(|_| ())
    }

    fn array_push_float(&mut self, value: f64) -> Result<(), BridgeError> {
        array_put(self, float_json(value)?).map(|_| ())
    }

    fn array_push_string(&mut self, value: &str) -> Result<(), BridgeError> {
        array_put(self, Json::from(value)).map(|_| ())
    }

    fn array_push_empty_object(&mut self) -> Result<&mut dyn ValueSink, BridgeError> {
        array_put(self, Json::Object(Map::new())).map(|slot| slot as &mut dyn ValueSink)
    }

    fn array_push_empty_array(&mut self) -> Result<&mut dyn ValueSink, BridgeError> {
        array_put(self, Json::Array(Vec::new())).map(|slot| slot as &mut dyn ValueSink)
    }
}

// =============================================================================
// CAPSULE MAP
// =============================================================================

/// Named argument collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapsuleMap {
    entries: Map<String, Json>,
}

impl CapsuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Json>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Json>) -> Self {
        self.insert(name, value);
        self
    }

    /// Build from an object value. `Null` gives an empty map.
    pub fn from_value(value: &Value) -> Result<Self, BridgeError> {
        match value.to_json()? {
            Json::Object(entries) => Ok(CapsuleMap { entries }),
            Json::Null => Ok(CapsuleMap::new()),
            other => Err(BridgeError::Conversion(format!(
                "argument collection must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, BridgeError> {
        let value = Value::from_json_str(text)?;
        Self::from_value(&value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl ArgumentSource for CapsuleMap {
    fn capsule(&self, name: &str) -> Option<&dyn HostValue> {
        self.entries.get(name).map(|v| v as &dyn HostValue)
    }
}

// =============================================================================
// OUTPUT CAPSULE
// =============================================================================

/// Result slot; empty until a process writes to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputCapsule {
    value: Option<Json>,
}

impl OutputCapsule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn as_json(&self) -> Option<&Json> {
        self.value.as_ref()
    }

    /// The written result as a [`Value`]; `Null` if nothing was written
    pub fn to_value(&self) -> Value {
        self.value.as_ref().map(Value::from).unwrap_or_default()
    }
}

impl ResultSink for OutputCapsule {
    fn set_int(&mut self, value: i64) -> Result<(), BridgeError> {
        self.value = Some(Json::from(value));
        Ok(())
    }

    fn set_float(&mut self, value: f64) -> Result<(), BridgeError> {
        self.value = Some(float_json(value)?);
        Ok(())
    }

    fn set_bool(&mut self, value: bool) -> Result<(), BridgeError> {
        self.value = Some(Json::Bool(value));
        Ok(())
    }

    fn set_string(&mut self, value: &str) -> Result<(), BridgeError> {
        self.value = Some(Json::from(value));
        Ok(())
    }

    fn set_empty_object(&mut self) -> Result<&mut dyn ValueSink, BridgeError> {
        Ok(self.value.insert(Json::Object(Map::new())) as &mut dyn ValueSink)
    }

    fn set_empty_array(&mut self) -> Result<&mut dyn ValueSink, BridgeError> {
        Ok(self.value.insert(Json::Array(Vec::new())) as &mut dyn ValueSink)
    }
}
