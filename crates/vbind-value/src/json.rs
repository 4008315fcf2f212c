//! Conversions between [`Value`] and `serde_json::Value`.

use crate::errors::ValueTypeError;
use crate::value::{Object, Value};
use serde_json::{Map, Number, Value as Json};

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            // u64 beyond i64::MAX widens to a double
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Double))
                .unwrap_or(Value::Null),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => items.iter().map(Value::from).collect(),
            Json::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::from(&json)
    }
}

impl Value {
    /// Parse JSON text into a value
    pub fn from_json_str(text: &str) -> Result<Value, ValueTypeError> {
        let json: Json =
            serde_json::from_str(text).map_err(|e| ValueTypeError::Json(e.to_string()))?;
        Ok(Value::from(json))
    }

    /// Convert to JSON. Error values and non-finite doubles have no JSON form.
    pub fn to_json(&self) -> Result<Json, ValueTypeError> {
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::Number(Number::from(*i)),
            Value::Double(d) => Number::from_f64(*d)
                .map(Json::Number)
                .ok_or_else(|| ValueTypeError::Json(format!("non-finite double {}", d)))?,
            Value::String(s) => Json::String(s.clone()),
            Value::Bytes(data) => Json::Array(data.iter().map(|b| Json::from(*b)).collect()),
            Value::List(items) => Json::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key.clone(), item.to_json()?);
                }
                Json::Object(out)
            }
            Value::Error(message) => {
                return Err(ValueTypeError::Json(format!("error value '{}'", message)))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let v = Value::from(json!({"b": 1, "a": [true, 2.5, "s"], "n": null}));
        assert_eq!(v.to_string(), r#"{"b":1,"a":[true,2.500000,"s"],"n":{}}"#);
    }

    #[test]
    fn test_large_unsigned_widens_to_double() {
        let v = Value::from(json!(u64::MAX));
        assert!(v.is_double());
    }

    #[test]
    fn test_to_json_rejects_error_values() {
        let mut v = Value::object();
        v.set("bad", Value::error("nope"));
        assert!(matches!(v.to_json(), Err(ValueTypeError::Json(m)) if m.contains("nope")));
        assert!(Value::from(f64::NAN).to_json().is_err());
    }

    #[test]
    fn test_to_json_bytes_as_numbers() {
        let json = Value::bytes(vec![7_u8, 8]).to_json();
        assert!(json.is_ok_and(|j| j == json!([7, 8])));
    }

    #[test]
    fn test_from_json_str_reports_parse_errors() {
        let parsed = Value::from_json_str("{\"a\": 1}");
        assert!(parsed.is_ok_and(|v| v.get("a") == Some(&Value::Int(1))));
        assert!(matches!(
            Value::from_json_str("{oops"),
            Err(ValueTypeError::Json(_))
        ));
    }
}
