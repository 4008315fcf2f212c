//! Single-field extraction from a named argument collection.
//!
//! Each read is all-or-nothing: a field that is absent, or present with a
//! kind that cannot be read as the requested one, is reported as
//! [`BridgeError::ArgumentNotFound`].

use crate::convert::into_value;
use crate::errors::BridgeError;
use crate::gateway::{ArgumentSource, HostKind, HostValue};
use vbind_value::Value;

pub struct ArgumentExtractor<'a> {
    source: &'a dyn ArgumentSource,
}

impl<'a> ArgumentExtractor<'a> {
    pub fn new(source: &'a dyn ArgumentSource) -> Self {
        ArgumentExtractor { source }
    }

    fn capsule(
        &self,
        name: &str,
        expected: &'static str,
    ) -> Result<&'a dyn HostValue, BridgeError> {
        self.source
            .capsule(name)
            .ok_or_else(|| BridgeError::not_found(name, expected))
    }

    pub fn get_int(&self, name: &str) -> Result<i64, BridgeError> {
        self.capsule(name, "int")?
            .get_int()
            .ok_or_else(|| BridgeError::not_found(name, "int"))
    }

    pub fn get_uint(&self, name: &str) -> Result<u64, BridgeError> {
        self.capsule(name, "uint")?
            .get_uint()
            .ok_or_else(|| BridgeError::not_found(name, "uint"))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, BridgeError> {
        self.capsule(name, "bool")?
            .get_bool()
            .ok_or_else(|| BridgeError::not_found(name, "bool"))
    }

    pub fn get_float(&self, name: &str) -> Result<f64, BridgeError> {
        self.capsule(name, "float")?
            .get_float()
            .ok_or_else(|| BridgeError::not_found(name, "float"))
    }

    pub fn get_string(&self, name: &str) -> Result<String, BridgeError> {
        self.capsule(name, "string")?
            .get_string()
            .map(str::to_string)
            .ok_or_else(|| BridgeError::not_found(name, "string"))
    }

    /// Array field as a list of values
    pub fn get_array(&self, name: &str) -> Result<Vec<Value>, BridgeError> {
        let capsule = self.capsule(name, "array")?;
        if capsule.kind() != HostKind::Array {
            return Err(BridgeError::not_found(name, "array"));
        }
        match into_value(capsule)? {
            Value::List(items) => Ok(items),
            other => Err(BridgeError::Conversion(format!(
                "array argument '{}' converted to {}",
                name,
                other.type_str()
            ))),
        }
    }

    /// Object field as an object value
    pub fn get_object(&self, name: &str) -> Result<Value, BridgeError> {
        let capsule = self.capsule(name, "object")?;
        if capsule.kind() != HostKind::Object {
            return Err(BridgeError::not_found(name, "object"));
        }
        into_value(capsule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capsule::CapsuleMap;
    use serde_json::json;

    fn args() -> CapsuleMap {
        CapsuleMap::new()
            .with("count", 3)
            .with("ratio", 0.5)
            .with("flag", true)
            .with("label", "pump")
            .with("items", json!([1, "two"]))
            .with("config", json!({"rate": 2}))
    }

    #[test]
    fn test_scalar_extraction() {
        let map = args();
        let extractor = ArgumentExtractor::new(&map);
        assert_eq!(extractor.get_int("count"), Ok(3));
        assert_eq!(extractor.get_uint("count"), Ok(3));
        assert_eq!(extractor.get_float("ratio"), Ok(0.5));
        assert_eq!(extractor.get_float("count"), Ok(3.0));
        assert_eq!(extractor.get_bool("flag"), Ok(true));
        assert_eq!(extractor.get_string("label"), Ok("pump".to_string()));
    }

    #[test]
    fn test_missing_and_mismatched_are_not_found() {
        let map = args();
        let extractor = ArgumentExtractor::new(&map);
        assert_eq!(
            extractor.get_int("absent"),
            Err(BridgeError::ArgumentNotFound {
                name: "absent".to_string(),
                expected: "int"
            })
        );
        assert!(matches!(
            extractor.get_int("label"),
            Err(BridgeError::ArgumentNotFound { .. })
        ));
        assert!(matches!(
            extractor.get_bool("count"),
            Err(BridgeError::ArgumentNotFound { .. })
        ));
        assert!(matches!(
            extractor.get_array("config"),
            Err(BridgeError::ArgumentNotFound { .. })
        ));
    }

    #[test]
    fn test_negative_is_not_uint() {
        let map = CapsuleMap::new().with("n", -1);
        let extractor = ArgumentExtractor::new(&map);
        assert!(extractor.get_uint("n").is_err());
        assert_eq!(extractor.get_int("n"), Ok(-1));
    }

    #[test]
    fn test_container_extraction() {
        let map = args();
        let extractor = ArgumentExtractor::new(&map);
        let items = extractor.get_array("items");
        assert_eq!(items, Ok(vec![Value::Int(1), Value::from("two")]));
        let config = extractor.get_object("config");
        assert!(config.is_ok_and(|c| c.get("rate") == Some(&Value::Int(2))));
    }
}
