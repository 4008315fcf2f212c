//! Compact JSON-like rendering used for logs and diagnostics.
//!
//! The output is not guaranteed to parse back: null renders as `{}`, byte
//! arrays as `["bytes"]` and doubles with six fixed decimals.

use crate::value::Value;
use std::fmt::{self, Write};

/// Render a value the same way `Display` does
pub fn str_value(value: &Value) -> String {
    value.to_string()
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            other => f.write_char(other)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("{}"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{:.6}", d),
            Value::String(s) => write_quoted(f, s),
            Value::Bytes(_) => f.write_str("[\"bytes\"]"),
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{}", item)?;
                }
                f.write_char('}')
            }
            Value::Error(message) => {
                f.write_str("{\"Error\": ")?;
                write_quoted(f, &format!("Value is error('{}').", message))?;
                f.write_char('}')
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_containers() {
        assert_eq!(str_value(&Value::object()), "{}");
        assert_eq!(str_value(&Value::list()), "[]");
        assert_eq!(str_value(&Value::Null), "{}");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-3_i64).to_string(), "-3");
        assert_eq!(Value::from(1.5_f64).to_string(), "1.500000");
        assert_eq!(Value::from("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(Value::bytes(vec![0_u8, 1]).to_string(), r#"["bytes"]"#);
    }

    #[test]
    fn test_nested_rendering_keeps_insertion_order() {
        let mut v = Value::object();
        v.set("z", 1_i64);
        v.set("a", vec![Value::from("x"), Value::Null]);
        assert_eq!(v.to_string(), r#"{"z":1,"a":["x",{}]}"#);
    }

    #[test]
    fn test_error_rendering_contains_message() {
        let rendered = Value::error("m").to_string();
        assert_eq!(rendered, r#"{"Error": "Value is error('m')."}"#);
    }
}
