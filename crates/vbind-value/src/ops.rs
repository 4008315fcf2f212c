//! Structural operations over whole value trees: iteration, merge, lift and
//! pattern replacement.

use crate::errors::ValueTypeError;
use crate::value::Value;
use regex::Regex;

impl Value {
    /// Visit list elements in order; no-op for other kinds
    pub fn list_for_each<F: FnMut(&Value)>(&self, mut f: F) {
        if let Value::List(items) = self {
            for item in items {
                f(item);
            }
        }
    }

    pub fn list_for_each_mut<F: FnMut(&mut Value)>(&mut self, mut f: F) {
        if let Value::List(items) = self {
            for item in items {
                f(item);
            }
        }
    }

    /// Visit object members in insertion order; no-op for other kinds
    pub fn object_for_each<F: FnMut(&str, &Value)>(&self, mut f: F) {
        if let Value::Object(map) = self {
            for (key, item) in map {
                f(key, item);
            }
        }
    }

    pub fn object_for_each_mut<F: FnMut(&str, &mut Value)>(&mut self, mut f: F) {
        if let Value::Object(map) = self {
            for (key, item) in map.iter_mut() {
                f(key, item);
            }
        }
    }

    pub fn list_map<T, F: FnMut(&Value) -> T>(&self, f: F) -> Vec<T> {
        match self {
            Value::List(items) => items.iter().map(f).collect(),
            _ => Vec::new(),
        }
    }

    pub fn object_map<T, F: FnMut(&str, &Value) -> T>(&self, mut f: F) -> Vec<T> {
        match self {
            Value::Object(map) => map.iter().map(|(k, v)| f(k, v)).collect(),
            _ => Vec::new(),
        }
    }
}

/// Merge `b` into `a`.
///
/// Lists: every element of `b`, then the elements of `a` not structurally
/// equal to any element of `b`. Objects: key-wise, `b` wins, recursing when
/// both sides hold containers. Any other pairing yields `b`.
pub fn merge(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::List(left), Value::List(right)) => {
            let mut merged = right.clone();
            merged.extend(left.iter().filter(|item| !right.contains(item)).cloned());
            Value::List(merged)
        }
        (Value::Object(left), Value::Object(right)) => {
            let mut merged = left.clone();
            for (key, incoming) in right {
                let next = match merged.get(key) {
                    Some(existing) => merge(existing, incoming),
                    None => incoming.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        _ => b.clone(),
    }
}

/// Flatten one level of nesting in a list of lists.
///
/// Only a list whose first element is itself a list is flattened; anything
/// else comes back unchanged. Non-list elements after the first contribute
/// nothing to the flattened result.
pub fn lift(value: &Value) -> Value {
    match value {
        Value::List(items) if items.first().is_some_and(Value::is_list) => Value::List(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::List(inner) => Some(inner.iter().cloned()),
                    _ => None,
                })
                .flatten()
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Apply a regex substitution to every string leaf of `value`
pub fn replace_all(
    value: &Value,
    pattern: &str,
    replacement: &str,
) -> Result<Value, ValueTypeError> {
    let regex = Regex::new(pattern).map_err(|e| ValueTypeError::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(replace_with(value, &regex, replacement))
}

fn replace_with(value: &Value, regex: &Regex, replacement: &str) -> Value {
    match value {
        Value::String(s) => Value::String(regex.replace_all(s, replacement).into_owned()),
        Value::List(items) => items
            .iter()
            .map(|item| replace_with(item, regex, replacement))
            .collect(),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), replace_with(v, regex, replacement)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pairs: Vec<(&str, Value)>) -> Value {
        Value::from(pairs)
    }

    #[test]
    fn test_merge_lists_second_operand_first() {
        let a = Value::from(vec!["b", "c"]);
        let b = Value::from(vec!["a", "b"]);
        assert_eq!(merge(&a, &b), Value::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_merge_objects_second_wins() {
        let a = obj(vec![("x", 1_i64.into()), ("y", 2_i64.into())]);
        let b = obj(vec![("y", 3_i64.into()), ("z", 4_i64.into())]);
        let expected = obj(vec![
            ("x", 1_i64.into()),
            ("y", 3_i64.into()),
            ("z", 4_i64.into()),
        ]);
        assert_eq!(merge(&a, &b), expected);
    }

    #[test]
    fn test_merge_recurses_into_nested_objects() {
        let a = obj(vec![("cfg", obj(vec![("rate", 1_i64.into()), ("on", true.into())]))]);
        let b = obj(vec![("cfg", obj(vec![("rate", 5_i64.into())]))]);
        let merged = merge(&a, &b);
        assert_eq!(merged.at_path("cfg.rate").as_int(), Ok(5));
        assert_eq!(merged.at_path("cfg.on").as_bool(), Ok(true));
    }

    #[test]
    fn test_merge_mismatched_kinds_returns_second() {
        let a = Value::from(vec![1_i64]);
        let b = Value::from("replacement");
        assert_eq!(merge(&a, &b), b);
    }

    #[test]
    fn test_lift_flattens_one_level() {
        let nested = Value::from(vec![
            Value::from(vec![1_i64, 2]),
            Value::from(3_i64),
            Value::from(vec![Value::from(vec![4_i64])]),
        ]);
        let lifted = lift(&nested);
        assert_eq!(lifted.len(), 3);
        assert!(lifted.at_index(2).is_list());
    }

    #[test]
    fn test_lift_needs_leading_list() {
        let scalar_first = Value::from(vec![
            Value::from(1_i64),
            Value::from(vec![2_i64, 3]),
        ]);
        assert_eq!(lift(&scalar_first), scalar_first);
        assert_eq!(lift(&Value::list()), Value::list());
        assert_eq!(lift(&Value::from("x")), Value::from("x"));
    }

    #[test]
    fn test_replace_all_touches_only_strings() {
        let v = obj(vec![
            ("path", "/tmp/a/b".into()),
            ("n", 7_i64.into()),
            ("list", Value::from(vec!["/tmp/x"])),
        ]);
        let replaced = replace_all(&v, "^/tmp", "/var");
        assert!(replaced.is_ok());
        let replaced = replaced.unwrap_or_default();
        assert_eq!(replaced.at("path").as_str(), Ok("/var/a/b"));
        assert_eq!(replaced.at("n").as_int(), Ok(7));
        assert_eq!(replaced.at_path("list.0").as_str(), Ok("/var/x"));
    }

    #[test]
    fn test_replace_all_rejects_bad_pattern() {
        let result = replace_all(&Value::from("x"), "(", "y");
        assert!(matches!(result, Err(ValueTypeError::Pattern { .. })));
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let mut v = obj(vec![("a", 1_i64.into()), ("b", 2_i64.into())]);
        let mut seen = Vec::new();
        v.object_for_each(|k, item| seen.push(format!("{}={}", k, item)));
        assert_eq!(seen, vec!["a=1", "b=2"]);

        v.object_for_each_mut(|_, item| *item = Value::from(item.int_or(0) * 10));
        assert_eq!(v.at("b").as_int(), Ok(20));

        let mut list = Value::from(vec![1_i64, 2, 3]);
        list.list_for_each_mut(|item| *item = Value::from(item.int_or(0) + 1));
        let mut total = 0;
        list.list_for_each(|item| total += item.int_or(0));
        assert_eq!(total, 9);
        assert!(Value::from(1_i64).list_map(|_| 0).is_empty());
    }
}
