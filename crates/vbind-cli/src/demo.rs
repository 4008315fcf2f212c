//! Built-in demo component.
//!
//! A handful of processes and one container, bound the same way a plugin
//! would bind its own native functions. `vbind manifest` and `vbind call`
//! operate on this registry.

use vbind_bridge::{BridgeError, ContainerInstance, ProcessRegistry};
use vbind_manifest::{ContainerManifest, ProcessManifest, WithArguments};
use vbind_value::{merge, Object, Value};

pub const COMPONENT_NAME: &str = "vbind_demo";

/// Counter state held by the `counter` container
#[derive(Debug, Default)]
pub struct Counter {
    count: i64,
}

fn add_int(arg1: i64, arg2: i64) -> Option<i64> {
    arg1.checked_add(arg2)
}

fn concat(prefix: String, suffix: String) -> Option<String> {
    Some(prefix + &suffix)
}

fn repeat(text: String, times: u8) -> Option<String> {
    Some(text.repeat(usize::from(times)))
}

/// Multiply every element by `factor`; declines when an element is not numeric
fn scale(values: Vec<Value>, factor: f64) -> Option<Value> {
    values
        .iter()
        .map(|v| match v {
            Value::Int(i) => Some(Value::Double(*i as f64 * factor)),
            Value::Double(d) => Some(Value::Double(d * factor)),
            _ => None,
        })
        .collect::<Option<Vec<Value>>>()
        .map(Value::List)
}

fn mean(values: Vec<Value>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().map(|v| v.double_or(0.0)).sum();
    Some(total / values.len() as f64)
}

fn default_options() -> Object {
    let mut options = Object::new();
    options.insert("rate".to_string(), Value::Int(1));
    options.insert("mode".to_string(), Value::from("fast"));
    options
}

/// Overlay user options on the defaults
fn configure(options: Value) -> Option<Value> {
    Some(merge(&Value::Object(default_options()), &options))
}

fn counter_get(counter: &mut Counter) -> Option<i64> {
    Some(counter.count)
}

fn counter_add(counter: &mut Counter, amount: i64) -> Option<i64> {
    counter.count = counter.count.checked_add(amount)?;
    Some(counter.count)
}

/// Build the demo registry
pub fn registry() -> Result<ProcessRegistry, BridgeError> {
    let mut registry = ProcessRegistry::new(COMPONENT_NAME)
        .description("Demonstration processes for the vbind binding layer");

    registry.register_process(
        ProcessManifest::new("add_int")
            .description("Add two integers; declines on overflow")
            .add_int_arg("arg1", "left operand", 0)
            .add_int_arg("arg2", "right operand", 0),
        add_int,
    )?;
    registry.register_process(
        ProcessManifest::new("concat")
            .description("Join two strings")
            .add_string_arg("prefix", "leading text", "")
            .add_string_arg("suffix", "trailing text", ""),
        concat,
    )?;
    registry.register_process(
        ProcessManifest::new("repeat")
            .description("Repeat a string up to 255 times")
            .add_string_arg("text", "text to repeat", "")
            .add_int_arg("times", "repetition count", 1),
        repeat,
    )?;
    registry.register_process(
        ProcessManifest::new("scale")
            .description("Multiply every number in a list")
            .add_array_arg("values", "numbers to scale", Vec::new())
            .add_float_arg("factor", "multiplier", 1.0),
        scale,
    )?;
    registry.register_process(
        ProcessManifest::new("mean")
            .description("Arithmetic mean of a list of numbers")
            .add_array_arg("values", "numbers to average", Vec::new()),
        mean,
    )?;
    registry.register_process(
        ProcessManifest::new("configure")
            .description("Overlay options on the default settings")
            .add_object_arg("options", "settings to override", Object::new()),
        configure,
    )?;

    let counter = ContainerInstance::new(
        ContainerManifest::new("counter").description("Integer accumulator"),
        Counter::default(),
    )
    .with_process(
        ProcessManifest::new("counter_get").description("Current count"),
        counter_get,
    )?
    .with_process(
        ProcessManifest::new("counter_add")
            .description("Add to the count and return it")
            .add_int_arg("amount", "increment", 1),
        counter_add,
    )?;
    registry.add_container(counter);

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vbind_bridge::{CapsuleMap, OutputCapsule, StatusCode};

    fn call(name: &str, args: &str) -> (Option<StatusCode>, Value) {
        let Ok(mut registry) = registry() else {
            assert!(false, "demo registry failed to build");
            return (None, Value::Null);
        };
        let args = CapsuleMap::from_json_str(args).unwrap_or_default();
        let mut out = OutputCapsule::new();
        let status = registry.call(name, &args, &mut out);
        (status, out.to_value())
    }

    #[test]
    fn test_every_process_is_listed() {
        let names = registry().map(|r| {
            r.process_names()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        });
        assert!(names.is_ok_and(|n| n
            == vec![
                "add_int",
                "concat",
                "repeat",
                "scale",
                "mean",
                "configure",
                "counter_get",
                "counter_add"
            ]));
    }

    #[test]
    fn test_add_int() {
        assert_eq!(
            call("add_int", r#"{"arg1": 3, "arg2": 4}"#),
            (Some(StatusCode::Ok), Value::Int(7))
        );
        let overflow = format!(r#"{{"arg1": {}, "arg2": 1}}"#, i64::MAX);
        assert_eq!(
            call("add_int", &overflow).0,
            Some(StatusCode::NullOptReturned)
        );
    }

    #[test]
    fn test_repeat_rejects_large_count() {
        assert_eq!(
            call("repeat", r#"{"text": "ab", "times": 2}"#),
            (Some(StatusCode::Ok), Value::from("abab"))
        );
        assert_eq!(
            call("repeat", r#"{"text": "ab", "times": 1000}"#).0,
            Some(StatusCode::ValueConversion)
        );
    }

    #[test]
    fn test_scale_and_mean() {
        let (status, value) = call("scale", r#"{"values": [1, 2.5], "factor": 2}"#);
        assert_eq!(status, Some(StatusCode::Ok));
        assert_eq!(value, Value::from(vec![2.0, 5.0]));
        assert_eq!(
            call("scale", r#"{"values": [1, "x"], "factor": 2}"#).0,
            Some(StatusCode::NullOptReturned)
        );
        assert_eq!(
            call("mean", r#"{"values": [1, 2, 6]}"#),
            (Some(StatusCode::Ok), Value::Double(3.0))
        );
    }

    #[test]
    fn test_configure_merges_defaults() {
        let (status, value) = call("configure", r#"{"options": {"rate": 5}}"#);
        assert_eq!(status, Some(StatusCode::Ok));
        assert_eq!(value.at("rate").int_or(0), 5);
        assert_eq!(value.at("mode").string_or(""), "fast");
    }

    #[test]
    fn test_counter_container() {
        assert_eq!(
            call("counter_add", r#"{"amount": 4}"#),
            (Some(StatusCode::Ok), Value::Int(4))
        );
        assert_eq!(
            call("counter_get", "{}"),
            (Some(StatusCode::Ok), Value::Int(0))
        );
    }
}
