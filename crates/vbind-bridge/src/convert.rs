//! Translation between host values and [`Value`] trees

use crate::errors::BridgeError;
use crate::gateway::{HostKind, HostValue, ResultSink, ValueSink};
use vbind_logger as logger;
use vbind_value::{Object, Value};

fn unreadable(kind: &str) -> BridgeError {
    BridgeError::Conversion(format!("host value reported {} but could not be read", kind))
}

/// Read a host value into a [`Value`].
///
/// Integers beyond the signed 64-bit range and values of unknown kind are
/// conversion errors.
pub fn into_value(host: &dyn HostValue) -> Result<Value, BridgeError> {
    match host.kind() {
        HostKind::Null => Ok(Value::Null),
        HostKind::Bool => host.get_bool().map(Value::Bool).ok_or_else(|| unreadable("bool")),
        HostKind::Int => match (host.get_int(), host.get_uint()) {
            (Some(i), _) => Ok(Value::Int(i)),
            (None, Some(u)) => Err(BridgeError::Conversion(format!(
                "unsigned value {} exceeds the int range",
                u
            ))),
            (None, None) => Err(unreadable("int")),
        },
        HostKind::Float => host
            .get_float()
            .map(Value::Double)
            .ok_or_else(|| unreadable("float")),
        HostKind::String => host
            .get_string()
            .map(Value::from)
            .ok_or_else(|| unreadable("string")),
        HostKind::Array => {
            let mut items = Vec::new();
            host.array_for_each(&mut |item| {
                items.push(into_value(item)?);
                Ok(())
            })?;
            Ok(Value::List(items))
        }
        HostKind::Object => {
            let mut map = Object::new();
            host.object_for_each(&mut |key, item| {
                map.insert(key.to_string(), into_value(item)?);
                Ok(())
            })?;
            Ok(Value::Object(map))
        }
        HostKind::Unknown => Err(BridgeError::Conversion(
            "host value has an unrecognized representation".to_string(),
        )),
    }
}

/// Materialize a [`Value`] into the result slot.
///
/// Scalars use the matching `set_*` operation; containers are created empty
/// and filled recursively. Inside containers, null, byte and error leaves are
/// skipped. At the top level they cannot be written.
pub fn write_value(value: &Value, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
    match value {
        Value::Bool(b) => sink.set_bool(*b),
        Value::Int(i) => sink.set_int(*i),
        Value::Double(d) => sink.set_float(*d),
        Value::String(s) => sink.set_string(s),
        Value::Object(map) => write_object(map, sink.set_empty_object()?),
        Value::List(items) => write_array(items, sink.set_empty_array()?),
        Value::Null | Value::Bytes(_) | Value::Error(_) => Err(BridgeError::Conversion(format!(
            "a {} value cannot be written as a result",
            value.type_str()
        ))),
    }
}

fn write_object(map: &Object, sink: &mut dyn ValueSink) -> Result<(), BridgeError> {
    for (key, item) in map {
        match item {
            Value::Bool(b) => sink.object_set_bool(key, *b)?,
            Value::Int(i) => sink.object_set_int(key, *i)?,
            Value::Double(d) => sink.object_set_float(key, *d)?,
            Value::String(s) => sink.object_set_string(key, s)?,
            Value::Object(inner) => write_object(inner, sink.object_set_empty_object(key)?)?,
            Value::List(items) => write_array(items, sink.object_set_empty_array(key)?)?,
            Value::Null | Value::Bytes(_) | Value::Error(_) => {
                logger::debug(&format!(
                    "write_value: skipping {} member '{}'",
                    item.type_str(),
                    key
                ));
            }
        }
    }
    Ok(())
}

fn write_array(items: &[Value], sink: &mut dyn ValueSink) -> Result<(), BridgeError> {
    for item in items {
        match item {
            Value::Bool(b) => sink.array_push_bool(*b)?,
            Value::Int(i) => sink.array_push_int(*i)?,
            Value::Double(d) => sink.array_push_float(*d)?,
            Value::String(s) => sink.array_push_string(s)?,
            Value::Object(inner) => write_object(inner, sink.array_push_empty_object()?)?,
            Value::List(nested) => write_array(nested, sink.array_push_empty_array()?)?,
            Value::Null | Value::Bytes(_) | Value::Error(_) => {
                logger::debug(&format!("write_value: skipping {} element", item.type_str()));
            }
        }
    }
    Ok(())
}
