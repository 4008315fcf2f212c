//! The narrow operation set through which the host's opaque values are read
//! and written. Nothing else in this crate depends on how the host stores them.

use crate::errors::BridgeError;

/// Kind reported by a host value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    Unknown,
}

/// Read access to one host-provided value
pub trait HostValue {
    fn kind(&self) -> HostKind;
    fn get_int(&self) -> Option<i64>;
    fn get_uint(&self) -> Option<u64>;
    fn get_bool(&self) -> Option<bool>;
    fn get_float(&self) -> Option<f64>;
    fn get_string(&self) -> Option<&str>;

    /// Visit array elements in order
    fn array_for_each(
        &self,
        f: &mut dyn FnMut(&dyn HostValue) -> Result<(), BridgeError>,
    ) -> Result<(), BridgeError>;

    /// Visit object members in order
    fn object_for_each(
        &self,
        f: &mut dyn FnMut(&str, &dyn HostValue) -> Result<(), BridgeError>,
    ) -> Result<(), BridgeError>;
}

/// A named argument collection
pub trait ArgumentSource {
    fn capsule(&self, name: &str) -> Option<&dyn HostValue>;
}

/// A container being materialized inside the host
pub trait ValueSink {
    fn object_set_bool(&mut self, key: &str, value: bool) -> Result<(), BridgeError>;
    fn object_set_int(&mut self, key: &str, value: i64) -> Result<(), BridgeError>;
    fn object_set_float(&mut self, key: &str, value: f64) -> Result<(), BridgeError>;
    fn object_set_string(&mut self, key: &str, value: &str) -> Result<(), BridgeError>;
    fn object_set_empty_object(&mut self, key: &str) -> Result<&mut dyn ValueSink, BridgeError>;
    fn object_set_empty_array(&mut self, key: &str) -> Result<&mut dyn ValueSink, BridgeError>;

    fn array_push_bool(&mut self, value: bool) -> Result<(), BridgeError>;
    fn array_push_int(&mut self, value: i64) -> Result<(), BridgeError>;
    fn array_push_float(&mut self, value: f64) -> Result<(), BridgeError>;
    fn array_push_string(&mut self, value: &str) -> Result<(), BridgeError>;
    fn array_push_empty_object(&mut self) -> Result<&mut dyn ValueSink, BridgeError>;
    fn array_push_empty_array(&mut self) -> Result<&mut dyn ValueSink, BridgeError>;
}

/// The single result slot of a process call
pub trait ResultSink {
    fn set_int(&mut self, value: i64) -> Result<(), BridgeError>;
    fn set_float(&mut self, value: f64) -> Result<(), BridgeError>;
    fn set_bool(&mut self, value: bool) -> Result<(), BridgeError>;
    fn set_string(&mut self, value: &str) -> Result<(), BridgeError>;
    fn set_empty_object(&mut self) -> Result<&mut dyn ValueSink, BridgeError>;
    fn set_empty_array(&mut self) -> Result<&mut dyn ValueSink, BridgeError>;
}
