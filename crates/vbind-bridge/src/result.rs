//! Native return types that can be written into the result slot

use crate::convert::write_value;
use crate::errors::BridgeError;
use crate::gateway::ResultSink;
use vbind_value::Value;

pub trait IntoCapsule {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError>;
}

macro_rules! lossless_int {
    ($($t:ty),*) => {$(
        impl IntoCapsule for $t {
            fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
                sink.set_int(i64::from(self))
            }
        }
    )*};
}

macro_rules! checked_int {
    ($($t:ty),*) => {$(
        impl IntoCapsule for $t {
            fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
                let value = i64::try_from(self).map_err(|_| {
                    BridgeError::Conversion(format!("result {} exceeds the int range", self))
                })?;
                sink.set_int(value)
            }
        }
    )*};
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);
checked_int!(isize, u64, usize);

impl IntoCapsule for f64 {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        sink.set_float(self)
    }
}

impl IntoCapsule for f32 {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        sink.set_float(f64::from(self))
    }
}

impl IntoCapsule for bool {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        sink.set_bool(self)
    }
}

impl IntoCapsule for String {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        sink.set_string(&self)
    }
}

impl IntoCapsule for &str {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        sink.set_string(self)
    }
}

impl IntoCapsule for Value {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        write_value(&self, sink)
    }
}

impl IntoCapsule for Vec<Value> {
    fn write_to(self, sink: &mut dyn ResultSink) -> Result<(), BridgeError> {
        write_value(&Value::List(self), sink)
    }
}
