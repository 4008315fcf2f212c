//! Dynamic values exchanged across the vbind process boundary
//!
//! A [`Value`] is a tagged union of null, bool, integer, double, string,
//! byte-array, list, insertion-ordered object and an explicit error state.
//! Arguments, return values and manifests all travel as `Value` trees.
//!
//! Keyed and indexed access never panics: a failed lookup yields an owned
//! `Value::Error` carrying a diagnostic, so chained access degrades to a
//! terminal error instead of aborting.

mod access;
pub mod errors;
pub mod json;
pub mod ops;
mod render;
pub mod value;

pub use errors::ValueTypeError;
pub use ops::{lift, merge, replace_all};
pub use render::str_value;
pub use value::{Object, Value, ValueKind};
