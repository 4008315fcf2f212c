//! Host bridge for native vbind processes
//!
//! The host hands a process an opaque, named argument collection. This crate
//! reads it through a narrow gateway ([`gateway`]), extracts each declared
//! argument in manifest order ([`ArgumentExtractor`]), binds the extracted
//! values positionally to a statically typed native function
//! ([`bind_process`], [`bind_container_process`]) and writes the result back
//! through the gateway ([`entry_point`]).

pub mod binder;
pub mod capsule;
pub mod convert;
pub mod entry_point;
pub mod errors;
pub mod extractor;
pub mod gateway;
pub mod registry;
pub mod result;

pub use binder::{
    bind_container_process, bind_process, ArgClass, BoundContainerProcess, BoundProcess,
    ContainerProcess, FromArgument, Process,
};
pub use capsule::{CapsuleMap, OutputCapsule};
pub use convert::{into_value, write_value};
pub use entry_point::{container_process_entry_point, process_entry_point, StatusCode};
pub use errors::BridgeError;
pub use extractor::ArgumentExtractor;
pub use gateway::{ArgumentSource, HostKind, HostValue, ResultSink, ValueSink};
pub use registry::{ContainerInstance, ProcessRegistry};
pub use result::IntoCapsule;
