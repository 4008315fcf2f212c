//! vbind manifest model
//!
//! Descriptive records for processes, containers and components. Every
//! record converts into a [`Value`](vbind_value::Value) tree (`into_value`)
//! for transport to the host. The argument order of a process manifest is
//! significant: it is the positional order used when binding native
//! functions.

pub mod checker;
pub mod component;
pub mod container;
pub mod errors;
pub mod process;
pub mod types;

pub use checker::check_arguments;
pub use component::ComponentManifest;
pub use container::ContainerManifest;
pub use errors::ManifestError;
pub use process::ProcessManifest;
pub use types::{ArgumentManifest, ArgumentType, WithArguments};
