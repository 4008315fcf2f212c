//! Configuration management for vbind
//!
//! Settings live in a TOML file resolved by [`Config::path`]. All keys are
//! optional; an absent file is an empty configuration.

pub mod config;
pub mod errors;

pub use config::{Config, OutputFormat, KEYS};
pub use errors::ConfigError;
