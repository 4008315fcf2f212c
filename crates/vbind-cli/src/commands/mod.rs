pub mod call;
pub mod config;
pub mod manifest;
pub mod value;
