//! vbind CLI library - expose modules for testing
//!
//! The binary is a thin shell over these modules: command handlers, the
//! built-in demo component and the `tracing` subscriber setup.

pub mod commands;
pub mod common;
pub mod demo;

pub use common::GlobalOpts;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the `tracing` subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    let fallback = vbind_logger::level_for(verbosity);
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
