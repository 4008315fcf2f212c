//! Common types and utilities shared across modules

use anyhow::Context;
use clap::Parser;
use vbind_config::OutputFormat;
use vbind_value::{str_value, Value};

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(long, global = true, value_name = "FORMAT", help = "Output format: str or json")]
    pub output: Option<String>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// `--output` when given, otherwise the configured format
    pub fn output_format(&self, configured: OutputFormat) -> anyhow::Result<OutputFormat> {
        match self.output.as_deref() {
            Some(format) => Ok(format.parse()?),
            None => Ok(configured),
        }
    }
}

/// Parse a JSON command-line argument into a value
pub fn parse_value(text: &str) -> anyhow::Result<Value> {
    Value::from_json_str(text).with_context(|| format!("Invalid JSON value: {}", text))
}

/// Render a value the way the user asked for
pub fn format_value(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Str => Ok(str_value(value)),
        OutputFormat::Json => {
            let json = value.to_json()?;
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
