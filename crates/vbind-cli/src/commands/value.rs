//! Value utilities: render, merge and pattern replacement on JSON input

use crate::common::{format_value, parse_value};
use vbind_config::OutputFormat;
use vbind_value::{lift, merge, replace_all};

/// Print a value, or the element at a dotted `path` inside it
pub fn handle_render(
    json: &str,
    path: Option<&str>,
    flatten: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut value = parse_value(json)?;
    if let Some(path) = path {
        value = value.at_path(path).into_owned();
    }
    if flatten {
        value = lift(&value);
    }
    println!("{}", format_value(&value, format)?);
    Ok(())
}

pub fn handle_merge(a: &str, b: &str, format: OutputFormat) -> anyhow::Result<()> {
    let merged = merge(&parse_value(a)?, &parse_value(b)?);
    println!("{}", format_value(&merged, format)?);
    Ok(())
}

pub fn handle_replace(
    json: &str,
    pattern: &str,
    replacement: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let replaced = replace_all(&parse_value(json)?, pattern, replacement)?;
    println!("{}", format_value(&replaced, format)?);
    Ok(())
}
