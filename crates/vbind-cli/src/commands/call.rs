use crate::common::{format_value, parse_value};
use crate::demo;
use anyhow::anyhow;
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use vbind_bridge::{CapsuleMap, OutputCapsule, StatusCode};
use vbind_config::OutputFormat;
use vbind_logger as logger;
use vbind_manifest::{check_arguments, ProcessManifest};
use vbind_value::Value;

#[derive(Parser, Debug)]
pub struct CallCommand {
    /// Name of the process to call
    pub process: String,

    /// Arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,

    /// Fill absent arguments with the manifest defaults
    #[arg(long)]
    pub defaults: bool,
}

/// Arguments with every declared argument present, taking `args` over the
/// manifest defaults
fn with_defaults(manifest: &ProcessManifest, args: &Value) -> Value {
    let mut instance = Value::object();
    instance.set("args", args.clone());
    let resolved = manifest.build_instance_manifest(&instance);

    let mut filled = args.clone();
    for argument in resolved.arguments() {
        if filled.get(&argument.name).is_none() {
            filled.set(&argument.name, argument.default.clone());
        }
    }
    filled
}

/// Call a demo process and print its status and result
pub fn handle_call(cmd: &CallCommand, format: OutputFormat) -> anyhow::Result<StatusCode> {
    let mut registry = demo::registry()?;
    let manifest = registry
        .process_manifest(&cmd.process)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown process: {}", cmd.process))?;

    let mut args = parse_value(&cmd.args)?;
    if cmd.defaults {
        args = with_defaults(&manifest, &args);
    }
    if let Err(e) = check_arguments(&manifest, &args) {
        logger::warn(&e.to_string());
    }

    let capsules = CapsuleMap::from_value(&args)?;
    debug!(
        "calling '{}' with [{}]",
        cmd.process,
        capsules.names().collect::<Vec<_>>().join(", ")
    );
    let mut out = OutputCapsule::new();
    let status = registry
        .call(&cmd.process, &capsules, &mut out)
        .ok_or_else(|| anyhow!("Unknown process: {}", cmd.process))?;
    info!("'{}' returned {}", cmd.process, status);

    let label = if status.is_ok() {
        status.to_string().green()
    } else {
        status.to_string().red()
    };
    println!("{} {}", "status:".bold(), label);
    if out.is_set() {
        println!("{} {}", "result:".bold(), format_value(&out.to_value(), format)?);
    }
    Ok(status)
}
