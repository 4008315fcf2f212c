use crate::common::{format_value, parse_value};
use crate::demo;
use anyhow::{anyhow, Context};
use std::fs;
use std::path::Path;
use tracing::debug;
use vbind_config::OutputFormat;
use vbind_logger as logger;
use vbind_manifest::ProcessManifest;
use vbind_value::Value;

/// Print the demo component manifest, the manifest of one process, or a
/// process descriptor read from `file` after checking it
pub fn handle_manifest(
    process: Option<&str>,
    file: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let value = match (process, file) {
        (_, Some(path)) => {
            let manifest = load_descriptor(path)?;
            logger::info(&format!(
                "{} is a valid descriptor for process '{}' ({} argument(s))",
                path.display(),
                manifest.type_name(),
                manifest.arguments().len()
            ));
            Value::from(manifest)
        }
        (Some(name), None) => {
            let registry = demo::registry()?;
            let manifest = registry
                .process_manifest(name)
                .ok_or_else(|| anyhow!("Unknown process: {}", name))?;
            debug!("showing manifest of process '{}'", name);
            Value::from(manifest.clone())
        }
        (None, None) => {
            let registry = demo::registry()?;
            logger::info(&format!(
                "{} exposes {} process(es)",
                demo::COMPONENT_NAME,
                registry.process_names().len()
            ));
            Value::from(registry.manifest()?)
        }
    };
    println!("{}", format_value(&value, format)?);
    Ok(())
}

/// Read a JSON process descriptor and parse it back into a typed manifest
pub fn load_descriptor(path: &Path) -> anyhow::Result<ProcessManifest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor {}", path.display()))?;
    let value = parse_value(&text)?;
    debug!("parsing process descriptor from {}", path.display());
    ProcessManifest::try_from(&value)
        .with_context(|| format!("Invalid process descriptor {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vbind_manifest::ArgumentType;

    fn write(dir: &TempDir, text: &str) -> Option<std::path::PathBuf> {
        let path = dir.path().join("descriptor.json");
        fs::write(&path, text).ok()?;
        Some(path)
    }

    #[test]
    fn test_load_descriptor_normalizes_fields() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let Some(path) = write(
            &dir,
            r#"{"type_name": "scale",
                "args": [{"name": "factor", "type": "float", "description": "", "default": 2}]}"#,
        ) else {
            return;
        };
        let manifest = load_descriptor(&path);
        assert!(manifest.as_ref().is_ok_and(|m| m.type_name() == "scale"
            && m.argument("factor")
                .is_some_and(|a| a.type_name == ArgumentType::Float)));

        let value = manifest.map(Value::from).unwrap_or_default();
        assert_eq!(value.at("factory").as_str(), Ok("process_factory"));
        assert!(value.get("args").is_none());
        assert_eq!(value.at_path("arguments.0.name").as_str(), Ok("factor"));
    }

    #[test]
    fn test_load_descriptor_rejects_bad_input() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let Some(path) = write(&dir, r#"{"description": "no type name"}"#) else {
            return;
        };
        let rejected = load_descriptor(&path);
        assert!(rejected.is_err_and(|e| format!("{:#}", e).contains("type_name")));

        let missing = load_descriptor(&dir.path().join("absent.json"));
        assert!(missing.is_err());
    }
}
