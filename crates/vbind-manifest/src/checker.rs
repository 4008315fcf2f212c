//! Pre-call validation of an argument object against a process manifest

use crate::errors::ManifestError;
use crate::process::ProcessManifest;
use vbind_value::Value;

/// Verify that every declared argument is present in `args`
pub fn check_arguments(manifest: &ProcessManifest, args: &Value) -> Result<(), ManifestError> {
    for argument in manifest.arguments() {
        if args.get(&argument.name).is_none() {
            tracing::debug!(
                "argument '{}' of '{}' missing in {}",
                argument.name,
                manifest.type_name(),
                args
            );
            return Err(ManifestError::ArgumentMissing {
                process: manifest.type_name().to_string(),
                name: argument.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WithArguments;

    #[test]
    fn test_check_arguments() {
        let manifest = ProcessManifest::new("add_int")
            .add_int_arg("arg1", "", 0)
            .add_int_arg("arg2", "", 0);

        let mut args = Value::object();
        args.set("arg1", 3_i64);
        assert_eq!(
            check_arguments(&manifest, &args),
            Err(ManifestError::ArgumentMissing {
                process: "add_int".to_string(),
                name: "arg2".to_string(),
            })
        );

        args.set("arg2", 4_i64);
        assert!(check_arguments(&manifest, &args).is_ok());
        assert!(check_arguments(&ProcessManifest::new("noop"), &Value::Null).is_ok());
    }
}
