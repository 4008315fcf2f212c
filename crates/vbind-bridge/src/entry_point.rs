//! Host-facing entry points.
//!
//! Every fault raised while extracting, calling or writing is caught here and
//! reduced to a [`StatusCode`]; nothing escapes to the host.

use crate::binder::{BoundContainerProcess, BoundProcess, ContainerProcess, Process};
use crate::errors::BridgeError;
use crate::gateway::{ArgumentSource, ResultSink};
use crate::result::IntoCapsule;
use std::fmt;
use vbind_logger as logger;
use vbind_manifest::ManifestError;

/// Closed set of results reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    ValueNotFound,
    ValueConversion,
    NullOptReturned,
    ContainerNullOptReturned,
}

impl StatusCode {
    pub fn code(self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::NullOptReturned => -2,
            StatusCode::ContainerNullOptReturned => -3,
            StatusCode::ValueNotFound => -11,
            StatusCode::ValueConversion => -12,
        }
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::ValueNotFound => "value not found",
            StatusCode::ValueConversion => "value conversion failed",
            StatusCode::NullOptReturned => "process returned no result",
            StatusCode::ContainerNullOptReturned => "container process returned no result",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.as_str())
    }
}

impl From<&BridgeError> for StatusCode {
    fn from(error: &BridgeError) -> Self {
        match error {
            BridgeError::ArgumentNotFound { .. }
            | BridgeError::Manifest(ManifestError::ArgumentMissing { .. }) => {
                StatusCode::ValueNotFound
            }
            BridgeError::Conversion(_)
            | BridgeError::Type(_)
            | BridgeError::ArityMismatch { .. }
            | BridgeError::Sink(_)
            | BridgeError::Manifest(_) => StatusCode::ValueConversion,
        }
    }
}

fn finish<T: IntoCapsule>(
    outcome: Result<Option<T>, BridgeError>,
    out: &mut dyn ResultSink,
    declined: StatusCode,
) -> StatusCode {
    let written = match outcome {
        Ok(Some(result)) => result.write_to(out),
        Ok(None) => return declined,
        Err(e) => Err(e),
    };
    match written {
        Ok(()) => StatusCode::Ok,
        Err(e) => {
            let status = StatusCode::from(&e);
            logger::debug(&format!("process call failed with {}: {}", status, e));
            status
        }
    }
}

/// Invoke a bound process against `args` and write its result into `out`
pub fn process_entry_point<F, Args>(
    process: &BoundProcess<F, Args>,
    args: &dyn ArgumentSource,
    out: &mut dyn ResultSink,
) -> StatusCode
where
    F: Process<Args>,
    F::Output: IntoCapsule,
{
    finish(process.call(args), out, StatusCode::NullOptReturned)
}

/// Invoke a bound container process on `container`
pub fn container_process_entry_point<F, C, Args>(
    process: &BoundContainerProcess<F, C, Args>,
    container: &mut C,
    args: &dyn ArgumentSource,
    out: &mut dyn ResultSink,
) -> StatusCode
where
    F: ContainerProcess<C, Args>,
    F::Output: IntoCapsule,
{
    finish(
        process.call(container, args),
        out,
        StatusCode::ContainerNullOptReturned,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{bind_container_process, bind_process};
    use crate::capsule::{CapsuleMap, OutputCapsule};
    use serde_json::json;
    use vbind_manifest::{ProcessManifest, WithArguments};
    use vbind_value::Value;

    fn manifest() -> ProcessManifest {
        ProcessManifest::new("add_int")
            .add_int_arg("arg1", "", 0)
            .add_int_arg("arg2", "", 0)
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            StatusCode::Ok,
            StatusCode::ValueNotFound,
            StatusCode::ValueConversion,
            StatusCode::NullOptReturned,
            StatusCode::ContainerNullOptReturned,
        ]
        .map(StatusCode::code);
        for (i, a) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|b| b != a), "duplicate code {}", a);
        }
        assert_eq!(StatusCode::Ok.code(), 0);
    }

    #[test]
    fn test_success_writes_result() {
        let Ok(bound) = bind_process(manifest().arguments(), |a: i64, b: i64| Some(a + b)) else {
            assert!(false, "binding failed");
            return;
        };
        let args = CapsuleMap::new().with("arg1", 3).with("arg2", 4);
        let mut out = OutputCapsule::new();
        assert_eq!(process_entry_point(&bound, &args, &mut out), StatusCode::Ok);
        assert_eq!(out.as_json(), Some(&json!(7)));
    }

    #[test]
    fn test_fault_mapping() {
        let Ok(bound) = bind_process(manifest().arguments(), |a: i64, b: i64| Some(a + b)) else {
            assert!(false, "binding failed");
            return;
        };
        let mut out = OutputCapsule::new();

        let missing = CapsuleMap::new().with("arg1", 3);
        assert_eq!(
            process_entry_point(&bound, &missing, &mut out),
            StatusCode::ValueNotFound
        );

        let wrong_kind = CapsuleMap::new().with("arg1", 3).with("arg2", "four");
        assert_eq!(
            process_entry_point(&bound, &wrong_kind, &mut out),
            StatusCode::ValueNotFound
        );
        assert!(!out.is_set(), "failed calls write nothing");
    }

    #[test]
    fn test_unwritable_result_is_conversion() {
        let Ok(bound) = bind_process(&[], || Some(Value::Null)) else {
            assert!(false, "binding failed");
            return;
        };
        let mut out = OutputCapsule::new();
        assert_eq!(
            process_entry_point(&bound, &CapsuleMap::new(), &mut out),
            StatusCode::ValueConversion
        );
    }

    #[test]
    fn test_declined_results() {
        let Ok(bound) = bind_process(&[], || None::<i64>) else {
            assert!(false, "binding failed");
            return;
        };
        let mut out = OutputCapsule::new();
        assert_eq!(
            process_entry_point(&bound, &CapsuleMap::new(), &mut out),
            StatusCode::NullOptReturned
        );

        let Ok(method) = bind_container_process(&[], |_: &mut Vec<i64>| None::<i64>) else {
            assert!(false, "binding failed");
            return;
        };
        let mut state = Vec::new();
        assert_eq!(
            container_process_entry_point(&method, &mut state, &CapsuleMap::new(), &mut out),
            StatusCode::ContainerNullOptReturned
        );
    }

    #[test]
    fn test_error_to_status() {
        let missing = BridgeError::Manifest(ManifestError::ArgumentMissing {
            process: "p".to_string(),
            name: "x".to_string(),
        });
        assert_eq!(StatusCode::from(&missing), StatusCode::ValueNotFound);
        assert_eq!(
            StatusCode::from(&BridgeError::Sink("closed".to_string())),
            StatusCode::ValueConversion
        );
    }
}
