//! Named collection of bound processes and container instances.
//!
//! A registry is what a component exposes to its host: the manifests it
//! advertises plus one type-erased entry point per process.

use crate::binder::{bind_container_process, bind_process, ContainerProcess, Process};
use crate::entry_point::{container_process_entry_point, process_entry_point, StatusCode};
use crate::errors::BridgeError;
use crate::gateway::{ArgumentSource, ResultSink};
use crate::result::IntoCapsule;
use vbind_logger as logger;
use vbind_manifest::{ComponentManifest, ContainerManifest, ProcessManifest};

type EntryPoint = Box<dyn Fn(&dyn ArgumentSource, &mut dyn ResultSink) -> StatusCode>;
type MethodEntryPoint<C> =
    Box<dyn Fn(&mut C, &dyn ArgumentSource, &mut dyn ResultSink) -> StatusCode>;

/// A live container: its manifest, its state and its bound methods
pub struct ContainerInstance<C> {
    manifest: ContainerManifest,
    state: C,
    methods: Vec<(String, MethodEntryPoint<C>)>,
}

impl<C: 'static> ContainerInstance<C> {
    pub fn new(manifest: ContainerManifest, state: C) -> Self {
        ContainerInstance {
            manifest,
            state,
            methods: Vec::new(),
        }
    }

    /// Bind `function` as a method of this container
    pub fn with_process<F, Args>(
        mut self,
        process: ProcessManifest,
        function: F,
    ) -> Result<Self, BridgeError>
    where
        F: ContainerProcess<C, Args> + 'static,
        F::Output: IntoCapsule,
        Args: 'static,
    {
        let bound = bind_container_process(process.arguments(), function)?;
        let name = process.type_name().to_string();
        let entry: MethodEntryPoint<C> = Box::new(
            move |state: &mut C, args: &dyn ArgumentSource, out: &mut dyn ResultSink| {
                container_process_entry_point(&bound, state, args, out)
            },
        );
        self.manifest = self.manifest.add_process(process);
        self.methods.push((name, entry));
        Ok(self)
    }

    pub fn state(&self) -> &C {
        &self.state
    }
}

/// Type-erased view of a [`ContainerInstance`]
trait ContainerSlot {
    fn manifest(&self) -> &ContainerManifest;
    fn call(
        &mut self,
        name: &str,
        args: &dyn ArgumentSource,
        out: &mut dyn ResultSink,
    ) -> Option<StatusCode>;
}

impl<C> ContainerSlot for ContainerInstance<C> {
    fn manifest(&self) -> &ContainerManifest {
        &self.manifest
    }

    fn call(
        &mut self,
        name: &str,
        args: &dyn ArgumentSource,
        out: &mut dyn ResultSink,
    ) -> Option<StatusCode> {
        let (_, method) = self.methods.iter().find(|(n, _)| n == name)?;
        Some(method(&mut self.state, args, out))
    }
}

pub struct ProcessRegistry {
    type_name: String,
    description: String,
    processes: Vec<(ProcessManifest, EntryPoint)>,
    containers: Vec<Box<dyn ContainerSlot>>,
}

impl ProcessRegistry {
    pub fn new(type_name: impl Into<String>) -> Self {
        ProcessRegistry {
            type_name: type_name.into(),
            description: String::new(),
            processes: Vec::new(),
            containers: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Bind and register a free-standing process
    pub fn register_process<F, Args>(
        &mut self,
        manifest: ProcessManifest,
        function: F,
    ) -> Result<(), BridgeError>
    where
        F: Process<Args> + 'static,
        F::Output: IntoCapsule,
        Args: 'static,
    {
        let bound = bind_process(manifest.arguments(), function)?;
        let entry: EntryPoint = Box::new(
            move |args: &dyn ArgumentSource, out: &mut dyn ResultSink| {
                process_entry_point(&bound, args, out)
            },
        );
        logger::debug(&format!("registered process '{}'", manifest.type_name()));
        self.processes.push((manifest, entry));
        Ok(())
    }

    pub fn add_container<C: 'static>(&mut self, container: ContainerInstance<C>) {
        logger::debug(&format!(
            "registered container '{}' with {} process(es)",
            container.manifest.type_name(),
            container.methods.len()
        ));
        self.containers.push(Box::new(container));
    }

    /// Component manifest describing everything registered
    pub fn manifest(&self) -> Result<ComponentManifest, BridgeError> {
        let mut component =
            ComponentManifest::new(self.type_name.clone()).description(self.description.clone());
        for slot in &self.containers {
            component = component.add_container(slot.manifest().clone());
        }
        for (process, _) in &self.processes {
            component = component.add_process(process.clone())?;
        }
        Ok(component)
    }

    /// Manifest of one process, free-standing or a container method
    pub fn process_manifest(&self, name: &str) -> Option<&ProcessManifest> {
        self.processes
            .iter()
            .map(|(p, _)| p)
            .find(|p| p.type_name() == name)
            .or_else(|| {
                self.containers
                    .iter()
                    .find_map(|slot| slot.manifest().process(name))
            })
    }

    /// Every callable process name, free-standing first
    pub fn process_names(&self) -> Vec<&str> {
        let free = self.processes.iter().map(|(p, _)| p.type_name());
        let methods = self
            .containers
            .iter()
            .flat_map(|slot| slot.manifest().processes().iter().map(ProcessManifest::type_name));
        free.chain(methods).collect()
    }

    /// Invoke a process by name; `None` when no such process is registered
    pub fn call(
        &mut self,
        name: &str,
        args: &dyn ArgumentSource,
        out: &mut dyn ResultSink,
    ) -> Option<StatusCode> {
        if let Some((_, entry)) = self.processes.iter().find(|(p, _)| p.type_name() == name) {
            return Some(entry(args, out));
        }
        self.containers
            .iter_mut()
            .find_map(|slot| slot.call(name, args, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capsule::{CapsuleMap, OutputCapsule};
    use serde_json::json;
    use vbind_manifest::WithArguments;

    struct Counter {
        count: i64,
    }

    fn registry() -> Result<ProcessRegistry, BridgeError> {
        let mut registry = ProcessRegistry::new("demo").description("demo component");
        registry.register_process(
            ProcessManifest::new("add_int")
                .add_int_arg("arg1", "", 0)
                .add_int_arg("arg2", "", 0),
            |a: i64, b: i64| Some(a + b),
        )?;
        let state = Counter { count: 0 };
        let counter = ContainerInstance::new(ContainerManifest::new("counter"), state)
            .with_process(ProcessManifest::new("counter_get"), |c: &mut Counter| {
                Some(c.count)
            })?
            .with_process(
                ProcessManifest::new("counter_add").add_int_arg("amount", "", 1),
                |c: &mut Counter, amount: i64| {
                    c.count += amount;
                    Some(c.count)
                },
            )?;
        registry.add_container(counter);
        Ok(registry)
    }

    #[test]
    fn test_names_and_manifest() {
        let Ok(registry) = registry() else {
            assert!(false, "registry failed to build");
            return;
        };
        assert_eq!(
            registry.process_names(),
            vec!["add_int", "counter_get", "counter_add"]
        );
        assert!(registry
            .process_manifest("counter_add")
            .is_some_and(|p| p.container_type() == Some("counter")));

        let manifest = registry.manifest();
        assert!(manifest.is_ok());
        let value = manifest.map(ComponentManifest::into_value).unwrap_or_default();
        assert_eq!(value.at("type_name").as_str(), Ok("demo"));
        assert_eq!(value.at_path("processes.0.type_name").as_str(), Ok("add_int"));
        assert_eq!(
            value.at_path("containers.0.processes.1.type_name").as_str(),
            Ok("counter_add")
        );
    }

    #[test]
    fn test_call_routes_to_processes_and_containers() {
        let Ok(mut registry) = registry() else {
            assert!(false, "registry failed to build");
            return;
        };
        let mut out = OutputCapsule::new();

        let args = CapsuleMap::new().with("arg1", 3).with("arg2", 4);
        assert_eq!(registry.call("add_int", &args, &mut out), Some(StatusCode::Ok));
        assert_eq!(out.as_json(), Some(&json!(7)));

        let add = CapsuleMap::new().with("amount", 5);
        assert_eq!(registry.call("counter_add", &add, &mut out), Some(StatusCode::Ok));
        assert_eq!(registry.call("counter_add", &add, &mut out), Some(StatusCode::Ok));
        assert_eq!(
            registry.call("counter_get", &CapsuleMap::new(), &mut out),
            Some(StatusCode::Ok)
        );
        assert_eq!(out.as_json(), Some(&json!(10)));

        assert_eq!(registry.call("missing", &args, &mut out), None);
    }

    #[test]
    fn test_container_binding_keeps_state() {
        let state = Counter { count: 2 };
        let instance = ContainerInstance::new(ContainerManifest::new("counter"), state)
            .with_process(
                ProcessManifest::new("counter_add").add_int_arg("amount", "", 1),
                |c: &mut Counter, amount: i64| Some(c.count + amount),
            );
        assert!(instance.is_ok_and(|i| i.state().count == 2 && i.methods.len() == 1));
    }

    #[test]
    fn test_bind_failure_is_reported() {
        let mut registry = ProcessRegistry::new("demo");
        let result = registry.register_process(ProcessManifest::new("needs_one"), |a: i64| Some(a));
        assert!(matches!(result, Err(BridgeError::ArityMismatch { .. })));
        assert!(registry.process_names().is_empty());
    }
}
