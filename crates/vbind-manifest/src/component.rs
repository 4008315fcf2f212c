//! Component manifests: the top-level description a plugin hands to the host

use crate::container::ContainerManifest;
use crate::errors::ManifestError;
use crate::process::{ProcessManifest, DEFAULT_LANGUAGE};
use vbind_value::Value;

/// Ordered containers and free-standing processes offered by one component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentManifest {
    type_name: String,
    description: String,
    language: String,
    containers: Vec<ContainerManifest>,
    processes: Vec<ProcessManifest>,
}

impl ComponentManifest {
    pub fn new(type_name: impl Into<String>) -> Self {
        ComponentManifest {
            type_name: type_name.into(),
            description: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            containers: Vec::new(),
            processes: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn add_container(mut self, container: ContainerManifest) -> Self {
        self.containers.push(container);
        self
    }

    /// Add a process.
    ///
    /// A process that names a container type is routed into that container,
    /// which must already have been added.
    pub fn add_process(mut self, process: ProcessManifest) -> Result<Self, ManifestError> {
        let Some(container_type) = process.container_type().map(str::to_string) else {
            self.processes.push(process);
            return Ok(self);
        };

        let index = self
            .containers
            .iter()
            .position(|c| c.type_name() == container_type)
            .ok_or_else(|| ManifestError::UnknownContainer(container_type.clone()))?;
        tracing::debug!(
            "routing process '{}' into container '{}'",
            process.type_name(),
            container_type
        );
        let container = self.containers.remove(index);
        self.containers.insert(index, container.add_process(process));
        Ok(self)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn containers(&self) -> &[ContainerManifest] {
        &self.containers
    }

    pub fn processes(&self) -> &[ProcessManifest] {
        &self.processes
    }

    /// Find a process by type name, free-standing or inside a container
    pub fn find_process(&self, type_name: &str) -> Option<&ProcessManifest> {
        self.processes
            .iter()
            .find(|p| p.type_name() == type_name)
            .or_else(|| self.containers.iter().find_map(|c| c.process(type_name)))
    }

    /// `{type_name, language, description, containers, processes}`
    pub fn into_value(self) -> Value {
        let mut value = Value::object();
        value.set("type_name", self.type_name);
        value.set("language", self.language);
        value.set("description", self.description);
        value.set(
            "containers",
            self.containers
                .into_iter()
                .map(ContainerManifest::into_value)
                .collect::<Value>(),
        );
        value.set(
            "processes",
            self.processes
                .into_iter()
                .map(ProcessManifest::into_value)
                .collect::<Value>(),
        );
        value
    }
}

impl From<ComponentManifest> for Value {
    fn from(manifest: ComponentManifest) -> Self {
        manifest.into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WithArguments;

    #[test]
    fn test_component_routes_container_processes() {
        let component = ComponentManifest::new("demo")
            .add_container(ContainerManifest::new("counter"))
            .add_process(ProcessManifest::new("add_int").add_int_arg("arg1", "", 0))
            .and_then(|c| {
                c.add_process(ProcessManifest::new("counter_get").container("counter", None))
            });
        assert!(component.is_ok());
        let Ok(component) = component else { return };

        assert_eq!(component.processes().len(), 1);
        assert_eq!(component.containers()[0].processes().len(), 1);
        assert!(component.find_process("counter_get").is_some());

        let v = component.into_value();
        assert_eq!(v.at("type_name").as_str(), Ok("demo"));
        assert_eq!(
            v.at_path("containers.0.processes.0.type_name").as_str(),
            Ok("counter_get")
        );
        assert_eq!(v.at_path("processes.0.type_name").as_str(), Ok("add_int"));
    }

    #[test]
    fn test_unknown_container_is_rejected() {
        let result = ComponentManifest::new("demo")
            .add_process(ProcessManifest::new("orphan").container("missing", None));
        assert_eq!(result, Err(ManifestError::UnknownContainer("missing".to_string())));
    }
}
