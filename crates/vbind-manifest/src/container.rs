//! Container manifests

use crate::process::{ProcessManifest, DEFAULT_LANGUAGE};
use crate::types::{arguments_value, ArgumentManifest, WithArguments};
use vbind_value::Value;

pub const DEFAULT_CONTAINER_FACTORY: &str = "container_factory";

/// Describes a container type and the processes that operate on it
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerManifest {
    type_name: String,
    name: Option<String>,
    description: String,
    language: String,
    factory: String,
    arguments: Vec<ArgumentManifest>,
    processes: Vec<ProcessManifest>,
}

impl ContainerManifest {
    pub fn new(type_name: impl Into<String>) -> Self {
        ContainerManifest {
            type_name: type_name.into(),
            name: None,
            description: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            factory: DEFAULT_CONTAINER_FACTORY.to_string(),
            arguments: Vec::new(),
            processes: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = factory.into();
        self
    }

    /// Attach a process, recording this container as its owner.
    ///
    /// An unnamed container keeps whatever container name the process already
    /// carries.
    pub fn add_process(mut self, process: ProcessManifest) -> Self {
        let container_name = self
            .name
            .clone()
            .or_else(|| process.container_name().map(str::to_string));
        let process = process.container(self.type_name.clone(), container_name);
        self.processes.push(process);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn arguments(&self) -> &[ArgumentManifest] {
        &self.arguments
    }

    pub fn processes(&self) -> &[ProcessManifest] {
        &self.processes
    }

    pub fn process(&self, type_name: &str) -> Option<&ProcessManifest> {
        self.processes.iter().find(|p| p.type_name() == type_name)
    }

    /// `{type_name, language, description, factory, arguments, processes, name?}`
    pub fn into_value(self) -> Value {
        let mut value = Value::object();
        value.set("type_name", self.type_name);
        value.set("language", self.language);
        value.set("description", self.description);
        value.set("factory", self.factory);
        value.set("arguments", arguments_value(self.arguments));
        value.set(
            "processes",
            self.processes
                .into_iter()
                .map(ProcessManifest::into_value)
                .collect::<Value>(),
        );
        if let Some(name) = self.name {
            value.set("name", name);
        }
        value
    }
}

impl WithArguments for ContainerManifest {
    fn add_argument(mut self, argument: ArgumentManifest) -> Self {
        self.arguments.push(argument);
        self
    }
}

impl From<ContainerManifest> for Value {
    fn from(manifest: ContainerManifest) -> Self {
        manifest.into_value()
    }
}
