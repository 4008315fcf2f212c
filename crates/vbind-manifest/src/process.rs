//! Process manifests

use crate::errors::ManifestError;
use crate::types::{
    arguments_from_value, arguments_value, required_str, ArgumentManifest, WithArguments,
};
use vbind_value::Value;

pub const DEFAULT_LANGUAGE: &str = "rust";
pub const DEFAULT_PROCESS_FACTORY: &str = "process_factory";

/// Describes one process: its identity and ordered argument list.
///
/// Built fluently; the order of `add_*_arg` calls is the positional order in
/// which arguments are bound to the native function.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessManifest {
    type_name: String,
    name: Option<String>,
    description: String,
    language: String,
    factory: String,
    arguments: Vec<ArgumentManifest>,
    use_memo: bool,
    container_type: Option<String>,
    container_name: Option<String>,
}

impl ProcessManifest {
    pub fn new(type_name: impl Into<String>) -> Self {
        ProcessManifest {
            type_name: type_name.into(),
            name: None,
            description: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            factory: DEFAULT_PROCESS_FACTORY.to_string(),
            arguments: Vec::new(),
            use_memo: false,
            container_type: None,
            container_name: None,
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

    pub fn use_memo(mut self, use_memo: bool) -> Self {
        self.use_memo = use_memo;
        self
    }

    /// Mark this process as a member of a container
    pub fn container(
        mut self,
        container_type: impl Into<String>,
        container_name: Option<String>,
    ) -> Self {
        self.container_type = Some(container_type.into());
        self.container_name = container_name;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn container_type(&self) -> Option<&str> {
        self.container_type.as_deref()
    }

    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    pub fn arguments(&self) -> &[ArgumentManifest] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentManifest> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Copy of this manifest with per-instance settings applied.
    ///
    /// `instance.name` replaces the display name and every entry under
    /// `instance.args` replaces the default of the argument of that name.
    pub fn build_instance_manifest(&self, instance: &Value) -> ProcessManifest {
        let mut manifest = self.clone();
        if let Some(Value::String(name)) = instance.get("name") {
            manifest.name = Some(name.clone());
        }
        if let Some(args) = instance.get("args") {
            for argument in &mut manifest.arguments {
                if let Some(value) = args.get(&argument.name) {
                    tracing::debug!(
                        "instance of '{}' overrides default of '{}'",
                        manifest.type_name,
                        argument.name
                    );
                    argument.default = value.clone();
                }
            }
        }
        manifest
    }

    /// `{type_name, language, description, factory, arguments, use_memo, name?}`
    pub fn into_value(self) -> Value {
        let mut value = Value::object();
        value.set("type_name", self.type_name);
        value.set("language", self.language);
        value.set("description", self.description);
        value.set("factory", self.factory);
        value.set("arguments", arguments_value(self.arguments));
        value.set("use_memo", self.use_memo);
        if let Some(name) = self.name {
            value.set("name", name);
        }
        if let Some(container_type) = self.container_type {
            value.set("container_type", container_type);
        }
        if let Some(container_name) = self.container_name {
            value.set("container_name", container_name);
        }
        value
    }
}

impl WithArguments for ProcessManifest {
    fn add_argument(mut self, argument: ArgumentManifest) -> Self {
        self.arguments.push(argument);
        self
    }
}

impl From<ProcessManifest> for Value {
    fn from(manifest: ProcessManifest) -> Self {
        manifest.into_value()
    }
}

impl TryFrom<&Value> for ProcessManifest {
    type Error = ManifestError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let mut manifest = ProcessManifest::new(required_str(value, "type_name")?)
            .description(value.at("description").string_or(""))
            .language(value.at("language").string_or(DEFAULT_LANGUAGE))
            .factory(value.at("factory").string_or(DEFAULT_PROCESS_FACTORY))
            .use_memo(value.at("use_memo").bool_or(false));
        manifest.arguments = arguments_from_value(value)?;
        if let Some(Value::String(name)) = value.get("name") {
            manifest.name = Some(name.clone());
        }
        if let Some(Value::String(container_type)) = value.get("container_type") {
            manifest.container_type = Some(container_type.clone());
            manifest.container_name = value
                .get("container_name")
                .and_then(|v| v.as_str().ok())
                .map(str::to_string);
        }
        Ok(manifest)
    }
}
