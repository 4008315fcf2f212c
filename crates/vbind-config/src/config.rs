use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_ENV: &str = "VBIND_CONFIG";
const CONFIG_FILE: &str = "vbind.toml";
const POINTER_FILE: &str = ".vbind_config_path";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const KEYS: [&str; 3] = ["verbosity", "log-dir", "output"];

/// How the CLI prints values
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact `str` rendering
    #[default]
    Str,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Str => "str",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" => Ok(OutputFormat::Str),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "output".to_string(),
                reason: format!("expected 'str' or 'json', got '{}'", other),
            }),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

impl Config {
    /// Directory holding the default config file and the pointer file
    pub fn config_dir() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir().map(|home| home.join(".config"));

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir();

        base.unwrap_or_else(|| PathBuf::from(".")).join("vbind")
    }

    pub fn pointer_path() -> PathBuf {
        Self::config_dir().join(POINTER_FILE)
    }

    /// Resolve the config file location.
    ///
    /// A non-empty `VBIND_CONFIG` wins, then a non-empty pointer file next to
    /// the default location, then the default `~/.config/vbind/vbind.toml`.
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        if let Some(pointed) = Self::read_pointer(&Self::pointer_path()) {
            return pointed;
        }

        Self::config_dir().join(CONFIG_FILE)
    }

    fn read_pointer(pointer: &Path) -> Option<PathBuf> {
        let contents = fs::read_to_string(pointer).ok()?;
        let trimmed = contents.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// Path recorded in the pointer file, if any
    pub fn path_override() -> Option<PathBuf> {
        Self::read_pointer(&Self::pointer_path())
    }

    /// Record `new_path` in the pointer file
    pub fn set_path(new_path: &str) -> Result<PathBuf, ConfigError> {
        let pointer = Self::pointer_path();
        Self::write_pointer(&pointer, new_path)?;
        Ok(pointer)
    }

    fn write_pointer(pointer: &Path, new_path: &str) -> Result<(), ConfigError> {
        if let Some(parent) = pointer.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        fs::write(pointer, new_path.trim()).map_err(|e| ConfigError::io(pointer, e))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load from `path`; a missing file is an empty configuration
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "verbosity" => self.verbosity.map(|v| v.to_string()),
            "log-dir" => self.log_dir.clone(),
            "output" => self.output.map(|o| o.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "verbosity" => {
                let level = value.parse::<u8>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
                self.verbosity = Some(level);
            }
            "log-dir" => self.log_dir = Some(value.to_string()),
            "output" => self.output = Some(value.parse()?),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.verbosity.is_none()
            && self.log_dir.is_none()
            && self.output.is_none()
    }

    /// Set keys with their values, in [`KEYS`] order
    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref().map(Path::new)
    }
}
