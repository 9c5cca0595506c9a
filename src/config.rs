//! Interpreter configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via FSMI_CONFIG or --config)
//! 3. Environment variables
//! 4. Command-line flags

use fsmi_core::LoadOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Interpreter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Description loading.
    pub load: LoadConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from an optional file, then applies environment
    /// variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.load.apply_overrides(&var);
        self.log.apply_overrides(&var);
    }

    /// Returns the options used to load descriptions.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.load.strict,
        }
    }
}

/// Description loading configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Reject dangling destinations and reopened states.
    pub strict: bool,
}

impl LoadConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(strict) = var("FSMI_STRICT") {
            self.strict = strict == "1" || strict.to_lowercase() == "true";
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when RUST_LOG is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl LogConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(filter) = var("FSMI_LOG") {
            if !filter.is_empty() {
                self.filter = filter;
            }
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.load.strict);
        assert_eq!(config.log.filter, "warn");
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "load:\n  strict: true\nlog:\n  filter: debug").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.load.strict);
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.load_options(), LoadOptions::strict());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "load:\n  strict: true").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.load.strict);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "load: [not, a, map]").unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_, _))));

        let result = Config::from_file("/nonexistent/fsmi.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_, _))));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("FSMI_STRICT", "TRUE"), ("FSMI_LOG", "trace")]));
        assert!(config.load.strict);
        assert_eq!(config.log.filter, "trace");

        config.apply_overrides(vars(&[("FSMI_STRICT", "0"), ("FSMI_LOG", "")]));
        assert!(!config.load.strict);
        assert_eq!(config.log.filter, "trace");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = Config::default();
        config.load.strict = true;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed.load.strict);
        assert_eq!(parsed.log.filter, config.log.filter);
    }
}
