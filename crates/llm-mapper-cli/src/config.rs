//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments (applied by the caller)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the user config dir
const APP_DIR: &str = "llm-mapper";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider used when `--provider` is not given
    pub default_provider: String,

    /// Resolved model name used when neither the body nor `--model` has one
    pub default_model: Option<String>,

    /// Always include mapping reports in normalize output
    pub diagnostics: bool,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Upgrade `json` output to pretty-printed JSON
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: "anthropic".to_string(),
            default_model: None,
            diagnostics: false,
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            pretty: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

/// Serialization format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match Self::active_path(file) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// The file [`Config::load_with_file`] would read, if any
    pub fn active_path(file: Option<&Path>) -> Option<PathBuf> {
        match file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_paths().into_iter().find(|p| p.exists()),
        }
    }

    /// User-level config file location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Get default configuration file paths to check, in priority order
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".llm-mapper.yaml"),
            PathBuf::from(".llm-mapper.json"),
            PathBuf::from(".llm-mapper.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join(APP_DIR);
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.json"));
            paths.push(app_dir.join("config.toml"));
        }

        paths
    }

    /// Render the configuration in the format matching `path`
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        let content = match FileFormat::of(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a configuration value by dotted key
    pub fn get_value(&self, key: &str) -> Result<String> {
        match key {
            "default_provider" => Ok(self.default_provider.clone()),
            "default_model" => Ok(self.default_model.clone().unwrap_or_default()),
            "diagnostics" => Ok(self.diagnostics.to_string()),
            "output.format" => Ok(self.output.format.clone()),
            "output.color" => Ok(self.output.color.to_string()),
            "output.pretty" => Ok(self.output.pretty.to_string()),
            "logging.level" => Ok(self.logging.level.clone().unwrap_or_default()),
            "logging.format" => Ok(self.logging.format.clone()),
            _ => Err(Error::config(format!("Unknown configuration key: {}", key))),
        }
    }
}
