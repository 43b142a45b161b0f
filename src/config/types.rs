use super::validation::{ConfigValidationWarning, validate_config_toml};
use crate::render::RenderOptions;
use crate::session::DEFAULT_SESSION_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names searched for, in priority order, in each directory
pub const CONFIG_FILES: &[&str] = &[".lessonmark.toml", "lessonmark.toml"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub render: RenderOptions,
    pub quiz: QuizConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuizConfig {
    /// Submit recorded answers when a student leaves an unfinished quiz
    #[serde(alias = "submit_on_leave")]
    pub submit_on_leave: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self { submit_on_leave: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SessionConfig {
    #[serde(alias = "storage_path", skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl SessionConfig {
    /// Configured session file, or the default name in the working directory
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}

/// A configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when built-in defaults are in effect
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigValidationWarning>,
}

impl Config {
    /// Parse TOML text, collecting warnings for keys that are not recognised.
    pub fn from_toml_str(content: &str) -> Result<(Self, Vec<ConfigValidationWarning>), ConfigError> {
        let value: toml::Value = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let warnings = validate_config_toml(&value);
        let config = value
            .try_into::<Config>()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok((config, warnings))
    }

    pub fn load(path: &Path) -> Result<(Self, Vec<ConfigValidationWarning>), ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::ParseError(msg) => ConfigError::ParseError(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Walk up from `start` looking for a config file.
pub fn discover_config_file(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                log::debug!("found config file {}", candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Otherwise the nearest config file above the
/// working directory is used, falling back to defaults. `skip_discovery`
/// ignores config files entirely.
pub fn load_with_discovery(explicit: Option<&str>, skip_discovery: bool) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(path) => Some(PathBuf::from(path)),
        None if skip_discovery => None,
        None => {
            let cwd = std::env::current_dir().map_err(|source| ConfigError::IoError {
                source,
                path: ".".to_string(),
            })?;
            discover_config_file(&cwd)
        }
    };

    match path {
        Some(path) => {
            let (config, warnings) = Config::load(&path)?;
            Ok(LoadedConfig {
                config,
                path: Some(path),
                warnings,
            })
        }
        None => {
            log::debug!("no config file in use, using defaults");
            Ok(LoadedConfig::default())
        }
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    fs::write(path, generate_default_config()).map_err(|err| ConfigError::IoError {
        source: err,
        path: path.to_string(),
    })
}

/// Commented configuration file matching the built-in defaults
pub fn generate_default_config() -> String {
    format!(
        r#"# lessonmark configuration file

[render]
# Class palette for generated HTML: "tailwind" or "plain"
theme = "tailwind"
# Show the language tag above fenced code blocks
show-code-language = true

[quiz]
# Submit recorded answers when a student leaves an unfinished quiz
submit-on-leave = true

[session]
# Where the signed-in session is saved
# storage-path = "{DEFAULT_SESSION_FILE}"
"#
    )
}
