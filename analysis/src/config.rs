//! Tool configuration.
//!
//! Defines the YAML-serializable configuration shared by the CLI
//! subcommands. Every section and field is optional; command-line flags
//! override whatever the file provides.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! analyze:
//!   log_dir: exploration-logs
//!   min_confidence: 0.7
//! validate:
//!   strict: false
//! generate:
//!   name: generated-fixtures
//!   output: fixtures.json
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::confidence::DEFAULT_MIN_CONFIDENCE;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = ".explore-fixtures.yml";

/// Directory scanned for exploration logs by default.
pub const DEFAULT_LOG_DIR: &str = "exploration-logs";

/// Name given to generated fixtures by default.
pub const DEFAULT_FIXTURE_NAME: &str = "generated-fixtures";

/// Errors raised while loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    InvalidValue(String),
}

/// Settings for log analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Directory containing exploration log JSON files.
    pub log_dir: PathBuf,
    /// Values below this source confidence (0.0–1.0) become suggestions.
    pub min_confidence: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Settings for fixture validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Treat warnings as errors.
    pub strict: bool,
}

/// Settings for fixture generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub name: String,
    /// Where generated fixtures are written; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_FIXTURE_NAME.to_string(),
            output: None,
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use explore_fixtures_analysis::config::ToolConfig;
///
/// let config: ToolConfig = serde_yaml::from_str("analyze:\n  min_confidence: 0.9\n").unwrap();
/// assert_eq!(config.analyze.min_confidence, 0.9);
/// assert_eq!(config.analyze.log_dir.to_str(), Some("exploration-logs"));
/// assert!(!config.validate.strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub analyze: AnalyzeConfig,
    pub validate: ValidateConfig,
    pub generate: GenerateConfig,
}

impl ToolConfig {
    /// Loads and checks configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.check()?;
        Ok(config)
    }

    /// Loads `explicit` when given, otherwise [`DEFAULT_CONFIG_FILE`] in
    /// `cwd` if it exists, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using configuration file");
            return Self::load(candidate);
        }
        Ok(Self::default())
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Rejects out-of-range values.
    pub fn check(&self) -> Result<(), ConfigError> {
        let min = self.analyze.min_confidence;
        if !(0.0..=1.0).contains(&min) {
            return Err(ConfigError::InvalidValue(format!(
                "analyze.min_confidence must be between 0.0 and 1.0, got {min}"
            )));
        }
        if self.generate.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "generate.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
