//! # Configuration Management
//!
//! Centralized configuration for the PoC generator.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()`
//!
//! Command-line flags are applied on top by the binary.

use crate::catalog::TargetRelease;
use crate::error::{constants, PocError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Prefix of every default output file name (`poc-<scenario>.<ext>`).
pub const DEFAULT_FILE_PREFIX: &str = "poc";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GeneratorConfig {
    /// Where generated files land
    #[serde(default)]
    pub output: OutputConfig,

    /// Which pngcheck release to target
    #[serde(default)]
    pub target: TargetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| PocError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| PocError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| PocError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `PNGCHECK_POC_*` environment overrides on top of `self`
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(dir) = std::env::var("PNGCHECK_POC_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(dir);
        }

        if let Ok(release) = std::env::var("PNGCHECK_POC_TARGET") {
            self.target.release = release.parse()?;
        }

        if let Ok(level) = std::env::var("PNGCHECK_POC_LOG_LEVEL") {
            self.logging.log_level = level.parse().map_err(|_| {
                PocError::ConfigError(format!("Invalid log level in PNGCHECK_POC_LOG_LEVEL: {level}"))
            })?;
        }

        Ok(self)
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PocError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Output location configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving default-named files
    pub directory: PathBuf,

    /// Prefix of default file names
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: String::from(DEFAULT_FILE_PREFIX),
        }
    }
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.directory.as_os_str().is_empty() {
            errors.push("Output directory cannot be empty".to_string());
        }

        if self.file_prefix.is_empty() {
            errors.push("File prefix cannot be empty".to_string());
        } else if self
            .file_prefix
            .chars()
            .any(|c| std::path::is_separator(c) || c.is_control())
        {
            errors.push(format!(
                "File prefix must be a plain name: '{}'",
                self.file_prefix
            ));
        }

        errors
    }
}

/// Target selection configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
pub struct TargetConfig {
    /// pngcheck release whose scenario set is used
    #[serde(with = "release_serde")]
    pub release: TargetRelease,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level. `warn` by default so a successful run prints only its report.
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to emit ANSI colour codes (default: only when stderr is a terminal)
    pub ansi: bool,

    /// Whether to print the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: Level::WARN,
            ansi: std::io::stderr().is_terminal(),
            with_target: false,
        }
    }
}

/// Helper module for TargetRelease serialization/deserialization
mod release_serde {
    use crate::catalog::TargetRelease;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(release: &TargetRelease, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        release.as_str().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<TargetRelease, D::Error>
    where
        D: Deserializer<'de>,
    {
        let release = String::deserialize(deserializer)?;
        release
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid pngcheck release: {release}")))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
