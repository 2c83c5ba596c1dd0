//! # Error Types
//!
//! Error handling for the PoC generator.
//!
//! The writer itself performs no semantic validation, so the error surface is
//! small: an unknown selection, an unwritable destination, and the handful of
//! ambient failures (configuration, compression, argument parsing).
//!
//! ## Error Categories
//! - **Selection Errors**: unknown scenario or release names
//! - **I/O Errors**: destination path cannot be created or written
//! - **Encoding Errors**: payload too large for the 4-byte length field
//! - **Configuration Errors**: unreadable or invalid TOML configuration
//!
//! ## Example Usage
//! ```rust
//! use pngcheck_poc::catalog::TargetRelease;
//! use pngcheck_poc::error::PocError;
//!
//! match TargetRelease::V3_0_1.find("nope") {
//!     Err(PocError::UnknownScenario { choices, .. }) => assert!(choices.contains(&"loop")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Selection errors
    pub const ERR_MISSING_SELECTION: &str = "No scenario selected (expected a name or 'all')";
    pub const ERR_TOO_MANY_SELECTIONS: &str = "Exactly one scenario name (or 'all') is expected";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
}

// PocError is the primary error type for all generator operations
#[derive(Error, Debug)]
pub enum PocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Unknown scenario '{name}' for pngcheck {release} (valid choices: {})",
        choices.join(", ")
    )]
    UnknownScenario {
        name: String,
        release: String,
        choices: Vec<&'static str>,
    },

    #[error("Unknown pngcheck release '{0}' (valid choices: 2.4.0, 3.0.0, 3.0.1)")]
    UnknownRelease(String),

    #[error("Chunk payload too large: {0} bytes")]
    OversizedChunk(usize),

    #[error("Compression failed")]
    CompressionFailure,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Usage error: {0}")]
    Usage(String),
}

impl PocError {
    /// True for errors caused by the caller's selection or arguments rather
    /// than by the environment.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            PocError::UnknownScenario { .. } | PocError::UnknownRelease(_) | PocError::Usage(_)
        )
    }
}

/// Type alias for Results using PocError
pub type Result<T> = std::result::Result<T, PocError>;
