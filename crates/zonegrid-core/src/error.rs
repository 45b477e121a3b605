//! Error types for input loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for input loading.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for config parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading a submission or the AZ map.
///
/// Any of these aborts the whole run before a region is processed.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no *{suffix} file found in {dir}")]
    NoInput { dir: PathBuf, suffix: String },
}

/// Errors raised while reading `zonegrid.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown output format: {0} (expected dot, png or svg)")]
    UnknownFormat(String),

    #[error("layout.max_zones must be at least 1")]
    ZeroMaxZones,
}
