//! Configuration error type.
//!
//! Every other crate defines its own error enum; this one covers loading and
//! validating [`StoreConfig`](crate::StoreConfig).  All variants are fatal at
//! startup; a running store never sees them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing configuration value {0}")]
    Missing(&'static str),

    #[error("configuration value {key} must be a positive integer, got {value}")]
    NonPositive { key: &'static str, value: i64 },

    #[error("configuration value {key} = {value} is out of range")]
    OutOfRange { key: &'static str, value: i64 },

    #[error("no config files found in {0}")]
    NoConfigFiles(PathBuf),
}

/// Shorthand result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
