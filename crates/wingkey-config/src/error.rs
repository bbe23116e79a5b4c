use std::io;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read config file {path}: {source}")]
    ReadError {
        /// File that failed.
        path: String,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// A config file (or the merged tree) is not valid TOML for [`Config`](crate::Config).
    #[error("cannot parse config {path}: {source}")]
    ParseError {
        /// File that failed, or a `<...>` marker for in-memory layers.
        path: String,
        /// TOML cause.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or malformed.
    #[error("invalid value for '{field}': {message}")]
    ValidationError {
        /// Dotted field path, e.g. `backend.url`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The user's home directory could not be located.
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
