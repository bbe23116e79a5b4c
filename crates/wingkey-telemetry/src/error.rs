//! Telemetry error types.

use thiserror::Error;

/// Why a subscriber could not be installed.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A level or directive is not valid `EnvFilter` syntax.
    #[error("invalid log filter '{input}': {reason}")]
    InvalidFilter {
        /// The offending level or directive.
        input: String,
        /// Parser message.
        reason: String,
    },

    /// A format name is not one of `pretty`, `compact`, `json`, `full`.
    #[error("unknown log format '{0}'")]
    UnknownFormat(String),

    /// Another global subscriber is already set.
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
