//! Wingkey Telemetry - Logging setup for the Wingkey tools.
//!
//! This crate provides:
//! - [`LogConfig`] with level, format, per-target directives, color and
//!   timestamps
//! - [`setup_logging`], which installs a `tracing` subscriber writing to stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use wingkey_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), wingkey_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("wingkey_client=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_logging};
