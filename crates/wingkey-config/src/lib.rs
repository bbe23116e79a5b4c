#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for Wingkey.
//!
//! # Usage
//!
//! ```rust,no_run
//! use wingkey_config::Config;
//!
//! let resolved = Config::load().unwrap();
//! println!("backend: {}", resolved.config.backend.url);
//! ```
//!
//! # Precedence
//!
//! From highest to lowest:
//!
//! 1. **Explicit file** passed with `--config`
//! 2. **User** (`~/.wingkey/config.toml`)
//! 3. **Environment variables** (`WINGKEY_*`), for fields no file set
//! 4. **Embedded defaults** (`defaults.toml`)
//!
//! This crate depends on no other wingkey crate. The CLI turns these types
//! into a key source, an API client and a log configuration at startup.

/// Environment variable fallbacks.
pub mod env;
/// Configuration error types.
pub mod error;
/// File discovery and layered loading.
pub mod loader;
/// Layer merging with source tracking.
pub mod merge;
/// Annotated display of the resolved configuration.
pub mod show;
/// Configuration struct definitions.
pub mod types;
/// Validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::LoadOptions;
pub use merge::ConfigLayer;
pub use show::{ResolvedConfig, ShowFormat};
pub use types::*;

impl Config {
    /// Load from the default locations.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any file is malformed or the result fails
    /// validation.
    pub fn load() -> ConfigResult<ResolvedConfig> {
        loader::load(&LoadOptions::default())
    }

    /// Load with explicit locations.
    ///
    /// # Errors
    ///
    /// See [`loader::load`].
    pub fn load_with(options: &LoadOptions) -> ConfigResult<ResolvedConfig> {
        loader::load(options)
    }

    /// Load a single file with no layering.
    ///
    /// # Errors
    ///
    /// See [`loader::load_file`].
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
