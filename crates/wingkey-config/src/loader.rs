//! Config file discovery and layered loading.
//!
//! 1. Parse the embedded `defaults.toml`
//! 2. Merge `~/.wingkey/config.toml`
//! 3. Merge the explicit `--config` file, if any
//! 4. Apply `WINGKEY_*` fallbacks for fields no file set
//! 5. Deserialize and validate

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_fallbacks, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_leaves};
use crate::show::ResolvedConfig;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum accepted config file size (64 KiB).
const MAX_CONFIG_FILE_SIZE: u64 = 65_536;

/// Where to look for configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Directory holding the user `config.toml`. `None` uses `~/.wingkey`.
    pub user_dir: Option<PathBuf>,
    /// File given on the command line. Unlike the user file it must exist.
    pub explicit_file: Option<PathBuf>,
    /// Skip the process environment (tests).
    pub ignore_env: bool,
}

/// Load configuration with full layering.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file is unreadable or malformed, if the
/// explicit file is missing, or if the merged result fails validation.
pub fn load(options: &LoadOptions) -> ConfigResult<ResolvedConfig> {
    let mut merged: toml::Value =
        toml::from_str(DEFAULTS_TOML).map_err(|e| ConfigError::ParseError {
            path: "<embedded defaults>".to_owned(),
            source: e,
        })?;

    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();
    record_leaves(&merged, "", ConfigLayer::Defaults, &mut field_sources);

    let user_path = match &options.user_dir {
        Some(dir) => dir.join("config.toml"),
        None => default_user_dir()?.join("config.toml"),
    };
    if let Some(overlay) = try_load_file(&user_path)? {
        deep_merge_tracking(&mut merged, &overlay, "", ConfigLayer::User, &mut field_sources);
        loaded_files.push(user_path.display().to_string());
        info!(path = %user_path.display(), "loaded user config");
    }

    if let Some(path) = &options.explicit_file {
        let overlay = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        deep_merge_tracking(&mut merged, &overlay, "", ConfigLayer::Explicit, &mut field_sources);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded explicit config");
    }

    if !options.ignore_env {
        let env_vars = collect_env_vars();
        let applied = apply_env_fallbacks(&mut merged, &mut field_sources, &env_vars);
        if applied > 0 {
            debug!(count = applied, "applied environment variable fallbacks");
        }
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a single file with no layering.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file is missing, unreadable, malformed
/// or invalid.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    let value = try_load_file(path)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;
    let config: Config = value
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;
    validate::validate(&config)?;
    Ok(config)
}

/// `~/.wingkey`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDir`] when no home directory is known.
pub fn default_user_dir() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".wingkey"))
        .ok_or(ConfigError::NoHomeDir)
}

/// Read and parse `path`, or `None` if it does not exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            source: e,
        })
}
