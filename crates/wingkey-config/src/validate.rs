//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound for any timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Length of the hex seed checksum (four bytes).
const CHECKSUM_HEX_LEN: usize = 8;

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_backend(config)?;
    validate_timeouts(config)?;
    validate_signing(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_backend(config: &Config) -> ConfigResult<()> {
    let url = config.backend.url.trim();
    if url.is_empty() {
        return Err(invalid("backend.url", "must not be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(invalid(
            "backend.url",
            format!("'{url}' must start with http:// or https://"),
        ));
    }
    Ok(())
}

fn validate_timeouts(config: &Config) -> ConfigResult<()> {
    let t = &config.timeouts;
    for (field, value) in [
        ("timeouts.connect_secs", t.connect_secs),
        ("timeouts.request_secs", t.request_secs),
    ] {
        if value == 0 || value > MAX_TIMEOUT_SECS {
            return Err(invalid(
                field,
                format!("must be between 1 and {MAX_TIMEOUT_SECS} seconds"),
            ));
        }
    }
    if t.connect_secs > t.request_secs {
        return Err(invalid(
            "timeouts.connect_secs",
            "must not exceed timeouts.request_secs",
        ));
    }
    Ok(())
}

fn validate_signing(config: &Config) -> ConfigResult<()> {
    let s = &config.signing;
    if !s.is_configured() {
        return Ok(());
    }
    if s.fragments.iter().any(|f| f.trim().is_empty()) {
        return Err(invalid("signing.fragments", "fragments must not be empty"));
    }
    if s.mask.trim().is_empty() || !is_hex(s.mask.trim()) {
        return Err(invalid(
            "signing.mask",
            "must be a non-empty, even-length hex string",
        ));
    }
    if let Some(checksum) = &s.checksum
        && (checksum.trim().len() != CHECKSUM_HEX_LEN || !is_hex(checksum.trim()))
    {
        return Err(invalid(
            "signing.checksum",
            format!("must be {CHECKSUM_HEX_LEN} hex characters"),
        ));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        ));
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        ));
    }

    Ok(())
}

fn is_hex(s: &str) -> bool {
    s.len().is_multiple_of(2) && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_backend_url_scheme() {
        let mut config = Config::default();
        config.backend.url = "ftp://example.com".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "backend.url");

        config.backend.url = "   ".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "backend.url");

        config.backend.url = "https://api.example.com/".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.timeouts.request_secs = 0;
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "timeouts.request_secs"
        );

        let mut config = Config::default();
        config.timeouts.connect_secs = 45;
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "timeouts.connect_secs"
        );
    }

    #[test]
    fn test_signing_requires_mask_when_fragments_present() {
        let mut config = Config::default();
        config.signing.fragments = vec!["AAAA".to_owned()];
        assert_eq!(field_of(validate(&config).unwrap_err()), "signing.mask");

        config.signing.mask = "xyz1".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "signing.mask");

        config.signing.mask = "5aa5".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_signing_checksum_shape() {
        let mut config = Config::default();
        config.signing.fragments = vec!["AAAA".to_owned()];
        config.signing.mask = "5a".to_owned();
        config.signing.checksum = Some("0102".to_owned());
        assert_eq!(field_of(validate(&config).unwrap_err()), "signing.checksum");

        config.signing.checksum = Some("0a0b0c0d".to_owned());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level_and_format() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.level");

        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.format");
    }
}
