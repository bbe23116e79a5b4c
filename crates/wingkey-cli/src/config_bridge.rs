//! Bridge from `wingkey_config::Config` to domain types.
//!
//! The config crate knows nothing about keys, HTTP or subscribers; this is
//! the single place where its plain sections become a [`RequestSigner`], an
//! [`ApiClient`] and a [`LogConfig`].

use std::time::Duration;

use anyhow::{Context, bail};
use wingkey_client::{ApiClient, Timeouts};
use wingkey_config::Config;
use wingkey_crypto::{FragmentedKeySource, RequestSigner};
use wingkey_telemetry::{LogConfig, LogFormat};

/// Convert the `[logging]` section.
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let format = cfg.logging.format.parse().unwrap_or(LogFormat::Compact);

    let mut log_config = LogConfig::new(&cfg.logging.level).with_format(format);

    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }

    log_config
}

/// Convert the `[timeouts]` section.
pub fn to_timeouts(cfg: &Config) -> Timeouts {
    Timeouts {
        connect: Duration::from_secs(cfg.timeouts.connect_secs),
        request: Duration::from_secs(cfg.timeouts.request_secs),
    }
}

/// Decode the `[signing]` section into a key source.
///
/// # Errors
///
/// Fails when no fragments are configured or they cannot be decoded.
pub fn to_key_source(cfg: &Config) -> anyhow::Result<FragmentedKeySource> {
    let signing = &cfg.signing;
    if !signing.is_configured() {
        bail!(
            "no signing key configured; run `wingkey keys split` and add the \
             [signing] block to your config, or set WINGKEY_SIGNING_FRAGMENTS \
             and WINGKEY_SIGNING_MASK"
        );
    }

    FragmentedKeySource::from_encoded(
        &signing.fragments,
        &signing.mask,
        signing.checksum.as_deref(),
    )
    .context("invalid [signing] configuration")
}

/// Build a signer from the `[signing]` section.
///
/// # Errors
///
/// See [`to_key_source`].
pub fn to_signer(cfg: &Config) -> anyhow::Result<RequestSigner> {
    Ok(RequestSigner::new(to_key_source(cfg)?))
}

/// Build the API client from `[backend]`, `[timeouts]` and `[signing]`.
///
/// # Errors
///
/// Fails when the signer cannot be built or the HTTP client fails to
/// initialise.
pub fn to_api_client(cfg: &Config) -> anyhow::Result<ApiClient> {
    let signer = to_signer(cfg)?;
    ApiClient::with_timeouts(&cfg.backend.url, signer, to_timeouts(cfg))
        .context("failed to create API client")
}

/// Pick the bearer token: the command-line flag wins over `[auth] token`.
/// Blank values count as absent.
pub fn resolve_token(flag: Option<&str>, cfg: &Config) -> Option<String> {
    flag.or(cfg.auth.token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingkey_crypto::KeySource;

    fn with_signing(seed: &[u8; 32]) -> Config {
        let source = FragmentedKeySource::split(seed, 3, &[0xc3, 0x3c]).unwrap();
        let mut cfg = Config::default();
        cfg.signing.fragments = source.encoded_fragments();
        cfg.signing.mask = source.mask_hex();
        cfg.signing.checksum = source.checksum_hex();
        cfg
    }

    #[test]
    fn test_to_log_config() {
        let mut cfg = Config::default();
        cfg.logging.level = "debug".to_owned();
        cfg.logging.format = "json".to_owned();
        cfg.logging.directives = vec!["wingkey_client=trace".to_owned()];

        let log = to_log_config(&cfg);
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.directives, vec!["wingkey_client=trace"]);
    }

    #[test]
    fn test_to_log_config_unknown_format_is_compact() {
        let mut cfg = Config::default();
        cfg.logging.format = "fancy".to_owned();
        assert_eq!(to_log_config(&cfg).format, LogFormat::Compact);
    }

    #[test]
    fn test_to_timeouts() {
        let mut cfg = Config::default();
        cfg.timeouts.connect_secs = 2;
        cfg.timeouts.request_secs = 15;
        let timeouts = to_timeouts(&cfg);
        assert_eq!(timeouts.connect, Duration::from_secs(2));
        assert_eq!(timeouts.request, Duration::from_secs(15));
    }

    #[test]
    fn test_key_source_round_trips_through_config() {
        let seed = [9u8; 32];
        let source = to_key_source(&with_signing(&seed)).unwrap();
        assert_eq!(source.reconstruct().unwrap().as_slice(), &seed);
    }

    #[test]
    fn test_missing_signing_is_an_error() {
        let err = to_key_source(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("no signing key configured"));
    }

    #[test]
    fn test_corrupt_signing_is_an_error() {
        let mut cfg = with_signing(&[1u8; 32]);
        cfg.signing.fragments[0] = "not base64!".to_owned();
        assert!(to_key_source(&cfg).is_err());
    }

    #[test]
    fn test_to_api_client_uses_backend_url() {
        let mut cfg = with_signing(&[5u8; 32]);
        cfg.backend.url = "https://api.example.com/".to_owned();
        let client = to_api_client(&cfg).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_resolve_token() {
        let mut cfg = Config::default();
        assert_eq!(resolve_token(None, &cfg), None);

        cfg.auth.token = Some("from-config".to_owned());
        assert_eq!(resolve_token(None, &cfg).as_deref(), Some("from-config"));
        assert_eq!(
            resolve_token(Some("from-flag"), &cfg).as_deref(),
            Some("from-flag")
        );
        assert_eq!(resolve_token(Some("  "), &cfg), None);
    }
}
