//! Configuration types.
//!
//! These mirror, but do not depend on, the domain crates. The CLI converts
//! them at startup. Every section implements [`Default`] so that a bare
//! `[section]` header still yields a usable value.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for Wingkey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend endpoint.
    pub backend: BackendSection,
    /// Bearer token for authenticated calls.
    pub auth: AuthSection,
    /// Transport timeouts.
    pub timeouts: TimeoutsSection,
    /// Fragmented signing key material.
    pub signing: SigningSection,
    /// Log output.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// BackendSection
// ---------------------------------------------------------------------------

/// Where the suggestion backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Base URL; endpoint paths are appended to it.
    pub url: String,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthSection
// ---------------------------------------------------------------------------

/// User session credentials.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Bearer token. Usually supplied through `WINGKEY_TOKEN`.
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSection")
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl Serialize for AuthSection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuthSection", 1)?;
        state.serialize_field("has_token", &self.token.is_some())?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// TimeoutsSection
// ---------------------------------------------------------------------------

/// Transport timeouts, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsSection {
    /// Connection establishment.
    pub connect_secs: u64,
    /// Whole request.
    pub request_secs: u64,
}

impl Default for TimeoutsSection {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// SigningSection
// ---------------------------------------------------------------------------

/// Signing seed, stored as masked fragments.
///
/// Produced by `wingkey keys split`. None of these values is secret on its
/// own, but together they reconstruct the seed, so `Debug` and `Serialize`
/// only report counts.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SigningSection {
    /// Masked fragments, base64, in order.
    pub fragments: Vec<String>,
    /// Repeating XOR mask, hex.
    pub mask: String,
    /// First four bytes of the seed's SHA-256, hex.
    pub checksum: Option<String>,
}

impl SigningSection {
    /// Whether any key material is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.fragments.is_empty()
    }
}

impl std::fmt::Debug for SigningSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSection")
            .field("fragment_count", &self.fragments.len())
            .field("has_mask", &!self.mask.is_empty())
            .field("has_checksum", &self.checksum.is_some())
            .finish()
    }
}

impl Serialize for SigningSection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SigningSection", 3)?;
        state.serialize_field("fragment_count", &self.fragments.len())?;
        state.serialize_field("has_mask", &!self.mask.is_empty())?;
        state.serialize_field("has_checksum", &self.checksum.is_some())?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global level filter (`"trace"` through `"error"`).
    pub level: String,
    /// `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate directives, e.g. `["wingkey_client=debug", "hyper=warn"]`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_sections_take_defaults() {
        let config: Config = toml::from_str("[backend]\n[timeouts]\n").unwrap();
        assert_eq!(config.backend.url, "http://localhost:3000");
        assert_eq!(config.timeouts.connect_secs, 10);
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.signing.is_configured());
    }

    #[test]
    fn test_signing_section_parses() {
        let config: Config = toml::from_str(
            r#"
            [signing]
            fragments = ["AAAA", "BBBB"]
            mask = "5aa5"
            checksum = "01020304"
        "#,
        )
        .unwrap();
        assert_eq!(config.signing.fragments, ["AAAA", "BBBB"]);
        assert_eq!(config.signing.mask, "5aa5");
        assert_eq!(config.signing.checksum.as_deref(), Some("01020304"));
        assert!(config.signing.is_configured());
    }

    #[test]
    fn test_signing_debug_hides_material() {
        let section = SigningSection {
            fragments: vec!["c2VjcmV0LWZyYWdtZW50".to_owned()],
            mask: "deadbeef".to_owned(),
            checksum: Some("cafebabe".to_owned()),
        };
        let rendered = format!("{section:?}");
        assert!(!rendered.contains("c2VjcmV0LWZyYWdtZW50"));
        assert!(!rendered.contains("deadbeef"));
        assert!(!rendered.contains("cafebabe"));
        assert!(rendered.contains("fragment_count: 1"));
    }

    #[test]
    fn test_signing_serialize_hides_material() {
        let section = SigningSection {
            fragments: vec!["c2VjcmV0".to_owned()],
            mask: "deadbeef".to_owned(),
            checksum: None,
        };
        let json = serde_json::to_string(&section).unwrap();
        assert!(!json.contains("c2VjcmV0"));
        assert!(!json.contains("deadbeef"));
        assert!(json.contains("\"fragment_count\":1"));
    }

    #[test]
    fn test_auth_debug_and_serialize_hide_token() {
        let auth = AuthSection {
            token: Some("eyJhbGciOi.secret".to_owned()),
        };
        assert!(!format!("{auth:?}").contains("secret"));
        assert!(!serde_json::to_string(&auth).unwrap().contains("secret"));
    }
}
