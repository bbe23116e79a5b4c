//! Signed request envelopes.
//!
//! An envelope is the `(signature, timestamp, nonce)` triple attached to an
//! outgoing request. The signature covers the canonical message
//! `timestamp|nonce|hex(sha256(body))`; the backend rebuilds the same string
//! from the headers and the received body to verify it.
//!
//! The backend also enforces freshness: envelopes more than
//! [`REPLAY_WINDOW_SECS`] away from server time are rejected, as is any
//! `(timestamp, nonce)` pair already seen inside that window. Timestamps are
//! whole seconds, which is fine-grained enough for a 30 second window.

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::BodyDigest;
use crate::error::{CryptoError, CryptoResult};
use crate::public_key::PublicKey;
use crate::signature::Signature;

/// Header carrying the base64 signature.
pub const HEADER_SIGNATURE: &str = "X-Signature";
/// Header carrying the decimal Unix timestamp.
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
/// Header carrying the hex nonce.
pub const HEADER_NONCE: &str = "X-Nonce";

/// Maximum distance, in seconds, between an envelope timestamp and server
/// time that the backend accepts.
pub const REPLAY_WINDOW_SECS: u64 = 30;

/// Separator between canonical message fields.
const SEPARATOR: char = '|';

/// Nonce length in bytes (128 bits).
pub const NONCE_LEN: usize = 16;

/// A 128-bit random request nonce.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Draw a fresh nonce from the operating system CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Encode as 32 lowercase hex characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the header form.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedNonce`] unless `s` is exactly
    /// `2 * NONCE_LEN` hex characters.
    pub fn from_hex(s: &str) -> CryptoResult<Self> {
        let mut bytes = [0u8; NONCE_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| CryptoError::MalformedNonce(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", self.to_hex())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Current Unix time in whole seconds.
///
/// # Errors
///
/// Returns [`CryptoError::ClockBeforeEpoch`] if the clock reads before 1970.
pub fn unix_now() -> CryptoResult<u64> {
    u64::try_from(chrono::Utc::now().timestamp()).map_err(|_| CryptoError::ClockBeforeEpoch)
}

/// The exact string that gets signed: `timestamp|nonce|hex(sha256(body))`.
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalMessage(String);

impl CanonicalMessage {
    /// Build the canonical message for an outgoing request.
    #[must_use]
    pub fn new(timestamp: u64, nonce: &Nonce, body: &[u8]) -> Self {
        Self::from_fields(&timestamp.to_string(), &nonce.to_hex(), body)
    }

    /// Rebuild the canonical message from header values as received.
    ///
    /// The fields are used verbatim, so a verifier reproduces the signed
    /// bytes exactly even if the timestamp has leading zeros.
    #[must_use]
    pub fn from_fields(timestamp: &str, nonce: &str, body: &[u8]) -> Self {
        let digest = BodyDigest::of(body);
        Self(format!("{timestamp}{SEPARATOR}{nonce}{SEPARATOR}{digest}"))
    }

    /// The message as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 bytes that are signed.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for CanonicalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalMessage({})", self.0)
    }
}

impl fmt::Display for CanonicalMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signature, timestamp and nonce for exactly one outgoing request.
///
/// Produced by [`RequestSigner`](crate::RequestSigner). Never reused and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Base64 Ed25519 signature over the canonical message.
    pub signature: String,
    /// Unix time in whole seconds, as a decimal string.
    pub timestamp: String,
    /// 32 lowercase hex characters.
    pub nonce: String,
}

impl SignedEnvelope {
    /// Header name/value pairs to attach to the request.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (HEADER_SIGNATURE, self.signature.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_NONCE, self.nonce.as_str()),
        ]
    }

    /// The canonical message this envelope claims to sign for `body`.
    #[must_use]
    pub fn canonical_message(&self, body: &[u8]) -> CanonicalMessage {
        CanonicalMessage::from_fields(&self.timestamp, &self.nonce, body)
    }

    /// Check the signature against `body` and a public key.
    ///
    /// Only the signature is checked. Freshness and nonce reuse are the
    /// backend's job.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is malformed or does not verify.
    pub fn verify(&self, body: &[u8], public_key: &PublicKey) -> CryptoResult<()> {
        let signature = Signature::from_base64(&self.signature)?;
        public_key.verify(self.canonical_message(body).as_bytes(), &signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_is_32_lowercase_hex() {
        let hex = Nonce::generate().to_hex();
        assert_eq!(hex.len(), 32);
        assert!(
            hex.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_nonces_differ() {
        let nonces: std::collections::HashSet<Nonce> = (0..256).map(|_| Nonce::generate()).collect();
        assert_eq!(nonces.len(), 256);
    }

    #[test]
    fn test_nonce_hex_roundtrip() {
        let nonce = Nonce::from_bytes([0xab; NONCE_LEN]);
        assert_eq!(Nonce::from_hex(&nonce.to_hex()).unwrap(), nonce);
        assert!(Nonce::from_hex("abcd").is_err());
        assert!(Nonce::from_hex("zz").is_err());
    }

    #[test]
    fn test_canonical_message_layout() {
        let nonce = Nonce::from_bytes([0u8; NONCE_LEN]);
        let message = CanonicalMessage::new(1_700_000_000, &nonce, b"abc");
        assert_eq!(
            message.as_str(),
            "1700000000|00000000000000000000000000000000|\
             ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_canonical_message_from_fields_matches_new() {
        let nonce = Nonce::generate();
        let body = br#"{"text":"oi","tone":"casual"}"#;
        assert_eq!(
            CanonicalMessage::new(42, &nonce, body),
            CanonicalMessage::from_fields("42", &nonce.to_hex(), body)
        );
    }

    #[test]
    fn test_headers_order_and_names() {
        let envelope = SignedEnvelope {
            signature: "sig".to_owned(),
            timestamp: "1".to_owned(),
            nonce: "n".to_owned(),
        };
        assert_eq!(
            envelope.headers(),
            [
                ("X-Signature", "sig"),
                ("X-Timestamp", "1"),
                ("X-Nonce", "n")
            ]
        );
    }

    #[test]
    fn test_unix_now_is_recent() {
        // 2023-11-14, well before any plausible test run.
        assert!(unix_now().unwrap() > 1_700_000_000);
    }
}
