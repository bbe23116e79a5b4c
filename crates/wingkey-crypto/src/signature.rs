//! Ed25519 request signatures.
//!
//! On the wire a signature travels as standard padded base64 in the
//! `X-Signature` header; that is also its `Display` and serde form.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ed25519_dalek::Signature as DalekSignature;
use serde::Serialize;

use crate::error::{CryptoError, CryptoResult};

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// A detached signature over a canonical message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Header form: standard alphabet, padded.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse the header form.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidBase64Encoding`] for malformed base64 and
    /// [`CryptoError::InvalidSignatureLength`] when it does not decode to
    /// exactly 64 bytes.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| CryptoError::InvalidBase64Encoding)?;
        let bytes = <[u8; SIGNATURE_LEN]>::try_from(decoded.as_slice()).map_err(|_| {
            CryptoError::InvalidSignatureLength {
                expected: SIGNATURE_LEN,
                actual: decoded.len(),
            }
        })?;
        Ok(Self(bytes))
    }

    pub(crate) fn to_dalek(self) -> DalekSignature {
        DalekSignature::from_bytes(&self.0)
    }
}

impl From<DalekSignature> for Signature {
    fn from(sig: DalekSignature) -> Self {
        Self(sig.to_bytes())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, ..] = self.0;
        write!(f, "Signature({a:02x}{b:02x}{c:02x}{d:02x}..)")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn sample() -> Signature {
        Signature::from(SigningKey::from_bytes(&[7u8; 32]).sign(b"message"))
    }

    #[test]
    fn test_base64_is_padded_standard() {
        let b64 = sample().to_base64();
        // 64 bytes -> 88 chars with two padding bytes.
        assert_eq!(b64.len(), 88);
        assert!(b64.ends_with("=="));
        assert_eq!(Signature::from_base64(&b64).unwrap(), sample());
    }

    #[test]
    fn test_from_base64_checks_length() {
        let short = STANDARD.encode([0u8; 63]);
        assert!(matches!(
            Signature::from_base64(&short),
            Err(CryptoError::InvalidSignatureLength {
                expected: 64,
                actual: 63
            })
        ));
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(matches!(
            Signature::from_base64("not base64!"),
            Err(CryptoError::InvalidBase64Encoding)
        ));
    }

    #[test]
    fn test_debug_is_abbreviated() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.starts_with("Signature("));
        assert!(rendered.len() < 24);
    }

    #[test]
    fn test_serializes_as_header_value() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, format!("\"{}\"", sample().to_base64()));
    }
}
