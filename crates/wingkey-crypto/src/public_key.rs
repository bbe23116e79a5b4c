//! The verifying half of the request-signing key pair.
//!
//! Only this key is ever registered with the backend; the seed it is derived
//! from never leaves the device.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ed25519_dalek::{Verifier, VerifyingKey};
use serde::Serialize;

use crate::error::{CryptoError, CryptoResult};
use crate::signature::Signature;

/// Bytes of the key shown as its short identifier.
const KEY_ID_LEN: usize = 8;

/// An Ed25519 verifying key, as registered with the backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Wrap raw key bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Short identifier for logs: the first eight bytes, hex.
    #[must_use]
    pub fn key_id_hex(&self) -> String {
        hex::encode(self.0.get(..KEY_ID_LEN).unwrap_or_default())
    }

    /// Full key, hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Full key, standard padded base64 (the registration form).
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Check `signature` over `message`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidPublicKey`] if the bytes are not a curve point,
    /// [`CryptoError::SignatureVerificationFailed`] if the signature does
    /// not match.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> CryptoResult<()> {
        let key = VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        key.verify(message, &signature.to_dalek())
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.key_id_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair(seed: u8) -> (SigningKey, PublicKey) {
        let signing = SigningKey::from_bytes(&[seed; 32]);
        let public = PublicKey::from_bytes(signing.verifying_key().to_bytes());
        (signing, public)
    }

    #[test]
    fn test_encodings() {
        let pk = PublicKey::from_bytes([0xab; 32]);
        assert_eq!(pk.to_hex(), "ab".repeat(32));
        assert_eq!(pk.key_id_hex(), "ab".repeat(KEY_ID_LEN));
        assert_eq!(STANDARD.decode(pk.to_base64()).unwrap(), vec![0xab; 32]);
        assert_eq!(format!("{pk:?}"), format!("PublicKey({})", "ab".repeat(8)));
    }

    #[test]
    fn test_verify() {
        let (signing, public) = keypair(7);
        let sig = Signature::from(signing.sign(b"message"));

        assert!(public.verify(b"message", &sig).is_ok());
        assert!(matches!(
            public.verify(b"messagf", &sig),
            Err(CryptoError::SignatureVerificationFailed)
        ));

        let (_, other) = keypair(8);
        assert!(other.verify(b"message", &sig).is_err());
    }

    #[test]
    fn test_serde_uses_base64() {
        let (_, public) = keypair(1);
        let json = serde_json::to_string(&public).unwrap();
        assert_eq!(json, format!("\"{}\"", public.to_base64()));
    }
}
