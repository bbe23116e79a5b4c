//! Request signer.
//!
//! Every call to [`RequestSigner::sign`] reassembles the seed, derives an
//! Ed25519 key, signs one canonical message and wipes all of it before
//! returning. No key material is cached between calls.

use ed25519_dalek::{Signer, SigningKey};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::envelope::{CanonicalMessage, Nonce, SignedEnvelope, unix_now};
use crate::error::{CryptoResult, KeyAssemblyError};
use crate::key_source::{KeySource, SEED_LEN};
use crate::public_key::PublicKey;
use crate::signature::Signature;

/// Signs outgoing request bodies with a seed borrowed from a [`KeySource`].
pub struct RequestSigner {
    source: Box<dyn KeySource>,
}

impl RequestSigner {
    /// Create a signer backed by `source`.
    #[must_use]
    pub fn new(source: impl KeySource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Sign a request body with the current time and a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyAssembly`](crate::CryptoError::KeyAssembly)
    /// if the seed cannot be reassembled. The request must not be sent in
    /// that case.
    pub fn sign(&self, body: &[u8]) -> CryptoResult<SignedEnvelope> {
        let timestamp = unix_now()?;
        let nonce = Nonce::generate();
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        self.sign_with(body, timestamp, &nonce, &mut seed)
    }

    /// Sign with an explicit timestamp, nonce and scratch seed buffer.
    ///
    /// `seed` receives the reassembled seed while the signature is computed
    /// and is all zeros again when this returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// Same as [`sign`](Self::sign).
    pub fn sign_with(
        &self,
        body: &[u8],
        timestamp: u64,
        nonce: &Nonce,
        seed: &mut [u8; SEED_LEN],
    ) -> CryptoResult<SignedEnvelope> {
        let message = CanonicalMessage::new(timestamp, nonce, body);
        let signed = self.sign_message(message.as_bytes(), seed);
        seed.zeroize();

        let signature = signed.inspect_err(|e| warn!(error = %e, "request signing failed"))?;
        debug!(timestamp, nonce = %nonce, "request signed");

        Ok(SignedEnvelope {
            signature: signature.to_base64(),
            timestamp: timestamp.to_string(),
            nonce: nonce.to_hex(),
        })
    }

    /// Derive the public key to register with the backend.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyAssembly`](crate::CryptoError::KeyAssembly)
    /// if the seed cannot be reassembled.
    pub fn public_key(&self) -> CryptoResult<PublicKey> {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        self.load_seed(&mut seed)?;
        let signing_key = SigningKey::from_bytes(&seed);
        Ok(PublicKey::from_bytes(signing_key.verifying_key().to_bytes()))
    }

    /// Reassemble into `seed` and sign. `SigningKey` zeroizes itself on drop;
    /// the caller wipes `seed`.
    fn sign_message(&self, message: &[u8], seed: &mut [u8; SEED_LEN]) -> CryptoResult<Signature> {
        self.load_seed(seed)?;
        let signing_key = SigningKey::from_bytes(seed);
        Ok(Signature::from(signing_key.sign(message)))
    }

    fn load_seed(&self, seed: &mut [u8; SEED_LEN]) -> CryptoResult<()> {
        let assembled = self.source.reconstruct()?;
        if assembled.len() != SEED_LEN {
            return Err(KeyAssemblyError::WrongLength {
                expected: SEED_LEN,
                actual: assembled.len(),
            }
            .into());
        }
        seed.copy_from_slice(&assembled);
        Ok(())
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}
