//! Wingkey Crypto - Request signing for the Wingkey suggestion client.
//!
//! This crate provides:
//! - A pluggable [`KeySource`] that reassembles the signing seed on demand,
//!   with a fragmented, XOR-masked on-device implementation
//! - A [`RequestSigner`] that turns a request body into a [`SignedEnvelope`]
//!   and wipes every byte of key material before returning
//! - The canonical message format shared with the backend verifier
//!
//! # Example
//!
//! ```
//! use wingkey_crypto::{FragmentedKeySource, RequestSigner};
//!
//! let seed = [7u8; 32];
//! let source = FragmentedKeySource::split(&seed, 3, &[0x5a, 0xa5]).unwrap();
//! let signer = RequestSigner::new(source);
//!
//! let body = br#"{"text":"oi","tone":"casual"}"#;
//! let envelope = signer.sign(body).unwrap();
//!
//! let public_key = signer.public_key().unwrap();
//! assert!(envelope.verify(body, &public_key).is_ok());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod digest;
mod envelope;
mod error;
mod key_source;
mod public_key;
mod signature;
mod signer;

pub use digest::BodyDigest;
pub use envelope::{
    CanonicalMessage, HEADER_NONCE, HEADER_SIGNATURE, HEADER_TIMESTAMP, NONCE_LEN, Nonce,
    REPLAY_WINDOW_SECS, SignedEnvelope, unix_now,
};
pub use error::{CryptoError, CryptoResult, KeyAssemblyError};
pub use key_source::{CHECKSUM_LEN, FragmentedKeySource, KeySource, SEED_LEN, seed_checksum};
pub use public_key::PublicKey;
pub use signature::{SIGNATURE_LEN, Signature};
pub use signer::RequestSigner;
