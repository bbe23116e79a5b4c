//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wingkey_crypto::prelude::*;` to import all essential types.

// Errors
pub use crate::{CryptoError, CryptoResult, KeyAssemblyError};

// Key material
pub use crate::{FragmentedKeySource, KeySource, PublicKey};

// Signing
pub use crate::{RequestSigner, Signature, SignedEnvelope};
