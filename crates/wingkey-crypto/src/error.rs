//! Cryptographic error types.

use thiserror::Error;

/// Reasons the signing seed could not be reassembled from its key source.
///
/// Any of these is fatal for the request being signed: the request must not
/// be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyAssemblyError {
    /// The reassembled seed has the wrong length.
    #[error("reassembled seed has wrong length: expected {expected}, got {actual}")]
    WrongLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// The key source holds no fragments at all.
    #[error("key source holds no fragments")]
    NoFragments,

    /// A stored fragment is empty or could not be decoded.
    #[error("fragment {index} is corrupt")]
    CorruptFragment {
        /// Position of the fragment in storage order.
        index: usize,
    },

    /// The obfuscation mask is empty or could not be decoded.
    #[error("fragment mask is empty or malformed")]
    EmptyMask,

    /// The reassembled seed does not match its stored checksum.
    #[error("reassembled seed failed its checksum")]
    ChecksumMismatch,
}

/// Errors from signing and envelope handling.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signing key material could not be reconstructed.
    #[error("key assembly failed: {0}")]
    KeyAssembly(#[from] KeyAssemblyError),

    /// A decoded signature is not 64 bytes.
    #[error("signature must be {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// The `X-Signature` value is not base64.
    #[error("signature is not valid base64")]
    InvalidBase64Encoding,

    /// The `X-Nonce` value is not 32 hex characters.
    #[error("malformed nonce: {0}")]
    MalformedNonce(String),

    /// The public key bytes are not a valid Ed25519 point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signature does not match the message and key.
    #[error("signature verification failed")]
    SignatureVerificationFailed,

    /// The system clock reads before the Unix epoch.
    #[error("system clock is before the Unix epoch")]
    ClockBeforeEpoch,
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
