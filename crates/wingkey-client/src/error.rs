//! Client error types.

use thiserror::Error;
use wingkey_crypto::CryptoError;

/// Errors returned by the result-bearing client operations.
///
/// The tracking call ([`ApiClient::send_message`](crate::ApiClient::send_message))
/// never returns these to its caller; see [`BestEffort`](crate::BestEffort).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be signed, so it was not sent.
    #[error("request not sent: {0}")]
    KeyAssembly(#[from] CryptoError),

    /// Transport failure: timeout, refused connection, broken stream.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A 2xx analysis response with a missing or empty `analysis`.
    #[error("backend returned no analysis")]
    EmptyResponse,

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A token could not be encoded as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ClientError {
    /// Map a transport error, keeping timeouts recognisable.
    pub(crate) fn network(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network(format!("timed out: {e}"))
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {e}"))
        } else {
            Self::Network(e.to_string())
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// The client never retries on its own; this is for callers layering a
    /// retry policy on top.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::KeyAssembly(_)
            | Self::EmptyResponse
            | Self::InvalidResponse(_)
            | Self::InvalidHeader(_)
            | Self::Serialization(_)
            | Self::Client(_) => false,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
