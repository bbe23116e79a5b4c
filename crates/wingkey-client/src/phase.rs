//! Lifecycle of a suggestion request, as seen by the keyboard UI.

use std::fmt;

use crate::error::{ClientError, ClientResult};

/// Where a suggestion request currently is.
///
/// ```text
/// Idle -> Signing -> Sent -> Success | HttpError | NetworkError
///            \-> Aborted
/// ```
///
/// Every terminal phase returns the UI to `Idle` for the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPhase {
    /// Nothing in flight.
    Idle,
    /// Key reassembly and signing.
    Signing,
    /// Request on the wire, waiting for the backend.
    Sent,
    /// A usable analysis came back.
    Success,
    /// The backend answered, but not with a usable analysis.
    HttpError,
    /// No answer: timeout or transport failure.
    NetworkError,
    /// The request was never sent.
    Aborted,
}

impl RequestPhase {
    /// Whether this phase ends a request.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::HttpError | Self::NetworkError | Self::Aborted
        )
    }

    /// The terminal phase matching a finished request.
    #[must_use]
    pub fn outcome<T>(result: &ClientResult<T>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(
                ClientError::Http { .. }
                | ClientError::EmptyResponse
                | ClientError::InvalidResponse(_),
            ) => Self::HttpError,
            Err(ClientError::Network(_)) => Self::NetworkError,
            Err(
                ClientError::KeyAssembly(_)
                | ClientError::InvalidHeader(_)
                | ClientError::Serialization(_)
                | ClientError::Client(_),
            ) => Self::Aborted,
        }
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Signing => "signing",
            Self::Sent => "sent",
            Self::Success => "success",
            Self::HttpError => "http_error",
            Self::NetworkError => "network_error",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
