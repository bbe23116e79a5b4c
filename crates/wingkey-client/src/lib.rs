//! Wingkey Client - Signed access to the Wingkey suggestion backend.
//!
//! This crate provides:
//! - [`ApiClient`], which fetches conversation context, requests signed
//!   analyses and records sent messages
//! - Wire types with lenient decoding of the conversation list
//! - [`RequestPhase`], the lifecycle of a "get a suggestion" action
//! - [`BestEffort`] dispatch for tracking calls whose failures must never
//!   reach the user
//!
//! # Example
//!
//! ```no_run
//! use wingkey_client::{AnalyzeRequest, ApiClient};
//! use wingkey_crypto::{FragmentedKeySource, RequestSigner};
//! use wingkey_suggest::Tone;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = FragmentedKeySource::split(&[7u8; 32], 3, &[0x5a])?;
//! let client = ApiClient::new("https://api.example.com", RequestSigner::new(source))?;
//!
//! let request = AnalyzeRequest::new("Oi! Curti suas fotos da praia", Tone::Flirty);
//! for suggestion in client.suggest(&request, Some("token")).await? {
//!     println!("{suggestion}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod best_effort;
mod client;
mod error;
mod phase;
mod types;

pub use best_effort::BestEffort;
pub use client::{
    ANALYZE_PATH, ApiClient, CONTEXT_PATH, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    SEND_MESSAGE_PATH, Timeouts,
};
pub use error::{ClientError, ClientResult};
pub use phase::RequestPhase;
pub use types::{AnalyzeRequest, ConversationSummary, SentMessage, UNKNOWN_MATCH_NAME};
