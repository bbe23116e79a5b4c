//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wingkey_client::prelude::*;` to import all essential types.

// Errors
pub use crate::{ClientError, ClientResult};

// Client
pub use crate::{ApiClient, BestEffort, RequestPhase, Timeouts};

// Wire types
pub use crate::{AnalyzeRequest, ConversationSummary, SentMessage};
