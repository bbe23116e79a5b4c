//! Wingkey Suggest - Turns free-form AI analysis into reply suggestions.
//!
//! The backend answers with an unstructured blob of text: some analysis, a
//! few labelled sections and, somewhere in there, the replies the user might
//! send. [`parse`] digs out at most three of them and never fails.
//!
//! # Example
//!
//! ```
//! use wingkey_suggest::parse;
//!
//! let suggestions = parse("1. Oi! 2. Como vai? 3. Bora?");
//! assert_eq!(suggestions.as_slice(), ["Oi!", "Como vai?", "Bora?"]);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod parser;
mod skip;
mod suggestions;
mod tone;

pub use parser::{Tier, parse, parse_with_tier};
pub use skip::{SKIP_PATTERNS, is_noise};
pub use suggestions::{FALLBACK_SUGGESTION, MAX_SUGGESTIONS, Suggestions};
pub use tone::{Tone, UnknownTone};
