//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wingkey_suggest::prelude::*;` to import all essential types.

pub use crate::{Suggestions, Tier, Tone, parse, parse_with_tier};
