//! Reply tones offered by the keyboard.
//!
//! The set is closed: adding a tone means adding a variant, and every lookup
//! below is an exhaustive `match`, so a missing entry is a compile error
//! rather than a silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tone requested for generated replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Relaxed, everyday small talk.
    #[default]
    Casual,
    /// Playful with romantic interest.
    Flirty,
    /// Light and humorous.
    Funny,
    /// Warm and affectionate.
    Romantic,
    /// Confident, takes the initiative.
    Bold,
    /// Straight to the point.
    Direct,
}

/// Returned when a tone name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tone '{0}'")]
pub struct UnknownTone(pub String);

impl Tone {
    /// Every tone, in menu order.
    pub const ALL: [Tone; 6] = [
        Tone::Casual,
        Tone::Flirty,
        Tone::Funny,
        Tone::Romantic,
        Tone::Bold,
        Tone::Direct,
    ];

    /// The value sent to the backend.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Flirty => "flirty",
            Tone::Funny => "funny",
            Tone::Romantic => "romantic",
            Tone::Bold => "bold",
            Tone::Direct => "direct",
        }
    }

    /// The label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Tone::Casual => "Casual",
            Tone::Flirty => "Flertante",
            Tone::Funny => "Engraçado",
            Tone::Romantic => "Romântico",
            Tone::Bold => "Ousado",
            Tone::Direct => "Direto",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Tone {
    type Err = UnknownTone;

    /// Accepts the wire value or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|t| t.as_wire() == needle || t.label().to_lowercase() == needle)
            .ok_or_else(|| UnknownTone(s.to_owned()))
    }
}
