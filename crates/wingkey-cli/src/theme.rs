//! Terminal styling for command output.
//!
//! Everything here returns a `String`; callers decide between stdout and
//! stderr. `colored` drops the escapes when output is not a terminal.

use colored::Colorize;
use wingkey_client::RequestPhase;

/// Width of [`Theme::separator`].
const SEPARATOR_WIDTH: usize = 48;

/// Output styles shared by every command.
pub(crate) struct Theme;

impl Theme {
    /// Section title.
    pub(crate) fn header(text: &str) -> String {
        text.bold().cyan().to_string()
    }

    /// Completed action.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {text}", "✔".green().bold())
    }

    /// Failure the user must act on.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✘".red().bold(), text.red())
    }

    /// Something worked, but not as asked.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "⚠".yellow().bold(), text.yellow())
    }

    /// Neutral note.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {text}", "›".blue().bold())
    }

    /// Secondary detail.
    pub(crate) fn dimmed(text: &str) -> String {
        text.dimmed().to_string()
    }

    /// Horizontal rule under a header.
    pub(crate) fn separator() -> String {
        "─".repeat(SEPARATOR_WIDTH).dimmed().to_string()
    }

    /// `label: value` line with a bold label.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {value}", key.bold())
    }

    /// One-based numbered suggestion.
    pub(crate) fn suggestion(index: usize, text: &str) -> String {
        format!("  {} {}", format!("{}.", index.saturating_add(1)).bold().cyan(), text)
    }

    /// Request phase, colored by outcome.
    pub(crate) fn phase(phase: RequestPhase) -> String {
        let label = phase.to_string();
        match phase {
            RequestPhase::Success => label.green().to_string(),
            RequestPhase::HttpError | RequestPhase::NetworkError | RequestPhase::Aborted => {
                label.red().to_string()
            },
            RequestPhase::Idle | RequestPhase::Signing | RequestPhase::Sent => {
                label.dimmed().to_string()
            },
        }
    }

    /// Conversation ID cut to its first eight characters.
    pub(crate) fn conversation_id(id: &str) -> String {
        id.get(..8).unwrap_or(id).cyan().to_string()
    }
}
