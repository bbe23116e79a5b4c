//! Subcommand implementations.

pub(crate) mod config;
pub(crate) mod conversations;
pub(crate) mod keys;
pub(crate) mod parse;
pub(crate) mod sent;
pub(crate) mod suggest;

use std::io::Read;

use anyhow::Context;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// Colored, human-readable.
    Pretty,
    /// One JSON document, for scripts.
    Json,
}

impl OutputFormat {
    /// Interpret the global `--output` flag. Anything but `json` is pretty.
    pub(crate) fn from_flag(flag: &str) -> Self {
        if flag.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Use `arg` unless it is absent or `-`, in which case read stdin.
pub(crate) fn text_or_stdin(arg: Option<String>) -> anyhow::Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf)
        },
    }
}
