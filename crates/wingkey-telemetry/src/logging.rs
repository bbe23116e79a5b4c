//! Subscriber installation.
//!
//! Events go to stderr so that command output on stdout stays clean for
//! pipes. Levels and per-target directives use `EnvFilter` syntax.

use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::{TelemetryError, TelemetryResult};

/// How each event is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human-readable.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
    /// The `tracing-subscriber` default layout.
    Full,
}

impl LogFormat {
    /// Every format, in documentation order.
    pub const ALL: [LogFormat; 4] = [
        LogFormat::Pretty,
        LogFormat::Compact,
        LogFormat::Json,
        LogFormat::Full,
    ];

    /// Name used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
            Self::Full => "full",
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TelemetryError::UnknownFormat(s.to_owned()))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Base filter, usually a bare level such as `"warn"`.
    pub level: String,
    /// Event layout.
    pub format: LogFormat,
    /// `target=level` overrides layered over `level`.
    pub directives: Vec<String>,
    /// Colored output. Defaults to whether stderr is a terminal.
    pub ansi: bool,
    /// Prefix each event with a timestamp.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: LogFormat::Compact,
            directives: Vec::new(),
            ansi: std::io::stderr().is_terminal(),
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Settings with the given base level and defaults otherwise.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Use `format`.
    #[must_use]
    pub fn with_format(self, format: LogFormat) -> Self {
        Self { format, ..self }
    }

    /// Append a `target=level` directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// No colors and no timestamps, for output that is captured or diffed.
    #[must_use]
    pub fn plain(self) -> Self {
        Self {
            ansi: false,
            timestamps: false,
            ..self
        }
    }

    fn filter(&self) -> TelemetryResult<EnvFilter> {
        let base = EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::InvalidFilter {
            input: self.level.clone(),
            reason: e.to_string(),
        })?;

        self.directives.iter().try_fold(base, |filter, raw| {
            let directive: Directive =
                raw.parse().map_err(|e: ParseError| TelemetryError::InvalidFilter {
                    input: raw.clone(),
                    reason: e.to_string(),
                })?;
            Ok(filter.add_directive(directive))
        })
    }

    fn stderr_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(self.ansi && self.format != LogFormat::Json);

        match (self.format, self.timestamps) {
            (LogFormat::Pretty, true) => layer.pretty().boxed(),
            (LogFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (LogFormat::Compact, true) => layer.compact().boxed(),
            (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
            (LogFormat::Json, true) => layer.json().boxed(),
            (LogFormat::Json, false) => layer.json().without_time().boxed(),
            (LogFormat::Full, true) => layer.boxed(),
            (LogFormat::Full, false) => layer.without_time().boxed(),
        }
    }
}

/// Install the process-wide subscriber.
///
/// Only the first successful call in a process takes effect.
///
/// # Errors
///
/// [`TelemetryError::InvalidFilter`] for a bad level or directive, and
/// [`TelemetryError::AlreadyInstalled`] if a subscriber is already set.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let layer = config.stderr_layer().with_filter(config.filter()?);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        directives = config.directives.len(),
        "Logging initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert!(config.directives.is_empty());
        assert!(config.timestamps);
    }

    #[test]
    fn test_builders_keep_other_fields() {
        let config = LogConfig::new("debug")
            .with_directive("wingkey_client=trace")
            .with_format(LogFormat::Json)
            .plain();

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directives, vec!["wingkey_client=trace"]);
        assert!(!config.ansi);
        assert!(!config.timestamps);
    }

    #[test]
    fn test_format_names() {
        for format in LogFormat::ALL {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(TelemetryError::UnknownFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_filter_accepts_levels_and_directives() {
        let config = LogConfig::new("info").with_directive("wingkey_config=debug");
        assert!(config.filter().is_ok());
    }

    #[test]
    fn test_filter_names_the_bad_directive() {
        let config = LogConfig::new("info").with_directive("[broken");
        match config.filter() {
            Err(TelemetryError::InvalidFilter { input, .. }) => assert_eq!(input, "[broken"),
            other => panic!("expected InvalidFilter, got {other:?}"),
        }
    }

    #[test]
    fn test_second_install_fails() {
        let config = LogConfig::new("error").plain();
        // The first call may lose to another test; the second always loses.
        let _ = setup_logging(&config);
        assert!(matches!(
            setup_logging(&config),
            Err(TelemetryError::AlreadyInstalled(_))
        ));
    }
}
