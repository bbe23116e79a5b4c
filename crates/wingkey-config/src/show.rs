//! Source-annotated display for `config show`.

use std::fmt::{self, Write as _};

use crate::merge::FieldSources;
use crate::types::Config;

/// A resolved configuration together with where each value came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path to the layer that set it.
    pub field_sources: FieldSources,
    /// Files that were loaded, in precedence order.
    pub loaded_files: Vec<String>,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// TOML with a source comment on each value.
    Toml,
    /// JSON.
    Json,
}

impl ResolvedConfig {
    /// Render the configuration, optionally a single section.
    ///
    /// Signing material and tokens are redacted by the section serializers.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or `section` does not exist.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> Result<String, fmt::Error> {
        match format {
            ShowFormat::Toml => self.show_toml(section),
            ShowFormat::Json => self.show_json(section),
        }
    }

    fn section_value(&self, name: &str) -> Result<toml::Value, fmt::Error> {
        let val = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        val.as_table()
            .and_then(|table| table.get(name))
            .cloned()
            .ok_or(fmt::Error)
    }

    fn show_toml(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        let body = if let Some(name) = section {
            let mut wrapper = toml::map::Map::new();
            wrapper.insert(name.to_owned(), self.section_value(name)?);
            toml::to_string_pretty(&toml::Value::Table(wrapper)).map_err(|_| fmt::Error)?
        } else {
            toml::to_string_pretty(&self.config).map_err(|_| fmt::Error)?
        };

        let mut output = String::new();
        output.push_str("# Resolved Wingkey configuration\n");

        if !self.loaded_files.is_empty() {
            output.push_str("#\n# Loaded files (in precedence order):\n");
            for (i, path) in self.loaded_files.iter().enumerate() {
                writeln!(output, "#   {}. {path}", i.saturating_add(1))?;
            }
        }
        output.push('\n');

        let mut current_section = String::new();
        for line in body.lines() {
            let trimmed = line.trim();
            if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                name.clone_into(&mut current_section);
            }
            match self.annotate(trimmed, &current_section) {
                Some(layer) => writeln!(output, "{line}  # [{layer}]")?,
                None => writeln!(output, "{line}")?,
            }
        }

        Ok(output)
    }

    fn show_json(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        if let Some(name) = section {
            serde_json::to_string_pretty(&self.section_value(name)?).map_err(|_| fmt::Error)
        } else {
            serde_json::to_string_pretty(&self.config).map_err(|_| fmt::Error)
        }
    }

    /// Source layer for a `key = value` line.
    fn annotate(&self, line: &str, section: &str) -> Option<String> {
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            return None;
        }
        let key = line.split('=').next()?.trim();
        let path = if section.is_empty() {
            key.to_owned()
        } else {
            format!("{section}.{key}")
        };
        self.field_sources.get(&path).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::ConfigLayer;

    fn resolved() -> ResolvedConfig {
        let mut config = Config::default();
        config.signing.fragments = vec!["c2VjcmV0".to_owned()];
        config.signing.mask = "deadbeef".to_owned();
        config.auth.token = Some("tok-123".to_owned());

        let mut field_sources = FieldSources::new();
        field_sources.insert("backend.url".to_owned(), ConfigLayer::Environment);
        field_sources.insert("timeouts.connect_secs".to_owned(), ConfigLayer::Defaults);

        ResolvedConfig {
            config,
            field_sources,
            loaded_files: vec!["/home/ana/.wingkey/config.toml".to_owned()],
        }
    }

    #[test]
    fn test_show_toml_annotates_sources() {
        let output = resolved().show(ShowFormat::Toml, None).unwrap();
        assert!(output.contains("Resolved Wingkey configuration"));
        assert!(output.contains("1. /home/ana/.wingkey/config.toml"));
        assert!(output.contains("# [environment variable]"));
        assert!(output.contains("connect_secs = 10  # [defaults]"));
    }

    #[test]
    fn test_show_never_prints_secrets() {
        for format in [ShowFormat::Toml, ShowFormat::Json] {
            let output = resolved().show(format, None).unwrap();
            assert!(!output.contains("c2VjcmV0"));
            assert!(!output.contains("deadbeef"));
            assert!(!output.contains("tok-123"));
        }
    }

    #[test]
    fn test_show_section() {
        let output = resolved().show(ShowFormat::Toml, Some("timeouts")).unwrap();
        assert!(output.contains("request_secs = 30"));
        assert!(!output.contains("backend"));

        let json = resolved().show(ShowFormat::Json, Some("timeouts")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["connect_secs"], 10);
    }

    #[test]
    fn test_show_unknown_section_fails() {
        assert!(resolved().show(ShowFormat::Json, Some("nope")).is_err());
    }
}
