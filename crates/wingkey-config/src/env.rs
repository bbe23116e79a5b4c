//! `WINGKEY_*` environment fallbacks.
//!
//! Environment variables fill in fields that no config file set; they never
//! override a file.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Maps an environment variable onto a dotted config field.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    kind: ValueKind,
}

#[derive(Clone, Copy)]
enum ValueKind {
    Text,
    Integer,
    /// Comma-separated list.
    List,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "WINGKEY_BACKEND_URL",
        field_path: "backend.url",
        kind: ValueKind::Text,
    },
    EnvMapping {
        var_name: "WINGKEY_TOKEN",
        field_path: "auth.token",
        kind: ValueKind::Text,
    },
    EnvMapping {
        var_name: "WINGKEY_CONNECT_TIMEOUT_SECS",
        field_path: "timeouts.connect_secs",
        kind: ValueKind::Integer,
    },
    EnvMapping {
        var_name: "WINGKEY_REQUEST_TIMEOUT_SECS",
        field_path: "timeouts.request_secs",
        kind: ValueKind::Integer,
    },
    EnvMapping {
        var_name: "WINGKEY_SIGNING_FRAGMENTS",
        field_path: "signing.fragments",
        kind: ValueKind::List,
    },
    EnvMapping {
        var_name: "WINGKEY_SIGNING_MASK",
        field_path: "signing.mask",
        kind: ValueKind::Text,
    },
    EnvMapping {
        var_name: "WINGKEY_SIGNING_CHECKSUM",
        field_path: "signing.checksum",
        kind: ValueKind::Text,
    },
    EnvMapping {
        var_name: "WINGKEY_LOG_LEVEL",
        field_path: "logging.level",
        kind: ValueKind::Text,
    },
    EnvMapping {
        var_name: "WINGKEY_LOG_FORMAT",
        field_path: "logging.format",
        kind: ValueKind::Text,
    },
];

/// Names of every variable consulted, for help output.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_MAPPINGS.iter().map(|m| m.var_name).collect()
}

/// Collect `WINGKEY_*` variables from the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("WINGKEY_"))
        .collect()
}

/// Apply fallbacks to fields that no file layer set.
///
/// Defaults do not count as "set": an environment variable overrides a
/// built-in default but not a value from a file. Returns the number applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let set_by_file = sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults);
        if set_by_file {
            continue;
        }

        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_field(merged, mapping.field_path, coerce(mapping.kind, raw));
        sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    count
}

fn coerce(kind: ValueKind, raw: &str) -> toml::Value {
    let raw = raw.trim();
    match kind {
        ValueKind::Integer => raw
            .parse::<i64>()
            .map_or_else(|_| toml::Value::String(raw.to_owned()), toml::Value::Integer),
        ValueKind::List => toml::Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_owned()))
                .collect(),
        ),
        ValueKind::Text => toml::Value::String(raw.to_owned()),
    }
}

/// Set `section.key` in the tree, creating the section if needed.
fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let Some((section, key)) = path.split_once('.') else {
        return;
    };
    let Some(table) = root.as_table_mut() else {
        return;
    };
    let section = table
        .entry(section.to_owned())
        .or_insert(toml::Value::Table(toml::map::Map::new()));
    if let Some(section) = section.as_table_mut() {
        section.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_env_fills_unset_and_default_fields() {
        let mut merged: toml::Value = toml::from_str("[backend]\nurl = \"http://default\"\n").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("backend.url".to_owned(), ConfigLayer::Defaults);

        let env = vars(&[
            ("WINGKEY_BACKEND_URL", "https://api.example.com"),
            ("WINGKEY_TOKEN", "tok"),
        ]);
        let applied = apply_env_fallbacks(&mut merged, &mut sources, &env);

        assert_eq!(applied, 2);
        assert_eq!(merged["backend"]["url"].as_str(), Some("https://api.example.com"));
        assert_eq!(merged["auth"]["token"].as_str(), Some("tok"));
        assert_eq!(sources.get("auth.token"), Some(&ConfigLayer::Environment));
    }

    #[test]
    fn test_env_never_overrides_a_file() {
        let mut merged: toml::Value = toml::from_str("[backend]\nurl = \"http://file\"\n").unwrap();
        let mut sources = FieldSources::new();
        sources.insert("backend.url".to_owned(), ConfigLayer::User);

        let env = vars(&[("WINGKEY_BACKEND_URL", "https://env")]);
        assert_eq!(apply_env_fallbacks(&mut merged, &mut sources, &env), 0);
        assert_eq!(merged["backend"]["url"].as_str(), Some("http://file"));
    }

    #[test]
    fn test_env_coercion() {
        let mut merged = toml::Value::Table(toml::map::Map::new());
        let mut sources = FieldSources::new();
        let env = vars(&[
            ("WINGKEY_REQUEST_TIMEOUT_SECS", "12"),
            ("WINGKEY_SIGNING_FRAGMENTS", "AAAA, BBBB,,CCCC"),
            ("WINGKEY_LOG_LEVEL", "  "),
        ]);
        assert_eq!(apply_env_fallbacks(&mut merged, &mut sources, &env), 2);

        assert_eq!(merged["timeouts"]["request_secs"].as_integer(), Some(12));
        let fragments: Vec<&str> = merged["signing"]["fragments"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(toml::Value::as_str)
            .collect();
        assert_eq!(fragments, ["AAAA", "BBBB", "CCCC"]);
        assert!(merged.get("logging").is_none());
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        assert!(env_var_names().iter().all(|n| n.starts_with("WINGKEY_")));
    }
}
