//! Layer merging with per-field source tracking.

use std::collections::HashMap;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// `~/.wingkey/config.toml`.
    User,
    /// A file named on the command line.
    Explicit,
    /// `WINGKEY_*` environment fallback.
    Environment,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Defaults => "defaults",
            Self::User => "user (~/.wingkey/config.toml)",
            Self::Explicit => "--config file",
            Self::Environment => "environment variable",
        })
    }
}

/// Dotted field path to the layer that last set it.
pub type FieldSources = HashMap<String, ConfigLayer>;

/// Deep-merge `overlay` into `base`, recording which layer set each leaf.
///
/// Tables merge per key; scalars and arrays from the overlay replace the
/// base value.
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join_path(prefix, key);
                match base_table.get_mut(key) {
                    Some(base_val) if overlay_val.is_table() => {
                        deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                    },
                    Some(base_val) => {
                        *base_val = overlay_val.clone();
                        sources.insert(path, layer);
                    },
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, layer, sources);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            sources.insert(prefix.to_owned(), layer);
        },
    }
}

/// Record every leaf under `val` as set by `layer`.
pub fn record_leaves(
    val: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &join_path(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer);
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}
