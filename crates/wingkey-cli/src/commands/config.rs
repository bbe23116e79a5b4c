//! Config command: inspect the resolved configuration.

use wingkey_config::env::env_var_names;
use wingkey_config::loader::default_user_dir;
use wingkey_config::{ConfigResult, LoadOptions, ResolvedConfig, ShowFormat};

use crate::theme::Theme;

fn parse_show_format(format: &str) -> anyhow::Result<ShowFormat> {
    match format.to_ascii_lowercase().as_str() {
        "toml" => Ok(ShowFormat::Toml),
        "json" => Ok(ShowFormat::Json),
        other => anyhow::bail!("unknown format '{other}'; expected toml or json"),
    }
}

/// Print the resolved configuration with source annotations.
pub(crate) fn show_config(
    resolved: &ResolvedConfig,
    format: &str,
    section: Option<&str>,
) -> anyhow::Result<()> {
    let format = parse_show_format(format)?;
    let rendered = resolved.show(format, section).map_err(|_| match section {
        Some(name) => anyhow::anyhow!("no such config section '{name}'"),
        None => anyhow::anyhow!("failed to render configuration"),
    })?;
    println!("{rendered}");
    Ok(())
}

/// Report whether the configuration loads and validates.
pub(crate) fn validate_config(loaded: &ConfigResult<ResolvedConfig>) -> anyhow::Result<()> {
    match loaded {
        Ok(resolved) => {
            println!("{}", Theme::success("Configuration is valid."));
            for path in &resolved.loaded_files {
                println!("  {}", Theme::dimmed(path));
            }
            if !resolved.config.signing.is_configured() {
                println!(
                    "{}",
                    Theme::warning("No signing key configured; signed requests will fail.")
                );
            }
            Ok(())
        },
        Err(e) => {
            println!("{}", Theme::error(&e.to_string()));
            anyhow::bail!("configuration is invalid")
        },
    }
}

/// Print the files and variables consulted, in precedence order.
pub(crate) fn show_paths(options: &LoadOptions) -> anyhow::Result<()> {
    println!("\n{}", Theme::header("Configuration Sources"));

    if let Some(path) = &options.explicit_file {
        let marker = if path.exists() { "found" } else { "missing" };
        println!(
            "  {} {}",
            Theme::kv("--config", &path.display().to_string()),
            Theme::dimmed(marker)
        );
    }

    let user_dir = match &options.user_dir {
        Some(dir) => dir.clone(),
        None => default_user_dir()?,
    };
    let user_file = user_dir.join("config.toml");
    let marker = if user_file.exists() { "found" } else { "not present" };
    println!(
        "  {} {}",
        Theme::kv("user", &user_file.display().to_string()),
        Theme::dimmed(marker)
    );

    println!("  {}", Theme::kv("env", "applied to fields no file sets:"));
    for name in env_var_names() {
        let marker = if std::env::var_os(name).is_some() { "set" } else { "" };
        println!("    {name} {}", Theme::dimmed(marker));
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_format() {
        assert_eq!(parse_show_format("toml").unwrap(), ShowFormat::Toml);
        assert_eq!(parse_show_format("JSON").unwrap(), ShowFormat::Json);
        assert!(parse_show_format("yaml").is_err());
    }

    #[test]
    fn test_show_unknown_section_names_it() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = wingkey_config::Config::load_with(&LoadOptions {
            user_dir: Some(dir.path().to_path_buf()),
            explicit_file: None,
            ignore_env: true,
        })
        .unwrap();
        let err = show_config(&resolved, "toml", Some("nope")).unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(show_config(&resolved, "json", Some("timeouts")).is_ok());
    }
}
