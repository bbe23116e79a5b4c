//! Wingkey CLI - Signed reply suggestions from the command line.
//!
//! A thin front end over the library crates: it resolves configuration,
//! installs logging, reassembles the signing key and talks to the backend.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use wingkey_client::SentMessage;
use wingkey_config::{Config, ConfigResult, LoadOptions, ResolvedConfig};
use wingkey_suggest::Tone;
use wingkey_telemetry::{LogConfig, setup_logging};

mod commands;
pub mod config_bridge;
mod theme;

use commands::suggest::SuggestArgs;
use commands::{OutputFormat, config, conversations, keys, parse, sent, suggest};

/// Wingkey - Signed reply suggestions
#[derive(Parser)]
#[command(name = "wingkey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format: pretty (default) or json
    #[arg(long, global = true, default_value = "pretty")]
    output: String,

    /// Explicit configuration file, layered over ~/.wingkey/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent conversations
    Conversations {
        /// Session token (defaults to [auth] token / `WINGKEY_TOKEN`)
        #[arg(long)]
        token: Option<String>,
    },

    /// Get reply suggestions for a message
    Suggest {
        /// Text to analyze (omit or `-` to read stdin)
        text: Option<String>,
        /// Reply tone
        #[arg(short, long, default_value = "casual")]
        tone: Tone,
        /// Conversation the text belongs to
        #[arg(long)]
        conversation: Option<String>,
        /// What the user wants out of the reply
        #[arg(long)]
        objective: Option<String>,
        /// Session token (defaults to [auth] token / `WINGKEY_TOKEN`)
        #[arg(long)]
        token: Option<String>,
    },

    /// Extract suggestions from raw analysis text, offline
    Parse {
        /// Analysis text (omit or `-` to read stdin)
        text: Option<String>,
    },

    /// Report a message that was sent
    Sent {
        /// Conversation the message was sent in
        conversation: String,
        /// Text that was sent
        content: String,
        /// The text came from a suggestion
        #[arg(long)]
        suggested: bool,
        /// Tone that was selected
        #[arg(short, long, default_value = "casual")]
        tone: Tone,
        /// Objective that was selected
        #[arg(long)]
        objective: Option<String>,
        /// Session token (defaults to [auth] token / `WINGKEY_TOKEN`)
        #[arg(long)]
        token: Option<String>,
    },

    /// Manage the signing key
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Split a seed into masked fragments and print a [signing] block
    Split {
        /// 32-byte seed as hex (a fresh one is generated when omitted)
        #[arg(long)]
        seed: Option<String>,
        /// Number of fragments
        #[arg(short, long, default_value_t = 4)]
        parts: usize,
        /// XOR mask as hex (random when omitted)
        #[arg(long)]
        mask: Option<String>,
    },
    /// Show the public key to register with the backend
    Public,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: String,
        /// Show only a specific section (e.g. backend, timeouts, signing)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Validate the current configuration
    Validate,
    /// Show config file paths being checked
    Paths,
}

/// The loaded configuration, or the reason it could not be loaded.
fn require(loaded: &ConfigResult<ResolvedConfig>) -> Result<&Config> {
    loaded
        .as_ref()
        .map(|resolved| &resolved.config)
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        explicit_file: cli.config.clone(),
        ..LoadOptions::default()
    };
    let loaded = Config::load_with(&options);

    // Set up logging from config, with --verbose override.
    let log_config = if let Ok(resolved) = &loaded {
        let mut lc = config_bridge::to_log_config(&resolved.config);
        if cli.verbose {
            "debug".clone_into(&mut lc.level);
        }
        lc
    } else {
        // Fallback if config loading fails.
        LogConfig::new(if cli.verbose { "debug" } else { "warn" })
    };
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
    match &loaded {
        Ok(resolved) => debug!(files = ?resolved.loaded_files, "Configuration loaded"),
        Err(e) => debug!(error = %e, "Configuration failed to load"),
    }

    let output = OutputFormat::from_flag(&cli.output);

    match cli.command {
        Commands::Conversations { token } => {
            conversations::list_conversations(require(&loaded)?, token.as_deref(), output).await?;
        },
        Commands::Suggest {
            text,
            tone,
            conversation,
            objective,
            token,
        } => {
            let args = SuggestArgs {
                text,
                tone,
                conversation,
                objective,
                token,
            };
            suggest::run_suggest(require(&loaded)?, args, output, cli.verbose).await?;
        },
        Commands::Parse { text } => {
            parse::run_parse(text, output)?;
        },
        Commands::Sent {
            conversation,
            content,
            suggested,
            tone,
            objective,
            token,
        } => {
            let message = SentMessage {
                conversation_id: conversation,
                content,
                was_ai_suggestion: suggested,
                tone,
                objective,
            };
            sent::record_sent(require(&loaded)?, message, token.as_deref()).await?;
        },
        Commands::Keys { command } => {
            handle_keys(&command, &loaded)?;
        },
        Commands::Config { command } => {
            handle_config(command, &loaded, &options)?;
        },
    }

    Ok(())
}

fn handle_keys(command: &KeyCommands, loaded: &ConfigResult<ResolvedConfig>) -> Result<()> {
    match command {
        KeyCommands::Split { seed, parts, mask } => {
            keys::split_key(seed.as_deref(), *parts, mask.as_deref())
        },
        KeyCommands::Public => keys::show_public(require(loaded)?),
    }
}

fn handle_config(
    command: ConfigCommands,
    loaded: &ConfigResult<ResolvedConfig>,
    options: &LoadOptions,
) -> Result<()> {
    match command {
        ConfigCommands::Show { format, section } => {
            let resolved = loaded
                .as_ref()
                .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;
            config::show_config(resolved, &format, section.as_deref())
        },
        ConfigCommands::Validate => config::validate_config(loaded),
        ConfigCommands::Paths => config::show_paths(options),
    }
}
