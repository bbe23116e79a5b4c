//! Conversations command: list recent conversations from the backend.

use anyhow::Context;
use wingkey_config::Config;

use super::OutputFormat;
use crate::config_bridge;
use crate::theme::Theme;

/// Fetch and print the user's conversations.
pub(crate) async fn list_conversations(
    cfg: &Config,
    token: Option<&str>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let Some(token) = config_bridge::resolve_token(token, cfg) else {
        anyhow::bail!("a session token is required; pass --token or set WINGKEY_TOKEN");
    };
    let client = config_bridge::to_api_client(cfg)?;

    let conversations = client
        .fetch_conversations(&token)
        .await
        .context("failed to fetch conversations")?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&conversations)?);
        return Ok(());
    }

    if conversations.is_empty() {
        println!("{}", Theme::info("No conversations yet."));
        return Ok(());
    }

    println!("\n{}", Theme::header("Recent Conversations"));
    println!("{}", Theme::separator());
    for conversation in &conversations {
        let platform = if conversation.platform.is_empty() {
            String::new()
        } else {
            Theme::dimmed(&format!("({})", conversation.platform))
        };
        println!(
            "  {}  {} {}",
            Theme::conversation_id(&conversation.conversation_id),
            conversation.match_name,
            platform
        );
        if let Some(last) = &conversation.last_message {
            println!("      {}", Theme::dimmed(last));
        }
    }
    println!();

    Ok(())
}
