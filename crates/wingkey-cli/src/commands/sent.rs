//! Sent command: report a message the user sent.

use wingkey_client::SentMessage;
use wingkey_config::Config;

use crate::config_bridge;
use crate::theme::Theme;

/// Record a sent message and wait for the tracking call to settle.
///
/// The call is best effort: a backend failure is logged at `warn` and the
/// command still succeeds.
pub(crate) async fn record_sent(
    cfg: &Config,
    message: SentMessage,
    token: Option<&str>,
) -> anyhow::Result<()> {
    let Some(token) = config_bridge::resolve_token(token, cfg) else {
        anyhow::bail!("a session token is required; pass --token or set WINGKEY_TOKEN");
    };
    let client = config_bridge::to_api_client(cfg)?;

    let conversation = message.conversation_id.clone();
    let call = client.send_message(&token, message);
    if !call.was_dispatched() {
        println!("{}", Theme::warning("Tracking call was not dispatched."));
        return Ok(());
    }
    call.settled().await;

    println!(
        "{}",
        Theme::success(&format!(
            "Sent message reported for {}",
            Theme::conversation_id(&conversation)
        ))
    );
    Ok(())
}
