//! Suggest command: sign an analysis request and print reply suggestions.

use anyhow::Context;
use wingkey_client::{AnalyzeRequest, RequestPhase};
use wingkey_config::Config;
use wingkey_suggest::{FALLBACK_SUGGESTION, Tone};

use super::{OutputFormat, text_or_stdin};
use crate::config_bridge;
use crate::theme::Theme;

/// Arguments for `wingkey suggest`.
#[derive(Debug)]
pub(crate) struct SuggestArgs {
    /// Text to analyze; `None` or `-` reads stdin.
    pub(crate) text: Option<String>,
    /// Requested tone.
    pub(crate) tone: Tone,
    /// Conversation the text belongs to.
    pub(crate) conversation: Option<String>,
    /// Free-form objective.
    pub(crate) objective: Option<String>,
    /// Bearer token override.
    pub(crate) token: Option<String>,
}

/// Build the request body from the command arguments.
fn build_request(text: String, args: &SuggestArgs) -> AnalyzeRequest {
    let mut request = AnalyzeRequest::new(text, args.tone);
    if let Some(conversation) = &args.conversation {
        request = request.with_conversation(conversation);
    }
    if let Some(objective) = &args.objective {
        request = request.with_objective(objective);
    }
    request
}

/// Request suggestions and print them.
///
/// With `verbose`, every request phase is echoed to stderr.
pub(crate) async fn run_suggest(
    cfg: &Config,
    args: SuggestArgs,
    output: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let text = text_or_stdin(args.text.clone())?;
    if text.trim().is_empty() {
        anyhow::bail!("nothing to analyze; pass the text as an argument or on stdin");
    }

    let client = config_bridge::to_api_client(cfg)?;
    let token = config_bridge::resolve_token(args.token.as_deref(), cfg);
    let request = build_request(text, &args);

    let suggestions = client
        .suggest_observed(&request, token.as_deref(), |phase: RequestPhase| {
            if verbose {
                eprintln!("{} {}", Theme::dimmed("phase:"), Theme::phase(phase));
            }
        })
        .await
        .context("suggestion request failed")?;

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "tone": request.tone,
                "fallback": suggestions.is_fallback(),
                "suggestions": suggestions.as_slice(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        },
        OutputFormat::Pretty => {
            if suggestions.is_fallback() {
                println!("{}", Theme::warning(FALLBACK_SUGGESTION));
                return Ok(());
            }
            println!(
                "\n{}",
                Theme::header(&format!("Suggestions ({})", request.tone.label()))
            );
            for (i, suggestion) in suggestions.iter().enumerate() {
                println!("{}", Theme::suggestion(i, suggestion));
            }
            println!();
        },
    }

    Ok(())
}
