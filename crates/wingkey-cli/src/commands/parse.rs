//! Parse command: run the suggestion parser locally, without the backend.

use wingkey_suggest::{Tier, parse_with_tier};

use super::{OutputFormat, text_or_stdin};
use crate::theme::Theme;

fn tier_name(tier: Tier) -> &'static str {
    match tier {
        Tier::NumberedList => "numbered_list",
        Tier::Quoted => "quoted",
        Tier::Lines => "lines",
        Tier::Fallback => "fallback",
    }
}

/// Parse `text` (or stdin) and print the suggestions with the tier used.
pub(crate) fn run_parse(text: Option<String>, output: OutputFormat) -> anyhow::Result<()> {
    let raw = text_or_stdin(text)?;
    let (suggestions, tier) = parse_with_tier(&raw);

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "tier": tier_name(tier),
                "suggestions": suggestions.as_slice(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        },
        OutputFormat::Pretty => {
            println!("{}", Theme::dimmed(&format!("tier: {}", tier_name(tier))));
            for (i, suggestion) in suggestions.iter().enumerate() {
                println!("{}", Theme::suggestion(i, suggestion));
            }
        },
    }

    Ok(())
}
