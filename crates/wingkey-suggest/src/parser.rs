//! Tiered suggestion extraction.
//!
//! Tiers run in order and the first one that yields anything wins:
//!
//! 1. **Numbered list**: `1. ...`, `2) ...`, `3: ...`, including several
//!    items run together on one line.
//! 2. **Quoted text**: double-quoted spans of five or more characters.
//! 3. **Lines**: any remaining line that is not a bullet or noise.
//!
//! If all three come up empty the result is the fallback list.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::skip::is_noise;
use crate::suggestions::Suggestions;

/// Minimum length, in characters, of a list item or plain line.
const MIN_ITEM_CHARS: usize = 3;

/// Minimum length, in characters, of a quoted span after trimming.
const MIN_QUOTED_CHARS: usize = 5;

/// A line that opens with a list number and a separator.
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+)(?:[.):]|\s)\s*(.*)$").expect("invalid regex")
});

/// A list number in the middle of a line, e.g. the ` 2.` in `1. Oi! 2. Tudo?`.
/// The caller checks that whitespace follows.
static INLINE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s([0-9]+)[.):]").expect("invalid regex"));

/// A double-quoted span, straight or curly.
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“]([^"“”]+)["”]"#).expect("invalid regex"));

/// Opening and closing quote pairs removed from list items.
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('“', '”'), ('\'', '\''), ('‘', '’')];

/// Which extraction strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Numbered list items.
    NumberedList,
    /// Double-quoted spans.
    Quoted,
    /// Plain lines.
    Lines,
    /// Nothing usable was found.
    Fallback,
}

/// Extract up to three suggestions from a raw analysis.
///
/// Never fails; see [`parse_with_tier`] to learn which tier matched.
#[must_use]
pub fn parse(text: &str) -> Suggestions {
    parse_with_tier(text).0
}

/// Like [`parse`], also reporting the tier that produced the result.
#[must_use]
pub fn parse_with_tier(text: &str) -> (Suggestions, Tier) {
    let (suggestions, tier) = if let Some(list) = numbered_items(text) {
        (list, Tier::NumberedList)
    } else if let Some(list) = quoted_spans(text) {
        (list, Tier::Quoted)
    } else if let Some(list) = plain_lines(text) {
        (list, Tier::Lines)
    } else {
        (Suggestions::fallback(), Tier::Fallback)
    };

    debug!(tier = ?tier, count = suggestions.len(), "parsed suggestions");
    (suggestions, tier)
}

fn numbered_items(text: &str) -> Option<Suggestions> {
    let items = text
        .lines()
        .filter_map(|line| NUMBERED_LINE.captures(line))
        .filter_map(|caps| {
            let first = caps.get(1)?.as_str().parse::<u64>().ok();
            Some(split_sequential(first, caps.get(2)?.as_str()))
        })
        .flatten()
        .map(str::trim)
        .filter(|item| !is_noise(item))
        .map(strip_quotes)
        .filter(|item| item.chars().count() >= MIN_ITEM_CHARS)
        .map(str::to_owned);

    Suggestions::from_candidates(items)
}

fn quoted_spans(text: &str) -> Option<Suggestions> {
    let spans = QUOTED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|span| span.chars().count() >= MIN_QUOTED_CHARS)
        .map(str::to_owned);

    Suggestions::from_candidates(spans)
}

/// Split a numbered item that carries the following items on the same line.
///
/// Only the next index in sequence starts a new item, so after `1.` a split
/// happens at ` 2.`, then ` 3.`. Other numbers stay in the text.
fn split_sequential(first: Option<u64>, content: &str) -> Vec<&str> {
    let Some(mut expected) = first.and_then(|n| n.checked_add(1)) else {
        return vec![content];
    };

    let mut items = Vec::new();
    let mut start = 0;
    for caps in INLINE_NUMBER.captures_iter(content) {
        let (Some(marker), Some(number)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let followed_by_space = content
            .get(marker.end()..)
            .is_some_and(|rest| rest.starts_with(char::is_whitespace));
        if !followed_by_space || number.as_str().parse::<u64>().ok() != Some(expected) {
            continue;
        }

        items.extend(content.get(start..marker.start()));
        start = marker.end();
        match expected.checked_add(1) {
            Some(next) => expected = next,
            None => break,
        }
    }
    items.extend(content.get(start..));
    items
}

fn plain_lines(text: &str) -> Option<Suggestions> {
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_ITEM_CHARS)
        .filter(|line| !line.starts_with('-') && !line.starts_with('*'))
        .filter(|line| !is_noise(line))
        .map(str::to_owned);

    Suggestions::from_candidates(lines)
}

/// Remove one layer of quotes, only when they enclose the whole item.
fn strip_quotes(item: &str) -> &str {
    QUOTE_PAIRS
        .iter()
        .find_map(|&(open, close)| item.strip_prefix(open)?.strip_suffix(close))
        .map_or(item, str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::FALLBACK_SUGGESTION;

    #[test]
    fn test_inline_numbered_list() {
        let (list, tier) = parse_with_tier("1. Oi! 2. Como vai? 3. Bora?");
        assert_eq!(list, ["Oi!", "Como vai?", "Bora?"]);
        assert_eq!(tier, Tier::NumberedList);
    }

    #[test]
    fn test_multiline_numbered_list_with_noise() {
        let text = "## ANÁLISE\nEla parece interessada.\n\n\
                    1. \"Oi, tudo bem?\"\n\
                    2) “Que tal um café sexta?”\n\
                    3: Bora!\n\
                    4. Obs: não force a barra";
        assert_eq!(
            parse(text),
            ["Oi, tudo bem?", "Que tal um café sexta?", "Bora!"]
        );
    }

    #[test]
    fn test_numbered_with_whitespace_separator() {
        assert_eq!(parse("1 Oi sumida\n2 Saudades"), ["Oi sumida", "Saudades"]);
    }

    #[test]
    fn test_numbered_drops_short_items() {
        assert_eq!(parse("1. ok\n2. \"a\"\n3. Beleza"), ["Beleza"]);
    }

    #[test]
    fn test_numbered_labels_are_skipped() {
        let text = "1. Nível de investimento: alto\n2. Red flag: nenhuma\n3. Manda um áudio";
        assert_eq!(parse(text), ["Manda um áudio"]);
    }

    #[test]
    fn test_never_more_than_three() {
        let text = (1..=10)
            .map(|i| format!("{i}. Sugestão número {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        // Every item above is noise ("SUGESTÃO"), so use plain items too.
        let plain = (1..=10)
            .map(|i| format!("{i}. Mensagem {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(parse(&text).len() <= 3);
        assert_eq!(parse(&plain), ["Mensagem 1", "Mensagem 2", "Mensagem 3"]);
    }

    #[test]
    fn test_quoted_tier() {
        let (list, tier) = parse_with_tier(r#"Something here "vamos sair sexta" and more"#);
        assert_eq!(list, ["vamos sair sexta"]);
        assert_eq!(tier, Tier::Quoted);
    }

    #[test]
    fn test_quoted_tier_ignores_short_quotes_and_accepts_curly() {
        let text = "Diga \"oi\" ou então “que sorriso lindo” ou \"bora jantar\"";
        assert_eq!(parse(text), ["que sorriso lindo", "bora jantar"]);
    }

    #[test]
    fn test_numbered_tier_wins_over_quotes() {
        let text = "Tente \"algo bem diferente\"\n1. Primeira ideia";
        let (list, tier) = parse_with_tier(text);
        assert_eq!(list, ["Primeira ideia"]);
        assert_eq!(tier, Tier::NumberedList);
    }

    #[test]
    fn test_line_tier() {
        let text = "Análise: ela gosta de viagens\n- dica solta\n* outra\nQue tal uma trilha?\nok\nConta mais!";
        let (list, tier) = parse_with_tier(text);
        assert_eq!(list, ["Que tal uma trilha?", "Conta mais!"]);
        assert_eq!(tier, Tier::Lines);
    }

    #[test]
    fn test_only_noise_falls_back() {
        let (list, tier) = parse_with_tier("ANÁLISE: tom flertante\n---\nRED FLAG: nenhuma");
        assert_eq!(list, [FALLBACK_SUGGESTION]);
        assert!(list.is_fallback());
        assert_eq!(tier, Tier::Fallback);
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert!(parse("").is_fallback());
        assert!(parse("   \n\n  ").is_fallback());
    }

    #[test]
    fn test_strip_quotes_single_layer() {
        assert_eq!(strip_quotes("\"oi\""), "oi");
        assert_eq!(strip_quotes("“oi”"), "oi");
        assert_eq!(strip_quotes("\"\"oi\"\""), "\"oi\"");
        assert_eq!(strip_quotes("sem aspas"), "sem aspas");
    }

    #[test]
    fn test_strip_quotes_needs_both_ends() {
        assert_eq!(strip_quotes("\"Oi\" ela disse"), "\"Oi\" ela disse");
        assert_eq!(strip_quotes("ela disse \"oi\""), "ela disse \"oi\"");
        assert_eq!(strip_quotes("“Oi” e tchau"), "“Oi” e tchau");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn test_one_sided_quote_survives_parsing() {
        assert_eq!(parse("1. \"Oi\" ela disse"), ["\"Oi\" ela disse"]);
    }

    #[test]
    fn test_numbers_inside_items_do_not_split() {
        assert_eq!(
            parse("1. Nasci em 1990. E você?\n2. Bora sair?"),
            ["Nasci em 1990. E você?", "Bora sair?"]
        );
        assert_eq!(parse("1. Chego às 8. Te espero lá"), ["Chego às 8. Te espero lá"]);
    }

    #[test]
    fn test_inline_split_follows_sequence() {
        let (list, tier) = parse_with_tier("1. Topa às 7: jantar? 2. Ou cinema 3. Ou os dois");
        assert_eq!(list, ["Topa às 7: jantar?", "Ou cinema", "Ou os dois"]);
        assert_eq!(tier, Tier::NumberedList);
    }

    #[test]
    fn test_inline_split_starts_from_line_number() {
        assert_eq!(
            parse("2) Tem 2 gatos? 3) Amo gatos"),
            ["Tem 2 gatos?", "Amo gatos"]
        );
    }

    #[test]
    fn test_padded_short_quote_is_ignored() {
        let (list, tier) = parse_with_tier("diga \"    oi \" agora");
        assert_ne!(tier, Tier::Quoted);
        assert!(!list.iter().any(|s| s == "oi"));
    }
}
