//! Noise filter for analysis text.
//!
//! The backend answers in Brazilian Portuguese and mixes the actual reply
//! suggestions with section headers, labelled analysis lines and editorial
//! notes. Any candidate whose upper-cased text contains one of these markers
//! is not a suggestion.

/// Upper-case substrings that mark a line as noise.
///
/// Accented and unaccented spellings are both listed because model output
/// drops accents often enough to matter.
pub const SKIP_PATTERNS: &[&str] = &[
    // Markup and separators
    "#",
    "---",
    "***",
    "===",
    // Labelled analysis
    "ANÁLISE",
    "ANALISE",
    "RED FLAG",
    "NÍVEL DE INVESTIMENTO",
    "NIVEL DE INVESTIMENTO",
    "RACIOCÍNIO",
    "RACIOCINIO",
    "SUGESTÃO",
    "SUGESTAO",
    "SUGESTÕES",
    "SUGESTOES",
    "RESPOSTA",
    "OPÇÃO",
    "OPCAO",
    // Annotations
    "CONTEXT",
    "NOTE:",
    "TIP:",
    "OBS:",
];

/// Whether `candidate` contains any skip marker, ignoring case.
#[must_use]
pub fn is_noise(candidate: &str) -> bool {
    let upper = candidate.to_uppercase();
    SKIP_PATTERNS.iter().any(|p| upper.contains(p))
}
