//! The suggestion list handed back to the keyboard.

use serde::Serialize;

/// Maximum number of suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 3;

/// Shown in place of suggestions when none could be extracted.
pub const FALLBACK_SUGGESTION: &str = "Não consegui gerar sugestões. Tente novamente.";

/// An ordered list of one to three non-empty suggestions.
///
/// Order is presentation order. The list is never empty: when extraction
/// finds nothing it holds the single [`FALLBACK_SUGGESTION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Suggestions(Vec<String>);

impl Suggestions {
    /// Keep the first [`MAX_SUGGESTIONS`] non-empty candidates.
    ///
    /// Returns `None` when no candidate survives.
    #[must_use]
    pub fn from_candidates<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let items: Vec<String> = candidates
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .take(MAX_SUGGESTIONS)
            .collect();
        if items.is_empty() { None } else { Some(Self(items)) }
    }

    /// The single-entry fallback list.
    #[must_use]
    pub fn fallback() -> Self {
        Self(vec![FALLBACK_SUGGESTION.to_owned()])
    }

    /// Whether this is the fallback list.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0.len() == 1 && self.0[0] == FALLBACK_SUGGESTION
    }

    /// Number of suggestions (always 1 to 3).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The suggestions as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Take ownership of the suggestions.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Iterate over the suggestions.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for Suggestions {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Suggestions {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[&str]> for Suggestions {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Suggestions {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_three() {
        let list = Suggestions::from_candidates(["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(list, ["a", "b", "c"]);
    }

    #[test]
    fn test_drops_empty_candidates() {
        let list = Suggestions::from_candidates(["", "x", ""]).unwrap();
        assert_eq!(list, ["x"]);
        assert!(Suggestions::from_candidates(["", ""]).is_none());
        assert!(Suggestions::from_candidates(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_fallback() {
        let list = Suggestions::fallback();
        assert!(list.is_fallback());
        assert_eq!(list.len(), 1);
        assert!(!Suggestions::from_candidates(["oi"]).unwrap().is_fallback());
    }

    #[test]
    fn test_serializes_as_array() {
        let list = Suggestions::from_candidates(["oi", "tudo bem?"]).unwrap();
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"["oi","tudo bem?"]"#
        );
    }
}
