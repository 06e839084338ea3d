//! Answer matching for typed quiz answers.

use serde::{Deserialize, Serialize};

/// Result of comparing a typed answer to the accepted answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// The accepted answer that matched, if any.
    pub matched: Option<String>,
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `submitted` equals the canonical answer or one of its synonyms,
/// ignoring case and surrounding whitespace.
pub fn is_acceptable(submitted: &str, canonical: &str, synonyms: &[String]) -> bool {
    compare_answer(submitted, canonical, synonyms).is_correct
}

/// Compare a typed answer against the canonical answer and its synonyms.
pub fn compare_answer(submitted: &str, canonical: &str, synonyms: &[String]) -> MatchResult {
    let typed_normalized = normalize(submitted);

    let matched = std::iter::once(canonical)
        .chain(synonyms.iter().map(String::as_str))
        .find(|candidate| normalize(candidate) == typed_normalized)
        .map(str::to_string);

    MatchResult {
        is_correct: matched.is_some(),
        typed_normalized,
        matched,
    }
}

/// Canonical answer followed by its synonyms, for feedback display.
pub fn accepted_answers(canonical: &str, synonyms: &[String]) -> Vec<String> {
    std::iter::once(canonical.to_string())
        .chain(synonyms.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syn(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ignores_case_and_surrounding_whitespace() {
        assert!(is_acceptable("  Fiets ", "fiets", &[]));
        assert!(is_acceptable("HOUSE", " house", &[]));
    }

    #[test]
    fn rejects_unlisted_answers() {
        assert!(!is_acceptable("bike", "fiets", &syn(&["bicycle"])));
    }

    #[test]
    fn accepts_synonyms() {
        assert!(is_acceptable("bicycle", "fiets", &syn(&["bicycle"])));
        let result = compare_answer(" Cycle", "bike", &syn(&["bicycle", "cycle"]));
        assert!(result.is_correct);
        assert_eq!(result.matched.as_deref(), Some("cycle"));
    }

    #[test]
    fn no_partial_credit() {
        assert!(!is_acceptable("hous", "house", &[]));
        assert!(!is_acceptable("house!", "house", &[]));
        assert!(!is_acceptable("the house", "house", &[]));
    }

    #[test]
    fn blank_answers_never_match() {
        assert!(!is_acceptable("", "house", &[]));
        assert!(!is_acceptable("   ", "house", &syn(&["home"])));
    }

    #[test]
    fn non_ascii_case_folding() {
        assert!(is_acceptable("ÉCOLE", "école", &[]));
        assert!(is_acceptable("Straße", "straße", &[]));
    }

    #[test]
    fn accepted_answers_lists_canonical_first() {
        assert_eq!(
            accepted_answers("bike", &syn(&["bicycle", "cycle"])),
            vec!["bike", "bicycle", "cycle"]
        );
    }
}
