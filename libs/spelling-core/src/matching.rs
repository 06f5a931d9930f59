//! Comparison of typed spellings against the stored word.

/// Trim and case-fold a spelling for comparison.
pub fn normalize_spelling(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether a typed attempt spells the word, ignoring case and surrounding whitespace.
pub fn spelling_matches(attempt: &str, correct: &str) -> bool {
    normalize_spelling(attempt) == normalize_spelling(correct)
}
