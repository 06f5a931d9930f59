//! Spelling mistake classification.
//!
//! Checks run in priority order and the first match wins:
//! 1. Phonetic confusions from a fixed table (ie/ei, silent e, doubled
//!    consonants, ph/f, ough, tion/sion, ck/k/c, gh)
//! 2. Vowel sequence differences, named after the vowel sound when possible
//! 3. Runs of the character edit script (doubling, substitution, sequence,
//!    insertion, deletion)
//! 4. Adjacent letter swaps, when the edit script cancels out entirely
//! 5. Otherwise a generic error

mod edits;
pub mod tables;

use crate::matching::normalize_spelling;
use crate::types::{MistakeAnalysis, PatternType};

const GENERIC_DESCRIPTION: &str = "general spelling error";

/// Classify a misspelled attempt against the correct spelling.
///
/// Never fails: identical or empty inputs are reported as a generic error.
pub fn analyze_mistake(correct_word: &str, attempt: &str) -> MistakeAnalysis {
    let correct = normalize_spelling(correct_word);
    let typed = normalize_spelling(attempt);
    let (pattern_type, description) = classify(&correct, &typed);

    MistakeAnalysis {
        pattern_type,
        description,
        examples: vec![attempt.to_string()],
    }
}

fn classify(correct: &str, attempt: &str) -> (PatternType, String) {
    if correct.is_empty() || attempt.is_empty() || correct == attempt {
        return generic();
    }

    if let Some(found) = tables::match_phonetic(correct, attempt) {
        return found;
    }
    if let Some(found) = tables::match_vowel_pattern(correct, attempt) {
        return found;
    }

    let c: Vec<char> = correct.chars().collect();
    let a: Vec<char> = attempt.chars().collect();
    let runs = edits::significant_runs(&c, &a);
    let found = if runs.is_empty() {
        edits::find_transpositions(&c, &a)
    } else {
        edits::classify_runs(&runs, &c, &a)
    };

    found.unwrap_or_else(generic)
}

fn generic() -> (PatternType, String) {
    (PatternType::Other, GENERIC_DESCRIPTION.to_string())
}

pub(crate) fn doubled_letter_omitted(letter: char) -> String {
    format!("double letter {letter}{letter} omitted")
}

pub(crate) fn unnecessary_double_letter(letter: char) -> String {
    format!("unnecessary double letter {letter}{letter}")
}
