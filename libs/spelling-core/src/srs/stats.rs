//! Aggregate statistics over already-loaded words.

use crate::types::{clamp_level, ratio, ListPracticeStats, UserStats, Word, MAX_LEVEL};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// SRS statistics for all of a user's words.
pub fn get_user_stats(words: &[Word], now: DateTime<Utc>) -> UserStats {
    let mut level_counts: BTreeMap<i32, usize> = (0..=MAX_LEVEL).map(|level| (level, 0)).collect();
    let mut total_due = 0;
    let mut words_studied = 0;
    let mut total_correct = 0u64;
    let mut total_attempts = 0u64;

    for word in words {
        let state = &word.state;
        *level_counts.entry(clamp_level(state.srs_level)).or_default() += 1;
        if state.is_due(now) {
            total_due += 1;
        }
        if state.practice_count > 0 {
            words_studied += 1;
        }
        total_correct += state.correct_count as u64;
        total_attempts += state.practice_count as u64;
    }

    UserStats {
        total_words: words.len(),
        total_due,
        level_counts,
        accuracy: ratio(total_correct, total_attempts),
        words_studied,
    }
}

/// Practice statistics for the words of one list.
pub fn get_list_stats(words: &[Word]) -> ListPracticeStats {
    let total_correct: u64 = words.iter().map(|w| w.state.correct_count as u64).sum();
    let total_attempts: u64 = words.iter().map(|w| w.state.practice_count as u64).sum();

    ListPracticeStats {
        total_words: words.len(),
        familiar_words: words.iter().filter(|w| w.state.familiar).count(),
        practiced_words: words.iter().filter(|w| w.state.practice_count > 0).count(),
        accuracy: ratio(total_correct, total_attempts),
    }
}
