//! Review queue selection.

use crate::types::Word;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Select up to `limit` words for review.
///
/// Due words come first, highest level then most overdue. Remaining slots are
/// back-filled in random order with words that were never scheduled.
pub fn get_due_words<R: Rng + ?Sized>(
    words: Vec<Word>,
    now: DateTime<Utc>,
    limit: usize,
    rng: &mut R,
) -> Vec<Word> {
    let (mut due, rest): (Vec<Word>, Vec<Word>) =
        words.into_iter().partition(|w| w.state.is_due(now));

    due.sort_by(|a, b| {
        b.state
            .srs_level
            .cmp(&a.state.srs_level)
            .then_with(|| a.state.next_review.cmp(&b.state.next_review))
    });
    due.truncate(limit);

    if due.len() < limit {
        let mut unscheduled: Vec<Word> = rest
            .into_iter()
            .filter(|w| w.state.next_review.is_none() && w.state.srs_level == 0)
            .collect();
        unscheduled.shuffle(rng);
        unscheduled.truncate(limit - due.len());
        due.extend(unscheduled);
    }

    due
}

/// Pick a word to practice, preferring words that are not yet familiar.
pub fn pick_practice_word<'a, R: Rng + ?Sized>(words: &'a [Word], rng: &mut R) -> Option<&'a Word> {
    let unfamiliar: Vec<&Word> = words.iter().filter(|w| !w.state.familiar).collect();
    match unfamiliar.choose(rng) {
        Some(word) => Some(*word),
        None => words.choose(rng),
    }
}
