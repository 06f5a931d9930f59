//! Review and practice flows

use spelling_core::{
    analyze_mistake, get_due_words, get_list_stats, get_user_stats, pick_practice_word,
    spelling_matches,
};

use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::services::external::{self, AudioSpeed};
use crate::AppState;

/// Words due for review, most urgent first.
///
/// `limit` defaults to the configured review limit.
pub async fn due_words(state: &AppState, user_id: i64, limit: Option<usize>) -> Result<Vec<Word>> {
    let words: Vec<Word> = state
        .db
        .get_words_for_user(user_id)
        .await?
        .iter()
        .map(DbWord::to_core_word)
        .collect();

    let limit = limit.unwrap_or(state.review_limit);
    let now = state.clock.now();
    let due = state.with_rng(|rng| get_due_words(words, now, limit, rng));

    tracing::debug!(user_id, count = due.len(), "Selected review words");
    Ok(due)
}

/// Submit an answer from a review session
pub async fn submit_review(
    state: &AppState,
    user_id: i64,
    word_id: i64,
    attempt: &str,
) -> Result<SubmissionResult> {
    let (_, result) = submit(state, user_id, word_id, attempt).await?;
    Ok(result)
}

/// Submit an answer from a practice round.
///
/// After the attempt is stored, empty dictionary fields are filled in. A
/// failed lookup or update is logged and does not fail the submission.
pub async fn submit_practice(
    state: &AppState,
    user_id: i64,
    word_id: i64,
    attempt: &str,
) -> Result<SubmissionResult> {
    let (word, mut result) = submit(state, user_id, word_id, attempt).await?;

    if word.needs_details() {
        if let Some(details) =
            external::lookup_details(state.dictionary.clone(), word.word.clone()).await
        {
            match state.db.update_word_details(word.id, &details).await {
                Ok(()) => {
                    result.meaning = fill(result.meaning, details.meaning);
                    result.example = fill(result.example, details.example);
                    result.phonetic = fill(result.phonetic, details.phonetic);
                }
                Err(e) => {
                    tracing::warn!("Failed to store dictionary details for word {}: {}", word.id, e)
                }
            }
        }
    }

    Ok(result)
}

fn fill(current: Option<String>, found: Option<String>) -> Option<String> {
    if current.as_deref().map_or(true, |s| s.trim().is_empty()) {
        found.or(current)
    } else {
        current
    }
}

async fn submit(
    state: &AppState,
    user_id: i64,
    word_id: i64,
    attempt: &str,
) -> Result<(DbWord, SubmissionResult)> {
    let word = state
        .db
        .get_word_for_user(word_id, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Word {}", word_id)))?;

    let attempt = attempt.trim();
    let correct = spelling_matches(attempt, &word.word);
    let mistake = (!correct).then(|| analyze_mistake(&word.word, attempt));

    let now = state.clock.now();
    let current = word.to_core_state();
    let outcome =
        state.with_rng(|rng| state.scheduler.process_review_result(&current, correct, now, rng));

    if let Some(err) = &outcome.invalid_state {
        tracing::warn!("Repaired stored state of word {}: {}", word.id, err);
    }

    state
        .db
        .record_attempt(word.id, &outcome.new_state, mistake.as_ref(), attempt, now)
        .await?;

    tracing::debug!(
        word_id = word.id,
        correct,
        from_level = outcome.previous_level,
        to_level = outcome.new_state.srs_level,
        interval_hours = outcome.new_state.review_interval,
        "Scheduled next review"
    );

    let mistake_patterns = state
        .db
        .get_patterns_for_word(word.id)
        .await?
        .iter()
        .map(DbMistakePattern::to_view)
        .collect::<Result<Vec<_>>>()?;

    let result = SubmissionResult {
        word_id: word.id,
        correct,
        correct_spelling: word.word.clone(),
        meaning: word.meaning.clone(),
        example: word.example.clone(),
        phonetic: word.phonetic.clone(),
        srs_level: outcome.new_state.srs_level,
        review_interval: outcome.new_state.review_interval,
        next_review: outcome.next_review,
        familiar: outcome.new_state.familiar,
        mistake,
        mistake_patterns,
    };

    Ok((word, result))
}

/// Put a word back to its initial state: level 0, counters cleared, first
/// review one base interval from now. Mistake patterns are kept.
pub async fn reset_word(state: &AppState, user_id: i64, word_id: i64) -> Result<WordState> {
    let word = state
        .db
        .get_word_for_user(word_id, user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Word {}", word_id)))?;

    let initial = state.scheduler.initial_state(state.clock.now());
    state.db.save_word_state(word.id, &initial).await?;

    tracing::info!("Reset word {}", word.id);
    Ok(initial)
}

/// Pick a word from a list and synthesize its audio prompt.
///
/// Words that are not yet familiar are preferred.
pub async fn next_practice_word(
    state: &AppState,
    user_id: i64,
    list_id: i64,
    speed: AudioSpeed,
) -> Result<PracticeWord> {
    let list = state
        .db
        .get_word_list(user_id, list_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Word list {}", list_id)))?;

    let words: Vec<Word> = state
        .db
        .get_words_in_list(list.id)
        .await?
        .iter()
        .map(DbWord::to_core_word)
        .collect();

    let word = state
        .with_rng(|rng| pick_practice_word(&words, rng).cloned())
        .ok_or_else(|| ServiceError::NotFound(format!("No words in list {}", list_id)))?;

    let audio = external::synthesize(state.synthesizer.clone(), word.word.clone(), speed).await?;

    Ok(PracticeWord {
        word_id: word.id,
        word_list_id: list.id,
        speed,
        audio,
    })
}

/// SRS statistics across all of the user's words
pub async fn user_stats(state: &AppState, user_id: i64) -> Result<UserStats> {
    let words: Vec<Word> = state
        .db
        .get_words_for_user(user_id)
        .await?
        .iter()
        .map(DbWord::to_core_word)
        .collect();

    Ok(get_user_stats(&words, state.clock.now()))
}

/// Practice statistics for one list
pub async fn list_stats(state: &AppState, user_id: i64, list_id: i64) -> Result<ListPracticeStats> {
    let list = state
        .db
        .get_word_list(user_id, list_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Word list {}", list_id)))?;

    let words: Vec<Word> = state
        .db
        .get_words_in_list(list.id)
        .await?
        .iter()
        .map(DbWord::to_core_word)
        .collect();

    Ok(get_list_stats(&words))
}

/// The user's mistake patterns, most frequent first
pub async fn mistake_patterns(
    state: &AppState,
    user_id: i64,
    list_id: Option<i64>,
) -> Result<Vec<MistakePatternView>> {
    state
        .db
        .get_patterns_for_user(user_id, list_id)
        .await?
        .iter()
        .map(DbMistakePattern::to_view)
        .collect()
}
