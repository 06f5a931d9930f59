//! Word list lifecycle

use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::services::external;
use crate::AppState;

/// Largest accepted list
pub const MAX_WORDS: usize = 4000;

/// Create a list with freshly initialized words.
///
/// Blank spellings are skipped. Missing meanings and examples are filled from
/// the dictionary when it knows the word.
pub async fn create_word_list(
    state: &AppState,
    owner_id: i64,
    name: &str,
    description: Option<&str>,
    words: Vec<NewWord>,
) -> Result<DbWordList> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::BadRequest("Word list name is required".to_string()));
    }

    let mut words: Vec<NewWord> = words
        .into_iter()
        .filter_map(|mut w| {
            w.word = w.word.trim().to_string();
            (!w.word.is_empty()).then_some(w)
        })
        .collect();

    if words.is_empty() {
        return Err(ServiceError::BadRequest("No valid words provided".to_string()));
    }
    if words.len() > MAX_WORDS {
        return Err(ServiceError::BadRequest(format!(
            "Too many words: {} (maximum {})",
            words.len(),
            MAX_WORDS
        )));
    }

    for word in words.iter_mut().filter(|w| is_blank(&w.meaning) || is_blank(&w.example)) {
        if let Some(details) =
            external::lookup_details(state.dictionary.clone(), word.word.clone()).await
        {
            if is_blank(&word.meaning) {
                word.meaning = details.meaning;
            }
            if is_blank(&word.example) {
                word.example = details.example;
            }
            if is_blank(&word.phonetic) {
                word.phonetic = details.phonetic;
            }
        }
    }

    let now = state.clock.now();
    let initial = state.scheduler.initial_state(now);
    let list = state
        .db
        .create_word_list(owner_id, name, description, &words, &initial, now)
        .await?;

    tracing::info!("Created word list {} with {} words", list.id, words.len());
    Ok(list)
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// The owner's lists, newest first
pub async fn list_word_lists(state: &AppState, owner_id: i64) -> Result<Vec<DbWordList>> {
    state.db.get_word_lists(owner_id).await
}

/// Words of one list: familiar first, then most practiced, then alphabetical
pub async fn list_words(state: &AppState, owner_id: i64, list_id: i64) -> Result<Vec<Word>> {
    let list = state
        .db
        .get_word_list(owner_id, list_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Word list {}", list_id)))?;

    let mut words: Vec<Word> = state
        .db
        .get_words_in_list(list.id)
        .await?
        .iter()
        .map(DbWord::to_core_word)
        .collect();

    words.sort_by(|a, b| {
        b.state
            .familiar
            .cmp(&a.state.familiar)
            .then_with(|| b.state.practice_count.cmp(&a.state.practice_count))
            .then_with(|| a.word.cmp(&b.word))
    });
    Ok(words)
}

/// Delete a list together with its words and their mistake patterns
pub async fn delete_word_list(state: &AppState, owner_id: i64, list_id: i64) -> Result<()> {
    if !state.db.delete_word_list(owner_id, list_id).await? {
        return Err(ServiceError::NotFound(format!("Word list {}", list_id)));
    }

    tracing::info!("Deleted word list {}", list_id);
    Ok(())
}
