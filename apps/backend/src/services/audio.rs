//! Batch audio regeneration

use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::services::external::{self, AudioSpeed};
use crate::AppState;

const PROGRESS_EVERY: usize = 50;

/// Which words to regenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioScope {
    /// Every word the user owns
    User { user_id: i64 },
    /// One list, checked against its owner
    List { owner_id: i64, list_id: i64 },
}

/// Synthesize audio for every word in scope, one at a time.
///
/// A failed word is logged and counted; the batch keeps going.
pub async fn regenerate_audio(
    state: &AppState,
    scope: AudioScope,
    speed: AudioSpeed,
) -> Result<BatchAudioReport> {
    let words = match scope {
        AudioScope::User { user_id } => state.db.get_words_for_user(user_id).await?,
        AudioScope::List { owner_id, list_id } => {
            let list = state
                .db
                .get_word_list(owner_id, list_id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Word list {}", list_id)))?;
            state.db.get_words_in_list(list.id).await?
        }
    };

    let mut report = BatchAudioReport {
        total: words.len(),
        ..Default::default()
    };
    tracing::info!("Generating {} audio for {} words", speed.as_str(), report.total);

    for (index, word) in words.iter().enumerate() {
        match external::synthesize(state.synthesizer.clone(), word.word.clone(), speed).await {
            Ok(_) => report.processed += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!("Audio generation failed for word {}: {}", word.id, e);
            }
        }

        if (index + 1) % PROGRESS_EVERY == 0 {
            tracing::info!(
                "Audio progress: {}/{} ({} failed)",
                index + 1,
                report.total,
                report.failed
            );
        }
    }

    tracing::info!(
        "Audio generation complete: {} processed, {} failed of {}",
        report.processed,
        report.failed,
        report.total
    );
    Ok(report)
}
