//! Database models and service result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Result, ServiceError};
use crate::services::external::{AudioRef, AudioSpeed};

// Re-export shared types from spelling-core
pub use spelling_core::{
    ListPracticeStats, MistakeAnalysis, PatternType, UserStats, Word, WordState,
};

// === Database Entity Types ===

/// Word list stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWordList {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Word row including its mastery state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbWord {
    pub id: i64,
    pub word_list_id: i64,
    pub word: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub phonetic: Option<String>,
    pub srs_level: i64,
    pub review_interval: i64,
    pub next_review: Option<DateTime<Utc>>,
    pub last_practiced: Option<DateTime<Utc>>,
    pub practice_count: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub familiar: bool,
}

impl DbWord {
    /// Convert to spelling-core WordState.
    ///
    /// Out-of-range levels are passed through; the scheduler repairs them.
    pub fn to_core_state(&self) -> WordState {
        WordState {
            srs_level: self.srs_level.clamp(i32::MIN.into(), i32::MAX.into()) as i32,
            review_interval: self.review_interval,
            next_review: self.next_review,
            last_practiced: self.last_practiced,
            practice_count: counter(self.practice_count),
            correct_count: counter(self.correct_count),
            incorrect_count: counter(self.incorrect_count),
            familiar: self.familiar,
        }
    }

    /// Convert to spelling-core Word
    pub fn to_core_word(&self) -> Word {
        Word {
            id: self.id,
            word_list_id: self.word_list_id,
            word: self.word.clone(),
            meaning: self.meaning.clone(),
            example: self.example.clone(),
            phonetic: self.phonetic.clone(),
            state: self.to_core_state(),
        }
    }

    /// True when any dictionary field is still empty.
    pub fn needs_details(&self) -> bool {
        [&self.meaning, &self.example, &self.phonetic]
            .iter()
            .any(|field| field.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

fn counter(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Mistake pattern row joined with the word it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMistakePattern {
    pub id: i64,
    pub word_id: i64,
    pub word: String,
    pub pattern_type: String,
    pub description: String,
    pub frequency: i64,
    /// JSON array of distinct misspelled attempts
    pub examples: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbMistakePattern {
    /// Convert to the aggregated view returned to callers
    pub fn to_view(&self) -> Result<MistakePatternView> {
        let pattern_type = PatternType::from_str(&self.pattern_type).ok_or_else(|| {
            ServiceError::Internal(format!(
                "unknown pattern type '{}' on pattern {}",
                self.pattern_type, self.id
            ))
        })?;
        let examples: Vec<String> = serde_json::from_str(&self.examples).map_err(|e| {
            ServiceError::Internal(format!("malformed examples on pattern {}: {}", self.id, e))
        })?;

        Ok(MistakePatternView {
            id: self.id,
            word_id: self.word_id,
            word: self.word.clone(),
            pattern_type,
            description: self.description.clone(),
            count: self.frequency,
            examples,
        })
    }
}

// === Service Types ===

/// Word supplied when creating a list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub phonetic: Option<String>,
}

impl NewWord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }
}

/// Aggregated mistake pattern with its owning word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakePatternView {
    pub id: i64,
    pub word_id: i64,
    pub word: String,
    pub pattern_type: PatternType,
    pub description: String,
    pub count: i64,
    pub examples: Vec<String>,
}

/// Outcome of a review or practice submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub word_id: i64,
    pub correct: bool,
    pub correct_spelling: String,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub phonetic: Option<String>,
    pub srs_level: i32,
    pub review_interval: i64,
    pub next_review: DateTime<Utc>,
    pub familiar: bool,
    /// Classification of this attempt, absent when correct
    pub mistake: Option<MistakeAnalysis>,
    pub mistake_patterns: Vec<MistakePatternView>,
}

/// Word chosen for a practice round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeWord {
    pub word_id: i64,
    pub word_list_id: i64,
    pub speed: AudioSpeed,
    pub audio: AudioRef,
}

/// Summary of a batch audio run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAudioReport {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_word() -> DbWord {
        DbWord {
            id: 1,
            word_list_id: 2,
            word: "necessary".to_string(),
            meaning: Some("needed".to_string()),
            example: None,
            phonetic: Some("/ˈnɛsəsɛri/".to_string()),
            srs_level: 3,
            review_interval: 72,
            next_review: None,
            last_practiced: None,
            practice_count: 4,
            correct_count: 3,
            incorrect_count: 1,
            familiar: false,
        }
    }

    fn db_pattern(pattern_type: &str, examples: &str) -> DbMistakePattern {
        DbMistakePattern {
            id: 9,
            word_id: 1,
            word: "necessary".to_string(),
            pattern_type: pattern_type.to_string(),
            description: "double letter ss omitted".to_string(),
            frequency: 2,
            examples: examples.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_to_core_state() {
        let state = db_word().to_core_state();
        assert_eq!(state.srs_level, 3);
        assert_eq!(state.review_interval, 72);
        assert_eq!(state.practice_count, 4);
        assert_eq!(state.correct_count, 3);
        assert_eq!(state.incorrect_count, 1);
    }

    #[test]
    fn test_to_core_state_negative_counters_floor_at_zero() {
        let mut word = db_word();
        word.practice_count = -3;
        assert_eq!(word.to_core_state().practice_count, 0);
    }

    #[test]
    fn test_to_core_state_keeps_out_of_range_level() {
        let mut word = db_word();
        word.srs_level = 9;
        assert_eq!(word.to_core_state().srs_level, 9);
    }

    #[test]
    fn test_needs_details() {
        let mut word = db_word();
        assert!(word.needs_details());
        word.example = Some("It is necessary.".to_string());
        assert!(!word.needs_details());
        word.meaning = Some("  ".to_string());
        assert!(word.needs_details());
    }

    #[test]
    fn test_pattern_to_view() {
        let view = db_pattern("doubling", r#"["necesary"]"#).to_view().unwrap();
        assert_eq!(view.pattern_type, PatternType::Doubling);
        assert_eq!(view.count, 2);
        assert_eq!(view.examples, vec!["necesary".to_string()]);
        assert_eq!(view.word, "necessary");
    }

    #[test]
    fn test_pattern_legacy_omission_tag() {
        let view = db_pattern("omission", "[]").to_view().unwrap();
        assert_eq!(view.pattern_type, PatternType::Doubling);
    }

    #[test]
    fn test_pattern_unknown_type_is_internal_error() {
        let err = db_pattern("mystery", "[]").to_view().unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn test_pattern_malformed_examples_is_internal_error() {
        let err = db_pattern("doubling", "not json").to_view().unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
    }
}
