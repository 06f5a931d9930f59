//! Core types for spelling practice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Highest mastery level a word can reach.
pub const MAX_LEVEL: i32 = 5;

/// Clamp any stored level into `0..=MAX_LEVEL`.
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(0, MAX_LEVEL)
}

/// Ratio with `0/0` treated as zero.
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Mastery state of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordState {
    pub srs_level: i32,
    /// Hours until the next review.
    pub review_interval: i64,
    /// `None` means the word was never scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<DateTime<Utc>>,
    pub practice_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub familiar: bool,
}

impl Default for WordState {
    fn default() -> Self {
        Self {
            srs_level: 0,
            review_interval: 4,
            next_review: None,
            last_practiced: None,
            practice_count: 0,
            correct_count: 0,
            incorrect_count: 0,
            familiar: false,
        }
    }
}

impl WordState {
    /// Share of attempts answered correctly.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct_count as u64, self.practice_count as u64)
    }

    /// Whether the word is due at `now`. Unscheduled words are never due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_some_and(|due| due <= now)
    }
}

/// A word from a user's list together with its mastery state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub word_list_id: i64,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(flatten)]
    pub state: WordState,
}

/// Category of a spelling mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Phonetic,
    Vowel,
    /// Omitted or unnecessary double letter.
    Doubling,
    Substitution,
    /// Two or more adjacent letters substituted.
    Sequence,
    Insertion,
    Deletion,
    Transposition,
    Other,
}

impl PatternType {
    /// Get the pattern type name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phonetic => "phonetic",
            Self::Vowel => "vowel",
            Self::Doubling => "doubling",
            Self::Substitution => "substitution",
            Self::Sequence => "sequence",
            Self::Insertion => "insertion",
            Self::Deletion => "deletion",
            Self::Transposition => "transposition",
            Self::Other => "other",
        }
    }

    /// Parse from string. `omission` is the legacy name for doubling.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "phonetic" => Some(Self::Phonetic),
            "vowel" => Some(Self::Vowel),
            "doubling" | "omission" => Some(Self::Doubling),
            "substitution" => Some(Self::Substitution),
            "sequence" => Some(Self::Sequence),
            "insertion" => Some(Self::Insertion),
            "deletion" => Some(Self::Deletion),
            "transposition" => Some(Self::Transposition),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one misspelled attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeAnalysis {
    pub pattern_type: PatternType,
    pub description: String,
    pub examples: Vec<String>,
}

/// SRS statistics across all of a user's words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_words: usize,
    pub total_due: usize,
    /// Every level 0-5 is present, zero-filled.
    pub level_counts: BTreeMap<i32, usize>,
    pub accuracy: f64,
    pub words_studied: usize,
}

/// Practice statistics for one word list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPracticeStats {
    pub total_words: usize,
    pub familiar_words: usize,
    pub practiced_words: usize,
    pub accuracy: f64,
}
