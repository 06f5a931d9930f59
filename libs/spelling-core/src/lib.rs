//! Core spelling practice library.
//!
//! Provides:
//! - Spaced repetition scheduling over mastery levels 0-5
//! - Review queue selection and practice word picking
//! - Mistake pattern classification for misspelled attempts
//! - Character-level edit scripts and spelling comparison
//! - Shared types (Word, WordState, PatternType, etc.)
//!
//! Everything here is pure: the current time and the random source are
//! passed in by the caller.

pub mod diff;
pub mod error;
pub mod matching;
pub mod mistakes;
pub mod srs;
pub mod types;

pub use error::{Result, SchedulerError};
pub use matching::{normalize_spelling, spelling_matches};
pub use mistakes::analyze_mistake;
pub use srs::queue::{get_due_words, pick_practice_word};
pub use srs::stats::{get_list_stats, get_user_stats};
pub use srs::{
    get_review_interval, ReviewOutcome, Scheduler, SchedulerConfig, MAX_INTERVAL_HOURS,
};
pub use types::{
    ListPracticeStats, MistakeAnalysis, PatternType, UserStats, Word, WordState, MAX_LEVEL,
};
