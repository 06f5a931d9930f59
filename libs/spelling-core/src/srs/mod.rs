//! Spaced repetition scheduling for word mastery.
//!
//! Each word sits on a mastery level 0-5 that maps to a base review interval:
//! - Correct answers climb one level
//! - Mistakes drop two levels (floored at 0)
//! - Words already at level 5 grow their interval by 1.5x instead
//!
//! Intervals carry a small random jitter so words that reach a level together
//! do not all come due at the same instant.

pub mod queue;
pub mod stats;

use crate::error::{Result, SchedulerError};
use crate::types::{clamp_level, ratio, WordState, MAX_LEVEL};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Base review interval in hours, indexed by level.
pub const BASE_INTERVALS: [i64; 6] = [4, 8, 24, 72, 168, 720];

/// Upper bound on any review interval: ten years.
pub const MAX_INTERVAL_HOURS: i64 = 24 * 365 * 10;

/// Base interval for a level, clamped to the table bounds.
pub fn get_review_interval(level: i32) -> i64 {
    BASE_INTERVALS[clamp_level(level) as usize]
}

/// Validate a stored level.
pub fn checked_level(level: i32) -> Result<i32> {
    if (0..=MAX_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(SchedulerError::InvalidState { level })
    }
}

/// Tunable scheduler parameters.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub intervals: [i64; 6],
    /// Levels lost on an incorrect answer.
    pub incorrect_penalty: i32,
    /// Interval multiplier for correct answers at the top level.
    pub mastered_growth: f64,
    /// Jitter factor is `jitter_base + jitter_step * level`.
    pub jitter_base: f64,
    pub jitter_step: f64,
    pub min_practice_count: u32,
    pub min_accuracy: f64,
    pub min_familiar_level: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            intervals: BASE_INTERVALS,
            incorrect_penalty: 2,
            mastered_growth: 1.5,
            jitter_base: 0.1,
            jitter_step: 0.05,
            min_practice_count: 3,
            min_accuracy: 0.8,
            min_familiar_level: 3,
        }
    }
}

/// Result of scheduling a word after a review.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub new_state: WordState,
    pub next_review: DateTime<Utc>,
    pub previous_level: i32,
    /// Set when the stored level was out of range and had to be clamped.
    pub invalid_state: Option<SchedulerError>,
}

/// Stateless SRS scheduler. Time and randomness are supplied per call.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Configured interval for a level, clamped to the table bounds.
    pub fn review_interval(&self, level: i32) -> i64 {
        self.config.intervals[clamp_level(level) as usize]
    }

    /// Initial state for a freshly uploaded word.
    pub fn initial_state(&self, now: DateTime<Utc>) -> WordState {
        let interval = self.review_interval(0);
        WordState {
            srs_level: 0,
            review_interval: interval,
            next_review: Some(review_at(now, interval)),
            last_practiced: None,
            practice_count: 0,
            correct_count: 0,
            incorrect_count: 0,
            familiar: false,
        }
    }

    /// Calculate the next state after a review or practice attempt.
    pub fn process_review_result<R: Rng + ?Sized>(
        &self,
        state: &WordState,
        correct: bool,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> ReviewOutcome {
        let (level, invalid_state) = match checked_level(state.srs_level) {
            Ok(level) => (level, None),
            Err(err) => (clamp_level(state.srs_level), Some(err)),
        };

        let mut new_state = state.clone();
        new_state.practice_count = new_state.practice_count.saturating_add(1);
        new_state.last_practiced = Some(now);

        let interval = if correct {
            new_state.correct_count = new_state.correct_count.saturating_add(1);
            if level < MAX_LEVEL {
                new_state.srs_level = level + 1;
                self.jittered_interval(new_state.srs_level, rng)
            } else {
                new_state.srs_level = MAX_LEVEL;
                self.mastered_interval(state.review_interval)
            }
        } else {
            new_state.incorrect_count = new_state.incorrect_count.saturating_add(1);
            new_state.srs_level = (level - self.config.incorrect_penalty).max(0);
            self.jittered_interval(new_state.srs_level, rng)
        };

        let next_review = review_at(now, interval);
        new_state.review_interval = interval;
        new_state.next_review = Some(next_review);
        new_state.familiar = self.is_familiar(&new_state);

        ReviewOutcome {
            new_state,
            next_review,
            previous_level: level,
            invalid_state,
        }
    }

    /// Familiar once enough attempts, accuracy and level are reached together.
    pub fn is_familiar(&self, state: &WordState) -> bool {
        state.practice_count >= self.config.min_practice_count
            && ratio(state.correct_count as u64, state.practice_count as u64)
                >= self.config.min_accuracy
            && state.srs_level >= self.config.min_familiar_level
    }

    fn jittered_interval<R: Rng + ?Sized>(&self, level: i32, rng: &mut R) -> i64 {
        let base = self.review_interval(level) as f64;
        let factor = self.config.jitter_base + self.config.jitter_step * clamp_level(level) as f64;
        let half_spread = base * factor / 2.0;
        let offset = rng.gen_range(-half_spread..=half_spread);
        ((base + offset) as i64).max(1)
    }

    fn mastered_interval(&self, previous: i64) -> i64 {
        let previous = if previous > 0 {
            previous
        } else {
            self.review_interval(MAX_LEVEL)
        };
        let grown = (previous.min(MAX_INTERVAL_HOURS) as f64 * self.config.mastered_growth).round();
        (grown as i64).clamp(1, MAX_INTERVAL_HOURS)
    }
}

/// `now` plus `hours`, saturating at the latest representable instant.
fn review_at(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
    Duration::try_hours(hours)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
