//! Common test utilities for integration tests.
//!
//! Every context gets its own in-memory SQLite database, a fixed clock, a
//! seeded random source and fake audio/dictionary collaborators.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

use spelling_core::{Scheduler, SchedulerConfig};
use spelling_practice_backend::db::Database;
use spelling_practice_backend::models::{DbWord, DbWordList};
use spelling_practice_backend::services::clock::FixedClock;
use spelling_practice_backend::services::word_lists;
use spelling_practice_backend::AppState;

use fixtures::{FakeDictionary, FakeSynthesizer};

/// Test context holding the service state and handles to its fakes.
pub struct TestContext {
    pub state: AppState,
    pub clock: Arc<FixedClock>,
    pub synthesizer: Arc<FakeSynthesizer>,
    pub dictionary: Arc<FakeDictionary>,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if the in-memory database cannot be created.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        db.init_schema().await.expect("Failed to create schema");

        let clock = Arc::new(FixedClock::new(fixtures::start_time()));
        let synthesizer = Arc::new(FakeSynthesizer::default());
        let dictionary = Arc::new(FakeDictionary::default());

        let state = AppState {
            db: Arc::new(db),
            scheduler: Arc::new(Scheduler::new(SchedulerConfig::default())),
            clock: clock.clone(),
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(7))),
            synthesizer: synthesizer.clone(),
            dictionary: dictionary.clone(),
            review_limit: 20,
        };

        Self {
            state,
            clock,
            synthesizer,
            dictionary,
        }
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Create a list through the service layer.
    pub async fn create_list(&self, owner_id: i64, words: &[&str]) -> DbWordList {
        word_lists::create_word_list(
            &self.state,
            owner_id,
            "Test list",
            None,
            fixtures::new_words(words),
        )
        .await
        .expect("Failed to create test list")
    }

    /// Stored word by spelling within a list.
    pub async fn word(&self, list_id: i64, spelling: &str) -> DbWord {
        self.db()
            .get_words_in_list(list_id)
            .await
            .expect("Failed to load words")
            .into_iter()
            .find(|w| w.word == spelling)
            .unwrap_or_else(|| panic!("word {} not in list {}", spelling, list_id))
    }

    /// Overwrite a single column of a word row.
    pub async fn set_word_column(&self, word_id: i64, column: &str, value: i64) {
        sqlx::query(&format!("UPDATE words SET {} = ?1 WHERE id = ?2", column))
            .bind(value)
            .bind(word_id)
            .execute(self.db().pool())
            .await
            .expect("Failed to update word");
    }

    /// Number of rows in a table.
    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db().pool())
            .await
            .expect("Failed to count rows")
    }
}
