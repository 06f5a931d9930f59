//! SQLite database operations

pub mod schema;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::models::*;
use crate::services::external::WordDetails;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Private in-memory database on a single long-lived connection
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create tables and indexes if missing, then stamp the schema version
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::SCHEMA).execute(&self.pool).await?;
        sqlx::raw_sql(&format!("PRAGMA user_version = {}", schema::SCHEMA_VERSION))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Schema version stored in the database file
    pub async fn schema_version(&self) -> Result<i32> {
        let version = sqlx::query_scalar::<_, i32>("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Word List Repository ===

    /// Insert a list and its words in one transaction.
    ///
    /// Every word starts from `initial`.
    pub async fn create_word_list(
        &self,
        owner_id: i64,
        name: &str,
        description: Option<&str>,
        words: &[NewWord],
        initial: &WordState,
        now: DateTime<Utc>,
    ) -> Result<DbWordList> {
        let mut tx = self.pool.begin().await?;

        let list = sqlx::query_as::<_, DbWordList>(
            r#"
            INSERT INTO word_lists (owner_id, name, description, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, owner_id, name, description, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for word in words {
            sqlx::query(
                r#"
                INSERT INTO words (
                    word_list_id, word, meaning, example, phonetic,
                    srs_level, review_interval, next_review, last_practiced,
                    practice_count, correct_count, incorrect_count, familiar
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
            )
            .bind(list.id)
            .bind(&word.word)
            .bind(&word.meaning)
            .bind(&word.example)
            .bind(&word.phonetic)
            .bind(initial.srs_level)
            .bind(initial.review_interval)
            .bind(initial.next_review)
            .bind(initial.last_practiced)
            .bind(i64::from(initial.practice_count))
            .bind(i64::from(initial.correct_count))
            .bind(i64::from(initial.incorrect_count))
            .bind(initial.familiar)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(list)
    }

    /// Get a list if it belongs to the owner
    pub async fn get_word_list(&self, owner_id: i64, list_id: i64) -> Result<Option<DbWordList>> {
        let list = sqlx::query_as::<_, DbWordList>(
            r#"
            SELECT id, owner_id, name, description, created_at
            FROM word_lists
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(list_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    /// All lists of an owner, newest first
    pub async fn get_word_lists(&self, owner_id: i64) -> Result<Vec<DbWordList>> {
        let lists = sqlx::query_as::<_, DbWordList>(
            r#"
            SELECT id, owner_id, name, description, created_at
            FROM word_lists
            WHERE owner_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    /// Delete a list with its words and patterns. Returns false when nothing matched.
    pub async fn delete_word_list(&self, owner_id: i64, list_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM word_lists
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(list_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Word Repository ===

    /// Get a word if its list belongs to the user
    pub async fn get_word_for_user(&self, word_id: i64, user_id: i64) -> Result<Option<DbWord>> {
        let word = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT w.id, w.word_list_id, w.word, w.meaning, w.example, w.phonetic,
                   w.srs_level, w.review_interval, w.next_review, w.last_practiced,
                   w.practice_count, w.correct_count, w.incorrect_count, w.familiar
            FROM words w
            JOIN word_lists l ON l.id = w.word_list_id
            WHERE w.id = ?1 AND l.owner_id = ?2
            "#,
        )
        .bind(word_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// All words across the user's lists
    pub async fn get_words_for_user(&self, user_id: i64) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT w.id, w.word_list_id, w.word, w.meaning, w.example, w.phonetic,
                   w.srs_level, w.review_interval, w.next_review, w.last_practiced,
                   w.practice_count, w.correct_count, w.incorrect_count, w.familiar
            FROM words w
            JOIN word_lists l ON l.id = w.word_list_id
            WHERE l.owner_id = ?1
            ORDER BY w.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// All words of one list
    pub async fn get_words_in_list(&self, list_id: i64) -> Result<Vec<DbWord>> {
        let words = sqlx::query_as::<_, DbWord>(
            r#"
            SELECT id, word_list_id, word, meaning, example, phonetic,
                   srs_level, review_interval, next_review, last_practiced,
                   practice_count, correct_count, incorrect_count, familiar
            FROM words
            WHERE word_list_id = ?1
            ORDER BY id
            "#,
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Fill empty dictionary fields. Existing values are kept.
    pub async fn update_word_details(&self, word_id: i64, details: &WordDetails) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE words
            SET meaning = COALESCE(NULLIF(TRIM(meaning), ''), ?1),
                example = COALESCE(NULLIF(TRIM(example), ''), ?2),
                phonetic = COALESCE(NULLIF(TRIM(phonetic), ''), ?3)
            WHERE id = ?4
            "#,
        )
        .bind(&details.meaning)
        .bind(&details.example)
        .bind(&details.phonetic)
        .bind(word_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrite the mastery state of a word
    pub async fn save_word_state(&self, word_id: i64, state: &WordState) -> Result<()> {
        word_state_update(word_id, state).execute(&self.pool).await?;
        Ok(())
    }

    /// Persist a scheduled state and the attempt's mistake in one transaction
    pub async fn record_attempt(
        &self,
        word_id: i64,
        state: &WordState,
        mistake: Option<&MistakeAnalysis>,
        attempt: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        word_state_update(word_id, state).execute(&mut *tx).await?;

        if let Some(mistake) = mistake {
            // One row per (word, type, description); examples stay distinct
            sqlx::query(
                r#"
                INSERT INTO mistake_patterns (
                    word_id, pattern_type, description, frequency, examples, created_at, updated_at
                )
                VALUES (?1, ?2, ?3, 1, json_array(?4), ?5, ?5)
                ON CONFLICT (word_id, pattern_type, description) DO UPDATE SET
                    frequency = mistake_patterns.frequency + 1,
                    examples = CASE
                        WHEN EXISTS (
                            SELECT 1 FROM json_each(mistake_patterns.examples)
                            WHERE json_each.value = ?4
                        ) THEN mistake_patterns.examples
                        ELSE json_insert(mistake_patterns.examples, '$[#]', ?4)
                    END,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(word_id)
            .bind(mistake.pattern_type.as_str())
            .bind(&mistake.description)
            .bind(attempt)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // === Mistake Pattern Repository ===

    /// Patterns of one word, most frequent first
    pub async fn get_patterns_for_word(&self, word_id: i64) -> Result<Vec<DbMistakePattern>> {
        let patterns = sqlx::query_as::<_, DbMistakePattern>(
            r#"
            SELECT p.id, p.word_id, w.word, p.pattern_type, p.description,
                   p.frequency, p.examples, p.created_at, p.updated_at
            FROM mistake_patterns p
            JOIN words w ON w.id = p.word_id
            WHERE p.word_id = ?1
            ORDER BY p.frequency DESC, p.updated_at DESC, p.id
            "#,
        )
        .bind(word_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(patterns)
    }

    /// Patterns across the user's words, optionally limited to one list
    pub async fn get_patterns_for_user(
        &self,
        user_id: i64,
        list_id: Option<i64>,
    ) -> Result<Vec<DbMistakePattern>> {
        let patterns = sqlx::query_as::<_, DbMistakePattern>(
            r#"
            SELECT p.id, p.word_id, w.word, p.pattern_type, p.description,
                   p.frequency, p.examples, p.created_at, p.updated_at
            FROM mistake_patterns p
            JOIN words w ON w.id = p.word_id
            JOIN word_lists l ON l.id = w.word_list_id
            WHERE l.owner_id = ?1
              AND (?2 IS NULL OR w.word_list_id = ?2)
            ORDER BY p.frequency DESC, p.updated_at DESC, p.id
            "#,
        )
        .bind(user_id)
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(patterns)
    }
}

fn word_state_update(
    word_id: i64,
    state: &WordState,
) -> Query<'static, Sqlite, SqliteArguments<'static>> {
    sqlx::query(
        r#"
        UPDATE words
        SET srs_level = ?1,
            review_interval = ?2,
            next_review = ?3,
            last_practiced = ?4,
            practice_count = ?5,
            correct_count = ?6,
            incorrect_count = ?7,
            familiar = ?8
        WHERE id = ?9
        "#,
    )
    .bind(state.srs_level)
    .bind(state.review_interval)
    .bind(state.next_review)
    .bind(state.last_practiced)
    .bind(i64::from(state.practice_count))
    .bind(i64::from(state.correct_count))
    .bind(i64::from(state.incorrect_count))
    .bind(state.familiar)
    .bind(word_id)
}
