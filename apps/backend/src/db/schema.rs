//! SQLite schema definitions.

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the practice database.
pub const SCHEMA: &str = r#"
-- Word lists owned by a user
CREATE TABLE IF NOT EXISTS word_lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL
);

-- Words with their mastery state
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_list_id INTEGER NOT NULL REFERENCES word_lists(id) ON DELETE CASCADE,
    word TEXT NOT NULL,
    meaning TEXT,
    example TEXT,
    phonetic TEXT,
    srs_level INTEGER NOT NULL DEFAULT 0,
    review_interval INTEGER NOT NULL DEFAULT 4,
    next_review TEXT,
    last_practiced TEXT,
    practice_count INTEGER NOT NULL DEFAULT 0,
    correct_count INTEGER NOT NULL DEFAULT 0,
    incorrect_count INTEGER NOT NULL DEFAULT 0,
    familiar INTEGER NOT NULL DEFAULT 0
);

-- Aggregated mistakes per word; examples is a JSON array of distinct attempts
CREATE TABLE IF NOT EXISTS mistake_patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_id INTEGER NOT NULL REFERENCES words(id) ON DELETE CASCADE,
    pattern_type TEXT NOT NULL,
    description TEXT NOT NULL,
    frequency INTEGER NOT NULL DEFAULT 1 CHECK (frequency >= 0),
    examples TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (word_id, pattern_type, description)
);

CREATE INDEX IF NOT EXISTS idx_word_lists_owner ON word_lists(owner_id);
CREATE INDEX IF NOT EXISTS idx_words_list ON words(word_list_id);
CREATE INDEX IF NOT EXISTS idx_words_next_review ON words(next_review);
CREATE INDEX IF NOT EXISTS idx_mistake_patterns_word ON mistake_patterns(word_id);
"#;
