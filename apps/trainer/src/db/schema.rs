//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local database.
pub const SCHEMA: &str = r#"
-- Word lists
CREATE TABLE IF NOT EXISTS word_lists (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    source_language TEXT NOT NULL,
    target_language TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Words, ordered by insertion (rowid)
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id TEXT NOT NULL REFERENCES word_lists(id),
    source_text TEXT NOT NULL,
    target_text TEXT NOT NULL,
    source_synonyms TEXT NOT NULL DEFAULT '[]',
    target_synonyms TEXT NOT NULL DEFAULT '[]',
    added_at TEXT NOT NULL
);

-- User preferences
CREATE TABLE IF NOT EXISTS preferences (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    theme TEXT NOT NULL DEFAULT 'light',
    languages_swapped INTEGER NOT NULL DEFAULT 0,
    use_prompt_synonyms INTEGER NOT NULL DEFAULT 0
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_words_list ON words(list_id);
"#;

/// Initialize preferences if not exists.
pub const INIT_PREFERENCES: &str = r#"
INSERT OR IGNORE INTO preferences (id) VALUES (1);
"#;
