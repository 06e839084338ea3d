//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid synonym data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("list not found: {0}")]
    ListNotFound(String),

    #[error("word {index} not found in list {list_id}")]
    WordNotFound { list_id: String, index: usize },

    #[error("a list named \"{0}\" already exists")]
    DuplicateListName(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
