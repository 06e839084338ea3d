//! Application state.

use crate::db::SqliteRepository;
use quiz_core::QuizSession;
use std::sync::{Arc, Mutex};

/// Quiz in progress together with the list it was started from.
pub struct ActiveQuiz {
    pub list_id: String,
    pub session: QuizSession,
}

/// Global application state.
pub struct AppState {
    pub repository: Arc<Mutex<SqliteRepository>>,
    pub quiz: Mutex<Option<ActiveQuiz>>,
}

impl AppState {
    pub fn new(repository: SqliteRepository) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
            quiz: Mutex::new(None),
        }
    }
}
