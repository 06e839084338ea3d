//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised by the quiz session engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("no words available")]
    EmptyWordList,

    #[error("session finished without any recorded outcome")]
    DegenerateSession,

    #[error("requested {requested} words but only {available} are available")]
    InvalidRequestedCount { requested: usize, available: usize },

    #[error("invalid word count: {0}")]
    MalformedCount(String),

    #[error("cannot {operation} while the quiz is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: &'static str,
    },
}

/// Errors that can occur while importing word lists.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("file does not contain word list data")]
    InvalidFormat,

    #[error("a list named \"{0}\" already exists")]
    DuplicateList(String),

    #[error("every imported list needs a name")]
    UnnamedList,

    #[error("there are no word lists to export")]
    NothingToExport,
}
