//! Core vocabulary quiz library shared by the trainer application.
//!
//! Provides:
//! - Word list data model (WordEntry, WordRecord, WordList, Preferences)
//! - Answer matching against canonical answers and synonyms
//! - Quiz session sequencing with a review queue for missed words
//! - Session scoring and the quiz controller state machine
//! - JSON import/export format and list/word search helpers

pub mod error;
pub mod matching;
pub mod quiz;
pub mod scoring;
pub mod search;
pub mod session;
pub mod transfer;
pub mod types;

pub use error::{QuizError, Result, TransferError};
pub use matching::{accepted_answers, compare_answer, is_acceptable, MatchResult};
pub use quiz::{FeedbackView, QuestionView, QuizEvent, QuizOptions, QuizPhase, QuizSession};
pub use scoring::{finalize, AttemptDetail, SessionReport, WordOutcome};
pub use search::{filter_lists, filter_words, ListFilter};
pub use session::{
    build_session, shuffle, AttemptRecord, Phase, Progress, SessionState, SessionWord, Step,
};
pub use transfer::{ExportDocument, ImportBatch};
pub use types::{
    count_options, parse_synonyms, DisplayDirection, ListSummary, Preferences, RequestedCount,
    Theme, WordEntry, WordList, WordRecord,
};
