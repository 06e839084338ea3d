//! Quiz commands. One quiz runs at a time; starting a new one replaces it.

use crate::db::SettingsRepository;
use crate::state::{ActiveQuiz, AppState};
use quiz_core::types::{DisplayDirection, RequestedCount};
use quiz_core::{QuestionView, QuizEvent, QuizOptions, QuizSession, SessionReport};
use std::sync::MutexGuard;

use super::lists::{repository, require_list, CommandError};

fn active_quiz(state: &AppState) -> Result<MutexGuard<'_, Option<ActiveQuiz>>, CommandError> {
    state
        .quiz
        .lock()
        .map_err(|_| CommandError::new("quiz lock poisoned"))
}

fn no_quiz() -> CommandError {
    CommandError::new("no quiz in progress")
}

/// Start a quiz over a list.
///
/// Direction follows the saved preference. `use_prompt_synonyms`
/// overrides the saved preference when given.
pub fn start_quiz(
    list_id: &str,
    requested: RequestedCount,
    use_prompt_synonyms: Option<bool>,
    state: &AppState,
) -> Result<QuestionView, CommandError> {
    let (list, preferences) = {
        let repo = repository(state)?;
        (require_list(&repo, list_id)?, repo.get_preferences()?)
    };

    let direction = preferences.direction();
    let (_, answer_language) = list.display_languages(direction == DisplayDirection::Swapped);
    let options = QuizOptions {
        requested,
        direction,
        use_prompt_synonyms: use_prompt_synonyms.unwrap_or(preferences.use_prompt_synonyms),
    };

    let session = QuizSession::start_random(&list.entries(), options, answer_language)?;
    let view = session.question().ok_or_else(no_quiz)?;

    tracing::info!(
        list_id,
        requested = %requested,
        questions = session.state().original_count(),
        swapped = session.state().direction().is_swapped(),
        prompt_synonyms = session.options().use_prompt_synonyms,
        "started quiz"
    );

    *active_quiz(state)? = Some(ActiveQuiz {
        list_id: list_id.to_string(),
        session,
    });
    Ok(view)
}

/// The question currently on screen, if a quiz is running.
pub fn current_question(state: &AppState) -> Result<Option<QuestionView>, CommandError> {
    let quiz = active_quiz(state)?;
    Ok(quiz.as_ref().and_then(|active| active.session.question()))
}

/// Submit an answer to the current question.
pub fn submit_answer(answer: &str, state: &AppState) -> Result<QuizEvent, CommandError> {
    let mut quiz = active_quiz(state)?;
    let active = quiz.as_mut().ok_or_else(no_quiz)?;
    let event = active.session.submit_answer(answer)?;
    log_completion(&active.list_id, &event);
    Ok(event)
}

/// Move on after the feedback for a missed word.
pub fn acknowledge_feedback(state: &AppState) -> Result<QuizEvent, CommandError> {
    let mut quiz = active_quiz(state)?;
    let active = quiz.as_mut().ok_or_else(no_quiz)?;
    let event = active.session.acknowledge_feedback()?;
    log_completion(&active.list_id, &event);
    Ok(event)
}

/// Report of the last quiz, once it has completed.
pub fn quiz_report(state: &AppState) -> Result<Option<SessionReport>, CommandError> {
    let quiz = active_quiz(state)?;
    Ok(quiz
        .as_ref()
        .and_then(|active| active.session.report().cloned()))
}

/// Drop the running quiz without a report.
pub fn abandon_quiz(state: &AppState) -> Result<bool, CommandError> {
    let abandoned = active_quiz(state)?.take();
    if let Some(active) = &abandoned {
        tracing::info!(list_id = %active.list_id, "abandoned quiz");
    }
    Ok(abandoned.is_some())
}

fn log_completion(list_id: &str, event: &QuizEvent) {
    if let QuizEvent::Complete(report) = event {
        tracing::info!(
            list_id,
            accuracy = report.accuracy,
            correct = report.correct_count,
            total = report.total_count,
            "finished quiz"
        );
    }
}
