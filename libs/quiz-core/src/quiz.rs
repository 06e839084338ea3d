//! Quiz session controller.
//!
//! Drives a [`SessionState`] through its lifecycle:
//!
//! ```text
//! Active --correct, more left--> Active
//! Active --correct, none left--> Complete
//! Active --incorrect-----------> Feedback --acknowledge--> Active | Complete
//! ```

use crate::error::{QuizError, Result};
use crate::scoring::{finalize, SessionReport};
use crate::session::{build_session, Progress, SessionState, SessionWord, Step};
use crate::types::{DisplayDirection, RequestedCount, WordEntry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Options fixed when a session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    pub requested: RequestedCount,
    pub direction: DisplayDirection,
    /// Draw each prompt from the prompt text and its synonyms.
    pub use_prompt_synonyms: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Active,
    Feedback,
    Complete,
}

impl QuizPhase {
    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Feedback => "showing feedback",
            Self::Complete => "complete",
        }
    }
}

/// What the display surface shows for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub prompt: String,
    pub answer_field_label: String,
    pub progress: Progress,
}

/// What the display surface shows after a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackView {
    pub prompt: String,
    pub submitted: String,
    pub accepted_answers: Vec<String>,
}

/// Result of a controller transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizEvent {
    Question(QuestionView),
    Feedback(FeedbackView),
    Complete(SessionReport),
}

/// A running quiz over one word list.
pub struct QuizSession<R = StdRng> {
    state: SessionState,
    phase: QuizPhase,
    current: Option<SessionWord>,
    prompt: String,
    options: QuizOptions,
    answer_language: String,
    report: Option<SessionReport>,
    rng: R,
}

impl QuizSession<StdRng> {
    /// Start a session seeded from the operating system.
    pub fn start_random(
        words: &[WordEntry],
        options: QuizOptions,
        answer_language: &str,
    ) -> Result<Self> {
        Self::start(words, options, answer_language, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    /// Build the session and present the first question.
    pub fn start(
        words: &[WordEntry],
        options: QuizOptions,
        answer_language: &str,
        mut rng: R,
    ) -> Result<Self> {
        let state = build_session(words, options.requested, options.direction, &mut rng)?;

        let mut session = Self {
            state,
            phase: QuizPhase::Active,
            current: None,
            prompt: String::new(),
            options,
            answer_language: answer_language.to_string(),
            report: None,
            rng,
        };
        session.advance()?;
        Ok(session)
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn options(&self) -> QuizOptions {
        self.options
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Final report, once the session is complete.
    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    /// The question on screen, while active or showing feedback.
    pub fn question(&self) -> Option<QuestionView> {
        self.current.as_ref().map(|_| QuestionView {
            prompt: self.prompt.clone(),
            answer_field_label: format!("Your answer ({})", self.answer_language),
            progress: self.state.progress(),
        })
    }

    /// Check an answer for the current question.
    pub fn submit_answer(&mut self, submitted: &str) -> Result<QuizEvent> {
        let word = match (self.phase, self.current.as_ref()) {
            (QuizPhase::Active, Some(word)) => word.clone(),
            _ => return Err(self.invalid("submit an answer")),
        };

        let is_correct = word.is_acceptable(submitted);
        tracing::debug!(prompt = %self.prompt, is_correct, "answer submitted");

        let accepted_answers = word.accepted_answers();
        self.state.record_attempt(word, submitted, is_correct);

        if is_correct {
            self.advance()
        } else {
            self.phase = QuizPhase::Feedback;
            Ok(QuizEvent::Feedback(FeedbackView {
                prompt: self.prompt.clone(),
                submitted: submitted.to_string(),
                accepted_answers,
            }))
        }
    }

    /// Continue after the feedback for a missed word.
    pub fn acknowledge_feedback(&mut self) -> Result<QuizEvent> {
        if self.phase != QuizPhase::Feedback {
            return Err(self.invalid("acknowledge feedback"));
        }
        self.state.acknowledge_feedback();
        self.advance()
    }

    fn advance(&mut self) -> Result<QuizEvent> {
        match self.state.current_question(&mut self.rng) {
            Step::Question(word) => {
                self.prompt = self.pick_prompt(&word);
                self.current = Some(word);
                self.phase = QuizPhase::Active;
                let view = self.question().ok_or(QuizError::DegenerateSession)?;
                Ok(QuizEvent::Question(view))
            }
            Step::Complete => {
                let report = finalize(&self.state)?;
                tracing::debug!(
                    accuracy = report.accuracy,
                    attempts = report.total_attempts,
                    "quiz complete"
                );
                self.current = None;
                self.phase = QuizPhase::Complete;
                self.report = Some(report.clone());
                Ok(QuizEvent::Complete(report))
            }
        }
    }

    fn pick_prompt(&mut self, word: &SessionWord) -> String {
        if !self.options.use_prompt_synonyms || word.prompt_synonyms.is_empty() {
            return word.prompt.clone();
        }
        let pick = self.rng.gen_range(0..=word.prompt_synonyms.len());
        match pick {
            0 => word.prompt.clone(),
            n => word.prompt_synonyms[n - 1].clone(),
        }
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            phase: self.phase.as_str(),
        }
    }
}
