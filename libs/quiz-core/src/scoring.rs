//! Session scoring.

use crate::error::{QuizError, Result};
use crate::session::{SessionState, SessionWord};
use serde::{Deserialize, Serialize};

/// A single answer given for a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptDetail {
    pub submitted: String,
    pub is_correct: bool,
}

/// Outcome for one unique word across all its appearances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub word: SessionWord,
    pub attempts: Vec<AttemptDetail>,
    /// Correct if any attempt was correct.
    pub is_correct: bool,
    pub accepted_answers: Vec<String>,
}

impl WordOutcome {
    pub fn final_answer(&self) -> Option<&str> {
        self.attempts.last().map(|a| a.submitted.as_str())
    }
}

/// Final accuracy summary of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub correct_count: usize,
    pub total_count: usize,
    /// Percentage of unique words eventually answered correctly, rounded.
    pub accuracy: u32,
    pub total_attempts: usize,
    /// Attempts beyond the first per word.
    pub repeated_attempts: usize,
    pub per_word: Vec<WordOutcome>,
}

/// Collapse the attempt history into one outcome per word.
pub fn finalize(state: &SessionState) -> Result<SessionReport> {
    let mut per_word: Vec<WordOutcome> = Vec::new();

    for attempt in state.attempts() {
        let detail = AttemptDetail {
            submitted: attempt.submitted.clone(),
            is_correct: attempt.is_correct,
        };

        match per_word.iter_mut().find(|o| o.word.same_word(&attempt.word)) {
            Some(outcome) => {
                outcome.is_correct |= attempt.is_correct;
                outcome.attempts.push(detail);
            }
            None => per_word.push(WordOutcome {
                word: attempt.word.clone(),
                attempts: vec![detail],
                is_correct: attempt.is_correct,
                accepted_answers: attempt.word.accepted_answers(),
            }),
        }
    }

    let total_count = per_word.len();
    if total_count == 0 {
        return Err(QuizError::DegenerateSession);
    }

    let correct_count = per_word.iter().filter(|o| o.is_correct).count();
    let accuracy = (100.0 * correct_count as f64 / total_count as f64).round() as u32;
    let total_attempts = state.attempts().len();

    Ok(SessionReport {
        correct_count,
        total_count,
        accuracy,
        total_attempts,
        repeated_attempts: total_attempts - total_count,
        per_word,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{build_session, Step};
    use crate::types::{DisplayDirection, RequestedCount, WordEntry};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session(entries: &[WordEntry]) -> (SessionState, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let state =
            build_session(entries, RequestedCount::All, DisplayDirection::Normal, &mut rng)
                .unwrap();
        (state, rng)
    }

    fn next(state: &mut SessionState, rng: &mut ChaCha8Rng) -> SessionWord {
        match state.current_question(rng) {
            Step::Question(word) => word,
            Step::Complete => panic!("expected a question"),
        }
    }

    #[test]
    fn no_attempts_is_degenerate() {
        let (state, _) = session(&[WordEntry::new("huis", "house")]);
        assert_eq!(finalize(&state).unwrap_err(), QuizError::DegenerateSession);
    }

    #[test]
    fn eventual_success_counts_once_as_correct() {
        let (mut state, mut rng) = session(&[WordEntry::new("huis", "house")]);

        // Missed in the primary lap and in the first review lap.
        for wrong in ["home", "hose"] {
            let word = next(&mut state, &mut rng);
            state.record_attempt(word, wrong, false);
            state.acknowledge_feedback();
        }

        let word = next(&mut state, &mut rng);
        state.record_attempt(word, "house", true);
        assert_eq!(state.current_question(&mut rng), Step::Complete);

        let report = finalize(&state).unwrap();
        assert_eq!(report.total_count, 1);
        assert_eq!(report.correct_count, 1);
        assert_eq!(report.accuracy, 100);
        assert_eq!(report.total_attempts, 3);
        assert_eq!(report.repeated_attempts, 2);
        assert_eq!(report.per_word[0].attempts.len(), 3);
        assert_eq!(report.per_word[0].final_answer(), Some("house"));
    }

    #[test]
    fn accuracy_is_rounded() {
        let entries = [
            WordEntry::new("een", "one"),
            WordEntry::new("twee", "two"),
            WordEntry::new("drie", "three"),
        ];
        let (mut state, mut rng) = session(&entries);

        // Miss the first word and abandon the review by answering the rest only.
        let word = next(&mut state, &mut rng);
        state.record_attempt(word, "?", false);
        state.acknowledge_feedback();
        for _ in 0..2 {
            let word = next(&mut state, &mut rng);
            let answer = word.answer.clone();
            state.record_attempt(word, &answer, true);
        }

        let report = finalize(&state).unwrap();
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.total_count, 3);
        assert_eq!(report.accuracy, 67);
    }

    #[test]
    fn accepted_answers_use_answer_side_synonyms() {
        let entry = WordEntry::new("fiets", "bike")
            .with_synonyms(vec!["rijwiel".into()], vec!["bicycle".into()]);
        let (mut state, mut rng) = session(&[entry]);
        let word = next(&mut state, &mut rng);
        state.record_attempt(word, "bicycle", true);

        let report = finalize(&state).unwrap();
        assert_eq!(report.per_word[0].accepted_answers, vec!["bike", "bicycle"]);
    }
}
