//! Quiz session sequencing.
//!
//! A session asks a shuffled, count-limited primary queue of words. Missed
//! words wait in a review queue and are shuffled onto the end of the queue
//! once the cursor runs past the last queued word. Each such pass is a lap.

use crate::error::{QuizError, Result};
use crate::matching::{accepted_answers, is_acceptable};
use crate::types::{DisplayDirection, RequestedCount, WordEntry};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A word with its prompt and answer resolved for the session direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWord {
    pub entry: WordEntry,
    pub prompt: String,
    pub answer: String,
    /// Synonyms of the prompt side; only used to vary the prompt.
    pub prompt_synonyms: Vec<String>,
    /// Synonyms of the answer side; accepted as answers.
    pub answer_synonyms: Vec<String>,
}

impl SessionWord {
    pub fn resolve(entry: WordEntry, direction: DisplayDirection) -> Self {
        let (prompt, answer, prompt_synonyms, answer_synonyms) = match direction {
            DisplayDirection::Normal => (
                entry.source.clone(),
                entry.target.clone(),
                entry.source_synonyms.clone(),
                entry.target_synonyms.clone(),
            ),
            DisplayDirection::Swapped => (
                entry.target.clone(),
                entry.source.clone(),
                entry.target_synonyms.clone(),
                entry.source_synonyms.clone(),
            ),
        };

        Self {
            entry,
            prompt,
            answer,
            prompt_synonyms,
            answer_synonyms,
        }
    }

    pub fn is_acceptable(&self, submitted: &str) -> bool {
        is_acceptable(submitted, &self.answer, &self.answer_synonyms)
    }

    /// Canonical answer followed by the answer-side synonyms.
    pub fn accepted_answers(&self) -> Vec<String> {
        accepted_answers(&self.answer, &self.answer_synonyms)
    }

    pub fn same_word(&self, other: &SessionWord) -> bool {
        self.entry.same_pair(&other.entry)
    }
}

/// One submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub word: SessionWord,
    pub submitted: String,
    pub is_correct: bool,
}

/// What the sequencer has to offer next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Question(SessionWord),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Primary,
    Review,
}

/// Position within the session, for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub phase: Phase,
    pub numerator: usize,
    pub denominator: usize,
}

impl Progress {
    /// Bar fill in percent. The review phase always shows a full bar.
    pub fn percent(&self) -> f64 {
        match self.phase {
            Phase::Review => 100.0,
            Phase::Primary if self.denominator == 0 => 0.0,
            Phase::Primary => self.numerator as f64 / self.denominator as f64 * 100.0,
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Phase::Primary => write!(f, "{} / {}", self.numerator, self.denominator),
            Phase::Review => write!(f, "Review: {} / {}", self.numerator, self.denominator),
        }
    }
}

/// Shuffle in place with Fisher-Yates, walking from the last index down to 1.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Ordering and retry state of one quiz session.
#[derive(Debug, Clone)]
pub struct SessionState {
    queue: Vec<SessionWord>,
    review: Vec<SessionWord>,
    cursor: usize,
    original_count: usize,
    attempts: Vec<AttemptRecord>,
    direction: DisplayDirection,
}

/// Build a session over a shuffled copy of `words`, truncated to the requested count.
pub fn build_session<R: Rng + ?Sized>(
    words: &[WordEntry],
    requested: RequestedCount,
    direction: DisplayDirection,
    rng: &mut R,
) -> Result<SessionState> {
    if words.is_empty() {
        return Err(QuizError::EmptyWordList);
    }

    let mut shuffled = words.to_vec();
    shuffle(&mut shuffled, rng);
    shuffled.truncate(requested.resolve(words.len()));

    let queue: Vec<SessionWord> = shuffled
        .into_iter()
        .map(|entry| SessionWord::resolve(entry, direction))
        .collect();

    tracing::debug!(
        available = words.len(),
        asked = queue.len(),
        ?direction,
        "built quiz session"
    );

    Ok(SessionState {
        original_count: queue.len(),
        queue,
        review: Vec::new(),
        cursor: 0,
        attempts: Vec::new(),
        direction,
    })
}

impl SessionState {
    /// The word under the cursor, starting a review lap first if the queue is used up.
    pub fn current_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Step {
        if self.cursor >= self.queue.len() && !self.review.is_empty() {
            let mut lap = std::mem::take(&mut self.review);
            shuffle(&mut lap, rng);
            tracing::debug!(words = lap.len(), "starting review lap");
            self.queue.extend(lap);
        }

        match self.queue.get(self.cursor) {
            Some(word) => Step::Question(word.clone()),
            None => Step::Complete,
        }
    }

    pub fn progress(&self) -> Progress {
        if self.cursor < self.original_count {
            Progress {
                phase: Phase::Primary,
                numerator: self.cursor + 1,
                denominator: self.original_count,
            }
        } else {
            Progress {
                phase: Phase::Review,
                numerator: self.cursor - self.original_count + 1,
                denominator: self.queue.len() - self.original_count,
            }
        }
    }

    /// Record an answer. A correct answer moves on; a miss keeps the cursor in
    /// place for feedback and queues the word for review once per lap.
    pub fn record_attempt(&mut self, word: SessionWord, submitted: &str, is_correct: bool) {
        if is_correct {
            self.cursor += 1;
        } else if !self.review.iter().any(|pending| pending.same_word(&word)) {
            self.review.push(word.clone());
        }

        self.attempts.push(AttemptRecord {
            word,
            submitted: submitted.to_string(),
            is_correct,
        });
    }

    /// Move past a missed word after its feedback has been shown.
    pub fn acknowledge_feedback(&mut self) {
        self.cursor += 1;
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn original_count(&self) -> usize {
        self.original_count
    }

    pub fn queue(&self) -> &[SessionWord] {
        &self.queue
    }

    pub fn pending_review(&self) -> &[SessionWord] {
        &self.review
    }

    pub fn direction(&self) -> DisplayDirection {
        self.direction
    }
}
