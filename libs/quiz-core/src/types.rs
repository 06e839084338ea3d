//! Core types for the vocabulary trainer.

use crate::error::QuizError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A word/translation pair as seen by a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_synonyms: Vec<String>,
    #[serde(default)]
    pub target_synonyms: Vec<String>,
}

impl WordEntry {
    /// Create an entry without synonyms.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_synonyms: Vec::new(),
            target_synonyms: Vec::new(),
        }
    }

    pub fn with_synonyms(
        mut self,
        source_synonyms: Vec<String>,
        target_synonyms: Vec<String>,
    ) -> Self {
        self.source_synonyms = source_synonyms;
        self.target_synonyms = target_synonyms;
        self
    }

    /// Two entries denote the same word when their source and target texts match.
    pub fn same_pair(&self, other: &WordEntry) -> bool {
        self.source == other.source && self.target == other.target
    }
}

/// Persisted word record (import/export and storage shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_synonyms: Vec<String>,
    #[serde(default)]
    pub target_synonyms: Vec<String>,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl WordRecord {
    /// Build a record from form input laid out in display order.
    ///
    /// When languages are swapped the first field holds the list's target
    /// language, so both texts and synonym lists trade places before storage.
    pub fn from_display_input(
        source_text: &str,
        target_text: &str,
        source_synonyms: &str,
        target_synonyms: &str,
        swapped: bool,
    ) -> Self {
        let (source, target, source_syn, target_syn) = if swapped {
            (target_text, source_text, target_synonyms, source_synonyms)
        } else {
            (source_text, target_text, source_synonyms, target_synonyms)
        };

        Self {
            source: source.trim().to_string(),
            target: target.trim().to_string(),
            source_synonyms: parse_synonyms(source_syn),
            target_synonyms: parse_synonyms(target_syn),
            added_at: Utc::now(),
        }
    }

    /// The quiz view of this record.
    pub fn entry(&self) -> WordEntry {
        WordEntry {
            source: self.source.clone(),
            target: self.target.clone(),
            source_synonyms: self.source_synonyms.clone(),
            target_synonyms: self.target_synonyms.clone(),
        }
    }
}

/// Split comma-separated synonym text, dropping empty pieces.
pub fn parse_synonyms(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A named word list bound to a language pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub id: String,
    pub name: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub words: Vec<WordRecord>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl WordList {
    /// Create an empty list with a fresh id.
    pub fn new(name: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            source_language: source_language.trim().to_string(),
            target_language: target_language.trim().to_string(),
            words: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Quiz entries for every word, in list order.
    pub fn entries(&self) -> Vec<WordEntry> {
        self.words.iter().map(WordRecord::entry).collect()
    }

    /// Languages in display order: (shown first, shown second).
    pub fn display_languages(&self, swapped: bool) -> (&str, &str) {
        if swapped {
            (&self.target_language, &self.source_language)
        } else {
            (&self.source_language, &self.target_language)
        }
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
            word_count: self.words.len(),
            created_at: self.created_at,
        }
    }
}

/// List metadata with a word count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub source_language: String,
    pub target_language: String,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Which side of each word is asked and which is expected as the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayDirection {
    /// Prompt with the source text, expect the target text.
    Normal,
    /// Prompt with the target text, expect the source text.
    Swapped,
}

impl Default for DisplayDirection {
    fn default() -> Self {
        Self::Normal
    }
}

impl DisplayDirection {
    pub fn from_swapped(swapped: bool) -> Self {
        if swapped { Self::Swapped } else { Self::Normal }
    }

    pub fn is_swapped(self) -> bool {
        matches!(self, Self::Swapped)
    }
}

/// How many words a session should ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedCount {
    All,
    Count(usize),
}

impl Default for RequestedCount {
    fn default() -> Self {
        Self::All
    }
}

impl RequestedCount {
    /// Number of words to take from a list of `available` words, clamped to `[1, available]`.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            Self::All => available,
            Self::Count(n) => n.clamp(1, available.max(1)).min(available),
        }
    }

    /// Strict variant of [`resolve`](Self::resolve) that rejects out-of-range counts.
    pub fn validate(self, available: usize) -> Result<usize, QuizError> {
        match self {
            Self::All => Ok(available),
            Self::Count(n) if n >= 1 && n <= available => Ok(n),
            Self::Count(n) => Err(QuizError::InvalidRequestedCount {
                requested: n,
                available,
            }),
        }
    }
}

impl FromStr for RequestedCount {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<usize>()
            .map(Self::Count)
            .map_err(|_| QuizError::MalformedCount(s.to_string()))
    }
}

impl std::fmt::Display for RequestedCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

const COUNT_PRESETS: [usize; 4] = [5, 10, 15, 20];

/// Question-count choices offered for a list of `total` words.
pub fn count_options(total: usize) -> Vec<RequestedCount> {
    let mut options: Vec<RequestedCount> = COUNT_PRESETS
        .iter()
        .copied()
        .filter(|&n| n <= total)
        .map(RequestedCount::Count)
        .collect();
    if total > 0 {
        options.push(RequestedCount::All);
    }
    options
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// User preferences persisted alongside the word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub languages_swapped: bool,
    pub use_prompt_synonyms: bool,
}

impl Preferences {
    pub fn direction(&self) -> DisplayDirection {
        DisplayDirection::from_swapped(self.languages_swapped)
    }
}
