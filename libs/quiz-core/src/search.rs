//! Search over word lists and their words.

use crate::types::{ListSummary, WordRecord};
use serde::{Deserialize, Serialize};

/// Which list fields a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFilter {
    Name,
    /// Either language of the pair.
    Language,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self::Name
    }
}

/// Lists whose name or language contains `term`, ignoring case.
/// A blank term matches everything.
pub fn filter_lists<'a>(
    lists: &'a [ListSummary],
    term: &str,
    filter: ListFilter,
) -> Vec<&'a ListSummary> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return lists.iter().collect();
    }

    lists
        .iter()
        .filter(|list| match filter {
            ListFilter::Name => list.name.to_lowercase().contains(&term),
            ListFilter::Language => {
                list.source_language.to_lowercase().contains(&term)
                    || list.target_language.to_lowercase().contains(&term)
            }
        })
        .collect()
}

/// Words matching `term` in either text or any synonym, with their list positions.
pub fn filter_words<'a>(words: &'a [WordRecord], term: &str) -> Vec<(usize, &'a WordRecord)> {
    let term = term.trim().to_lowercase();
    let contains = |text: &String| text.to_lowercase().contains(&term);

    words
        .iter()
        .enumerate()
        .filter(|(_, word)| {
            term.is_empty()
                || contains(&word.source)
                || contains(&word.target)
                || word.source_synonyms.iter().any(contains)
                || word.target_synonyms.iter().any(contains)
        })
        .collect()
}
