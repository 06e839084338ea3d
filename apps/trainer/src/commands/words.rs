//! Word commands. Input fields arrive in display order and are flipped
//! into list order when languages are swapped.

use crate::db::{SettingsRepository, WordRepository};
use crate::state::AppState;
use quiz_core::search::filter_words;
use quiz_core::types::WordRecord;

use super::lists::{repository, require_list, CommandError};

/// Form input for a word, in display order.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WordInput {
    pub shown_first: String,
    pub shown_second: String,
    #[serde(default)]
    pub first_synonyms: String,
    #[serde(default)]
    pub second_synonyms: String,
}

fn to_record(input: &WordInput, swapped: bool) -> Result<WordRecord, CommandError> {
    let record = WordRecord::from_display_input(
        &input.shown_first,
        &input.shown_second,
        &input.first_synonyms,
        &input.second_synonyms,
        swapped,
    );
    if record.source.is_empty() || record.target.is_empty() {
        return Err(CommandError::new("both the word and its translation are required"));
    }
    Ok(record)
}

/// Append a word to a list.
pub fn add_word(
    list_id: &str,
    input: &WordInput,
    state: &AppState,
) -> Result<WordRecord, CommandError> {
    let repo = repository(state)?;
    let swapped = repo.get_preferences()?.languages_swapped;
    let record = to_record(input, swapped)?;
    repo.add_word(list_id, &record)?;
    tracing::info!(list_id, source = %record.source, target = %record.target, "added word");
    Ok(record)
}

/// Replace the word at `index`, keeping its original creation time.
pub fn update_word(
    list_id: &str,
    index: usize,
    input: &WordInput,
    state: &AppState,
) -> Result<WordRecord, CommandError> {
    let repo = repository(state)?;
    let swapped = repo.get_preferences()?.languages_swapped;
    let existing = require_list(&repo, list_id)?
        .words
        .get(index)
        .map(|w| w.added_at)
        .ok_or_else(|| CommandError::new(format!("word {index} not found")))?;

    let mut record = to_record(input, swapped)?;
    record.added_at = existing;
    repo.update_word(list_id, index, &record)?;
    tracing::info!(list_id, index, "updated word");
    Ok(record)
}

/// Remove the word at `index`.
pub fn delete_word(list_id: &str, index: usize, state: &AppState) -> Result<(), CommandError> {
    let repo = repository(state)?;
    repo.delete_word(list_id, index)?;
    tracing::info!(list_id, index, "deleted word");
    Ok(())
}

/// Words of a list matching `term`, with their positions.
pub fn search_words(
    list_id: &str,
    term: &str,
    state: &AppState,
) -> Result<Vec<(usize, WordRecord)>, CommandError> {
    let repo = repository(state)?;
    let list = require_list(&repo, list_id)?;
    Ok(filter_words(&list.words, term)
        .into_iter()
        .map(|(index, word)| (index, word.clone()))
        .collect())
}
