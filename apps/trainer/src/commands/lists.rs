//! Word list commands.

use crate::db::{DbError, ListRepository, SqliteRepository};
use crate::state::AppState;
use quiz_core::search::{filter_lists, ListFilter};
use quiz_core::types::{ListSummary, WordList};
use std::sync::MutexGuard;

/// Text the user must type to delete every list.
pub const DELETE_ALL_CONFIRMATION: &str = "CONFIRM";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<DbError> for CommandError {
    fn from(e: DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<quiz_core::QuizError> for CommandError {
    fn from(e: quiz_core::QuizError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<quiz_core::TransferError> for CommandError {
    fn from(e: quiz_core::TransferError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self { message: e.to_string() }
    }
}

pub(crate) fn repository(
    state: &AppState,
) -> Result<MutexGuard<'_, SqliteRepository>, CommandError> {
    state
        .repository
        .lock()
        .map_err(|_| CommandError::new("repository lock poisoned"))
}

pub(crate) fn require_list(
    repo: &SqliteRepository,
    list_id: &str,
) -> Result<WordList, CommandError> {
    repo.get_list(list_id)?
        .ok_or_else(|| DbError::ListNotFound(list_id.to_string()).into())
}

/// List all word lists with their word counts.
pub fn list_lists(state: &AppState) -> Result<Vec<ListSummary>, CommandError> {
    let repo = repository(state)?;
    repo.get_all_lists().map_err(Into::into)
}

/// Get one list with its words.
pub fn get_list(list_id: &str, state: &AppState) -> Result<WordList, CommandError> {
    let repo = repository(state)?;
    require_list(&repo, list_id)
}

/// Create an empty list.
pub fn create_list(
    name: &str,
    source_language: &str,
    target_language: &str,
    state: &AppState,
) -> Result<WordList, CommandError> {
    let list = WordList::new(name, source_language, target_language);
    let repo = repository(state)?;
    repo.create_list(&list)?;
    tracing::info!(list_id = %list.id, name = %list.name, "created list");
    Ok(list)
}

/// Rename a list. Renaming to the current name is a no-op.
pub fn rename_list(
    list_id: &str,
    new_name: &str,
    state: &AppState,
) -> Result<WordList, CommandError> {
    let repo = repository(state)?;
    let list = require_list(&repo, list_id)?;
    if list.name == new_name.trim() {
        return Ok(list);
    }

    repo.rename_list(list_id, new_name)?;
    tracing::info!(list_id, from = %list.name, to = %new_name.trim(), "renamed list");
    require_list(&repo, list_id)
}

/// Delete a list and its words.
pub fn delete_list(list_id: &str, state: &AppState) -> Result<usize, CommandError> {
    let repo = repository(state)?;
    let removed = repo.delete_list(list_id)?;
    tracing::info!(list_id, words = removed, "deleted list");
    Ok(removed)
}

/// Delete every list. Requires the confirmation text.
pub fn delete_all_lists(
    confirmation: &str,
    state: &AppState,
) -> Result<(usize, usize), CommandError> {
    if confirmation.trim() != DELETE_ALL_CONFIRMATION {
        return Err(CommandError::new(format!(
            "type {DELETE_ALL_CONFIRMATION} to delete all lists"
        )));
    }

    let repo = repository(state)?;
    if repo.get_all_lists()?.is_empty() {
        return Err(CommandError::new("there are no lists to delete"));
    }

    let (lists, words) = repo.delete_all_lists()?;
    tracing::warn!(lists, words, "deleted all lists");
    Ok((lists, words))
}

/// Search lists by name or language.
pub fn search_lists(
    term: &str,
    filter: ListFilter,
    state: &AppState,
) -> Result<Vec<ListSummary>, CommandError> {
    let lists = list_lists(state)?;
    Ok(filter_lists(&lists, term, filter).into_iter().cloned().collect())
}
