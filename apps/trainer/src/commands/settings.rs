//! Preference commands.

use crate::db::SettingsRepository;
use crate::state::AppState;
use quiz_core::types::{Preferences, Theme};

use super::lists::{repository, CommandError};

/// Get saved preferences.
pub fn get_preferences(state: &AppState) -> Result<Preferences, CommandError> {
    let repo = repository(state)?;
    repo.get_preferences().map_err(Into::into)
}

/// Save preferences.
pub fn save_preferences(preferences: &Preferences, state: &AppState) -> Result<(), CommandError> {
    let repo = repository(state)?;
    repo.save_preferences(preferences).map_err(Into::into)
}

fn update(
    state: &AppState,
    change: impl FnOnce(&mut Preferences),
) -> Result<Preferences, CommandError> {
    let repo = repository(state)?;
    let mut preferences = repo.get_preferences()?;
    change(&mut preferences);
    repo.save_preferences(&preferences)?;
    Ok(preferences)
}

pub fn set_theme(theme: Theme, state: &AppState) -> Result<Preferences, CommandError> {
    let preferences = update(state, |p| p.theme = theme)?;
    tracing::info!(theme = theme.as_str(), "theme changed");
    Ok(preferences)
}

/// Set whether quizzes and forms show the target language first.
pub fn set_languages_swapped(swapped: bool, state: &AppState) -> Result<Preferences, CommandError> {
    let preferences = update(state, |p| p.languages_swapped = swapped)?;
    tracing::info!(swapped, "language direction changed");
    Ok(preferences)
}

pub fn set_prompt_synonyms(enabled: bool, state: &AppState) -> Result<Preferences, CommandError> {
    update(state, |p| p.use_prompt_synonyms = enabled)
}
