//! Import and export of word lists as JSON files.

use crate::db::ListRepository;
use crate::state::AppState;
use chrono::Utc;
use quiz_core::transfer::{
    export_file_name, list_export_file_name, parse_import, template_document, TEMPLATE_FILE_NAME,
};
use quiz_core::ExportDocument;
use std::fs;
use std::path::{Path, PathBuf};

use super::lists::{repository, require_list, CommandError};

/// Counts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ImportSummary {
    pub lists: usize,
    pub words: usize,
}

fn write_document(document: &ExportDocument, path: PathBuf) -> Result<PathBuf, CommandError> {
    fs::write(&path, document.to_json_pretty()?)?;
    Ok(path)
}

/// Export every list into `out_dir`. Returns the written file.
pub fn export_all(out_dir: &Path, state: &AppState) -> Result<PathBuf, CommandError> {
    let lists = repository(state)?.get_all_lists_with_words()?;
    let now = Utc::now();
    let document = ExportDocument::all(lists, now)?;

    let path = write_document(&document, out_dir.join(export_file_name(now.date_naive())))?;
    tracing::info!(
        path = %path.display(),
        lists = document.total_lists,
        words = document.total_words,
        "exported lists"
    );
    Ok(path)
}

/// Export a single list into `out_dir`.
pub fn export_list(
    list_id: &str,
    out_dir: &Path,
    state: &AppState,
) -> Result<PathBuf, CommandError> {
    let list = {
        let repo = repository(state)?;
        require_list(&repo, list_id)?
    };
    let now = Utc::now();
    let file_name = list_export_file_name(&list.name, now.date_naive());
    let document = ExportDocument::new(vec![list], now);

    let path = write_document(&document, out_dir.join(file_name))?;
    tracing::info!(list_id, path = %path.display(), "exported list");
    Ok(path)
}

/// Import every list in an export file. Nothing is stored when any
/// list name is already taken.
pub fn import_file(path: &Path, state: &AppState) -> Result<ImportSummary, CommandError> {
    let json = fs::read_to_string(path)?;
    let repo = repository(state)?;
    let existing: Vec<String> = repo.get_all_lists()?.into_iter().map(|l| l.name).collect();

    let batch = parse_import(&json, &existing, Utc::now())?;
    repo.import_lists(&batch.lists)?;

    let summary = ImportSummary {
        lists: batch.lists.len(),
        words: batch.total_words,
    };
    tracing::info!(
        path = %path.display(),
        lists = summary.lists,
        words = summary.words,
        "imported lists"
    );
    Ok(summary)
}

/// Write the example import file into `out_dir`.
pub fn write_template(out_dir: &Path) -> Result<PathBuf, CommandError> {
    let path = write_document(&template_document(), out_dir.join(TEMPLATE_FILE_NAME))?;
    tracing::debug!(path = %path.display(), "wrote template");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::lists::{create_list, list_lists};
    use crate::commands::words::{add_word, WordInput};
    use crate::db::SqliteRepository;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn state() -> AppState {
        AppState::new(SqliteRepository::open_in_memory().unwrap())
    }

    fn seed(state: &AppState, name: &str) -> String {
        let list = create_list(name, "Nederlands", "Engels", state).unwrap();
        let input = WordInput {
            shown_first: "fiets".to_string(),
            shown_second: "bike".to_string(),
            second_synonyms: "bicycle".to_string(),
            ..WordInput::default()
        };
        add_word(&list.id, &input, state).unwrap();
        list.id
    }

    #[test]
    fn export_with_no_lists_fails() {
        let dir = TempDir::new().unwrap();
        let err = export_all(dir.path(), &state()).unwrap_err();
        assert_eq!(err.message, "there are no word lists to export");
    }

    #[test]
    fn export_then_import_into_fresh_store() {
        let dir = TempDir::new().unwrap();
        let source = state();
        seed(&source, "Basis");
        let path = export_all(dir.path(), &source).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("word-lists-export-"));

        let target = state();
        let summary = import_file(&path, &target).unwrap();
        assert_eq!(summary, ImportSummary { lists: 1, words: 1 });
        assert_eq!(list_lists(&target).unwrap()[0].name, "Basis");
    }

    #[test]
    fn import_with_taken_name_stores_nothing() {
        let dir = TempDir::new().unwrap();
        let state = state();
        let id = seed(&state, "Basis");
        let path = export_list(&id, dir.path(), &state).unwrap();
        assert!(path.to_string_lossy().contains("basis-"));

        let err = import_file(&path, &state).unwrap_err();
        assert!(err.message.contains("already exists"));
        assert_eq!(list_lists(&state).unwrap().len(), 1);
    }

    #[test]
    fn import_applies_list_name_rules() {
        let dir = TempDir::new().unwrap();
        let state = state();
        seed(&state, "Basis");

        let padded = dir.path().join("padded.json");
        fs::write(&padded, r#"{"lists": [ { "name": " Basis " } ]}"#).unwrap();
        let err = import_file(&padded, &state).unwrap_err();
        assert!(err.message.contains("already exists"));

        let blank = dir.path().join("blank.json");
        fs::write(&blank, r#"{"lists": [ { "name": "Dieren" }, { "name": "   " } ]}"#).unwrap();
        let err = import_file(&blank, &state).unwrap_err();
        assert_eq!(err.message, "every imported list needs a name");

        let names: Vec<String> = list_lists(&state).unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Basis"]);
    }

    #[test]
    fn template_is_importable() {
        let dir = TempDir::new().unwrap();
        let path = write_template(dir.path()).unwrap();
        assert!(path.ends_with(TEMPLATE_FILE_NAME));

        let summary = import_file(&path, &state()).unwrap();
        assert_eq!(summary, ImportSummary { lists: 1, words: 3 });
    }
}
