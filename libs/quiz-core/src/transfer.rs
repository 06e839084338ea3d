//! JSON import/export format for word lists.
//!
//! # Format
//! ```json
//! {
//!   "exportDate": "2024-01-15T10:30:00Z",
//!   "totalLists": 1,
//!   "totalWords": 1,
//!   "lists": [
//!     {
//!       "id": "…",
//!       "name": "listname",
//!       "sourceLanguage": "Dutch",
//!       "targetLanguage": "English",
//!       "words": [
//!         { "source": "fiets", "target": "bike", "sourceSynonyms": [], "targetSynonyms": ["bicycle"], "addedAt": "…" }
//!       ],
//!       "createdAt": "…"
//!     }
//!   ]
//! }
//! ```

use crate::error::TransferError;
use crate::types::{WordList, WordRecord};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File name offered for the downloadable template.
pub const TEMPLATE_FILE_NAME: &str = "woordenlijst-template.json";

/// Exported collection of word lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_date: DateTime<Utc>,
    pub total_lists: usize,
    pub total_words: usize,
    pub lists: Vec<WordList>,
}

impl ExportDocument {
    pub fn new(lists: Vec<WordList>, export_date: DateTime<Utc>) -> Self {
        Self {
            export_date,
            total_lists: lists.len(),
            total_words: lists.iter().map(|l| l.words.len()).sum(),
            lists,
        }
    }

    /// Export every list; there must be at least one.
    pub fn all(lists: Vec<WordList>, export_date: DateTime<Utc>) -> Result<Self, TransferError> {
        if lists.is_empty() {
            return Err(TransferError::NothingToExport);
        }
        Ok(Self::new(lists, export_date))
    }

    pub fn to_json_pretty(&self) -> Result<String, TransferError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// Lists accepted by an import, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBatch {
    pub lists: Vec<WordList>,
    pub total_words: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedList {
    name: String,
    #[serde(default)]
    source_language: String,
    #[serde(default)]
    target_language: String,
    #[serde(default)]
    words: Option<Vec<ImportedWord>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedWord {
    source: String,
    target: String,
    #[serde(default)]
    source_synonyms: Vec<String>,
    #[serde(default)]
    target_synonyms: Vec<String>,
    #[serde(default)]
    added_at: Option<DateTime<Utc>>,
}

/// Parse an export file and prepare its lists for import.
///
/// Names are trimmed. Nothing is imported when any list is unnamed or its
/// name matches an existing one (case-insensitive). Imported lists get
/// fresh ids; missing timestamps default to `now`.
pub fn parse_import(
    json: &str,
    existing_names: &[String],
    now: DateTime<Utc>,
) -> Result<ImportBatch, TransferError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let lists = match value.get("lists") {
        Some(lists) if lists.is_array() => lists.clone(),
        _ => return Err(TransferError::InvalidFormat),
    };
    let mut imported: Vec<ImportedList> = serde_json::from_value(lists)?;
    for list in &mut imported {
        list.name = list.name.trim().to_string();
        if list.name.is_empty() {
            return Err(TransferError::UnnamedList);
        }
    }

    let existing: Vec<String> = existing_names.iter().map(|n| n.to_lowercase()).collect();
    if let Some(duplicate) = imported
        .iter()
        .find(|list| existing.contains(&list.name.to_lowercase()))
    {
        return Err(TransferError::DuplicateList(duplicate.name.clone()));
    }

    let lists: Vec<WordList> = imported
        .into_iter()
        .map(|list| WordList {
            id: Uuid::new_v4().to_string(),
            name: list.name,
            source_language: list.source_language,
            target_language: list.target_language,
            words: list
                .words
                .unwrap_or_default()
                .into_iter()
                .map(|word| WordRecord {
                    source: word.source,
                    target: word.target,
                    source_synonyms: word.source_synonyms,
                    target_synonyms: word.target_synonyms,
                    added_at: word.added_at.unwrap_or(now),
                })
                .collect(),
            created_at: list.created_at.unwrap_or(now),
        })
        .collect();

    let total_words = lists.iter().map(|l| l.words.len()).sum();
    Ok(ImportBatch { lists, total_words })
}

/// `word-lists-export-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("word-lists-export-{}.json", date.format("%Y-%m-%d"))
}

/// File name for a single exported list: the name slugged to ASCII
/// alphanumerics and dashes, lowercased, plus the date.
pub fn list_export_file_name(list_name: &str, date: NaiveDate) -> String {
    let slug: String = list_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    format!("{}-{}.json", slug, date.format("%Y-%m-%d"))
}

/// Example document describing the import format.
pub fn template_document() -> ExportDocument {
    let stamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap_or_default();
    let word = |source: &str, target: &str, source_syn: &[&str], target_syn: &[&str]| WordRecord {
        source: source.to_string(),
        target: target.to_string(),
        source_synonyms: source_syn.iter().map(|s| s.to_string()).collect(),
        target_synonyms: target_syn.iter().map(|s| s.to_string()).collect(),
        added_at: stamp,
    };

    let list = WordList {
        id: "1705312200000abc123".to_string(),
        name: "listname".to_string(),
        source_language: "Language to learn".to_string(),
        target_language: "User Language".to_string(),
        words: vec![
            word("word1", "translation1", &["synonym1", "synonym2"], &["synonym1", "synonym2"]),
            word("word2", "translation2", &[], &["synonym1"]),
            word("word3", "translation3", &["synonym1"], &[]),
        ],
        created_at: stamp,
    };

    ExportDocument::new(vec![list], stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn export_counts_lists_and_words() {
        let mut list = WordList::new("Basics", "Dutch", "English");
        list.words.push(WordRecord::from_display_input("fiets", "bike", "", "", false));
        list.words.push(WordRecord::from_display_input("huis", "house", "", "", false));
        let empty = WordList::new("Empty", "Dutch", "English");
        let doc = ExportDocument::new(vec![list, empty], now());
        assert_eq!(doc.total_lists, 2);
        assert_eq!(doc.total_words, 2);

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"sourceLanguage\": \"Dutch\""));
        assert!(json.contains("\"targetSynonyms\": []"));
    }

    #[test]
    fn exporting_nothing_fails() {
        assert!(matches!(
            ExportDocument::all(Vec::new(), now()),
            Err(TransferError::NothingToExport)
        ));
    }

    #[test]
    fn import_fills_defaults_and_assigns_new_ids() {
        let json = r#"{
            "lists": [
                { "id": "old", "name": "Animals", "sourceLanguage": "Dutch", "targetLanguage": "English",
                  "words": [ { "source": "kat", "target": "cat" } ] },
                { "name": "Nothing yet", "sourceLanguage": "Dutch", "targetLanguage": "English" }
            ]
        }"#;

        let batch = parse_import(json, &[], now()).unwrap();
        assert_eq!(batch.lists.len(), 2);
        assert_eq!(batch.total_words, 1);

        let animals = &batch.lists[0];
        assert_ne!(animals.id, "old");
        assert_eq!(animals.created_at, now());
        assert_eq!(animals.words[0].added_at, now());
        assert!(animals.words[0].target_synonyms.is_empty());
        assert!(batch.lists[1].words.is_empty());
    }

    #[test]
    fn import_rejects_missing_lists_array() {
        for json in [r#"{"foo": 1}"#, r#"{"lists": {}}"#] {
            assert!(matches!(
                parse_import(json, &[], now()),
                Err(TransferError::InvalidFormat)
            ));
        }
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(matches!(parse_import("{not json", &[], now()), Err(TransferError::Json(_))));
    }

    #[test]
    fn import_rejects_duplicate_names_case_insensitively() {
        let json = r#"{"lists": [ { "name": "animals" } ]}"#;
        let existing = vec!["Animals".to_string()];
        match parse_import(json, &existing, now()) {
            Err(TransferError::DuplicateList(name)) => assert_eq!(name, "animals"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn import_trims_names_before_checking_duplicates() {
        let existing = vec!["Basis".to_string()];
        let json = r#"{"lists": [ { "name": " Basis " } ]}"#;
        match parse_import(json, &existing, now()) {
            Err(TransferError::DuplicateList(name)) => assert_eq!(name, "Basis"),
            other => panic!("expected duplicate error, got {other:?}"),
        }

        let json = r#"{"lists": [ { "name": "  Dieren\t" } ]}"#;
        let batch = parse_import(json, &existing, now()).unwrap();
        assert_eq!(batch.lists[0].name, "Dieren");
    }

    #[test]
    fn import_rejects_blank_names() {
        let json = r#"{"lists": [ { "name": "Dieren" }, { "name": "   " } ]}"#;
        assert!(matches!(parse_import(json, &[], now()), Err(TransferError::UnnamedList)));
    }

    #[test]
    fn export_reimports() {
        let mut list = WordList::new("Basics", "Dutch", "English");
        let word = WordRecord::from_display_input("fiets", "bike", "rijwiel", "bicycle", false);
        list.words.push(word);
        let json = ExportDocument::new(vec![list.clone()], now()).to_json_pretty().unwrap();

        let batch = parse_import(&json, &[], now()).unwrap();
        assert_eq!(batch.lists[0].name, list.name);
        assert_eq!(batch.lists[0].words, list.words);
    }

    #[test]
    fn file_names() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_file_name(date), "word-lists-export-2026-10-19.json");
        assert_eq!(
            list_export_file_name("Franse Woorden: H1!", date),
            "franse-woorden--h1--2026-10-19.json"
        );
    }

    #[test]
    fn template_has_three_words() {
        let doc = template_document();
        assert_eq!(doc.total_lists, 1);
        assert_eq!(doc.total_words, 3);
        assert_eq!(doc.lists[0].words[1].target_synonyms, vec!["synonym1"]);
    }
}
