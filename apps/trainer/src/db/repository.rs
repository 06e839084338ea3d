//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::{DateTime, Utc};
use quiz_core::types::{ListSummary, Preferences, Theme, WordList, WordRecord};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for word list operations.
pub trait ListRepository {
    fn create_list(&self, list: &WordList) -> Result<()>;
    fn get_list(&self, id: &str) -> Result<Option<WordList>>;
    fn get_all_lists(&self) -> Result<Vec<ListSummary>>;
    fn get_all_lists_with_words(&self) -> Result<Vec<WordList>>;
    fn rename_list(&self, id: &str, name: &str) -> Result<()>;
    /// Delete a list and its words. Returns the number of words removed.
    fn delete_list(&self, id: &str) -> Result<usize>;
    /// Delete everything. Returns (lists removed, words removed).
    fn delete_all_lists(&self) -> Result<(usize, usize)>;
    /// Store several lists atomically.
    fn import_lists(&self, lists: &[WordList]) -> Result<()>;
}

/// Repository for the words of a list, addressed by position.
pub trait WordRepository {
    fn get_words(&self, list_id: &str) -> Result<Vec<WordRecord>>;
    fn add_word(&self, list_id: &str, word: &WordRecord) -> Result<()>;
    fn update_word(&self, list_id: &str, index: usize, word: &WordRecord) -> Result<()>;
    fn delete_word(&self, list_id: &str, index: usize) -> Result<()>;
}

/// Repository for preferences.
pub trait SettingsRepository {
    fn get_preferences(&self) -> Result<Preferences>;
    fn save_preferences(&self, preferences: &Preferences) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_PREFERENCES)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn ensure_list(&self, id: &str) -> Result<()> {
        let exists: Option<String> = self
            .conn
            .query_row("SELECT id FROM word_lists WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;
        match exists {
            Some(_) => Ok(()),
            None => Err(DbError::ListNotFound(id.to_string())),
        }
    }

    /// Fails when another list already uses `name`, ignoring case.
    fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> Result<()> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM word_lists")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let wanted = name.to_lowercase();
        let clash = rows
            .iter()
            .any(|(id, existing)| {
                Some(id.as_str()) != except_id && existing.to_lowercase() == wanted
            });
        if clash {
            return Err(DbError::DuplicateListName(name.to_string()));
        }
        Ok(())
    }

    /// Row id of the word at `index` in insertion order.
    fn word_row_id(&self, list_id: &str, index: usize) -> Result<i64> {
        self.ensure_list(list_id)?;
        self.conn
            .query_row(
                "SELECT id FROM words WHERE list_id = ?1 ORDER BY id LIMIT 1 OFFSET ?2",
                params![list_id, index as i64],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| DbError::WordNotFound {
                list_id: list_id.to_string(),
                index,
            })
    }

    fn insert_list(&self, list: &WordList) -> Result<()> {
        self.conn.execute(
            "INSERT INTO word_lists (id, name, source_language, target_language, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                list.id,
                list.name,
                list.source_language,
                list.target_language,
                list.created_at.to_rfc3339()
            ],
        )?;
        for word in &list.words {
            self.insert_word(&list.id, word)?;
        }
        Ok(())
    }

    fn insert_word(&self, list_id: &str, word: &WordRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO words (list_id, source_text, target_text, source_synonyms, target_synonyms, added_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                list_id,
                word.source,
                word.target,
                serde_json::to_string(&word.source_synonyms)?,
                serde_json::to_string(&word.target_synonyms)?,
                word.added_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<ListSummary> {
        Ok(ListSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            source_language: row.get(2)?,
            target_language: row.get(3)?,
            word_count: row.get::<_, i64>(4)? as usize,
            created_at: row_timestamp(row, 5)?,
        })
    }
}

fn row_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("bad timestamp {value:?}: {e}")))
}

impl ListRepository for SqliteRepository {
    fn create_list(&self, list: &WordList) -> Result<()> {
        if list.name.trim().is_empty() {
            return Err(DbError::InvalidData("list name cannot be empty".to_string()));
        }
        self.ensure_unique_name(&list.name, None)?;
        self.insert_list(list)
    }

    fn get_list(&self, id: &str) -> Result<Option<WordList>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, source_language, target_language, created_at FROM word_lists WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, name, source_language, target_language, created_at)) = row else {
            return Ok(None);
        };

        let words = self.get_words(&id)?;
        Ok(Some(WordList {
            id,
            name,
            source_language,
            target_language,
            words,
            created_at: parse_timestamp(&created_at)?,
        }))
    }

    fn get_all_lists(&self) -> Result<Vec<ListSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT l.id, l.name, l.source_language, l.target_language, COUNT(w.id), l.created_at
            FROM word_lists l
            LEFT JOIN words w ON w.list_id = l.id
            GROUP BY l.id
            ORDER BY l.created_at, l.rowid",
        )?;

        let lists = stmt
            .query_map([], Self::row_to_summary)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(lists)
    }

    fn get_all_lists_with_words(&self) -> Result<Vec<WordList>> {
        let mut lists = Vec::new();
        for summary in self.get_all_lists()? {
            if let Some(list) = self.get_list(&summary.id)? {
                lists.push(list);
            }
        }
        Ok(lists)
    }

    fn rename_list(&self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::InvalidData("list name cannot be empty".to_string()));
        }
        self.ensure_list(id)?;
        self.ensure_unique_name(name, Some(id))?;
        self.conn.execute(
            "UPDATE word_lists SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        Ok(())
    }

    fn delete_list(&self, id: &str) -> Result<usize> {
        self.ensure_list(id)?;
        let tx = self.conn.unchecked_transaction()?;
        let words = self.conn.execute("DELETE FROM words WHERE list_id = ?1", params![id])?;
        self.conn.execute("DELETE FROM word_lists WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(words)
    }

    fn delete_all_lists(&self) -> Result<(usize, usize)> {
        let tx = self.conn.unchecked_transaction()?;
        let words = self.conn.execute("DELETE FROM words", [])?;
        let lists = self.conn.execute("DELETE FROM word_lists", [])?;
        tx.commit()?;
        Ok((lists, words))
    }

    fn import_lists(&self, lists: &[WordList]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for list in lists {
            if list.name.trim().is_empty() || list.name.trim() != list.name {
                return Err(DbError::InvalidData(format!("invalid list name {:?}", list.name)));
            }
            self.ensure_unique_name(&list.name, None)?;
            self.insert_list(list)?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl WordRepository for SqliteRepository {
    fn get_words(&self, list_id: &str) -> Result<Vec<WordRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT source_text, target_text, source_synonyms, target_synonyms, added_at FROM words WHERE list_id = ?1 ORDER BY id",
        )?;

        let rows = stmt
            .query_map(params![list_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(source, target, source_synonyms, target_synonyms, added_at)| {
                Ok(WordRecord {
                    source,
                    target,
                    source_synonyms: serde_json::from_str(&source_synonyms)?,
                    target_synonyms: serde_json::from_str(&target_synonyms)?,
                    added_at: parse_timestamp(&added_at)?,
                })
            })
            .collect()
    }

    fn add_word(&self, list_id: &str, word: &WordRecord) -> Result<()> {
        self.ensure_list(list_id)?;
        self.insert_word(list_id, word)
    }

    fn update_word(&self, list_id: &str, index: usize, word: &WordRecord) -> Result<()> {
        let row_id = self.word_row_id(list_id, index)?;
        self.conn.execute(
            "UPDATE words SET source_text = ?1, target_text = ?2, source_synonyms = ?3, target_synonyms = ?4 WHERE id = ?5",
            params![
                word.source,
                word.target,
                serde_json::to_string(&word.source_synonyms)?,
                serde_json::to_string(&word.target_synonyms)?,
                row_id
            ],
        )?;
        Ok(())
    }

    fn delete_word(&self, list_id: &str, index: usize) -> Result<()> {
        let row_id = self.word_row_id(list_id, index)?;
        self.conn.execute("DELETE FROM words WHERE id = ?1", params![row_id])?;
        Ok(())
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_preferences(&self) -> Result<Preferences> {
        self.conn
            .query_row(
                "SELECT theme, languages_swapped, use_prompt_synonyms FROM preferences WHERE id = 1",
                [],
                |row| {
                    let theme: String = row.get(0)?;
                    Ok(Preferences {
                        theme: Theme::from_str(&theme).unwrap_or_default(),
                        languages_swapped: row.get::<_, i32>(1)? != 0,
                        use_prompt_synonyms: row.get::<_, i32>(2)? != 0,
                    })
                },
            )
            .map_err(Into::into)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.conn.execute(
            "UPDATE preferences SET theme = ?1, languages_swapped = ?2, use_prompt_synonyms = ?3 WHERE id = 1",
            params![
                preferences.theme.as_str(),
                preferences.languages_swapped as i32,
                preferences.use_prompt_synonyms as i32,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo() -> SqliteRepository {
        SqliteRepository::open_in_memory().unwrap()
    }

    fn word(source: &str, target: &str) -> WordRecord {
        WordRecord::from_display_input(source, target, "", "", false)
    }

    #[test]
    fn create_and_fetch_list_with_words() {
        let repo = repo();
        let list = WordList::new("Basics", "Dutch", "English");
        repo.create_list(&list).unwrap();
        repo.add_word(&list.id, &word("fiets", "bike")).unwrap();
        repo.add_word(
            &list.id,
            &WordRecord::from_display_input("huis", "house", "woning", "home, dwelling", false),
        )
        .unwrap();

        let stored = repo.get_list(&list.id).unwrap().unwrap();
        assert_eq!(stored.name, "Basics");
        assert_eq!(stored.words.len(), 2);
        assert_eq!(stored.words[0].source, "fiets");
        assert_eq!(stored.words[1].target_synonyms, vec!["home", "dwelling"]);
        assert_eq!(stored.words[1].source_synonyms, vec!["woning"]);

        let summaries = repo.get_all_lists().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].word_count, 2);
    }

    #[test]
    fn missing_list_is_none() {
        assert!(repo().get_list("nope").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_are_rejected_ignoring_case() {
        let repo = repo();
        repo.create_list(&WordList::new("Animals", "Dutch", "English")).unwrap();
        let err = repo.create_list(&WordList::new("animals", "French", "English")).unwrap_err();
        assert!(matches!(err, DbError::DuplicateListName(_)));
    }

    #[test]
    fn rename_checks_other_lists_only() {
        let repo = repo();
        let a = WordList::new("Animals", "Dutch", "English");
        let b = WordList::new("Colours", "Dutch", "English");
        repo.create_list(&a).unwrap();
        repo.create_list(&b).unwrap();

        repo.rename_list(&a.id, "ANIMALS").unwrap();
        assert_eq!(repo.get_list(&a.id).unwrap().unwrap().name, "ANIMALS");

        assert!(matches!(repo.rename_list(&a.id, "colours"), Err(DbError::DuplicateListName(_))));
        assert!(matches!(repo.rename_list(&a.id, "  "), Err(DbError::InvalidData(_))));
        assert!(matches!(repo.rename_list("nope", "x"), Err(DbError::ListNotFound(_))));
    }

    #[test]
    fn words_are_addressed_by_position() {
        let repo = repo();
        let list = WordList::new("Basics", "Dutch", "English");
        repo.create_list(&list).unwrap();
        for (s, t) in [("een", "one"), ("twee", "two"), ("drie", "three")] {
            repo.add_word(&list.id, &word(s, t)).unwrap();
        }

        repo.delete_word(&list.id, 1).unwrap();
        repo.update_word(&list.id, 1, &word("drie", "3")).unwrap();

        let words = repo.get_words(&list.id).unwrap();
        let pairs: Vec<(&str, &str)> = words
            .iter()
            .map(|w| (w.source.as_str(), w.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("een", "one"), ("drie", "3")]);

        assert!(matches!(
            repo.delete_word(&list.id, 5),
            Err(DbError::WordNotFound { index: 5, .. })
        ));
    }

    #[test]
    fn update_preserves_added_at() {
        let repo = repo();
        let list = WordList::new("Basics", "Dutch", "English");
        repo.create_list(&list).unwrap();
        let original = word("een", "one");
        repo.add_word(&list.id, &original).unwrap();

        repo.update_word(&list.id, 0, &word("een", "1")).unwrap();
        let words = repo.get_words(&list.id).unwrap();
        assert_eq!(words[0].added_at, original.added_at);
        assert_eq!(words[0].target, "1");
    }

    #[test]
    fn delete_list_and_delete_all() {
        let repo = repo();
        let a = WordList::new("A", "Dutch", "English");
        let b = WordList::new("B", "Dutch", "English");
        repo.create_list(&a).unwrap();
        repo.create_list(&b).unwrap();
        repo.add_word(&a.id, &word("een", "one")).unwrap();
        repo.add_word(&b.id, &word("twee", "two")).unwrap();
        repo.add_word(&b.id, &word("drie", "three")).unwrap();

        assert_eq!(repo.delete_list(&a.id).unwrap(), 1);
        assert!(repo.get_list(&a.id).unwrap().is_none());
        assert!(repo.get_words(&a.id).unwrap().is_empty());
        assert!(matches!(repo.delete_list(&a.id), Err(DbError::ListNotFound(_))));
        assert_eq!(repo.delete_all_lists().unwrap(), (1, 2));
        assert!(repo.get_all_lists().unwrap().is_empty());
    }

    #[test]
    fn import_is_all_or_nothing() {
        let repo = repo();
        repo.create_list(&WordList::new("Existing", "Dutch", "English")).unwrap();

        let fresh = WordList::new("Fresh", "Dutch", "English");
        let clash = WordList::new("existing", "Dutch", "English");
        assert!(repo.import_lists(&[fresh, clash]).is_err());
        assert_eq!(repo.get_all_lists().unwrap().len(), 1);
    }

    #[test]
    fn import_rejects_blank_or_padded_names() {
        let repo = repo();
        let mut blank = WordList::new("x", "Dutch", "English");
        blank.name = "   ".to_string();
        let mut padded = WordList::new("x", "Dutch", "English");
        padded.name = " Basis ".to_string();

        assert!(matches!(repo.import_lists(&[blank]), Err(DbError::InvalidData(_))));
        assert!(matches!(repo.import_lists(&[padded]), Err(DbError::InvalidData(_))));
        assert!(repo.get_all_lists().unwrap().is_empty());
    }

    #[test]
    fn preferences_round_trip() {
        let repo = repo();
        assert_eq!(repo.get_preferences().unwrap(), Preferences::default());

        let prefs = Preferences {
            theme: Theme::Dark,
            languages_swapped: true,
            use_prompt_synonyms: true,
        };
        repo.save_preferences(&prefs).unwrap();
        assert_eq!(repo.get_preferences().unwrap(), prefs);
    }
}
