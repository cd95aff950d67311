//! SQLite-backed local archive.
//!
//! # Responsibility
//! - Keep the whole archive as one JSON array under a single namespaced
//!   `kv_store` key.
//! - Drop records that no longer carry a recognized `documentType` when the
//!   archive is opened, and write the cleaned array back.
//!
//! # Invariants
//! - Every write replaces the full array in one statement.
//! - Reads never fail on a single bad record; such records are skipped and
//!   logged.

use super::letter_repo::{apply_query, LetterListQuery, LetterRepository, RepoResult};
use crate::model::letter::{DocumentType, LetterHistory, NewLetter};
use chrono::Utc;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use uuid::Uuid;

/// `kv_store` key holding the archived letters.
pub const LETTER_HISTORY_KEY: &str = "letter_history";

/// Local archive over an open, migrated connection.
pub struct SqliteLetterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLetterRepository<'conn> {
    /// Wraps `conn` and runs the load-time cleanup.
    ///
    /// # Side effects
    /// - Rewrites the stored array when any record was discarded.
    /// - Emits `archive_load` with kept/discarded counts.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let repo = Self { conn };
        let loaded = repo.load()?;

        if loaded.discarded > 0 {
            repo.store(&loaded.letters)?;
            warn!(
                "event=archive_load module=repo status=ok kept={} discarded={}",
                loaded.letters.len(),
                loaded.discarded
            );
        } else {
            info!(
                "event=archive_load module=repo status=ok kept={} discarded=0",
                loaded.letters.len()
            );
        }

        Ok(repo)
    }

    fn load(&self) -> RepoResult<Loaded> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [LETTER_HISTORY_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(Loaded::default());
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!("event=archive_load module=repo status=error error_code=not_an_array");
                return Ok(Loaded {
                    letters: Vec::new(),
                    discarded: 1,
                });
            }
        };

        let mut loaded = Loaded::default();
        for entry in entries {
            match decode_record(entry) {
                Some(letter) => loaded.letters.push(letter),
                None => loaded.discarded += 1,
            }
        }
        Ok(loaded)
    }

    fn store(&self, letters: &[LetterHistory]) -> RepoResult<()> {
        let encoded = serde_json::to_string(letters)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![LETTER_HISTORY_KEY, encoded],
        )?;
        Ok(())
    }
}

impl LetterRepository for SqliteLetterRepository<'_> {
    fn add_letter(&self, letter: NewLetter) -> RepoResult<LetterHistory> {
        let mut letters = self.load()?.letters;
        let record = letter.into_history(Uuid::new_v4().to_string(), Utc::now());
        letters.push(record.clone());
        self.store(&letters)?;

        info!(
            "event=letter_add module=repo status=ok backend=local document_type={} total={}",
            record.document_type.api_code(),
            letters.len()
        );
        Ok(record)
    }

    fn get_letter(&self, id: &str) -> RepoResult<Option<LetterHistory>> {
        let letters = self.load()?.letters;
        Ok(letters.into_iter().find(|letter| letter.id == id))
    }

    fn list_letters(&self, query: &LetterListQuery) -> RepoResult<Vec<LetterHistory>> {
        let letters = self.load()?.letters;
        Ok(apply_query(letters, query))
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE key = ?1;",
            [LETTER_HISTORY_KEY],
        )?;
        info!("event=archive_clear module=repo status=ok backend=local");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Loaded {
    letters: Vec<LetterHistory>,
    discarded: usize,
}

/// Decodes one stored entry, or `None` when it must be discarded.
///
/// Older builds stored numeric ids; those are kept as their decimal text.
fn decode_record(mut entry: Value) -> Option<LetterHistory> {
    let object = entry.as_object_mut()?;

    let recognized = object
        .get("documentType")
        .and_then(Value::as_str)
        .and_then(DocumentType::parse)
        .is_some();
    if !recognized {
        return None;
    }

    if let Some(Value::Number(id)) = object.get("id") {
        let id = id.to_string();
        object.insert("id".to_string(), Value::String(id));
    }

    match serde_json::from_value(entry) {
        Ok(letter) => Some(letter),
        Err(err) => {
            warn!("event=archive_load module=repo status=error error_code=undecodable_record error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decode_record;
    use crate::model::letter::DocumentType;
    use serde_json::json;

    #[test]
    fn record_without_document_type_is_discarded() {
        let entry = json!({
            "id": "a",
            "letterNumber": "1/Kw.18.01/2/KP.01/07/2025",
            "category": "KP",
            "subcategory": "KP.01",
            "createdAt": "2025-07-01T08:00:00Z",
            "title": "Rapat"
        });
        assert!(decode_record(entry).is_none());
    }

    #[test]
    fn unknown_document_type_is_discarded() {
        let entry = json!({
            "id": "a",
            "documentType": "Surat Edaran",
            "letterNumber": "1",
            "category": "KP",
            "subcategory": "KP.01",
            "createdAt": "2025-07-01T08:00:00Z",
            "title": "Rapat"
        });
        assert!(decode_record(entry).is_none());
    }

    #[test]
    fn numeric_legacy_id_is_kept_as_text() {
        let entry = json!({
            "id": 1719820800000_i64,
            "documentType": "Nota Dinas",
            "letterNumber": "1/Kw.18.01/2/HM.01/07/2025",
            "category": "HM",
            "subcategory": "HM.01",
            "createdAt": "2025-07-01T08:00:00.000Z",
            "title": "Undangan"
        });
        let letter = decode_record(entry).expect("record should decode");
        assert_eq!(letter.id, "1719820800000");
        assert_eq!(letter.document_type, DocumentType::NotaDinas);
        assert!(letter.people.is_empty());
    }
}
