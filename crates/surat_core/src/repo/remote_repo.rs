//! Archive backed by the office letter API.

use super::letter_repo::{apply_query, LetterListQuery, LetterRepository, RepoError, RepoResult};
use crate::api::{ApiClient, RemoteLetter, SaveLetterRequest};
use crate::model::letter::{LetterHistory, NewLetter};
use crate::numbering::split_letter_number;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};

/// Remote archive; every call is a blocking request through `client`.
///
/// The client must hold a session token, see [`ApiClient::login`].
pub struct HttpLetterRepository<'client> {
    client: &'client ApiClient,
    created_by: i64,
}

impl<'client> HttpLetterRepository<'client> {
    pub fn new(client: &'client ApiClient, created_by: i64) -> Self {
        Self { client, created_by }
    }

    fn save_request(&self, letter: &NewLetter, now: DateTime<Utc>) -> RepoResult<SaveLetterRequest> {
        Ok(SaveLetterRequest {
            letter_type: letter.document_type.api_code().to_string(),
            nomor_surat: letter.letter_number.clone(),
            tanggal_surat: letter_date(&letter.letter_number, now),
            perihal: letter.title.clone(),
            content: serde_json::to_string(letter)?,
            created_by: self.created_by,
        })
    }
}

impl LetterRepository for HttpLetterRepository<'_> {
    fn add_letter(&self, letter: NewLetter) -> RepoResult<LetterHistory> {
        let now = Utc::now();
        let request = self.save_request(&letter, now)?;
        let row = self.client.save_letter(&request).map_err(|err| {
            warn!("event=letter_add module=repo status=error backend=remote error={err}");
            err
        })?;

        let created_at = row
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);
        info!(
            "event=letter_add module=repo status=ok backend=remote document_type={}",
            request.letter_type
        );
        Ok(letter.into_history(row.id.to_string(), created_at))
    }

    fn get_letter(&self, id: &str) -> RepoResult<Option<LetterHistory>> {
        match self.client.get_letter(id)? {
            Some(row) => history_from_remote(row).map(Some),
            None => Ok(None),
        }
    }

    fn list_letters(&self, query: &LetterListQuery) -> RepoResult<Vec<LetterHistory>> {
        let rows = self.client.list_letters()?;
        let total = rows.len();
        let letters: Vec<LetterHistory> = rows
            .into_iter()
            .filter_map(|row| match history_from_remote(row) {
                Ok(letter) => Some(letter),
                Err(err) => {
                    warn!("event=letter_list module=repo status=error backend=remote error={err}");
                    None
                }
            })
            .collect();

        info!(
            "event=letter_list module=repo status=ok backend=remote fetched={total} decoded={}",
            letters.len()
        );
        Ok(apply_query(letters, query))
    }

    fn clear(&self) -> RepoResult<()> {
        Err(RepoError::Unsupported("clear"))
    }
}

fn history_from_remote(row: RemoteLetter) -> RepoResult<LetterHistory> {
    let letter: NewLetter = row
        .decode_content()
        .map_err(|err| RepoError::InvalidData(format!("letter {}: {err}", row.id)))?;
    let created_at = row
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| RepoError::InvalidData(format!("letter {}: missing created_at", row.id)))?;

    Ok(letter.into_history(row.id.to_string(), created_at))
}

/// `YYYY-MM-01` from the trailing `/{month}/{year}` of a letter number.
fn letter_date(letter_number: &str, fallback: DateTime<Utc>) -> String {
    let parts = split_letter_number(letter_number);
    if parts.month.is_empty() {
        fallback.format("%Y-%m-01").to_string()
    } else {
        format!("{}-{}-01", parts.year, parts.month)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{letter_date, parse_timestamp};
    use chrono::{TimeZone, Utc};

    #[test]
    fn letter_date_comes_from_number_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        assert_eq!(letter_date("12/Kw.18.01/2/KP.01/07/2025", now), "2025-07-01");
        assert_eq!(letter_date("B-9/OT.01/03/2024", now), "2024-03-01");
        assert_eq!(letter_date("", now), "2026-10-01");
        assert_eq!(letter_date("12/Kw.18.01/2/KP.01//", now), "2026-10-01");
    }

    #[test]
    fn timestamps_accept_rfc3339_and_sql_format() {
        let expected = Utc.with_ymd_and_hms(2025, 7, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-07-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-01T16:30:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-07-01 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("kemarin"), None);
    }
}
