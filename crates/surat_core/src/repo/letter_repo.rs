//! Archive contract, errors and list queries.

use crate::api::ApiError;
use crate::db::DbError;
use crate::model::letter::{DocumentType, LetterHistory, LetterId, NewLetter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for archive persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Api(ApiError),
    /// Letter JSON could not be encoded or decoded.
    Codec(serde_json::Error),
    NotFound(LetterId),
    /// The backend does not offer this operation.
    Unsupported(&'static str),
    InvalidData(String),
}

impl RepoError {
    /// True when the backend rejected or lacks a session token.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Api(err) if err.requires_login())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Api(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "letter encoding error: {err}"),
            Self::NotFound(id) => write!(f, "letter not found: {id}"),
            Self::Unsupported(operation) => {
                write!(f, "operation not supported by this archive: {operation}")
            }
            Self::InvalidData(message) => write!(f, "invalid archived letter data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Api(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::NotFound(_) | Self::Unsupported(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ApiError> for RepoError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    LetterNumber,
    Title,
    CreatedAt,
    /// Number of people named on the letter.
    PeopleCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSort {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Query options for listing archived letters.
///
/// The default query returns every letter in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterListQuery {
    pub document_type: Option<DocumentType>,
    /// Case-insensitive substring over number, title and people.
    pub search: Option<String>,
    pub sort: Option<LetterSort>,
}

impl LetterListQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(LetterSort { key, direction });
        self
    }

    pub fn of_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }
}

/// Repository interface for the letter archive.
pub trait LetterRepository {
    /// Assigns a fresh id and the current time, persists, and returns the
    /// stored record.
    fn add_letter(&self, letter: NewLetter) -> RepoResult<LetterHistory>;
    fn get_letter(&self, id: &str) -> RepoResult<Option<LetterHistory>>;
    fn list_letters(&self, query: &LetterListQuery) -> RepoResult<Vec<LetterHistory>>;
    /// Removes every archived letter.
    fn clear(&self) -> RepoResult<()>;
}

/// Filters then stably sorts `letters` according to `query`.
///
/// Shared by every backend so listing semantics never diverge.
pub fn apply_query(letters: Vec<LetterHistory>, query: &LetterListQuery) -> Vec<LetterHistory> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    let mut letters: Vec<LetterHistory> = letters
        .into_iter()
        .filter(|letter| {
            query
                .document_type
                .map_or(true, |kind| letter.document_type == kind)
        })
        .filter(|letter| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(letter, needle))
        })
        .collect();

    if let Some(sort) = query.sort {
        letters.sort_by(|left, right| {
            let ordering = compare_by(sort.key, left, right);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    letters
}

fn matches_search(letter: &LetterHistory, needle: &str) -> bool {
    letter.letter_number.to_lowercase().contains(needle)
        || letter.title.to_lowercase().contains(needle)
        || letter
            .people
            .iter()
            .any(|person| person.matches_lowercase(needle))
}

fn compare_by(key: SortKey, left: &LetterHistory, right: &LetterHistory) -> Ordering {
    match key {
        SortKey::LetterNumber => left.letter_number.cmp(&right.letter_number),
        SortKey::Title => left.title.to_lowercase().cmp(&right.title.to_lowercase()),
        SortKey::CreatedAt => left.created_at.cmp(&right.created_at),
        SortKey::PeopleCount => left.people.len().cmp(&right.people.len()),
    }
}
