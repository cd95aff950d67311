//! Letter archive repositories.
//!
//! # Responsibility
//! - Define the archive contract (`LetterRepository`) shared by every backend.
//! - Provide the SQLite-backed local archive and the HTTP-backed remote one.
//!
//! # Invariants
//! - Ids and creation timestamps are assigned by the repository, never by
//!   callers.
//! - Listing keeps insertion order unless a sort is requested.
//! - Backend failures surface as `RepoError`; auth failures stay
//!   distinguishable via `RepoError::requires_login`.
//!
//! # See also
//! - `service::letter_service` for the validated submission flow.

pub mod letter_repo;
pub mod local_repo;
pub mod remote_repo;

pub use letter_repo::{
    apply_query, LetterListQuery, LetterRepository, LetterSort, RepoError, RepoResult, SortDirection,
    SortKey,
};
pub use local_repo::{SqliteLetterRepository, LETTER_HISTORY_KEY};
pub use remote_repo::HttpLetterRepository;
