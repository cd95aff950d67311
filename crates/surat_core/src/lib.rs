//! Core domain logic for the office letter app.
//! This crate is the single source of truth for numbering, taxonomy,
//! pagination, validation and archive rules.

pub mod api;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod numbering;
pub mod pagination;
pub mod render;
pub mod repo;
pub mod service;
pub mod taxonomy;
pub mod validation;

pub use api::{ApiClient, ApiError, ApiResult, SearchSequencer};
pub use config::{AppConfig, ConfigError, StorageConfig};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::letter::{DocumentType, LetterHistory, LetterId, NewLetter};
pub use model::person::Person;
pub use numbering::{format_hint, format_letter_number, split_letter_number, NumberParts};
pub use pagination::{plan_pages, PagePlan, PaginationPolicy, PeopleLayout};
pub use render::{LetterDocument, OfficeProfile, RenderContext};
pub use repo::{
    HttpLetterRepository, LetterListQuery, LetterRepository, RepoError, RepoResult,
    SqliteLetterRepository,
};
pub use service::{LetterForm, LetterService, SubmitError};
pub use taxonomy::{get_category_options, get_subcategory_options};
pub use validation::ValidationErrors;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
