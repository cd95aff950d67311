//! HTTP collaborators: auth, letter storage and employee search.
//!
//! # Responsibility
//! - Talk to the office backend over bearer-authenticated JSON calls.
//! - Keep the session token and drop it when the backend rejects it.
//!
//! # Invariants
//! - Auth failures surface as `ApiError::Unauthorized`, never as validation
//!   or transport errors.
//! - No call blocks forever on a missing token: protected calls fail fast
//!   with `ApiError::NotLoggedIn`.

mod client;
mod employee;
mod sequencer;

pub use client::{ApiClient, RemoteId, RemoteLetter, SaveLetterRequest};
pub use employee::{classify_query, EmployeeQuery, MIN_NAME_QUERY_LEN, MIN_NIP_QUERY_LEN};
pub use sequencer::{SearchSequencer, SearchTicket};

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// No token is stored; the caller must log in first.
    NotLoggedIn,
    /// The backend rejected the token (401/403). The token has been cleared.
    Unauthorized,
    /// Any other non-success status.
    Http { status: u16, message: String },
    Transport(reqwest::Error),
    Decode(serde_json::Error),
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the caller should prompt for a fresh login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::Unauthorized)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoggedIn => write!(f, "not logged in"),
            Self::Unauthorized => write!(f, "session expired or rejected; log in again"),
            Self::Http { status, message } => write!(f, "request failed with {status}: {message}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Decode(err) => write!(f, "invalid response body: {err}"),
            Self::InvalidUrl(url) => write!(f, "invalid api url `{url}`"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}
