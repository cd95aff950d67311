//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, numbering and repository calls into the
//!   save/preview flows the UI drives.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod letter_service;

pub use letter_service::{LetterForm, LetterService, SubmitError};
