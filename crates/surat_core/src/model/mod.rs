//! Domain model for letters, people and the classification taxonomy.
//!
//! # Responsibility
//! - Define the records persisted in the letter archive.
//! - Define the form shapes users fill before a letter is saved.
//!
//! # Invariants
//! - `LetterHistory::letter_number` is always derived by the number formatter.
//! - Serialized field names stay camelCase to match stored archive JSON.

pub mod category;
pub mod form;
pub mod letter;
pub mod person;
