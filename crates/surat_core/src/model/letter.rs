//! Archived letter records.
//!
//! # Responsibility
//! - Define `LetterHistory`, the immutable record kept in the archive.
//! - Define `NewLetter`, the caller-built shape before id/timestamp
//!   assignment, and its construction from each form kind.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the repository at save time.
//! - `letter_number` comes from `numbering::format_letter_number`.
//! - Records are never edited after creation; the archive only supports a
//!   wholesale clear.

use crate::model::form::{NotaDinasForm, SuratKeputusanForm, SuratTugasForm};
use crate::model::person::Person;
use crate::numbering::format_letter_number;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier assigned to a letter when it is archived.
pub type LetterId = String;

/// Kind of administrative letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Task-assignment letter naming one or more staff.
    #[serde(rename = "Surat Tugas")]
    SuratTugas,
    /// Internal memorandum between office units.
    #[serde(rename = "Nota Dinas")]
    NotaDinas,
    /// Decision letter affecting a single named employee.
    #[serde(rename = "Surat Keputusan")]
    SuratKeputusan,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [
        DocumentType::SuratTugas,
        DocumentType::NotaDinas,
        DocumentType::SuratKeputusan,
    ];

    /// Human label, also the persisted `documentType` tag.
    pub fn label(self) -> &'static str {
        match self {
            Self::SuratTugas => "Surat Tugas",
            Self::NotaDinas => "Nota Dinas",
            Self::SuratKeputusan => "Surat Keputusan",
        }
    }

    /// `letter_type` code used by the remote letter API.
    pub fn api_code(self) -> &'static str {
        match self {
            Self::SuratTugas => "SURAT_TUGAS",
            Self::NotaDinas => "NOTA_DINAS",
            Self::SuratKeputusan => "SURAT_KEPUTUSAN",
        }
    }

    /// Parses either the persisted label or the API code.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == value || kind.api_code() == value)
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter fields supplied by the caller before archiving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLetter {
    pub letter_number: String,
    pub category: String,
    pub subcategory: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub people: Vec<Person>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_table_format: Option<bool>,
    #[serde(default)]
    pub menimbang: Vec<String>,
    #[serde(default)]
    pub dasar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_name: Option<String>,
}

/// Archived letter as returned by every repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterHistory {
    pub id: LetterId,
    pub letter_number: String,
    pub category: String,
    pub subcategory: String,
    pub document_type: DocumentType,
    /// Serialized as an RFC 3339 (ISO 8601) timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub people: Vec<Person>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_table_format: Option<bool>,
    #[serde(default)]
    pub menimbang: Vec<String>,
    #[serde(default)]
    pub dasar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_name: Option<String>,
}

impl NewLetter {
    /// Attaches the repository-assigned identity and timestamp.
    pub fn into_history(self, id: LetterId, created_at: DateTime<Utc>) -> LetterHistory {
        LetterHistory {
            id,
            letter_number: self.letter_number,
            category: self.category,
            subcategory: self.subcategory,
            document_type: self.document_type,
            created_at,
            people: self.people,
            title: self.title,
            use_table_format: self.use_table_format,
            menimbang: self.menimbang,
            dasar: self.dasar,
            signature_name: self.signature_name,
        }
    }

    /// Builds the archive entry for a task letter.
    ///
    /// Title is the first sentence of `untuk`, falling back to the first
    /// sentence of the first justification point, then to the letter kind.
    pub fn from_surat_tugas(form: &SuratTugasForm) -> Self {
        let title = first_sentence(&form.untuk)
            .or_else(|| form.menimbang.first().and_then(|point| first_sentence(point)))
            .unwrap_or_else(|| DocumentType::SuratTugas.label().to_string());

        Self {
            letter_number: format_letter_number(
                &form.nomor,
                &form.subcategory,
                &form.month,
                &form.year,
                &form.category,
            ),
            category: form.category.clone(),
            subcategory: form.subcategory.clone(),
            document_type: DocumentType::SuratTugas,
            people: form.people.clone(),
            title,
            use_table_format: Some(form.use_table_format),
            menimbang: form.menimbang.clone(),
            dasar: form.dasar.clone(),
            signature_name: non_blank(&form.signature_name),
        }
    }

    /// Builds the archive entry for an internal memo.
    ///
    /// The addressee is kept as the single entry of `people`.
    pub fn from_nota_dinas(form: &NotaDinasForm) -> Self {
        Self {
            letter_number: format_letter_number(
                &form.nomor,
                &form.subcategory,
                &form.month,
                &form.year,
                &form.category,
            ),
            category: form.category.clone(),
            subcategory: form.subcategory.clone(),
            document_type: DocumentType::NotaDinas,
            people: vec![Person::named(form.kepada.trim())],
            title: form.perihal.trim().to_string(),
            use_table_format: None,
            menimbang: Vec::new(),
            dasar: String::new(),
            signature_name: non_blank(&form.signature_name),
        }
    }

    /// Builds the archive entry for a decision letter.
    ///
    /// The operative clauses are stored in `menimbang` in
    /// pertama/kedua/ketiga order.
    pub fn from_surat_keputusan(form: &SuratKeputusanForm) -> Self {
        Self {
            letter_number: format_letter_number(
                &form.nomor,
                &form.subcategory,
                &form.month,
                &form.year,
                DocumentType::SuratKeputusan.label(),
            ),
            category: form.category.clone(),
            subcategory: form.subcategory.clone(),
            document_type: DocumentType::SuratKeputusan,
            people: vec![form.person.clone()],
            title: form.tentang.trim().to_string(),
            use_table_format: None,
            menimbang: form
                .memutuskan
                .clauses()
                .into_iter()
                .map(str::to_string)
                .collect(),
            dasar: String::new(),
            signature_name: non_blank(&form.signature_name),
        }
    }
}

fn first_sentence(text: &str) -> Option<String> {
    let sentence = text.split('.').next().unwrap_or_default().trim();
    if sentence.is_empty() {
        None
    } else {
        Some(sentence.to_string())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
