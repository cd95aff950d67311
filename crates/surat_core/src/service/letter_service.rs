//! Letter submission and archive use-cases.
//!
//! # Responsibility
//! - Validate a form, derive its archive record and persist it.
//! - Render print previews for any letter kind.
//!
//! # Invariants
//! - Nothing reaches the repository unless validation passed.
//! - Validation failures and backend failures stay distinct in
//!   `SubmitError`; only backend auth failures ask for a fresh login.

use crate::model::form::{NotaDinasForm, SuratKeputusanForm, SuratTugasForm};
use crate::model::letter::{DocumentType, LetterHistory, NewLetter};
use crate::render::{
    render_nota_dinas, render_surat_keputusan, render_surat_tugas, LetterDocument, RenderContext,
};
use crate::repo::{LetterListQuery, LetterRepository, RepoError, RepoResult};
use crate::validation::{
    validate_nota_dinas, validate_surat_keputusan, validate_surat_tugas, ValidationErrors,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Error returned by the submit flows.
#[derive(Debug)]
pub enum SubmitError {
    /// Form is incomplete; nothing was saved and the form stays editable.
    Validation(ValidationErrors),
    /// Backend failure after validation passed.
    Repo(RepoError),
}

impl SubmitError {
    /// True only when the archive backend needs a fresh login.
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Repo(err) => err.requires_login(),
        }
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "gagal menyimpan surat: {err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for SubmitError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Any of the three letter forms, tagged by `documentType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "documentType")]
pub enum LetterForm {
    #[serde(rename = "Surat Tugas")]
    SuratTugas(SuratTugasForm),
    #[serde(rename = "Nota Dinas")]
    NotaDinas(NotaDinasForm),
    #[serde(rename = "Surat Keputusan")]
    SuratKeputusan(SuratKeputusanForm),
}

impl LetterForm {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::SuratTugas(_) => DocumentType::SuratTugas,
            Self::NotaDinas(_) => DocumentType::NotaDinas,
            Self::SuratKeputusan(_) => DocumentType::SuratKeputusan,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::SuratTugas(form) => validate_surat_tugas(form),
            Self::NotaDinas(form) => validate_nota_dinas(form),
            Self::SuratKeputusan(form) => validate_surat_keputusan(form),
        }
    }

    /// Form for reprinting an archived letter of any kind.
    pub fn from_history(letter: &LetterHistory) -> Self {
        match letter.document_type {
            DocumentType::SuratTugas => Self::SuratTugas(SuratTugasForm::from_history(letter)),
            DocumentType::NotaDinas => Self::NotaDinas(NotaDinasForm::from_history(letter)),
            DocumentType::SuratKeputusan => {
                Self::SuratKeputusan(SuratKeputusanForm::from_history(letter))
            }
        }
    }

    /// Archive record for this form; does not validate.
    pub fn to_new_letter(&self) -> NewLetter {
        match self {
            Self::SuratTugas(form) => NewLetter::from_surat_tugas(form),
            Self::NotaDinas(form) => NewLetter::from_nota_dinas(form),
            Self::SuratKeputusan(form) => NewLetter::from_surat_keputusan(form),
        }
    }

    /// Print preview; blank fields render as placeholders.
    pub fn render(&self, ctx: &RenderContext) -> LetterDocument {
        match self {
            Self::SuratTugas(form) => render_surat_tugas(form, ctx),
            Self::NotaDinas(form) => render_nota_dinas(form, ctx),
            Self::SuratKeputusan(form) => render_surat_keputusan(form, ctx),
        }
    }
}

/// Letter service facade over repository implementations.
pub struct LetterService<R: LetterRepository> {
    repo: R,
}

impl<R: LetterRepository> LetterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and archives a letter of any kind.
    ///
    /// # Errors
    /// - `SubmitError::Validation` with every failing field; nothing saved.
    /// - `SubmitError::Repo` when the backend call fails.
    pub fn submit(&self, form: &LetterForm) -> Result<LetterHistory, SubmitError> {
        let started_at = Instant::now();
        let kind = form.document_type().api_code();

        if let Err(errors) = form.validate() {
            warn!(
                "event=letter_submit module=service status=error document_type={kind} error_code=validation fields={}",
                errors.len()
            );
            return Err(errors.into());
        }

        match self.repo.add_letter(form.to_new_letter()) {
            Ok(letter) => {
                info!(
                    "event=letter_submit module=service status=ok document_type={kind} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(letter)
            }
            Err(err) => {
                warn!(
                    "event=letter_submit module=service status=error document_type={kind} duration_ms={} error_code=repo requires_login={}",
                    started_at.elapsed().as_millis(),
                    err.requires_login()
                );
                Err(err.into())
            }
        }
    }

    pub fn submit_surat_tugas(&self, form: &SuratTugasForm) -> Result<LetterHistory, SubmitError> {
        self.submit(&LetterForm::SuratTugas(form.clone()))
    }

    pub fn submit_nota_dinas(&self, form: &NotaDinasForm) -> Result<LetterHistory, SubmitError> {
        self.submit(&LetterForm::NotaDinas(form.clone()))
    }

    pub fn submit_surat_keputusan(
        &self,
        form: &SuratKeputusanForm,
    ) -> Result<LetterHistory, SubmitError> {
        self.submit(&LetterForm::SuratKeputusan(form.clone()))
    }

    pub fn get_letter(&self, id: &str) -> RepoResult<Option<LetterHistory>> {
        self.repo.get_letter(id)
    }

    pub fn list_letters(&self, query: &LetterListQuery) -> RepoResult<Vec<LetterHistory>> {
        self.repo.list_letters(query)
    }

    /// Renders an archived letter again; `None` when `id` is unknown.
    pub fn reprint(&self, id: &str, ctx: &RenderContext) -> RepoResult<Option<LetterDocument>> {
        let document = self
            .repo
            .get_letter(id)?
            .map(|letter| LetterForm::from_history(&letter).render(ctx));
        info!(
            "event=letter_reprint module=service status={}",
            if document.is_some() { "ok" } else { "not_found" }
        );
        Ok(document)
    }

    pub fn clear_archive(&self) -> RepoResult<()> {
        self.repo.clear()
    }
}
