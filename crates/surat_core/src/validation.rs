//! Submission checks for letter forms.
//!
//! # Responsibility
//! - Report every missing or malformed field of a form in one pass.
//! - Provide the digit-only input filter for the sequence number.
//!
//! # Invariants
//! - Validation never panics and never returns early on the first problem.
//! - Errors are keyed by field name; person fields use `people[i].field`
//!   (or `person.field` for decision letters).
//! - Messages are user-facing and stay in Indonesian.

use crate::model::form::{NotaDinasForm, SuratKeputusanForm, SuratTugasForm};
use crate::model::person::Person;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of justification points a task letter must carry.
pub const REQUIRED_MENIMBANG_POINTS: usize = 2;

static DIGITS_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("valid digits regex"));
static NON_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid non-digit regex"));

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Message for one field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All failures ordered by field key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Keeps the first message recorded for a field.
    fn add(&mut self, field: impl Into<String>, message: &str) {
        self.fields
            .entry(field.into())
            .or_insert_with(|| message.to_string());
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .fields
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Form tidak lengkap: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Strips everything except ASCII digits from a typed sequence number.
pub fn sanitize_nomor(input: &str) -> String {
    NON_DIGIT_RE.replace_all(input, "").into_owned()
}

/// Validates a task letter before save or print.
pub fn validate_surat_tugas(form: &SuratTugasForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_nomor(&mut errors, &form.nomor);
    require(&mut errors, "category", &form.category, "Kategori harus diisi");
    require(
        &mut errors,
        "subcategory",
        &form.subcategory,
        "Subkategori harus diisi",
    );
    require(&mut errors, "month", &form.month, "Bulan harus diisi");
    require(&mut errors, "year", &form.year, "Tahun harus diisi");

    if form.menimbang.len() != REQUIRED_MENIMBANG_POINTS {
        errors.add("menimbang", "Harus ada 2 poin menimbang");
    } else if form.menimbang.iter().any(|point| point.trim().is_empty()) {
        errors.add("menimbang", "Poin menimbang wajib diisi");
    }

    require(&mut errors, "dasar", &form.dasar, "Dasar harus diisi");
    require(&mut errors, "untuk", &form.untuk, "Untuk harus diisi");

    if form.people.is_empty() {
        errors.add("people", "Minimal harus ada satu orang");
    }
    for (index, person) in form.people.iter().enumerate() {
        let prefix = format!("people[{index}]");
        require(
            &mut errors,
            format!("{prefix}.nama"),
            &person.nama,
            "Nama harus diisi",
        );
        require(
            &mut errors,
            format!("{prefix}.nip"),
            &person.nip,
            "NIP harus diisi",
        );
        require(
            &mut errors,
            format!("{prefix}.jabatan"),
            &person.jabatan,
            "Jabatan harus diisi",
        );
    }

    require(
        &mut errors,
        "signatureName",
        &form.signature_name,
        "Nama penandatangan harus diisi",
    );

    errors.into_result()
}

/// Validates an internal memo before save or print.
pub fn validate_nota_dinas(form: &NotaDinasForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_nomor(&mut errors, &form.nomor);
    require(&mut errors, "kepada", &form.kepada, "Kepada harus diisi");
    require(&mut errors, "dari", &form.dari, "Dari harus diisi");
    require(&mut errors, "perihal", &form.perihal, "Perihal harus diisi");
    require(&mut errors, "narasi", &form.narasi, "Narasi harus diisi");
    require(&mut errors, "waktu", &form.waktu, "Waktu harus diisi");
    require(&mut errors, "tempat", &form.tempat, "Tempat harus diisi");
    require(
        &mut errors,
        "signatureName",
        &form.signature_name,
        "Nama penandatangan harus diisi",
    );

    errors.into_result()
}

/// Validates a decision letter before save or print.
pub fn validate_surat_keputusan(form: &SuratKeputusanForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_nomor(&mut errors, &form.nomor);
    require(&mut errors, "tentang", &form.tentang, "Tentang harus diisi");
    check_decision_subject(&mut errors, &form.person);
    require(
        &mut errors,
        "signatureName",
        &form.signature_name,
        "Nama penandatangan harus diisi",
    );

    errors.into_result()
}

fn check_decision_subject(errors: &mut ValidationErrors, person: &Person) {
    let fields = [
        ("person.nama", person.nama.as_str(), "Nama harus diisi"),
        ("person.nip", person.nip.as_str(), "NIP harus diisi"),
        ("person.pangkat", person.pangkat.as_str(), "Pangkat harus diisi"),
        ("person.jabatan", person.jabatan.as_str(), "Jabatan harus diisi"),
        (
            "person.unitKerja",
            person.unit_kerja.as_str(),
            "Unit kerja harus diisi",
        ),
    ];
    for (field, value, message) in fields {
        require(errors, field, value, message);
    }
}

fn check_nomor(errors: &mut ValidationErrors, nomor: &str) {
    let trimmed = nomor.trim();
    if trimmed.is_empty() {
        errors.add("nomor", "Nomor surat harus diisi");
    } else if !DIGITS_ONLY_RE.is_match(trimmed) {
        errors.add("nomor", "Nomor surat hanya boleh angka");
    }
}

fn require(errors: &mut ValidationErrors, field: impl Into<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_nomor, validate_nota_dinas, validate_surat_keputusan, validate_surat_tugas};
    use crate::model::form::{NotaDinasForm, SuratKeputusanForm, SuratTugasForm};
    use crate::model::person::Person;

    fn complete_person() -> Person {
        Person {
            nama: "Ahmad".to_string(),
            nip: "198001012005011001".to_string(),
            pangkat: "Penata (III/c)".to_string(),
            jabatan: "Analis".to_string(),
            unit_kerja: "Bagian Umum".to_string(),
            keterangan: String::new(),
        }
    }

    fn complete_task_form() -> SuratTugasForm {
        SuratTugasForm {
            nomor: "12".to_string(),
            category: "KP".to_string(),
            subcategory: "KP.01".to_string(),
            month: "07".to_string(),
            year: "2025".to_string(),
            menimbang: vec!["Bahwa perlu.".to_string(), "Bahwa mampu.".to_string()],
            dasar: "Peraturan Menteri".to_string(),
            untuk: "Menghadiri rapat".to_string(),
            people: vec![complete_person()],
            signature_name: "H. Zamroni".to_string(),
            ..SuratTugasForm::default()
        }
    }

    #[test]
    fn complete_task_form_passes() {
        assert!(validate_surat_tugas(&complete_task_form()).is_ok());
    }

    #[test]
    fn task_form_reports_every_missing_field() {
        let errors = validate_surat_tugas(&SuratTugasForm::default()).unwrap_err();
        assert_eq!(errors.get("nomor"), Some("Nomor surat harus diisi"));
        assert_eq!(errors.get("menimbang"), Some("Harus ada 2 poin menimbang"));
        assert_eq!(errors.get("people"), Some("Minimal harus ada satu orang"));
        assert_eq!(
            errors.get("signatureName"),
            Some("Nama penandatangan harus diisi")
        );
        assert!(errors.len() >= 9);
    }

    #[test]
    fn task_form_keys_person_errors_by_index() {
        let mut form = complete_task_form();
        form.people.push(Person::named("Budi"));
        let errors = validate_surat_tugas(&form).unwrap_err();
        assert_eq!(errors.get("people[1].nip"), Some("NIP harus diisi"));
        assert_eq!(errors.get("people[1].jabatan"), Some("Jabatan harus diisi"));
        assert_eq!(errors.get("people[0].nip"), None);
    }

    #[test]
    fn blank_menimbang_point_is_rejected() {
        let mut form = complete_task_form();
        form.menimbang[1] = "   ".to_string();
        let errors = validate_surat_tugas(&form).unwrap_err();
        assert_eq!(errors.get("menimbang"), Some("Poin menimbang wajib diisi"));
    }

    #[test]
    fn non_digit_nomor_is_rejected_and_sanitized() {
        let mut form = complete_task_form();
        form.nomor = "12a".to_string();
        let errors = validate_surat_tugas(&form).unwrap_err();
        assert_eq!(errors.get("nomor"), Some("Nomor surat hanya boleh angka"));
        assert_eq!(sanitize_nomor("1a2-3 "), "123");
    }

    #[test]
    fn memo_requires_event_fields() {
        let form = NotaDinasForm {
            nomor: "3".to_string(),
            kepada: "Kepala Bagian".to_string(),
            dari: "Kasubag".to_string(),
            perihal: "Undangan".to_string(),
            narasi: "Mohon hadir".to_string(),
            signature_name: "H. Zamroni".to_string(),
            ..NotaDinasForm::default()
        };
        let errors = validate_nota_dinas(&form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("waktu").is_some());
        assert!(errors.get("tempat").is_some());
    }

    #[test]
    fn decision_letter_checks_subject_details() {
        let form = SuratKeputusanForm {
            nomor: "42".to_string(),
            tentang: "Kenaikan pangkat".to_string(),
            person: Person::named("Ahmad"),
            signature_name: "H. Zamroni".to_string(),
            ..SuratKeputusanForm::default()
        };
        let errors = validate_surat_keputusan(&form).unwrap_err();
        assert_eq!(errors.get("person.pangkat"), Some("Pangkat harus diisi"));
        assert_eq!(errors.get("person.unitKerja"), Some("Unit kerja harus diisi"));
        assert_eq!(errors.get("person.nama"), None);
        assert!(errors.to_string().starts_with("Form tidak lengkap"));
    }
}
