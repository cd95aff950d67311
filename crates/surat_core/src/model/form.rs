//! Form state for the three letter kinds.
//!
//! These mirror what a user fills in before preview or save. Nothing here is
//! validated on construction; see `validation` for the submission checks.

use crate::model::letter::LetterHistory;
use crate::model::person::Person;
use crate::numbering::{split_letter_number, NumberParts};
use crate::render::format_indonesian_date;
use serde::{Deserialize, Serialize};

const REPRINT_ANCHOR: &str = "caret";

/// Task-assignment letter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuratTugasForm {
    /// User-entered sequence number, digits only.
    pub nomor: String,
    pub category: String,
    pub subcategory: String,
    /// Two-digit month, e.g. `07`.
    pub month: String,
    /// Four-digit year.
    pub year: String,
    /// Justification points, rendered as `a.`, `b.`, ...
    pub menimbang: Vec<String>,
    pub dasar: String,
    pub untuk: String,
    pub people: Vec<Person>,
    #[serde(rename = "useTTE")]
    pub use_tte: bool,
    pub anchor_symbol: String,
    pub use_table_format: bool,
    pub signature_name: String,
}

impl SuratTugasForm {
    /// Switches the form to table layout.
    ///
    /// The table's remarks column shows the work unit, so each person's
    /// `keterangan` is overwritten with `unit_kerja`.
    pub fn apply_table_format(&mut self) {
        self.use_table_format = true;
        for person in &mut self.people {
            person.keterangan = person.unit_kerja.clone();
        }
    }

    /// Rebuilds a printable form from an archived task letter.
    ///
    /// Only the stored title survives of `untuk`; TTE is off.
    pub fn from_history(letter: &LetterHistory) -> Self {
        let number = archived_number(letter);
        Self {
            nomor: number.nomor,
            category: letter.category.clone(),
            subcategory: letter.subcategory.clone(),
            month: number.month,
            year: number.year,
            menimbang: letter.menimbang.clone(),
            dasar: letter.dasar.clone(),
            untuk: letter.title.clone(),
            people: letter.people.clone(),
            use_tte: false,
            anchor_symbol: REPRINT_ANCHOR.to_string(),
            use_table_format: letter.use_table_format.unwrap_or(false),
            signature_name: letter.signature_name.clone().unwrap_or_default(),
        }
    }
}

/// Internal memo form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotaDinasForm {
    pub nomor: String,
    pub category: String,
    pub subcategory: String,
    pub month: String,
    pub year: String,
    pub kepada: String,
    pub dari: String,
    pub perihal: String,
    /// Date printed in the memo header, free text.
    pub tanggal_surat: String,
    /// Event date, free text.
    pub tanggal: String,
    pub hari: String,
    pub waktu: String,
    pub tempat: String,
    pub narasi: String,
    #[serde(rename = "useTTE")]
    pub use_tte: bool,
    pub anchor_symbol: String,
    pub signature_name: String,
}

impl NotaDinasForm {
    /// Rebuilds a printable memo from its archive record.
    ///
    /// The addressee is the first stored person and the memo is dated on
    /// its archive day. Event details are not archived and stay blank.
    pub fn from_history(letter: &LetterHistory) -> Self {
        let number = archived_number(letter);
        Self {
            nomor: number.nomor,
            category: letter.category.clone(),
            subcategory: letter.subcategory.clone(),
            month: number.month,
            year: number.year,
            kepada: letter
                .people
                .first()
                .map(|person| person.nama.clone())
                .unwrap_or_default(),
            perihal: letter.title.clone(),
            tanggal_surat: format_indonesian_date(letter.created_at.date_naive()),
            narasi: letter.title.clone(),
            use_tte: false,
            anchor_symbol: REPRINT_ANCHOR.to_string(),
            signature_name: letter.signature_name.clone().unwrap_or_default(),
            ..Self::default()
        }
    }
}

/// Operative clauses of a decision letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Memutuskan {
    pub pertama: String,
    pub kedua: String,
    pub ketiga: String,
}

impl Memutuskan {
    /// Clauses in printing order.
    pub fn clauses(&self) -> [&str; 3] {
        [
            self.pertama.as_str(),
            self.kedua.as_str(),
            self.ketiga.as_str(),
        ]
    }
}

/// Decision letter form; always about exactly one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuratKeputusanForm {
    pub nomor: String,
    pub category: String,
    pub subcategory: String,
    pub month: String,
    pub year: String,
    pub tentang: String,
    pub person: Person,
    pub memutuskan: Memutuskan,
    #[serde(rename = "useTTE")]
    pub use_tte: bool,
    pub anchor_symbol: String,
    pub signature_name: String,
}

impl SuratKeputusanForm {
    /// Rebuilds a decision letter from its archive record; the clauses come
    /// back from `menimbang` in pertama/kedua/ketiga order.
    pub fn from_history(letter: &LetterHistory) -> Self {
        let number = archived_number(letter);
        let clause = |index: usize| letter.menimbang.get(index).cloned().unwrap_or_default();
        Self {
            nomor: number.nomor,
            category: letter.category.clone(),
            subcategory: letter.subcategory.clone(),
            month: number.month,
            year: number.year,
            tentang: letter.title.clone(),
            person: letter.people.first().cloned().unwrap_or_default(),
            memutuskan: Memutuskan {
                pertama: clause(0),
                kedua: clause(1),
                ketiga: clause(2),
            },
            use_tte: false,
            anchor_symbol: REPRINT_ANCHOR.to_string(),
            signature_name: letter.signature_name.clone().unwrap_or_default(),
        }
    }
}

/// Number parts of an archived letter; the period falls back to the
/// archive month when the stored number carries none.
fn archived_number(letter: &LetterHistory) -> NumberParts {
    let mut parts = split_letter_number(&letter.letter_number);
    if parts.month.is_empty() {
        parts.month = letter.created_at.format("%m").to_string();
        parts.year = letter.created_at.format("%Y").to_string();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::{NotaDinasForm, SuratKeputusanForm, SuratTugasForm};
    use crate::model::letter::{DocumentType, LetterHistory};
    use crate::model::person::Person;
    use crate::numbering::format_letter_number;
    use chrono::{TimeZone, Utc};

    fn archived(document_type: DocumentType, letter_number: &str) -> LetterHistory {
        LetterHistory {
            id: "a1".to_string(),
            letter_number: letter_number.to_string(),
            category: "KP".to_string(),
            subcategory: "KP.01".to_string(),
            document_type,
            created_at: Utc.with_ymd_and_hms(2025, 7, 14, 9, 0, 0).unwrap(),
            people: vec![Person {
                nama: "Ahmad".to_string(),
                nip: "198001012005011001".to_string(),
                ..Person::default()
            }],
            title: "Monitoring madrasah".to_string(),
            use_table_format: Some(true),
            menimbang: vec!["Satu".to_string(), "Dua".to_string(), "Tiga".to_string()],
            dasar: "DIPA 2025".to_string(),
            signature_name: Some("H. Zamroni".to_string()),
        }
    }

    #[test]
    fn task_form_from_archive_reproduces_letter_number() {
        let letter = archived(DocumentType::SuratTugas, "12/Kw.18.01/2/KP.01/07/2025");
        let form = SuratTugasForm::from_history(&letter);

        let number = format_letter_number(
            &form.nomor,
            &form.subcategory,
            &form.month,
            &form.year,
            &form.category,
        );
        assert_eq!(number, letter.letter_number);
        assert_eq!(form.untuk, "Monitoring madrasah");
        assert_eq!(form.people, letter.people);
        assert!(form.use_table_format);
        assert!(!form.use_tte);
        assert_eq!(form.signature_name, "H. Zamroni");
    }

    #[test]
    fn memo_from_archive_addresses_first_person_on_archive_day() {
        let letter = archived(DocumentType::NotaDinas, "5/Kw.18.01/2/KP.01/06/2025");
        let form = NotaDinasForm::from_history(&letter);

        assert_eq!(form.kepada, "Ahmad");
        assert_eq!(form.perihal, "Monitoring madrasah");
        assert_eq!(form.tanggal_surat, "14 Juli 2025");
        assert_eq!((form.month.as_str(), form.year.as_str()), ("06", "2025"));
        assert!(form.tempat.is_empty());
    }

    #[test]
    fn decision_from_archive_restores_clauses_and_falls_back_to_archive_month() {
        let letter = archived(DocumentType::SuratKeputusan, "7");
        let form = SuratKeputusanForm::from_history(&letter);

        assert_eq!(form.nomor, "7");
        assert_eq!((form.month.as_str(), form.year.as_str()), ("07", "2025"));
        assert_eq!(form.memutuskan.clauses(), ["Satu", "Dua", "Tiga"]);
        assert_eq!(form.person.nama, "Ahmad");
    }

    #[test]
    fn table_format_copies_unit_into_remarks() {
        let mut form = SuratTugasForm {
            people: vec![Person {
                nama: "Ahmad".to_string(),
                unit_kerja: "Bagian Umum".to_string(),
                keterangan: "lama".to_string(),
                ..Person::default()
            }],
            ..SuratTugasForm::default()
        };

        form.apply_table_format();

        assert!(form.use_table_format);
        assert_eq!(form.people[0].keterangan, "Bagian Umum");
    }

    #[test]
    fn form_json_uses_camel_case_and_tte_tag() {
        let form: SuratTugasForm = serde_json::from_str(
            r#"{"nomor":"12","useTTE":true,"useTableFormat":true,"signatureName":"H. Zamroni"}"#,
        )
        .unwrap();
        assert!(form.use_tte);
        assert!(form.use_table_format);
        assert_eq!(form.signature_name, "H. Zamroni");
        assert!(form.people.is_empty());
    }
}
