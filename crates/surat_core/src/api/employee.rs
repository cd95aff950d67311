//! Employee search query classification and response mapping.

use crate::model::person::Person;
use serde::Deserialize;

/// Shortest NIP fragment worth sending to the backend.
pub const MIN_NIP_QUERY_LEN: usize = 5;
/// Shortest name fragment worth sending to the backend.
pub const MIN_NAME_QUERY_LEN: usize = 4;

/// Search parameter derived from what the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeQuery {
    Nip(String),
    Nama(String),
}

impl EmployeeQuery {
    pub(crate) fn as_param(&self) -> (&'static str, &str) {
        match self {
            Self::Nip(value) => ("nip", value),
            Self::Nama(value) => ("nama", value),
        }
    }
}

/// Classifies raw input as a NIP or name search.
///
/// Digit-only input is a NIP search. Returns `None` when the input is too
/// short to search for.
pub fn classify_query(input: &str) -> Option<EmployeeQuery> {
    let query = input.trim();
    let is_nip = !query.is_empty() && query.chars().all(|c| c.is_ascii_digit());
    let length = query.chars().count();

    if is_nip {
        (length >= MIN_NIP_QUERY_LEN).then(|| EmployeeQuery::Nip(query.to_string()))
    } else {
        (length >= MIN_NAME_QUERY_LEN).then(|| EmployeeQuery::Nama(query.to_string()))
    }
}

/// Employee row as returned by `/api/pegawai/search-surat`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmployeeRecord {
    #[serde(default)]
    nip: String,
    #[serde(default)]
    nama: String,
    #[serde(default)]
    jabatan: Option<String>,
    #[serde(default)]
    unit_kerja: Option<String>,
    #[serde(default)]
    golongan: Option<String>,
}

impl From<EmployeeRecord> for Person {
    fn from(value: EmployeeRecord) -> Self {
        Person {
            nama: value.nama,
            nip: value.nip,
            pangkat: value.golongan.unwrap_or_default(),
            jabatan: value.jabatan.unwrap_or_default(),
            unit_kerja: value.unit_kerja.unwrap_or_default(),
            keterangan: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_query, EmployeeQuery, EmployeeRecord};
    use crate::model::person::Person;

    #[test]
    fn digit_queries_need_five_characters() {
        assert_eq!(classify_query("1980"), None);
        assert_eq!(
            classify_query(" 19800 "),
            Some(EmployeeQuery::Nip("19800".to_string()))
        );
    }

    #[test]
    fn name_queries_need_four_characters() {
        assert_eq!(classify_query("Ali"), None);
        assert_eq!(
            classify_query("Alif"),
            Some(EmployeeQuery::Nama("Alif".to_string()))
        );
        assert_eq!(classify_query(""), None);
    }

    #[test]
    fn record_maps_backend_names_onto_person() {
        let record: EmployeeRecord = serde_json::from_str(
            r#"{"nip":"1980","nama":"Ahmad","jabatan":"Analis","unit_kerja":"Umum","golongan":"III/c"}"#,
        )
        .unwrap();
        let person = Person::from(record);
        assert_eq!(person.unit_kerja, "Umum");
        assert_eq!(person.pangkat, "III/c");
        assert!(person.keterangan.is_empty());
    }
}
