//! Person record shared by task letters and decision letters.

use serde::{Deserialize, Serialize};

/// One assignee on a task letter or the subject of a decision letter.
///
/// Lives in form state until the letter is saved; no field is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub nama: String,
    /// Civil-servant identification number.
    pub nip: String,
    pub pangkat: String,
    pub jabatan: String,
    pub unit_kerja: String,
    pub keterangan: String,
}

impl Person {
    /// Creates a person with only a display name set.
    pub fn named(nama: impl Into<String>) -> Self {
        Self {
            nama: nama.into(),
            ..Self::default()
        }
    }

    /// Case-insensitive match over name, NIP and position.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.nama.to_lowercase().contains(needle)
            || self.nip.to_lowercase().contains(needle)
            || self.jabatan.to_lowercase().contains(needle)
    }
}
