//! Institutional letter-number formatting.
//!
//! # Responsibility
//! - Combine a sequence number with classification and date parts into the
//!   mandated numbering string.
//! - Produce the format hint shown beside the number input.
//!
//! # Invariants
//! - Formatting is total: any input yields a string, never a panic.
//! - An empty sequence number yields an empty string.
//! - `user_number` is interpolated verbatim; digit filtering is the form's job.

/// Category tag that selects the decision-letter format.
pub const SURAT_KEPUTUSAN_CATEGORY: &str = "Surat Keputusan";
/// Category id that selects the organisation/procedure format.
pub const OT_CATEGORY: &str = "OT";

const OFFICE_CODE: &str = "Kw.18.01";
const SK_OFFICE_CODE: &str = "KW.18.01";
const SK_SUBCODE: &str = "KP.01.01";
const OT_PREFIX: &str = "OT.";

/// Formats the canonical letter number.
///
/// - `Surat Keputusan`: `B-{n}/KW.18.01/KP.01.01/{month}/{year}`, the
///   subcategory is ignored.
/// - `OT`: `B-{n}/OT.{code}/{month}/{year}` where `code` is the subcategory
///   with its leading `OT.` removed.
/// - anything else: `{n}/Kw.18.01/2/{subcategory}/{month}/{year}`.
pub fn format_letter_number(
    user_number: &str,
    subcategory: &str,
    month: &str,
    year: &str,
    category: &str,
) -> String {
    if user_number.is_empty() {
        return String::new();
    }

    match category {
        SURAT_KEPUTUSAN_CATEGORY => {
            format!("B-{user_number}/{SK_OFFICE_CODE}/{SK_SUBCODE}/{month}/{year}")
        }
        OT_CATEGORY => format!(
            "B-{user_number}/OT.{}/{month}/{year}",
            strip_ot_prefix(subcategory)
        ),
        _ => format!("{user_number}/{OFFICE_CODE}/2/{subcategory}/{month}/{year}"),
    }
}

/// Describes the expected number shape with `[Nomor]` in place of the
/// sequence number.
pub fn format_hint(category: &str, subcategory: &str, month: &str, year: &str) -> String {
    match category {
        SURAT_KEPUTUSAN_CATEGORY => {
            format!("Format: B-[Nomor]/{SK_OFFICE_CODE}/{SK_SUBCODE}/{month}/{year}")
        }
        OT_CATEGORY => format!(
            "Format: B-[Nomor]/OT.{}/{month}/{year}",
            strip_ot_prefix(subcategory)
        ),
        _ => format!("Format: [Nomor]/{OFFICE_CODE}/2/{subcategory}/{month}/{year}"),
    }
}

/// Sequence number and period recovered from a formatted letter number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberParts {
    pub nomor: String,
    /// Empty when the number does not end in `/MM/YYYY`.
    pub month: String,
    pub year: String,
}

/// Splits a number produced by [`format_letter_number`] back into the user
/// sequence number and the `/MM/YYYY` period.
pub fn split_letter_number(letter_number: &str) -> NumberParts {
    let first = letter_number.split('/').next().unwrap_or_default();
    let nomor = first.strip_prefix("B-").unwrap_or(first).to_string();

    let mut tail = letter_number.rsplit('/');
    let year = tail.next().unwrap_or_default();
    let month = tail.next().unwrap_or_default();
    let is_digits =
        |value: &str, len: usize| value.len() == len && value.bytes().all(|b| b.is_ascii_digit());

    if letter_number.contains('/') && is_digits(month, 2) && is_digits(year, 4) {
        NumberParts {
            nomor,
            month: month.to_string(),
            year: year.to_string(),
        }
    } else {
        NumberParts {
            nomor,
            ..NumberParts::default()
        }
    }
}

fn strip_ot_prefix(subcategory: &str) -> &str {
    subcategory.strip_prefix(OT_PREFIX).unwrap_or(subcategory)
}
