//! Signature block and Indonesian date formatting.

use super::{or_placeholder, OfficeProfile};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const DEFAULT_ANCHOR: &str = "^";

/// Closing signature of a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureBlock {
    /// e.g. `Mataram, 16 Oktober 2026`.
    pub place_date: String,
    pub signer_title: String,
    /// TTE (electronic signature) anchor marker, only when TTE is enabled.
    pub anchor: Option<String>,
    pub name: String,
}

impl SignatureBlock {
    pub fn new(
        office: &OfficeProfile,
        date: NaiveDate,
        use_tte: bool,
        anchor_id: &str,
        name: &str,
    ) -> Self {
        Self {
            place_date: format!("{}, {}", office.city, format_indonesian_date(date)),
            signer_title: office.signer_title.clone(),
            anchor: use_tte.then(|| resolve_anchor_symbol(anchor_id)),
            name: or_placeholder(name),
        }
    }

    pub(super) fn write_text(&self, out: &mut String) {
        out.push_str(&self.place_date);
        out.push('\n');
        out.push_str(&self.signer_title);
        out.push('\n');
        out.push('\n');
        if let Some(anchor) = &self.anchor {
            out.push_str(anchor);
        }
        out.push('\n');
        out.push('\n');
        out.push_str(&self.name);
        out.push('\n');
    }
}

/// Maps an anchor id from the form to the symbol embedded for TTE.
///
/// Any id outside `hash`, `dollar` and `caret` falls back to `^`.
pub fn resolve_anchor_symbol(anchor_id: &str) -> String {
    let symbol = match anchor_id {
        "hash" => "#",
        "dollar" => "$",
        _ => DEFAULT_ANCHOR,
    };
    symbol.to_string()
}

/// Long Indonesian date, e.g. `5 Juli 2025`.
pub fn format_indonesian_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::{format_indonesian_date, resolve_anchor_symbol, SignatureBlock};
    use crate::render::OfficeProfile;
    use chrono::NaiveDate;

    #[test]
    fn date_uses_indonesian_month_names() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_indonesian_date(date), "16 Oktober 2026");
        let date = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();
        assert_eq!(format_indonesian_date(date), "5 Juli 2025");
    }

    #[test]
    fn anchor_ids_resolve_from_fixed_table() {
        assert_eq!(resolve_anchor_symbol("caret"), "^");
        assert_eq!(resolve_anchor_symbol("hash"), "#");
        assert_eq!(resolve_anchor_symbol("dollar"), "$");
    }

    #[test]
    fn unknown_anchor_ids_fall_back_to_caret() {
        assert_eq!(resolve_anchor_symbol(""), "^");
        assert_eq!(resolve_anchor_symbol("@"), "^");
        assert_eq!(resolve_anchor_symbol("pagar"), "^");
        assert_eq!(resolve_anchor_symbol("HASH"), "^");
    }

    #[test]
    fn anchor_is_only_set_with_tte() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let office = OfficeProfile::default();
        let without = SignatureBlock::new(&office, date, false, "hash", "H. Zamroni");
        assert_eq!(without.anchor, None);
        assert_eq!(without.place_date, "Mataram, 2 Januari 2025");

        let with = SignatureBlock::new(&office, date, true, "hash", "H. Zamroni");
        assert_eq!(with.anchor.as_deref(), Some("#"));
    }
}
