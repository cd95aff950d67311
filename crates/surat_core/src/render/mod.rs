//! Print-ready document templates.
//!
//! # Responsibility
//! - Turn form state into a page/block document model per letter kind.
//! - Emit a plain-text rendition that the print surface lays out.
//!
//! # Invariants
//! - Only the first page carries the letterhead.
//! - Task-letter people follow the `pagination::PagePlan` split exactly.
//! - Rendering is total: blank form fields render as dotted placeholders.
//!
//! # See also
//! - `pagination` for the page split rules.

mod nota_dinas;
mod signature;
mod surat_keputusan;
mod surat_tugas;

pub use nota_dinas::render_nota_dinas;
pub use signature::{format_indonesian_date, resolve_anchor_symbol, SignatureBlock};
pub use surat_keputusan::render_surat_keputusan;
pub use surat_tugas::render_surat_tugas;

use crate::model::person::Person;
use crate::pagination::{PaginationPolicy, PeopleLayout};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shown wherever a required value is still empty.
pub const PLACEHOLDER: &str = ".........................";

const PAGE_BREAK: char = '\u{000C}';
const LABEL_WIDTH: usize = 14;

/// Institutional constants printed on every letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeProfile {
    pub ministry: String,
    pub office: String,
    pub address: String,
    pub website: String,
    /// City used in the signature date line.
    pub city: String,
    /// Signer's title line, e.g. `Kepala,`.
    pub signer_title: String,
}

impl Default for OfficeProfile {
    fn default() -> Self {
        Self {
            ministry: "KEMENTERIAN AGAMA REPUBLIK INDONESIA".to_string(),
            office: "KANTOR WILAYAH KEMENTERIAN AGAMA".to_string(),
            address: "Jalan Udayana No. 06 Mataram NTB, (0370) 625661, Fax. (0370) 625317"
                .to_string(),
            website: "Website: www.ntb.kemenag.go.id, Email: ntb@kemenag.go.id".to_string(),
            city: "Mataram".to_string(),
            signer_title: "Kepala,".to_string(),
        }
    }
}

/// Inputs shared by every template besides the form itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub office: OfficeProfile,
    pub pagination: PaginationPolicy,
    /// Date printed in the signature block.
    pub signature_date: NaiveDate,
}

impl RenderContext {
    pub fn new(office: OfficeProfile, pagination: PaginationPolicy, signature_date: NaiveDate) -> Self {
        Self {
            office,
            pagination,
            signature_date,
        }
    }
}

/// One printable unit of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Letterhead { lines: Vec<String> },
    /// Centered bold line.
    Heading { text: String },
    /// `Label : value` row; continuation lines are indented under the value.
    Field { label: String, lines: Vec<String> },
    People {
        layout: PeopleLayout,
        /// 1-based number of the first person in this block.
        start_index: usize,
        people: Vec<Person>,
    },
    Paragraph { text: String },
    Signature(SignatureBlock),
}

/// One printed page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn has_letterhead(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::Letterhead { .. }))
    }
}

/// Rendered letter ready for the print surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LetterDocument {
    pub pages: Vec<Page>,
}

impl LetterDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain-text rendition; pages are separated by a form feed.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push(PAGE_BREAK);
                out.push('\n');
            }
            for block in &page.blocks {
                write_block(&mut out, block);
                out.push('\n');
            }
        }
        out
    }
}

fn letterhead(office: &OfficeProfile) -> Block {
    Block::Letterhead {
        lines: vec![
            office.ministry.clone(),
            office.office.clone(),
            office.address.clone(),
            office.website.clone(),
        ],
    }
}

fn heading(text: impl Into<String>) -> Block {
    Block::Heading { text: text.into() }
}

fn field(label: &str, value: &str) -> Block {
    Block::Field {
        label: label.to_string(),
        lines: vec![or_placeholder(value)],
    }
}

fn paragraph(text: impl Into<String>) -> Block {
    Block::Paragraph { text: text.into() }
}

fn or_placeholder(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Letterhead { lines } => {
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&"=".repeat(72));
            out.push('\n');
        }
        Block::Heading { text } => {
            out.push_str(text);
            out.push('\n');
        }
        Block::Field { label, lines } => {
            for (index, line) in lines.iter().enumerate() {
                if index == 0 {
                    out.push_str(&format!("{label:<LABEL_WIDTH$} : {line}\n"));
                } else {
                    out.push_str(&format!("{:<LABEL_WIDTH$}   {line}\n", ""));
                }
            }
        }
        Block::People {
            layout,
            start_index,
            people,
        } => write_people(out, *layout, *start_index, people),
        Block::Paragraph { text } => {
            out.push_str(text);
            out.push('\n');
        }
        Block::Signature(signature) => signature.write_text(out),
    }
}

fn write_people(out: &mut String, layout: PeopleLayout, start_index: usize, people: &[Person]) {
    match layout {
        PeopleLayout::List => {
            for (offset, person) in people.iter().enumerate() {
                let number = start_index + offset;
                out.push_str(&format!("{number}. Nama       : {}\n", or_placeholder(&person.nama)));
                out.push_str(&format!("   NIP        : {}\n", or_placeholder(&person.nip)));
                out.push_str(&format!("   Jabatan    : {}\n", or_placeholder(&person.jabatan)));
                out.push_str(&format!("   Unit Kerja : {}\n", or_placeholder(&person.unit_kerja)));
            }
        }
        PeopleLayout::Table => {
            out.push_str("| No | Nama/NIP | Jabatan | Ket. |\n");
            for (offset, person) in people.iter().enumerate() {
                out.push_str(&format!(
                    "| {} | {} / {} | {} | {} |\n",
                    start_index + offset,
                    person.nama.trim(),
                    person.nip.trim(),
                    person.jabatan.trim(),
                    person.keterangan.trim()
                ));
            }
        }
    }
}
