//! Decision letter (Surat Keputusan) template.

use super::{
    field, heading, letterhead, or_placeholder, paragraph, Block, LetterDocument, Page,
    RenderContext, SignatureBlock,
};
use crate::model::form::SuratKeputusanForm;
use crate::numbering::{format_letter_number, SURAT_KEPUTUSAN_CATEGORY};
use crate::render::format_indonesian_date;

const TITLE: &str = "KEPUTUSAN MENTERI AGAMA REPUBLIK INDONESIA";
const INTRO: &str = "DENGAN RAHMAT TUHAN YANG MAHA ESA";
const MINISTER: &str = "MENTERI AGAMA REPUBLIK INDONESIA,";
const DEFAULT_KEDUA: &str = "Apabila dikemudian hari ternyata terdapat kekeliruan dalam keputusan ini, akan diadakan perbaikan dan perhitungan kembali sebagaimana mestinya.";
const DEFAULT_KETIGA: &str = "Asli Keputusan ini diberikan kepada Pegawai Negeri Sipil yang bersangkutan, untuk diketahui dan dipergunakan sebagaimana mestinya.";

/// Renders a decision letter about the form's single employee.
///
/// Blank `kedua`/`ketiga` clauses fall back to the standard wording.
pub fn render_surat_keputusan(form: &SuratKeputusanForm, ctx: &RenderContext) -> LetterDocument {
    let number = format_letter_number(
        &form.nomor,
        &form.subcategory,
        &form.month,
        &form.year,
        SURAT_KEPUTUSAN_CATEGORY,
    );
    let tentang = or_placeholder(&form.tentang).to_uppercase();

    let mut page = Page::default();
    page.push(letterhead(&ctx.office));
    page.push(heading(TITLE));
    page.push(heading(format!("NOMOR: {}", or_placeholder(&number))));
    page.push(heading("TENTANG"));
    page.push(heading(tentang.clone()));
    page.push(heading(INTRO));
    page.push(heading(MINISTER));
    page.push(heading("MEMUTUSKAN:"));
    page.push(field(
        "Menetapkan",
        &format!("KEPUTUSAN MENTERI AGAMA TENTANG {tentang}"),
    ));

    let pertama = form.memutuskan.pertama.trim();
    let opening = if pertama.is_empty() {
        format!(
            "Terhitung mulai tanggal {}, Pegawai Negeri Sipil tersebut di bawah ini :",
            format_indonesian_date(ctx.signature_date)
        )
    } else {
        pertama.to_string()
    };
    let person = &form.person;
    page.push(Block::Field {
        label: "KESATU".to_string(),
        lines: vec![
            opening,
            format!("Nama       : {}", or_placeholder(&person.nama)),
            format!("NIP        : {}", or_placeholder(&person.nip)),
            format!("Pangkat    : {}", or_placeholder(&person.pangkat)),
            format!("Jabatan    : {}", or_placeholder(&person.jabatan)),
            format!("Unit Kerja : {}", or_placeholder(&person.unit_kerja)),
        ],
    });
    page.push(clause("KEDUA", &form.memutuskan.kedua, DEFAULT_KEDUA));
    page.push(clause("KETIGA", &form.memutuskan.ketiga, DEFAULT_KETIGA));
    page.push(Block::Signature(SignatureBlock::new(
        &ctx.office,
        ctx.signature_date,
        form.use_tte,
        &form.anchor_symbol,
        &form.signature_name,
    )));
    page.push(paragraph("Tembusan:\n1. Arsip."));

    LetterDocument { pages: vec![page] }
}

fn clause(label: &str, value: &str, fallback: &str) -> Block {
    let text = value.trim();
    field(label, if text.is_empty() { fallback } else { text })
}
