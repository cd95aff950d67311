//! Internal memo (Nota Dinas) template.

use super::{
    field, heading, letterhead, or_placeholder, paragraph, Block, LetterDocument, Page,
    RenderContext, SignatureBlock, PLACEHOLDER,
};
use crate::model::form::NotaDinasForm;
use crate::numbering::format_letter_number;

const TITLE: &str = "NOTA DINAS";
const GREETING: &str = "Dengan Hormat,";
const CLOSING: &str = "Demikian dan atas kehadirannya disampaikan terima kasih.";

/// Renders a memo; memos always fit on one page.
pub fn render_nota_dinas(form: &NotaDinasForm, ctx: &RenderContext) -> LetterDocument {
    let number = format_letter_number(
        &form.nomor,
        &form.subcategory,
        &form.month,
        &form.year,
        &form.category,
    );

    let mut page = Page::default();
    page.push(letterhead(&ctx.office));
    page.push(heading(TITLE));
    page.push(heading(format!("Nomor: {}", or_placeholder(&number))));
    page.push(field("Kepada", &form.kepada));
    page.push(field("Dari", &form.dari));
    page.push(field("Perihal", &form.perihal));
    page.push(field("Tanggal", &form.tanggal_surat));
    page.push(paragraph(GREETING));
    page.push(paragraph(or_placeholder(&form.narasi)));
    page.push(Block::Field {
        label: "Hari/Tgl".to_string(),
        lines: vec![event_day(form)],
    });
    page.push(field("Waktu", &form.waktu));
    page.push(field("Tempat", &form.tempat));
    page.push(paragraph(CLOSING));
    page.push(Block::Signature(SignatureBlock::new(
        &ctx.office,
        ctx.signature_date,
        form.use_tte,
        &form.anchor_symbol,
        &form.signature_name,
    )));

    LetterDocument { pages: vec![page] }
}

fn event_day(form: &NotaDinasForm) -> String {
    let hari = form.hari.trim();
    if hari.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format!("{hari}, {}", form.tanggal.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::render_nota_dinas;
    use crate::model::form::NotaDinasForm;
    use crate::pagination::PaginationPolicy;
    use crate::render::{OfficeProfile, RenderContext};
    use chrono::NaiveDate;

    #[test]
    fn memo_renders_header_rows_and_event_details() {
        let form = NotaDinasForm {
            nomor: "7".to_string(),
            category: "OT".to_string(),
            subcategory: "OT.01.2".to_string(),
            month: "03".to_string(),
            year: "2025".to_string(),
            kepada: "Para Kepala Bidang".to_string(),
            dari: "Kepala Kantor Wilayah".to_string(),
            perihal: "Undangan Upacara".to_string(),
            hari: "Senin".to_string(),
            tanggal: "17 Maret 2025".to_string(),
            waktu: "08.00 Wita".to_string(),
            tempat: "Kantor Gubernur".to_string(),
            narasi: "Mohon kehadiran Saudara.".to_string(),
            signature_name: "H. Zamroni".to_string(),
            ..NotaDinasForm::default()
        };
        let ctx = RenderContext::new(
            OfficeProfile::default(),
            PaginationPolicy::default(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        );

        let doc = render_nota_dinas(&form, &ctx);
        assert_eq!(doc.page_count(), 1);
        let text = doc.to_plain_text();
        assert!(text.contains("Nomor: B-7/OT.01.2/03/2025"));
        assert!(text.contains("Senin, 17 Maret 2025"));
        assert!(text.contains("Tanggal        : ........................."));
    }
}
