//! Task-letter (Surat Tugas) template.

use super::{
    field, heading, letterhead, or_placeholder, paragraph, Block, LetterDocument, Page,
    RenderContext, SignatureBlock, PLACEHOLDER,
};
use crate::model::form::SuratTugasForm;
use crate::numbering::format_letter_number;
use crate::pagination::{plan_pages, PageSlot, PagePlan, PeopleLayout};

const TITLE: &str = "SURAT TUGAS";
const CLOSING: &str =
    "Demikian Surat Tugas ini dibuat untuk dapat dilaksanakan sebagaimana mestinya.";

/// Renders a task letter, splitting the assignees per the context's policy.
pub fn render_surat_tugas(form: &SuratTugasForm, ctx: &RenderContext) -> LetterDocument {
    let layout = PeopleLayout::from_table_flag(form.use_table_format);
    let plan = plan_pages(&form.people, layout, &ctx.pagination);
    let number = format_letter_number(
        &form.nomor,
        &form.subcategory,
        &form.month,
        &form.year,
        &form.category,
    );

    let mut first = Page::default();
    first.push(letterhead(&ctx.office));
    first.push(heading(TITLE));
    first.push(heading(format!("Nomor: {}", or_placeholder(&number))));
    first.push(Block::Field {
        label: "Menimbang".to_string(),
        lines: lettered_points(&form.menimbang),
    });
    first.push(field("Dasar", &form.dasar));
    first.push(heading("Memberi Tugas"));
    first.push(Block::Field {
        label: "Kepada".to_string(),
        lines: vec![String::new()],
    });
    first.push(Block::People {
        layout,
        start_index: 1,
        people: plan.first_page_people.to_vec(),
    });

    let mut pages = vec![first];
    match plan.closing_page {
        PageSlot::First => push_closing(&mut pages[0], form, ctx),
        PageSlot::Second => {
            let mut second = Page::default();
            push_continuation(&mut second, &plan);
            push_closing(&mut second, form, ctx);
            pages.push(second);
        }
    }

    LetterDocument { pages }
}

fn push_continuation(page: &mut Page, plan: &PagePlan<'_>) {
    if plan.second_page_people.is_empty() {
        return;
    }
    page.push(Block::People {
        layout: plan.layout,
        start_index: plan.second_page_start_index(),
        people: plan.second_page_people.to_vec(),
    });
}

fn push_closing(page: &mut Page, form: &SuratTugasForm, ctx: &RenderContext) {
    page.push(field("Untuk", &form.untuk));
    page.push(paragraph(CLOSING));
    page.push(Block::Signature(SignatureBlock::new(
        &ctx.office,
        ctx.signature_date,
        form.use_tte,
        &form.anchor_symbol,
        &form.signature_name,
    )));
}

fn lettered_points(points: &[String]) -> Vec<String> {
    if points.is_empty() {
        return vec![PLACEHOLDER.to_string()];
    }
    points
        .iter()
        .enumerate()
        .map(|(index, point)| format!("{}. {}", point_marker(index), or_placeholder(point)))
        .collect()
}

fn point_marker(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|offset| *offset < 26)
        .map_or('-', |offset| char::from(b'a' + offset))
}
