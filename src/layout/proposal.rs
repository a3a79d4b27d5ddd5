//! Proposal document assembly.

use super::bullets::format_bullets;
use super::highlight::Highlighter;
use super::options::{StyleConfig, TableLayout};
use super::tables::{
    build_combined_table, build_expense_table, build_staff_table, build_summary_grid,
};
use crate::input::ProposalFields;
use crate::model::{Block, DocumentModel, Image, Paragraph, RunStyle, TextAlignment, TextRun};
use chrono::NaiveDate;

/// Title printed under the logo.
pub const PROPOSAL_TITLE: &str = "RFQ Proposal";

pub const EXPERIENCE_HEADER: &str = "Detailed Project Experience";
pub const SUMMARY_HEADER: &str = "Project Summary";
pub const RESUME_HEADER: &str = "Resume";

/// Build the proposal: logo, title block, optional period line, cost
/// summary, experience, project bullets, and on a new page the resume.
pub fn assemble_proposal(
    fields: &ProposalFields,
    resume_blocks: Vec<Paragraph>,
    logo: Image,
    style: &StyleConfig,
) -> DocumentModel {
    let highlighter = Highlighter::new();
    let mut doc = DocumentModel::new();

    doc.push(Block::Image(logo));
    doc.push_paragraph(title(PROPOSAL_TITLE, style));
    doc.push_paragraph(staff_line(fields, style));

    match date_range(&fields.start_date, &fields.end_date) {
        Some(line) => doc.push_paragraph(
            Paragraph::from_runs(vec![TextRun::plain(line)])
                .aligned(TextAlignment::Center)
                .spaced(style.spacer_height),
        ),
        None => doc.push_paragraph(style.spacer()),
    }

    let tables = match style.table_layout {
        TableLayout::Separate => vec![
            build_staff_table(fields, style),
            build_expense_table(fields, style),
            build_combined_table(fields, style),
        ],
        TableLayout::Merged => vec![build_summary_grid(fields, style)],
    };
    for table in tables {
        doc.push_table(table);
        // Keeps consecutive tables from merging into one.
        doc.push_paragraph(Paragraph::new().spaced(style.paragraph_spacing));
    }

    doc.push_paragraph(style.section_header(EXPERIENCE_HEADER));
    doc.extend_paragraphs(
        fields
            .project_experience
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                Paragraph::from_runs(highlighter.highlight(line)).spaced(style.paragraph_spacing)
            }),
    );

    doc.push_paragraph(style.section_header(SUMMARY_HEADER));
    doc.extend_paragraphs(format_bullets(&fields.project_summary, style));

    doc.push(Block::PageBreak);
    doc.push_paragraph(style.section_header(RESUME_HEADER));
    doc.extend_paragraphs(resume_blocks);

    log::debug!("Assembled proposal with {} blocks", doc.len());
    doc
}

pub(crate) fn title(text: &str, style: &StyleConfig) -> Paragraph {
    let run_style = RunStyle {
        bold: true,
        size: Some(style.title_size),
        color: Some(style.heading_color.clone()),
        ..Default::default()
    };
    Paragraph::from_runs(vec![TextRun::styled(text, run_style)])
        .aligned(TextAlignment::Center)
        .spaced(style.paragraph_spacing)
}

fn staff_line(fields: &ProposalFields, style: &StyleConfig) -> Paragraph {
    let mut runs = vec![TextRun::bold(fields.staff_name.trim())];
    if !fields.position.trim().is_empty() {
        runs.push(TextRun::plain(format!(" | {}", fields.position.trim())));
    }
    Paragraph::from_runs(runs)
        .aligned(TextAlignment::Center)
        .spaced(style.paragraph_spacing)
}

/// `"Period of Performance: March 1, 2025 - February 28, 2026"` when both
/// dates parse as `YYYY-MM-DD`.
pub fn date_range(start: &str, end: &str) -> Option<String> {
    let parse = |s: &str| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok();
    let (start, end) = (parse(start)?, parse(end)?);
    Some(format!(
        "Period of Performance: {} - {}",
        start.format("%B %-d, %Y"),
        end.format("%B %-d, %Y")
    ))
}
