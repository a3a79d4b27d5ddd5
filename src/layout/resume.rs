//! Resume document assembly from a structured record.

use super::bullets::{bullet_paragraph, clean_bullet_line};
use super::highlight::Highlighter;
use super::options::StyleConfig;
use super::proposal::title;
use crate::input::{Education, Experience, ResumeFields};
use crate::model::{Block, DocumentModel, Image, Paragraph, TextRun};

pub const SUMMARY_HEADER: &str = "Professional Summary";
pub const EDUCATION_HEADER: &str = "Education";
pub const EXPERIENCE_HEADER: &str = "Professional Experience";
pub const CERTIFICATIONS_HEADER: &str = "Certifications";
pub const SKILLS_HEADER: &str = "Skills";

/// Between degree and school in an education line.
pub const EDUCATION_SEPARATOR: &str = " — ";

/// Build a resume document. Sections without content are left out.
pub fn assemble_resume(resume: &ResumeFields, logo: Image, style: &StyleConfig) -> DocumentModel {
    let highlighter = Highlighter::new();
    let mut doc = DocumentModel::new();

    doc.push(Block::Image(logo));
    doc.push_paragraph(title(resume.name.trim(), style));

    if !resume.summary.trim().is_empty() {
        doc.push_paragraph(style.section_header(SUMMARY_HEADER));
        doc.push_paragraph(
            Paragraph::from_runs(highlighter.highlight(resume.summary.trim()))
                .spaced(style.paragraph_spacing),
        );
    }

    if !resume.education.is_empty() {
        doc.push_paragraph(style.section_header(EDUCATION_HEADER));
        doc.extend_paragraphs(
            resume
                .education
                .iter()
                .map(|edu| Paragraph::with_text(education_line(edu)).spaced(style.paragraph_spacing)),
        );
    }

    if !resume.experience.is_empty() {
        doc.push_paragraph(style.section_header(EXPERIENCE_HEADER));
        for job in &resume.experience {
            doc.extend_paragraphs(experience_block(job, &highlighter, style));
        }
    }

    let certifications: Vec<String> = resume
        .certifications
        .iter()
        .map(|c| clean_bullet_line(c))
        .filter(|c| !c.is_empty())
        .collect();
    if !certifications.is_empty() {
        doc.push_paragraph(style.section_header(CERTIFICATIONS_HEADER));
        doc.extend_paragraphs(
            certifications
                .into_iter()
                .map(|c| bullet_paragraph(vec![TextRun::plain(c)], style)),
        );
    }

    if !resume.skills.trim().is_empty() {
        doc.push_paragraph(style.section_header(SKILLS_HEADER));
        doc.push_paragraph(Paragraph::with_text(resume.skills.trim()).spaced(style.paragraph_spacing));
    }

    log::debug!("Assembled resume with {} blocks", doc.len());
    doc
}

/// Degree, then school after a dash, then the year in parentheses. Empty parts are skipped.
pub fn education_line(edu: &Education) -> String {
    let mut line = edu.degree.trim().to_string();
    if !edu.school.trim().is_empty() {
        line.push_str(EDUCATION_SEPARATOR);
        line.push_str(edu.school.trim());
    }
    if !edu.year.trim().is_empty() {
        line.push_str(&format!(" ({})", edu.year.trim()));
    }
    line
}

fn experience_block(job: &Experience, highlighter: &Highlighter, style: &StyleConfig) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();

    let mut heading = vec![TextRun::bold(job.company.trim())];
    if !job.location.trim().is_empty() {
        heading.push(TextRun::plain(format!(" | {}", job.location.trim())));
    }
    paragraphs.push(Paragraph::from_runs(heading));

    let mut role = Vec::new();
    if !job.title.trim().is_empty() {
        role.push(TextRun::italics(job.title.trim()));
    }
    if !job.dates.trim().is_empty() {
        let sep = if role.is_empty() { "" } else { " | " };
        role.push(TextRun::plain(format!("{}{}", sep, job.dates.trim())));
    }
    if !role.is_empty() {
        paragraphs.push(Paragraph::from_runs(role));
    }

    if !job.project_details.trim().is_empty() {
        let mut runs = vec![TextRun::bold("Project: ")];
        runs.extend(highlighter.highlight(job.project_details.trim()));
        paragraphs.push(Paragraph::from_runs(runs));
    }

    paragraphs.extend(
        job.bullets
            .iter()
            .map(|b| clean_bullet_line(b))
            .filter(|b| !b.is_empty())
            .map(|b| bullet_paragraph(highlighter.highlight(&b), style)),
    );

    if let Some(last) = paragraphs.last_mut() {
        last.spacing_after = style.paragraph_spacing;
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BULLET_GLYPH;
    use crate::model::ImageFormat;

    fn logo() -> Image {
        Image::new(vec![0xFF, 0xD8], ImageFormat::Jpeg, 180, 72, "Logo")
    }

    fn headers(doc: &DocumentModel) -> Vec<String> {
        doc.blocks
            .iter()
            .skip(2)
            .filter_map(|b| match b {
                Block::Paragraph(p) if p.runs.first().and_then(|r| r.style.color.as_ref()).is_some() => {
                    Some(p.plain_text())
                }
                _ => None,
            })
            .collect()
    }

    fn full_resume() -> ResumeFields {
        ResumeFields::from_json(
            r#"{
                "name": "Jane Doe",
                "summary": "Twenty years delivering Data Center programs.",
                "education": [{"degree": "BSc Civil Engineering", "school": "State University", "year": 2004}],
                "experience": [{
                    "company": "Acme Builders",
                    "title": "Project Manager",
                    "location": "Reston, VA",
                    "dates": "2015 - Present",
                    "project_details": "$1.2 Billion Google campus",
                    "bullets": ["- Managed AWS fit-out", "Ran weekly OAC meetings"]
                }],
                "certifications": ["PMP", " "],
                "skills": "Scheduling, Procore"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_all_sections_in_order() {
        let doc = assemble_resume(&full_resume(), logo(), &StyleConfig::default());
        assert!(matches!(doc.blocks[0], Block::Image(_)));
        assert_eq!(
            headers(&doc),
            vec![
                SUMMARY_HEADER,
                EDUCATION_HEADER,
                EXPERIENCE_HEADER,
                CERTIFICATIONS_HEADER,
                SKILLS_HEADER
            ]
        );
        let text = doc.plain_text();
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("BSc Civil Engineering — State University (2004)"));
        assert!(text.contains("Project Manager | 2015 - Present"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let resume = ResumeFields {
            name: "John Roe".into(),
            skills: "Estimating".into(),
            ..Default::default()
        };
        let doc = assemble_resume(&resume, logo(), &StyleConfig::default());
        assert_eq!(headers(&doc), vec![SKILLS_HEADER]);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_bullets_are_highlighted() {
        let doc = assemble_resume(&full_resume(), logo(), &StyleConfig::default());
        let bullet = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Paragraph(p) if p.plain_text().contains("Managed") => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(bullet.runs[0].text, BULLET_GLYPH);
        assert_eq!(bullet.plain_text(), "• Managed AWS fit-out");
        assert!(bullet.runs.iter().any(|r| r.text == "AWS" && r.style.bold));
    }

    #[test]
    fn test_education_line_parts() {
        let edu = Education {
            degree: "MBA".into(),
            ..Default::default()
        };
        assert_eq!(education_line(&edu), "MBA");
        let edu = Education {
            degree: "MBA".into(),
            year: "2012".into(),
            ..Default::default()
        };
        assert_eq!(education_line(&edu), "MBA (2012)");
        let edu = Education {
            degree: "MBA".into(),
            school: "Wharton".into(),
            ..Default::default()
        };
        assert_eq!(education_line(&edu), format!("MBA{}Wharton", EDUCATION_SEPARATOR));
    }
}
