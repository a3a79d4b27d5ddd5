//! End-to-end tests: JSON record in, DOCX package out.

use redocx::container::{Package, MAIN_DOCUMENT_ENTRY};
use redocx::docx::{extract_paragraphs, extract_resume, RESUME_NOT_PROVIDED};
use redocx::{
    Block, Brand, DocumentBuilder, DocumentModel, Error, GenerateOptions, PageSetup, TableLayout,
};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A minimal package with `document` as its main part.
fn create_docx(document: &str) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
    )
    .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap();
    buffer
}

const SOURCE_RESUME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> World</w:t></w:r></w:p>
    <w:p><w:r><w:rPr><w:u w:val="single"/></w:rPr><w:t>Underlined</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        fs::write(assets.join("logo_dc.png"), [0x89, b'P', b'N', b'G', 0x0D, 0x0A]).unwrap();
        fs::write(assets.join("logo_tt.jpg"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions::new().with_asset_dir(self.path("assets"))
    }

    fn write_json(&self, name: &str, json: &serde_json::Value) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, serde_json::to_string_pretty(json).unwrap()).unwrap();
        path
    }

    fn proposal_input(&self, resume: Option<&Path>) -> PathBuf {
        self.write_json(
            "proposal.json",
            &serde_json::json!({
                "staff_name": "Test User",
                "position": "Construction Manager",
                "duration": 12,
                "hourly_rate": 200,
                "commitment": "100%",
                "staff_monthly": "$34,600",
                "staff_total": "$415,200",
                "expense_desc": "N/A",
                "expense_monthly": "N/A",
                "expense_total": "N/A",
                "combined_monthly": "$34,600",
                "combined_total": "$415,200",
                "project_experience": "Delivered a Microsoft data center expansion.",
                "project_summary": "- Project 1\n- Project 2",
                "formatted_resume_path": resume.map(|p| p.display().to_string()),
                "start_date": "2025-01-06",
                "end_date": "2025-12-19"
            }),
        )
    }
}

fn document_xml(path: &Path) -> String {
    Package::open(path)
        .unwrap()
        .read_text(MAIN_DOCUMENT_ENTRY)
        .unwrap()
}

#[test]
fn test_extractor_round_trip_from_package() {
    let package = Package::from_bytes(create_docx(SOURCE_RESUME)).unwrap();
    let paragraphs = extract_paragraphs(&package.read_text(MAIN_DOCUMENT_ENTRY).unwrap());

    assert_eq!(paragraphs.len(), 2);
    let runs = &paragraphs[0].runs;
    assert_eq!(runs.len(), 2);
    assert_eq!((runs[0].text.as_str(), runs[0].style.bold), ("Hello", true));
    assert_eq!((runs[1].text.as_str(), runs[1].style.bold), (" World", false));
    assert!(paragraphs[1].runs[0].style.underline);
}

#[test]
fn test_proposal_embeds_source_resume() {
    let ws = Workspace::new();
    let source = ws.path("source.docx");
    fs::write(&source, create_docx(SOURCE_RESUME)).unwrap();
    let input = ws.proposal_input(Some(&source));
    let output = ws.path("proposal.docx");

    redocx::generate_with_options(&input, &output, &ws.options()).unwrap();

    let package = Package::open(&output).unwrap();
    assert!(package.has_entry("word/media/image1.png"));
    let xml = package.read_text(MAIN_DOCUMENT_ENTRY).unwrap();
    assert!(xml.contains("12 Months"));
    assert!(xml.contains("$200/hr"));
    assert!(xml.contains("Period of Performance: January 6, 2025 - December 19, 2025"));
    assert!(xml.contains("<w:br w:type=\"page\"/>"));

    // The generated document can itself be mined again.
    let text: Vec<String> = extract_paragraphs(&xml)
        .iter()
        .map(|p| p.plain_text())
        .collect();
    assert!(text.contains(&"Hello World".to_string()));
    assert!(text.contains(&"• Project 2".to_string()));
    let resume_pos = text.iter().position(|t| t == "Resume").unwrap();
    let hello_pos = text.iter().position(|t| t == "Hello World").unwrap();
    assert!(resume_pos < hello_pos);
}

#[test]
fn test_missing_resume_uses_placeholder() {
    let ws = Workspace::new();
    let input = ws.proposal_input(None);
    let output = ws.path("proposal.docx");

    redocx::generate_with_options(&input, &output, &ws.options()).unwrap();
    assert!(document_xml(&output).contains("&lt;Resume not provided&gt;"));
}

#[test]
fn test_corrupt_resume_is_recovered() {
    let ws = Workspace::new();
    let source = ws.path("broken_resume.docx");
    fs::write(&source, b"this is not a zip").unwrap();

    let paragraphs = extract_resume(Some(&source));
    assert_eq!(paragraphs.len(), 1);
    assert!(paragraphs[0].runs[0].style.italics);
    assert!(paragraphs[0].plain_text().contains("broken_resume.docx"));

    let output = ws.path("proposal.docx");
    redocx::generate_with_options(ws.proposal_input(Some(&source)), &output, &ws.options())
        .unwrap();
    assert!(document_xml(&output).contains("broken_resume.docx"));
}

#[test]
fn test_tt_brand_and_merged_layout() {
    let ws = Workspace::new();
    let input = ws.proposal_input(None);
    let output = ws.path("tt.docx");
    let options = ws
        .options()
        .with_brand(Brand::Tt)
        .with_layout(TableLayout::Merged);

    redocx::generate_with_options(&input, &output, &options).unwrap();

    let package = Package::open(&output).unwrap();
    assert!(package.has_entry("word/media/image1.jpeg"));
    let xml = package.read_text(MAIN_DOCUMENT_ENTRY).unwrap();
    assert_eq!(xml.matches("<w:tbl>").count(), 1);
    assert!(xml.contains("12 mo"));
}

#[test]
fn test_missing_logo_is_fatal() {
    let ws = Workspace::new();
    let input = ws.proposal_input(None);
    let output = ws.path("proposal.docx");
    let options = GenerateOptions::new().with_asset_dir(ws.path("nowhere"));

    let err = redocx::generate_with_options(&input, &output, &options).unwrap_err();
    assert!(matches!(err, Error::MissingAsset(_)));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_fatal() {
    let ws = Workspace::new();
    let err = redocx::generate_with_options(ws.path("absent.json"), ws.path("o.docx"), &ws.options())
        .unwrap_err();
    assert!(matches!(err, Error::MissingInput(_)));
}

struct RejectingBuilder;

impl DocumentBuilder for RejectingBuilder {
    fn build(&self, _model: &DocumentModel, _page: &PageSetup) -> redocx::Result<Vec<u8>> {
        Err(Error::Serialization("rejected".to_string()))
    }
}

#[test]
fn test_failed_serialization_leaves_no_file() {
    let ws = Workspace::new();
    let input = ws.proposal_input(None);
    let output = ws.path("proposal.docx");

    let err = redocx::generate_proposal_with(&input, &output, &ws.options(), &RejectingBuilder)
        .unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(!output.exists());
    let leftovers: Vec<_> = fs::read_dir(ws.dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "docx").unwrap_or(false))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_computed_totals() {
    let ws = Workspace::new();
    let input = ws.write_json(
        "bare.json",
        &serde_json::json!({
            "staff_name": "Test User",
            "duration": "12",
            "hourly_rate": "200",
            "commitment": "50"
        }),
    );
    let output = ws.path("bare.docx");
    let options = ws.options().with_computed_totals(true);

    redocx::generate_with_options(&input, &output, &options).unwrap();
    let xml = document_xml(&output);
    assert!(xml.contains("$17,333"));
    assert!(xml.contains("$207,996"));
}

#[test]
fn test_resume_generation() {
    let ws = Workspace::new();
    let input = ws.write_json(
        "resume.json",
        &serde_json::json!({
            "name": "Jane Doe",
            "summary": "Program lead for Amazon fulfillment sites.",
            "education": [
                {"degree": "BSc Civil Engineering", "school": "State University", "year": "2004"},
                {"degree": "BSc Civil Engineering", "school": "State University", "year": "2004"}
            ],
            "experience": [
                {"company": "Acme Builders", "title": "Project Manager", "bullets": ["Ran OAC meetings"]},
                {"company": "Acme Builders", "title": "Project Manager", "bullets": ["Duplicate"]}
            ],
            "certifications": ["PMP"],
            "skills": "Scheduling",
            "brand": "tt"
        }),
    );
    let output = ws.path("resume.docx");

    redocx::generate_resume_with_options(&input, &output, &ws.options()).unwrap();

    let package = Package::open(&output).unwrap();
    assert!(package.has_entry("word/media/image1.jpeg"));
    let xml = package.read_text(MAIN_DOCUMENT_ENTRY).unwrap();
    assert_eq!(xml.matches("State University").count(), 1);
    assert!(!xml.contains("Duplicate"));
    assert!(xml.contains("Professional Experience"));
}

#[test]
fn test_builder_output_is_readable() {
    let mut model = DocumentModel::new();
    model.push_paragraph(redocx::Paragraph::with_text("Only line"));
    model.push(Block::PageBreak);

    let bytes = redocx::DocxWriter::new()
        .build(&model, &PageSetup::letter())
        .unwrap();
    let xml = Package::from_bytes(bytes)
        .unwrap()
        .read_text(MAIN_DOCUMENT_ENTRY)
        .unwrap();
    let paragraphs = extract_paragraphs(&xml);
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].plain_text(), "Only line");
    assert_ne!(paragraphs[0].plain_text(), RESUME_NOT_PROVIDED);
}
