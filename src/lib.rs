//! # redocx
//!
//! Staffing proposal and resume generation as Word documents.
//!
//! This library reads flat JSON records, lays them out as logo, tables,
//! highlighted text, and bullets, and writes a `.docx` package. An existing
//! resume document can be mined for its styled paragraphs and re-embedded.
//!
//! ## Quick Start
//!
//! ```no_run
//! use redocx::{generate_with_options, GenerateOptions, TableLayout};
//!
//! // Proposal from a JSON record, logos read from ./assets
//! redocx::generate("proposal.json", "proposal.docx")?;
//!
//! // Compact cost grid and derived totals
//! let options = GenerateOptions::new()
//!     .with_asset_dir("branding")
//!     .with_layout(TableLayout::Merged)
//!     .with_computed_totals(true);
//! generate_with_options("proposal.json", "proposal.docx", &options)?;
//! # Ok::<(), redocx::Error>(())
//! ```
//!
//! ## Extraction
//!
//! ```no_run
//! let paragraphs = redocx::docx::extract_file("resume.docx")?;
//! for para in &paragraphs {
//!     println!("{}", para.plain_text());
//! }
//! # Ok::<(), redocx::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod input;
pub mod layout;
pub mod model;
pub mod pricing;

// Re-exports
pub use container::Package;
pub use docx::{DocumentBuilder, DocxWriter, PageSetup};
pub use error::{Error, Result};
pub use input::{Brand, Education, Experience, ProposalFields, ResumeFields};
pub use layout::{GenerateOptions, StyleConfig, TableLayout};
pub use model::{Block, Cell, DocumentModel, Image, Paragraph, Row, Table, TextRun};

use std::path::Path;

/// Generate a proposal document with default options.
pub fn generate(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    generate_with_options(input, output, &GenerateOptions::default())
}

/// Generate a proposal document.
///
/// The logo must exist; an unreadable source resume only degrades the
/// resume section to a placeholder. The output file appears only once the
/// whole document serialized successfully.
///
/// # Example
///
/// ```no_run
/// use redocx::{generate_with_options, Brand, GenerateOptions};
///
/// let options = GenerateOptions::new().with_brand(Brand::Tt);
/// generate_with_options("proposal.json", "out/proposal.docx", &options)?;
/// # Ok::<(), redocx::Error>(())
/// ```
pub fn generate_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &GenerateOptions,
) -> Result<()> {
    generate_proposal_with(input, output, options, &DocxWriter::new())
}

/// Generate a proposal document through a custom [`DocumentBuilder`].
pub fn generate_proposal_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &GenerateOptions,
    builder: &dyn DocumentBuilder,
) -> Result<()> {
    let mut fields = ProposalFields::from_path(input)?;
    if options.compute_totals {
        fields = fields.with_computed_totals();
    }
    let model = build_proposal(&fields, options)?;
    write_model(&model, output.as_ref(), &options.style, builder)
}

/// Lay out a proposal record without writing it.
pub fn build_proposal(fields: &ProposalFields, options: &GenerateOptions) -> Result<DocumentModel> {
    let brand = options.resolve_brand(fields.brand);
    let logo = layout::load_logo(&options.asset_dir, brand)?;
    let resume = docx::extract_resume(fields.formatted_resume_path.as_deref());
    Ok(layout::assemble_proposal(fields, resume, logo, &options.style))
}

/// Generate a resume document with default options.
pub fn generate_resume(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    generate_resume_with_options(input, output, &GenerateOptions::default())
}

/// Generate a resume document from a structured resume record.
///
/// Duplicate and incomplete experience or education entries are dropped
/// before layout.
pub fn generate_resume_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &GenerateOptions,
) -> Result<()> {
    let resume = ResumeFields::from_path(input)?.cleaned();
    let logo = layout::load_logo(&options.asset_dir, options.resolve_brand(resume.brand))?;
    let model = layout::assemble_resume(&resume, logo, &options.style);
    write_model(&model, output.as_ref(), &options.style, &DocxWriter::new())
}

fn write_model(
    model: &DocumentModel,
    output: &Path,
    style: &StyleConfig,
    builder: &dyn DocumentBuilder,
) -> Result<()> {
    let bytes = builder.build(model, &style.page_setup())?;
    docx::write_atomic(output, &bytes)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
