//! DOCX (Word) reading and writing.
//!
//! The extractor recovers styled paragraphs from an existing document's
//! markup; the writer serializes a [`DocumentModel`](crate::model::DocumentModel)
//! into a new package.

mod extractor;
mod writer;

pub use extractor::{
    extract_file, extract_paragraphs, extract_resume, RunExtractor, EXTRACTED_SPACING_AFTER,
    FALLBACK_MAX_CHARS, RESUME_NOT_PROVIDED,
};
pub use writer::{write_atomic, DocumentBuilder, DocxWriter, PageSetup};
