//! Block model for generated documents.
//!
//! This module defines the format-agnostic content nodes that the extractor
//! recovers from existing files and the assemblers produce. The DOCX writer
//! turns a [`DocumentModel`] into package bytes.

mod document;
mod image;
mod paragraph;
mod table;

pub use document::*;
pub use image::*;
pub use paragraph::*;
pub use table::*;
