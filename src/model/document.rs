//! Document model structures.

use super::{Image, Paragraph, Table};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A block-level content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table
    Table(Table),
    /// A standalone image
    Image(Image),
    /// A page break
    PageBreak,
}

/// An ordered sequence of blocks ready for serialization.
///
/// Assemblers push blocks while building; once handed to a
/// [`DocumentBuilder`](crate::docx::DocumentBuilder) the model is only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl DocumentModel {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a paragraph.
    pub fn push_paragraph(&mut self, para: Paragraph) {
        self.blocks.push(Block::Paragraph(para));
    }

    /// Add several paragraphs in order.
    pub fn extend_paragraphs(&mut self, paras: impl IntoIterator<Item = Paragraph>) {
        self.blocks.extend(paras.into_iter().map(Block::Paragraph));
    }

    /// Add a table.
    pub fn push_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Validate every table in the document.
    pub fn validate(&self) -> Result<()> {
        self.tables().try_for_each(Table::validate)
    }

    /// Extract all text content as a single string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(para) => {
                    text.push_str(&para.plain_text());
                    text.push('\n');
                }
                Block::Table(table) => {
                    text.push_str(&table.plain_text());
                }
                _ => {}
            }
        }
        text.trim().to_string()
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Row, TextRun};

    #[test]
    fn test_document_creation() {
        let mut doc = DocumentModel::new();
        assert!(doc.is_empty());

        doc.push_paragraph(Paragraph::from_runs(vec![
            TextRun::plain("Hello, "),
            TextRun::bold("World"),
        ]));
        doc.push(Block::PageBreak);

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.plain_text(), "Hello, World");
    }

    #[test]
    fn test_validate_reports_bad_table() {
        let mut doc = DocumentModel::new();
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::with_text("a"), Cell::with_text("b")]));
        table.add_row(Row::new(vec![Cell::with_text("c")]));
        doc.push_table(table);
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_block_json_tag() {
        let mut doc = DocumentModel::new();
        doc.push(Block::PageBreak);
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"type\": \"PageBreak\""));
    }
}
