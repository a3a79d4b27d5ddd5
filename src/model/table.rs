//! Table model structures.

use super::{Paragraph, TextRun};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Line style of a cell border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    #[default]
    Single,
    None,
}

impl BorderLine {
    /// WordprocessingML border `w:val`.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            BorderLine::Single => "single",
            BorderLine::None => "nil",
        }
    }
}

/// Border specification applied to all four sides of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    pub line: BorderLine,
    /// Width in eighths of a point
    pub size: u32,
    /// Border color (hex)
    pub color: String,
}

impl Default for Borders {
    fn default() -> Self {
        Self {
            line: BorderLine::Single,
            size: 4,
            color: "000000".to_string(),
        }
    }
}

impl Borders {
    /// No visible borders.
    pub fn none() -> Self {
        Self {
            line: BorderLine::None,
            size: 0,
            color: "auto".to_string(),
        }
    }
}

/// A cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell content
    pub content: Paragraph,

    /// Preferred width as a percentage of the table width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_percent: Option<u8>,

    /// Background color (hex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Border specification
    #[serde(default)]
    pub borders: Borders,
}

impl Cell {
    /// Create a cell with plain text content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_paragraph(Paragraph::with_text(text))
    }

    /// Create a cell with bold text content.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::with_paragraph(Paragraph::from_runs(vec![TextRun::bold(text)]))
    }

    /// Create a cell from a paragraph.
    pub fn with_paragraph(content: Paragraph) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Set the preferred width.
    pub fn width(mut self, percent: u8) -> Self {
        self.width_percent = Some(percent);
        self
    }

    /// Set the background shading.
    pub fn shaded(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }
}

/// A row in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in this row
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table. The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in this table
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to this table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (from the header row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Column widths taken from the header row, if every header cell has one.
    pub fn column_widths(&self) -> Option<Vec<u8>> {
        self.rows
            .first()?
            .cells
            .iter()
            .map(|c| c.width_percent)
            .collect()
    }

    /// Check the table invariants: every row has the header's cell count and
    /// header widths, when given, sum to 100.
    pub fn validate(&self) -> Result<()> {
        let columns = self.column_count();
        if columns == 0 {
            return Err(Error::InvalidTable("table has no header cells".to_string()));
        }
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != columns {
                return Err(Error::InvalidTable(format!(
                    "row {} has {} cells, header has {}",
                    index,
                    row.len(),
                    columns
                )));
            }
        }
        if let Some(widths) = self.column_widths() {
            let sum: u32 = widths.iter().map(|w| *w as u32).sum();
            if sum != 100 {
                return Err(Error::InvalidTable(format!(
                    "column widths sum to {}, expected 100",
                    sum
                )));
            }
        }
        Ok(())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(|c| c.plain_text()).collect();
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
        text
    }
}
