//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// Text alignment within a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    /// WordprocessingML `w:jc` value.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        }
    }
}

/// Run style properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Underlined text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,

    /// Italic text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italics: bool,

    /// Font size in half-points (e.g., 24 = 12pt)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Text color (hex, e.g., "1F3864")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunStyle {
    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Create an italic style.
    pub fn italics() -> Self {
        Self {
            italics: true,
            ..Default::default()
        }
    }

    /// Check if style has any formatting.
    pub fn has_formatting(&self) -> bool {
        self.bold || self.underline || self.italics || self.size.is_some() || self.color.is_some()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: RunStyle,
}

fn is_default_style(style: &RunStyle) -> bool {
    *style == RunStyle::default()
}

impl TextRun {
    /// Create a plain text run with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    /// Create a styled text run.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::bold())
    }

    /// Create an italic run.
    pub fn italics(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::italics())
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Paragraph indentation in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: u32,
    pub hanging: u32,
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in this paragraph
    #[serde(default)]
    pub runs: Vec<TextRun>,

    /// Space after the paragraph in twips
    #[serde(default, skip_serializing_if = "is_zero")]
    pub spacing_after: u32,

    /// Left and hanging indentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indent>,

    /// Text alignment
    #[serde(default, skip_serializing_if = "is_default_alignment")]
    pub alignment: TextAlignment,

    /// Start this paragraph on a new page
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub page_break_before: bool,
}

fn is_default_alignment(a: &TextAlignment) -> bool {
    *a == TextAlignment::Left
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::from_runs(vec![TextRun::plain(text)])
    }

    /// Create a paragraph from runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Set the space after this paragraph.
    pub fn spaced(mut self, after: u32) -> Self {
        self.spacing_after = after;
        self
    }

    /// Set the alignment.
    pub fn aligned(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the indentation.
    pub fn indented(mut self, left: u32, hanging: u32) -> Self {
        self.indent = Some(Indent { left, hanging });
        self
    }

    /// Add a text run to this paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() || self.runs.iter().all(|r| r.is_empty())
    }
}
