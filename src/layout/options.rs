//! Style and generation options.

use crate::docx::PageSetup;
use crate::error::{Error, Result};
use crate::input::Brand;
use crate::model::{Image, ImageFormat, Paragraph, RunStyle, TextRun};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the cost summary is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableLayout {
    /// Separate staff, expense, and combined tables
    #[default]
    Separate,
    /// One compact label/value grid
    Merged,
}

impl FromStr for TableLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "separate" => Ok(TableLayout::Separate),
            "merged" => Ok(TableLayout::Merged),
            other => Err(format!("unknown table layout '{}'", other)),
        }
    }
}

/// Presentation constants shared by every assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Default font family
    pub font: String,

    /// Body text size in half-points
    pub body_size: u32,

    /// Document title size in half-points
    pub title_size: u32,

    /// Section header size in half-points
    pub section_size: u32,

    /// Hex color of titles and section headers
    pub heading_color: String,

    /// Fill of table header cells
    pub header_shading: String,

    /// Fill of the combined-total row
    pub total_shading: String,

    /// Space after body paragraphs, in twips
    pub paragraph_spacing: u32,

    /// Space after section headers, in twips
    pub section_spacing: u32,

    /// Left indent of bullet paragraphs, in twips
    pub bullet_indent: u32,

    /// Hanging indent of bullet paragraphs, in twips
    pub bullet_hanging: u32,

    /// Height of the spacer that replaces a missing date line, in twips
    pub spacer_height: u32,

    /// Cost summary layout
    pub table_layout: TableLayout,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            body_size: 18,
            title_size: 32,
            section_size: 24,
            heading_color: "1F3864".to_string(),
            header_shading: "D9E2F3".to_string(),
            total_shading: "BDD7EE".to_string(),
            paragraph_spacing: 120,
            section_spacing: 160,
            bullet_indent: 360,
            bullet_hanging: 360,
            spacer_height: 240,
            table_layout: TableLayout::Separate,
        }
    }
}

impl StyleConfig {
    /// Page geometry matching this style's default font.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup::letter().with_font(self.font.clone(), self.body_size)
    }

    /// Set the cost summary layout.
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    /// A colored, bold section header.
    pub fn section_header(&self, text: impl Into<String>) -> Paragraph {
        let style = RunStyle {
            bold: true,
            size: Some(self.section_size),
            color: Some(self.heading_color.clone()),
            ..Default::default()
        };
        Paragraph::from_runs(vec![TextRun::styled(text, style)]).spaced(self.section_spacing)
    }

    /// An empty paragraph of fixed height.
    pub fn spacer(&self) -> Paragraph {
        Paragraph::new().spaced(self.spacer_height)
    }
}

/// Logo asset of one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoAsset {
    pub file_name: &'static str,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl LogoAsset {
    /// The fixed logo of a brand.
    pub fn for_brand(brand: Brand) -> Self {
        match brand {
            Brand::Dc => Self {
                file_name: "logo_dc.png",
                format: ImageFormat::Png,
                width: 200,
                height: 60,
            },
            Brand::Tt => Self {
                file_name: "logo_tt.jpg",
                format: ImageFormat::Jpeg,
                width: 180,
                height: 72,
            },
        }
    }
}

/// Read a brand's logo from the asset directory.
///
/// A missing or unreadable logo is fatal: the document cannot carry an
/// image block without bytes.
pub fn load_logo(asset_dir: impl AsRef<Path>, brand: Brand) -> Result<Image> {
    let asset = LogoAsset::for_brand(brand);
    let path = asset_dir.as_ref().join(asset.file_name);
    let data = fs::read(&path).map_err(|e| {
        log::debug!("Cannot read logo {}: {}", path.display(), e);
        Error::MissingAsset(path.clone())
    })?;
    Ok(Image::new(data, asset.format, asset.width, asset.height, "Logo"))
}

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding the brand logos
    pub asset_dir: PathBuf,

    /// Brand override; `None` uses the brand of the input record
    pub brand: Option<Brand>,

    /// Derive empty money fields from rate, duration, and commitment
    pub compute_totals: bool,

    /// Presentation constants
    pub style: StyleConfig,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            brand: None,
            compute_totals: false,
            style: StyleConfig::default(),
        }
    }
}

impl GenerateOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logo asset directory.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    /// Force a brand regardless of the input record.
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Set the cost summary layout.
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.style.table_layout = layout;
        self
    }

    /// Enable derivation of empty money fields.
    pub fn with_computed_totals(mut self, compute: bool) -> Self {
        self.compute_totals = compute;
        self
    }

    /// Replace the style configuration.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// The brand to use given the record's own brand.
    pub fn resolve_brand(&self, record_brand: Brand) -> Brand {
        self.brand.unwrap_or(record_brand)
    }
}
