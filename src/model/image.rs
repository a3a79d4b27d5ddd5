//! Embedded image model.

use serde::{Deserialize, Serialize};

/// Pixel-to-EMU factor at 96 DPI.
pub const EMU_PER_PIXEL: u64 = 9525;

/// Raster format of an embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Determine the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A standalone image block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Encoded image bytes
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Image format
    pub format: ImageFormat,

    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Alt text / description
    pub alt_text: String,
}

impl Image {
    /// Create a new image block.
    pub fn new(
        data: Vec<u8>,
        format: ImageFormat,
        width: u32,
        height: u32,
        alt_text: impl Into<String>,
    ) -> Self {
        Self {
            data,
            format,
            width,
            height,
            alt_text: alt_text.into(),
        }
    }

    /// Display width in EMUs.
    pub fn width_emu(&self) -> u64 {
        self.width as u64 * EMU_PER_PIXEL
    }

    /// Display height in EMUs.
    pub fn height_emu(&self) -> u64 {
        self.height as u64 * EMU_PER_PIXEL
    }
}
