//! Tolerant paragraph/run recovery from WordprocessingML.
//!
//! The scanner works on delimiters (`</w:p>`, `<w:r>`, `<w:t>`) rather than
//! a strict XML grammar, so third-party files with odd or broken markup still
//! yield their text.

use crate::container::{Package, MAIN_DOCUMENT_ENTRY};
use crate::error::Result;
use crate::model::{Paragraph, RunStyle, TextRun};
use quick_xml::escape::unescape;
use regex::Regex;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Space after every recovered paragraph, in twips.
pub const EXTRACTED_SPACING_AFTER: u32 = 120;

/// Maximum characters kept by the plain-text fallback.
pub const FALLBACK_MAX_CHARS: usize = 5000;

/// Text of the placeholder used when no source file was supplied.
pub const RESUME_NOT_PROVIDED: &str = "<Resume not provided>";

/// Scanner holding the compiled delimiter patterns.
pub struct RunExtractor {
    text_marker: Regex,
    run: Regex,
    text_payload: Regex,
    bold: Regex,
    underline: Regex,
}

impl Default for RunExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RunExtractor {
    /// Compile the delimiter patterns.
    pub fn new() -> Self {
        Self {
            text_marker: Regex::new(r"<w:t(?:\s[^>]*)?>").expect("valid text marker pattern"),
            run: Regex::new(r"(?s)<w:r(?:\s[^>]*[^/])?>(.*?)</w:r>").expect("valid run pattern"),
            text_payload: Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>")
                .expect("valid text payload pattern"),
            bold: Regex::new(r"<w:b(?:\s[^>]*)?/?>").expect("valid bold pattern"),
            underline: Regex::new(r"<w:u\s[^>]*>").expect("valid underline pattern"),
        }
    }

    /// Recover paragraphs from the main document markup.
    ///
    /// Falls back to one plain paragraph holding all document text when no
    /// paragraph yields a run. Returns an empty vector only when the markup
    /// carries no text at all.
    pub fn extract(&self, xml: &str) -> Vec<Paragraph> {
        let paragraphs = self.extract_structured(xml);
        if !paragraphs.is_empty() {
            log::debug!("Recovered {} paragraphs", paragraphs.len());
            return paragraphs;
        }

        let text = self.fallback_text(xml);
        if text.is_empty() {
            return Vec::new();
        }
        log::debug!("No runs recognized, using plain-text fallback");
        vec![Paragraph::with_text(text).spaced(EXTRACTED_SPACING_AFTER)]
    }

    fn extract_structured(&self, xml: &str) -> Vec<Paragraph> {
        xml.split("</w:p>")
            .filter(|fragment| self.text_marker.is_match(fragment))
            .filter_map(|fragment| {
                let runs: Vec<TextRun> = self
                    .run
                    .captures_iter(fragment)
                    .filter_map(|caps| self.parse_run(&caps[1]))
                    .collect();
                if runs.is_empty() {
                    None
                } else {
                    Some(Paragraph::from_runs(runs).spaced(EXTRACTED_SPACING_AFTER))
                }
            })
            .collect()
    }

    fn parse_run(&self, run: &str) -> Option<TextRun> {
        let payload = self.text_payload.captures(run)?;
        let text = decode_payload(&payload[1]);
        if text.trim().is_empty() {
            return None;
        }
        let style = RunStyle {
            bold: self.bold.is_match(run),
            underline: self.underline.is_match(run),
            ..Default::default()
        };
        Some(TextRun::styled(text, style))
    }

    /// Join every text payload in the document with single spaces, truncated
    /// to [`FALLBACK_MAX_CHARS`] characters.
    pub fn fallback_text(&self, xml: &str) -> String {
        let joined = self
            .text_payload
            .captures_iter(xml)
            .map(|caps| decode_payload(&caps[1]))
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        joined.chars().take(FALLBACK_MAX_CHARS).collect()
    }
}

/// Unescape entities and normalize to NFC. Payloads with broken entities are
/// kept verbatim.
fn decode_payload(raw: &str) -> String {
    let text = unescape(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    text.nfc().collect()
}

/// Recover paragraphs from the main document markup.
pub fn extract_paragraphs(xml: &str) -> Vec<Paragraph> {
    RunExtractor::new().extract(xml)
}

/// Open a DOCX file and recover its paragraphs, propagating package errors.
pub fn extract_file(path: impl AsRef<Path>) -> Result<Vec<Paragraph>> {
    let package = Package::open(path)?;
    let xml = package.read_text(MAIN_DOCUMENT_ENTRY)?;
    Ok(extract_paragraphs(&xml))
}

/// Recover resume content for embedding, never failing.
///
/// A missing path yields the "not provided" placeholder. Unreadable packages
/// and documents without text are logged and replaced by a placeholder that
/// names the original file.
pub fn extract_resume(path: Option<&Path>) -> Vec<Paragraph> {
    let Some(path) = path.filter(|p| p.exists()) else {
        log::debug!("No source resume available");
        return vec![placeholder(RESUME_NOT_PROVIDED)];
    };

    match extract_file(path) {
        Ok(paragraphs) if !paragraphs.is_empty() => paragraphs,
        Ok(_) => {
            log::warn!("No text recovered from {}", path.display());
            vec![unreadable_placeholder(path)]
        }
        Err(e) if e.is_recoverable() => {
            log::warn!("Malformed resume package {}: {}", path.display(), e);
            vec![unreadable_placeholder(path)]
        }
        Err(e) => {
            log::error!("Failed to read resume {}: {}", path.display(), e);
            vec![unreadable_placeholder(path)]
        }
    }
}

fn placeholder(text: impl Into<String>) -> Paragraph {
    Paragraph::from_runs(vec![TextRun::italics(text)]).spaced(EXTRACTED_SPACING_AFTER)
}

fn unreadable_placeholder(path: &Path) -> Paragraph {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    placeholder(format!(
        "<Resume could not be embedded. See original file: {}>",
        name
    ))
}
