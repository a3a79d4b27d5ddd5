//! Free text to bullet paragraphs.

use super::options::StyleConfig;
use crate::model::{Paragraph, TextRun};
use unicode_normalization::UnicodeNormalization;

/// Glyph run that opens every bullet paragraph.
pub const BULLET_GLYPH: &str = "• ";

const BULLET_MARKERS: [char; 4] = ['-', '•', '*', '●'];

/// Strip one leading bullet marker and the whitespace after it.
pub fn clean_bullet_line(line: &str) -> String {
    let trimmed = line.trim();
    let cleaned = trimmed
        .strip_prefix(BULLET_MARKERS)
        .map(str::trim_start)
        .unwrap_or(trimmed);
    cleaned.nfc().collect()
}

/// A bullet paragraph holding the glyph run followed by `runs`.
pub fn bullet_paragraph(runs: Vec<TextRun>, style: &StyleConfig) -> Paragraph {
    let mut all = Vec::with_capacity(runs.len() + 1);
    all.push(TextRun::plain(BULLET_GLYPH));
    all.extend(runs);
    Paragraph::from_runs(all)
        .indented(style.bullet_indent, style.bullet_hanging)
        .spaced(style.paragraph_spacing / 2)
}

/// Split text into lines, drop blank ones, and turn each into a bullet.
///
/// Lines that hold nothing but a marker are dropped as well.
pub fn format_bullets(text: &str, style: &StyleConfig) -> Vec<Paragraph> {
    text.lines()
        .map(clean_bullet_line)
        .filter(|line| !line.is_empty())
        .map(|line| bullet_paragraph(vec![TextRun::plain(line)], style))
        .collect()
}
