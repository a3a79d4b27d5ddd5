//! ZIP package reader for Word documents.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Entry holding the main body of a WordprocessingML package.
pub const MAIN_DOCUMENT_ENTRY: &str = "word/document.xml";

/// A read-only view over a zip-compressed OOXML package.
///
/// Entries are looked up by their full in-archive name, e.g.
/// `word/document.xml`.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use redocx::container::Package;
    ///
    /// let package = Package::open("resume.docx")?;
    /// let xml = package.read_text("word/document.xml")?;
    /// # Ok::<(), redocx::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Create a package from an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < ZIP_MAGIC.len() || data[..4] != ZIP_MAGIC {
            return Err(Error::ZipArchive("not a zip container".to_string()));
        }
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read a named entry and decode it as text.
    pub fn read_text(&self, entry: &str) -> Result<String> {
        let bytes = self.read_binary(entry)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a named entry as raw bytes.
    pub fn read_binary(&self, entry: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(entry)
            .map_err(|_| Error::MissingComponent(entry.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check whether an entry exists.
    pub fn has_entry(&self, entry: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == entry);
        found
    }

    /// List all entry names.
    pub fn entry_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("entries", &self.entry_names().len())
            .finish()
    }
}

/// Decode entry bytes as text.
///
/// Package parts are usually UTF-8, but some producers write UTF-16 with a
/// byte order mark. Undecodable UTF-8 falls back to a lossy conversion so
/// that tolerant extraction can still scan the markup.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => {
            String::from_utf8(rest.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
        }
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes).map(relabel_utf8),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes).map(relabel_utf8),
        _ => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())),
    }
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| combine([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// The declaration of a transcoded part still names UTF-16; rewrite it so the
/// text is self-consistent.
fn relabel_utf8(content: String) -> String {
    if !content.starts_with("<?xml") {
        return content;
    }
    match content.find("?>") {
        Some(end) => {
            let decl = content[..end + 2]
                .replace("UTF-16", "UTF-8")
                .replace("utf-16", "UTF-8");
            format!("{}{}", decl, &content[end + 2..])
        }
        None => content,
    }
}
