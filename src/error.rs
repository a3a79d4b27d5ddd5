//! Error types for the redocx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for redocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading packages or generating documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input record is missing or cannot be parsed.
    #[error("Missing or unreadable input: {0}")]
    MissingInput(String),

    /// A required asset (such as the brand logo) does not exist.
    #[error("Missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error reading or writing XML content.
    #[error("XML error: {0}")]
    XmlParse(String),

    /// A required package entry is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A table violates the row/column invariants.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// The document model could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MissingInput(err.to_string())
    }
}

impl Error {
    /// Whether the failure comes from the optional source package and may be
    /// replaced by placeholder content.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ZipArchive(_)
                | Error::XmlParse(_)
                | Error::MissingComponent(_)
                | Error::Encoding(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");

        let err = Error::MissingAsset(PathBuf::from("assets/logo_dc.png"));
        assert_eq!(err.to_string(), "Missing asset: assets/logo_dc.png");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(Error::ZipArchive("bad".into()).is_recoverable());
        assert!(Error::MissingComponent("x".into()).is_recoverable());
        assert!(!Error::InvalidTable("x".into()).is_recoverable());
    }
}
