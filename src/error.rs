//! Error types for the numark library.

use std::io;
use thiserror::Error;

/// Result type alias for numark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while marking documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be processed.
    #[error("Document is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error building or attaching a highlight annotation.
    #[error("Annotation error: {0}")]
    Annotate(String),

    /// A color channel is outside the closed interval [0, 1].
    #[error("Invalid highlight color: {0}")]
    InvalidColor(String),

    /// Error reading the spreadsheet roster.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// The requested roster column is missing.
    #[error("Column not found in spreadsheet: {0}")]
    MissingColumn(String),

    /// Error persisting the output document.
    #[error("Failed to write output document: {0}")]
    Persist(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
