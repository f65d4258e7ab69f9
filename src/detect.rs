//! PDF format detection and validation.
//!
//! The loader sniffs the header before handing the file to lopdf so that a
//! spreadsheet or text file passed by mistake fails with a clear error
//! instead of a parser error deep inside the xref machinery.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Verify that a file starts with a valid PDF header and return its version.
///
/// # Returns
/// * `Ok(version)` like `"1.7"` if the file is a PDF
/// * `Err(Error::UnknownFormat)` otherwise
pub fn verify_pdf_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    reader.read_exact(&mut header)?;
    verify_pdf_bytes(&header)
}

/// Verify a PDF header in a byte slice and return its version string.
pub fn verify_pdf_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(version)
}

/// Check if a byte slice looks like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    verify_pdf_bytes(data).is_ok()
}

/// Version strings are a single digit, a dot, a single digit ("1.0"–"2.0").
fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        assert_eq!(verify_pdf_bytes(data).unwrap(), "1.7");
    }

    #[test]
    fn test_verify_pdf_2_0() {
        let data = b"%PDF-2.0\n%\xe2\xe3\xcf\xd3";
        assert_eq!(verify_pdf_bytes(data).unwrap(), "2.0");
    }

    #[test]
    fn test_verify_invalid_format() {
        assert!(matches!(
            verify_pdf_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_verify_too_short() {
        assert!(matches!(verify_pdf_bytes(b"%PDF"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\ntest"));
        assert!(!is_pdf_bytes(b"Not a PDF file"));
        assert!(!is_pdf_bytes(b""));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
