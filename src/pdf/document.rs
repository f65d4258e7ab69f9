//! Source document handling.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::color::HighlightColor;
use crate::detect::{verify_pdf_bytes, verify_pdf_file};
use crate::error::{Error, Result};
use crate::search::Region;

use super::annot;
use super::text::{self, TextSpan};

/// A PDF document owned for the duration of one marking run.
///
/// Wraps a `lopdf::Document` and exposes exactly the operations the
/// highlighter needs: page enumeration, per-page text, annotation
/// insertion, page retention, and persistence. Page numbers are 1-based,
/// the lopdf convention.
pub struct SourceDocument {
    doc: LopdfDocument,
}

impl SourceDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        verify_pdf_file(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_lopdf(doc)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        verify_pdf_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_lopdf(doc)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_lopdf(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// All pages as (1-based page number → object id), in page order.
    pub fn pages(&self) -> BTreeMap<u32, ObjectId> {
        self.doc.get_pages()
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Full text content of a page, extracted once per scan.
    pub fn page_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }

    /// Positioned text spans of a page, for the geometric search.
    pub fn page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        text::extract_spans(&self.doc, page_num)
    }

    /// Add a highlight annotation over `region` on a page.
    pub fn add_highlight(
        &mut self,
        page_num: u32,
        region: &Region,
        color: HighlightColor,
    ) -> Result<()> {
        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        annot::add_highlight(&mut self.doc, page_id, region, color)
    }

    /// Keep only the listed pages (1-based), dropping everything else and
    /// pruning objects the remaining pages no longer reference.
    pub fn retain_pages(&mut self, keep: &[u32]) {
        let total = self.page_count();
        let drop: Vec<u32> = (1..=total).filter(|p| !keep.contains(p)).collect();
        if !drop.is_empty() {
            self.doc.delete_pages(&drop);
        }
        self.doc.prune_objects();
    }

    /// Persist the document to a file. This is the single, final write of
    /// a marking run.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc
            .save(path)
            .map(|_| ())
            .map_err(|e| Error::Persist(e.to_string()))
    }

    /// Write the document to an arbitrary writer.
    pub fn write_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        self.doc
            .save_to(target)
            .map_err(|e| Error::Persist(e.to_string()))
    }
}
