//! # numark
//!
//! Highlight-and-filter library for statement PDFs.
//!
//! Given a PDF, an ordered list of exact number strings, and a highlight
//! color, numark highlights every visual occurrence of every target and
//! writes a filtered copy that keeps the first page plus every page with
//! at least one match.
//!
//! ## Quick Start
//!
//! ```no_run
//! use numark::{mark_file, HighlightColor};
//!
//! fn main() -> numark::Result<()> {
//!     let targets = vec!["100234567890".to_string(), "4512".to_string()];
//!     let outcome = mark_file(
//!         "statement.pdf",
//!         "statement_highlighted.pdf",
//!         &targets,
//!         HighlightColor::LIGHT_BLUE,
//!     )?;
//!     println!("{} matches on {} pages", outcome.total_matches, outcome.kept_pages.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Exact matching**: targets match as verbatim substrings, never patterns
//! - **Real annotations**: standard `/Highlight` markup, visible in any viewer
//! - **Page filtering**: first page always kept, match pages kept in order
//! - **Roster loading**: target columns read straight from spreadsheet rosters
//! - **Parallel pairs**: PF and ESIC statements processed side by side with Rayon

pub mod color;
pub mod detect;
pub mod error;
pub mod highlight;
pub mod pdf;
pub mod roster;
pub mod search;

// Re-export commonly used types
pub use color::HighlightColor;
pub use detect::{is_pdf_bytes, verify_pdf_bytes, verify_pdf_file};
pub use error::{Error, Result};
pub use highlight::{highlight_document, HighlightOutcome};
pub use pdf::SourceDocument;
pub use roster::{load_targets, RosterOptions};
pub use search::Region;

use std::path::{Path, PathBuf};

/// Highlight `targets` in a PDF file and write the filtered copy.
///
/// # Example
///
/// ```no_run
/// use numark::{mark_file, HighlightColor};
///
/// let targets = vec!["12345".to_string()];
/// let outcome = mark_file("in.pdf", "out.pdf", &targets, HighlightColor::YELLOW).unwrap();
/// println!("found: {:?}", outcome.found);
/// ```
pub fn mark_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    targets: &[String],
    color: HighlightColor,
) -> Result<HighlightOutcome> {
    let mut doc = SourceDocument::open(input)?;
    let outcome = highlight_document(&mut doc, targets, color)?;
    doc.save(output)?;
    Ok(outcome)
}

/// Highlight `targets` in an in-memory PDF and return the filtered bytes.
pub fn mark_bytes(
    data: &[u8],
    targets: &[String],
    color: HighlightColor,
) -> Result<(Vec<u8>, HighlightOutcome)> {
    let mut doc = SourceDocument::from_bytes(data)?;
    let outcome = highlight_document(&mut doc, targets, color)?;
    let mut out = Vec::new();
    doc.write_to(&mut out)?;
    Ok((out, outcome))
}

/// One statement to mark: input path, output path, and its target list.
#[derive(Debug, Clone)]
pub struct MarkJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub targets: Vec<String>,
}

impl MarkJob {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        targets: Vec<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            targets,
        }
    }

    fn run(&self, color: HighlightColor) -> Result<HighlightOutcome> {
        mark_file(&self.input, &self.output, &self.targets, color)
    }
}

/// Mark two statements in parallel, one per Rayon branch.
///
/// The typical run pairs a PF statement against UAN numbers with an ESIC
/// statement against ESI numbers. Each document is still processed
/// sequentially inside its branch.
pub fn mark_pair(
    left: &MarkJob,
    right: &MarkJob,
    color: HighlightColor,
) -> (Result<HighlightOutcome>, Result<HighlightOutcome>) {
    rayon::join(|| left.run(color), || right.run(color))
}

/// Builder for marking runs.
///
/// # Example
///
/// ```no_run
/// use numark::Marker;
///
/// let outcome = Marker::new()
///     .with_color(numark::HighlightColor::YELLOW)
///     .with_targets(vec!["12345".to_string()])
///     .mark("in.pdf", "out.pdf")?;
/// # Ok::<(), numark::Error>(())
/// ```
pub struct Marker {
    targets: Vec<String>,
    color: HighlightColor,
}

impl Marker {
    /// Create a new Marker builder.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            color: HighlightColor::default(),
        }
    }

    /// Set the target list.
    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    /// Add a single target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Set the highlight color.
    pub fn with_color(mut self, color: HighlightColor) -> Self {
        self.color = color;
        self
    }

    /// Load targets from one column of a roster spreadsheet.
    pub fn with_roster<P: AsRef<Path>>(
        mut self,
        path: P,
        column: &str,
        options: &RosterOptions,
    ) -> Result<Self> {
        self.targets = roster::load_targets(path, column, options)?;
        Ok(self)
    }

    /// Mark a PDF file and write the filtered copy.
    pub fn mark<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<HighlightOutcome> {
        mark_file(input, output, &self.targets, self.color)
    }

    /// Mark an in-memory PDF and return the filtered bytes.
    pub fn mark_bytes(&self, data: &[u8]) -> Result<(Vec<u8>, HighlightOutcome)> {
        mark_bytes(data, &self.targets, self.color)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new()
    }
}
