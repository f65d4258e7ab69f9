//! lopdf-backed document access.
//!
//! Everything that touches the concrete PDF library lives here: loading,
//! positioned text extraction, highlight annotations, page retention, and
//! persistence. The rest of the crate works with [`SourceDocument`] and
//! [`TextSpan`] and never sees lopdf types.

mod annot;
mod document;
mod text;

pub use document::SourceDocument;
pub use text::TextSpan;
