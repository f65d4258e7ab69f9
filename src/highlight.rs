//! The highlight-and-filter core.
//!
//! [`highlight_document`] scans every page of a document for a set of
//! exact target strings, highlights every visual occurrence, and decides
//! which pages the filtered output keeps. It is a pure function of
//! (document, targets, color) apart from the annotations it adds to the
//! in-memory document; persistence is a separate, final step the caller
//! performs via [`SourceDocument::save`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::color::HighlightColor;
use crate::error::{Error, Result};
use crate::pdf::{SourceDocument, TextSpan};
use crate::search;

/// Result of one marking run.
///
/// `found` and `not_found` are sorted, deduplicated, and partition the
/// deduplicated target set: no overlap, union equals all distinct targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightOutcome {
    /// Sum of highlighted regions across all pages and targets.
    pub total_matches: usize,
    /// Targets with at least one match anywhere in the document.
    pub found: Vec<String>,
    /// Targets with no match anywhere.
    pub not_found: Vec<String>,
    /// Retained pages, ascending and 1-based. Page 1 is always present.
    pub kept_pages: Vec<u32>,
    /// Highlighted-region count per retained page that had matches.
    pub page_matches: BTreeMap<u32, usize>,
}

impl HighlightOutcome {
    /// Number of distinct targets that were searched for.
    pub fn distinct_targets(&self) -> usize {
        self.found.len() + self.not_found.len()
    }
}

/// Scan `doc` for every target, highlight matches with `color`, and trim
/// the document down to the retained pages.
///
/// The first page is always retained, so the output is never empty even
/// when nothing matches. An empty target list is valid and produces a
/// one-page output with zero matches. A document with no pages is a
/// precondition violation.
pub fn highlight_document(
    doc: &mut SourceDocument,
    targets: &[String],
    color: HighlightColor,
) -> Result<HighlightOutcome> {
    let page_count = doc.page_count();
    if page_count == 0 {
        return Err(Error::EmptyDocument);
    }

    // Duplicates in the target list are irrelevant; each distinct target
    // is scanned once, in first-occurrence order.
    let mut seen = BTreeSet::new();
    let distinct: Vec<&String> = targets.iter().filter(|t| seen.insert(t.as_str())).collect();

    let mut kept_pages: Vec<u32> = vec![1];
    let mut total_matches = 0usize;
    let mut not_found: BTreeSet<String> = targets.iter().cloned().collect();
    let mut found: BTreeSet<String> = BTreeSet::new();
    let mut page_matches: BTreeMap<u32, usize> = BTreeMap::new();

    for page_num in 1..=page_count {
        let page_text = doc.page_text(page_num)?;
        // Spans are extracted at most once per page, and only when some
        // target passes the textual pre-check.
        let mut spans: Option<Vec<TextSpan>> = None;
        let mut contains_match = false;
        let mut matches_on_page = 0usize;

        for &target in &distinct {
            let regions = locate_target(doc, page_num, &page_text, &mut spans, target)?;
            if regions.is_empty() {
                continue;
            }

            contains_match = true;
            matches_on_page += regions.len();
            not_found.remove(target);
            found.insert(target.clone());
            for region in &regions {
                doc.add_highlight(page_num, region, color)?;
            }
        }

        if contains_match {
            if page_num != 1 {
                kept_pages.push(page_num);
            }
            page_matches.insert(page_num, matches_on_page);
        }
        total_matches += matches_on_page;

        log::debug!(
            "page {}: {} region(s), kept = {}",
            page_num,
            matches_on_page,
            contains_match || page_num == 1
        );
    }

    doc.retain_pages(&kept_pages);

    Ok(HighlightOutcome {
        total_matches,
        found: found.into_iter().collect(),
        not_found: not_found.into_iter().collect(),
        kept_pages,
        page_matches,
    })
}

/// Locate every region where `target` renders on a page.
///
/// A substring scan of the page text gates the geometric search: only a
/// textual hit triggers span extraction and region lookup. When the text
/// contains the target but no single span renders it (a token split
/// across text-show operations), the scan cursor advances one character
/// past the failed position and retries, bounded by the remaining text;
/// exhausting the text means the target is absent on this page.
fn locate_target(
    doc: &SourceDocument,
    page_num: u32,
    page_text: &str,
    spans: &mut Option<Vec<TextSpan>>,
    target: &str,
) -> Result<Vec<search::Region>> {
    let mut cursor = 0usize;
    while let Some(idx) = page_text.get(cursor..).and_then(|s| s.find(target)) {
        if spans.is_none() {
            *spans = Some(doc.page_spans(page_num)?);
        }
        let spans_ref = spans.as_ref().map(Vec::as_slice).unwrap_or(&[]);

        let regions = search::find_regions(spans_ref, target);
        if !regions.is_empty() {
            return Ok(regions);
        }

        let abs = cursor + idx;
        let step = page_text[abs..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        cursor = abs + step;
    }
    Ok(Vec::new())
}
