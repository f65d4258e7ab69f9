//! Geometric search.
//!
//! Text extraction answers "is this token on the page"; the geometric
//! search answers "where does it render". Given the positioned spans of a
//! page, [`find_regions`] returns the bounding region of every visual
//! occurrence of a target string, in one call.

use serde::{Deserialize, Serialize};

use crate::pdf::TextSpan;

/// An axis-aligned bounding region in page coordinates (PDF points,
/// origin bottom-left). `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Region {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Find every region where `target` renders on a page, given its spans.
///
/// A target matches only where it is contained in a single span; a token
/// split across spans (separate text-show operations) has no single
/// renderable region and is not returned — the caller's substring-retry
/// loop handles that case. Regions are ordered top-to-bottom, then
/// left-to-right, so repeated runs over the same page are deterministic.
pub fn find_regions(spans: &[TextSpan], target: &str) -> Vec<Region> {
    if target.is_empty() {
        return Vec::new();
    }

    let mut regions = Vec::new();
    for span in spans {
        for char_offset in occurrence_offsets(&span.text, target) {
            let char_width = span.char_width();
            let x0 = span.x + char_offset as f32 * char_width;
            let x1 = x0 + target.chars().count() as f32 * char_width;
            regions.push(Region {
                x0,
                y0: span.bottom(),
                x1,
                y1: span.top(),
            });
        }
    }

    regions.sort_by(|a, b| {
        b.y0.partial_cmp(&a.y0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal))
    });
    regions
}

/// Character offsets of every non-overlapping occurrence of `needle` in
/// `haystack`, scanning left to right.
fn occurrence_offsets(haystack: &str, needle: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut byte_pos = 0;
    while let Some(idx) = haystack[byte_pos..].find(needle) {
        let abs = byte_pos + idx;
        offsets.push(haystack[..abs].chars().count());
        byte_pos = abs + needle.len();
    }
    offsets
}
