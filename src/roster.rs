//! Spreadsheet rosters.
//!
//! Statement rosters arrive as spreadsheets with a banner block above the
//! real header row, one identifier column per statement type ("UAN No.",
//! "ESI No"), and the occasional `EXEMPTED` marker instead of a number.
//! This module reads such a file and produces the cleaned target list the
//! highlighter expects: exact numeric strings, blanks and exemptions
//! dropped, order of appearance preserved.

use std::path::Path;
use std::sync::OnceLock;

use calamine::{open_workbook_auto, Data, Range, Reader};
use regex::Regex;

use crate::error::{Error, Result};

/// Marker used in rosters for employees exempt from a scheme.
const EXEMPTED: &str = "EXEMPTED";

/// Options for reading a roster spreadsheet.
#[derive(Debug, Clone)]
pub struct RosterOptions {
    /// Sheet to read; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Rows to skip before the header row.
    pub skip_rows: usize,
}

impl RosterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a specific sheet instead of the first one.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Skip a different number of banner rows before the header.
    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            // Statement rosters carry a six-row banner above the header.
            skip_rows: 6,
        }
    }
}

/// Load the target numbers from one column of a roster spreadsheet.
pub fn load_targets<P: AsRef<Path>>(
    path: P,
    column: &str,
    options: &RosterOptions,
) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match &options.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| Error::Spreadsheet("workbook has no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Spreadsheet(e.to_string()))?;

    targets_from_range(&range, column, options.skip_rows)
}

/// Extract and normalize one column from a cell range.
fn targets_from_range(range: &Range<Data>, column: &str, skip_rows: usize) -> Result<Vec<String>> {
    let mut rows = range.rows().skip(skip_rows);

    let header = rows
        .next()
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
    let col_idx = header
        .iter()
        .position(|cell| cell_to_string(cell).trim() == column.trim())
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    let mut targets = Vec::new();
    for row in rows {
        let Some(cell) = row.get(col_idx) else {
            continue;
        };
        if let Some(target) = normalize_cell(cell) {
            targets.push(target);
        }
    }
    Ok(targets)
}

/// Normalize a cell to a canonical numeric string, or drop it.
fn normalize_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            // Spreadsheets store long identifiers as floats; only
            // integer-valued ones are usable.
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                log::warn!("skipping non-integer numeric cell: {}", f);
                None
            }
        }
        Data::String(s) => normalize_text(s),
        other => {
            log::warn!("skipping unsupported roster cell: {:?}", other);
            None
        }
    }
}

/// Normalize a text cell: trim, drop blanks and exemptions, strip a
/// trailing `.0…` float suffix, reject anything non-numeric.
fn normalize_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EXEMPTED) {
        return None;
    }

    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    let re = NUMERIC.get_or_init(|| Regex::new(r"^(\d+)(?:\.0+)?$").expect("valid regex"));

    match re.captures(trimmed) {
        Some(caps) => Some(caps[1].to_string()),
        None => {
            log::warn!("skipping non-numeric roster cell: {:?}", trimmed);
            None
        }
    }
}

/// Render a cell as text for header matching.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        other => format!("{:?}", other),
    }
}
