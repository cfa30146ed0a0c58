//! Header detection and record extraction for parsed case tables.
//!
//! A table carries free-form preamble rows above the real header, so the
//! header is located by marker labels rather than by position.
use crate::table::Row;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Tables with fewer rows cannot hold a preamble, a header, and data.
pub const MIN_TABLE_ROWS: usize = 3;
/// How many leading rows are searched for the header.
pub const HEADER_SCAN_ROWS: usize = 5;

const ID_MARKER: &str = "编号";
const MODULE_MARKER: &str = "模块";
const ANNOTATION_MARKERS: [char; 2] = [':', '：'];

pub const KEY_ID: &str = "id";
pub const KEY_MODULE: &str = "module";
pub const KEY_FEATURE: &str = "feature";
pub const KEY_PRECONDITION: &str = "precondition";
pub const KEY_STEPS: &str = "steps";
pub const KEY_EXPECTED: &str = "expected";
pub const KEY_PRIORITY: &str = "priority";

const FIELD_TABLE: [(&str, &str); 7] = [
    (ID_MARKER, KEY_ID),
    (MODULE_MARKER, KEY_MODULE),
    ("功能点", KEY_FEATURE),
    ("预置条件", KEY_PRECONDITION),
    ("操作步骤", KEY_STEPS),
    ("预期结果", KEY_EXPECTED),
    ("用例等级", KEY_PRIORITY),
];

/// Keys of which at least one must be filled for a row to count as a case.
const CONTENT_KEYS: [&str; 4] = [KEY_MODULE, KEY_FEATURE, KEY_STEPS, KEY_EXPECTED];

/// One test case keyed by canonical field name.
///
/// Columns without a canonical name keep their header label as key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Field value, or `""` when the column is absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or_default()
    }

    fn has_content(&self) -> bool {
        CONTENT_KEYS
            .iter()
            .any(|key| !self.get(key).trim().is_empty())
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Column-position mapping from the header row to record keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    keys: Vec<String>,
}

impl HeaderMapping {
    pub fn from_header(header: &[String]) -> Self {
        let keys = header
            .iter()
            .map(|label| canonical_key(label).to_string())
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Build a record from a data row; cells past the header are ignored.
    pub fn record(&self, row: &[String]) -> Record {
        self.keys
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.clone(), row.get(idx).cloned().unwrap_or_default()))
            .collect()
    }
}

/// Translate a raw header label, falling back to the label itself.
pub fn canonical_key(label: &str) -> &str {
    FIELD_TABLE
        .iter()
        .find(|(raw, _)| *raw == label)
        .map(|(_, key)| *key)
        .unwrap_or(label)
}

/// Why a table produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewRows,
    NoHeader,
    NoRecords,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::TooFewRows => "table has fewer than 3 rows",
            SkipReason::NoHeader => "no header row with 编号 and 模块 in the first 5 rows",
            SkipReason::NoRecords => "no rows with case content",
        };
        f.write_str(text)
    }
}

/// Result of classifying one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Records {
        header_index: usize,
        records: Vec<Record>,
    },
    Skipped(SkipReason),
}

/// Index of the first header-shaped row within the scan window.
pub fn find_header(rows: &[Row]) -> Option<usize> {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| is_header_row(row))
}

fn is_header_row(row: &[String]) -> bool {
    let has = |marker: &str| row.iter().any(|cell| cell == marker);
    has(ID_MARKER) && has(MODULE_MARKER)
}

fn is_annotation_row(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| cell.contains(ANNOTATION_MARKERS))
}

/// Locate the header and turn the rows below it into records.
pub fn classify_rows(rows: &[Row]) -> Classified {
    if rows.len() < MIN_TABLE_ROWS {
        return Classified::Skipped(SkipReason::TooFewRows);
    }
    let Some(header_index) = find_header(rows) else {
        return Classified::Skipped(SkipReason::NoHeader);
    };
    let mapping = HeaderMapping::from_header(&rows[header_index]);

    let records: Vec<Record> = rows[header_index + 1..]
        .iter()
        .filter(|row| !row.is_empty())
        .filter(|row| !is_annotation_row(row))
        .map(|row| mapping.record(row))
        .filter(Record::has_content)
        .collect();

    tracing::debug!(
        columns = ?mapping.keys(),
        data_rows = rows.len() - header_index - 1,
        records = records.len(),
        "classified table"
    );

    if records.is_empty() {
        return Classified::Skipped(SkipReason::NoRecords);
    }
    Classified::Records {
        header_index,
        records,
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
