//! Delimited-text reading for case tables.
//!
//! Input is normalized first so the scanner only ever sees `\n` line breaks.
mod normalize;
mod parse;

pub use normalize::normalize_line_endings;
pub use parse::{parse_rows, ParsedTable, Row};

/// Normalize raw file text and scan it into rows.
pub fn read_table(raw: &str) -> ParsedTable {
    let normalized = normalize_line_endings(raw);
    parse_rows(&normalized)
}
