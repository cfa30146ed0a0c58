/// One parsed line of the table: trimmed cells in column order.
pub type Row = Vec<String>;

const QUOTE: char = '"';
const DELIMITER: char = ',';
const NEWLINE: char = '\n';

/// Rows recovered from a table plus what the scanner noticed on the way.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub rows: Vec<Row>,
    /// 1-based line where a quote was opened and never closed.
    pub unterminated_quote_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unquoted,
    Quoted,
}

struct ScanState {
    rows: Vec<Row>,
    row: Row,
    field: String,
    mode: Mode,
    line: usize,
    quote_opened_at: usize,
}

impl ScanState {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            mode: Mode::Unquoted,
            line: 1,
            quote_opened_at: 1,
        }
    }

    fn end_field(&mut self) {
        let field = std::mem::take(&mut self.field);
        self.row.push(field.trim().to_string());
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|cell| !cell.is_empty()) {
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> ParsedTable {
        let unterminated_quote_line = match self.mode {
            Mode::Quoted => Some(self.quote_opened_at),
            Mode::Unquoted => None,
        };
        if !self.field.is_empty() || !self.row.is_empty() {
            self.end_row();
        }
        ParsedTable {
            rows: self.rows,
            unterminated_quote_line,
        }
    }
}

/// Scan normalized text into rows of trimmed cells.
///
/// Delimiters and newlines inside a quoted region belong to the field, and a
/// doubled quote inside it is a literal quote. Malformed quoting never fails:
/// an unclosed quote swallows the rest of the input and is reported through
/// [`ParsedTable::unterminated_quote_line`]. Rows whose cells are all empty
/// are dropped.
pub fn parse_rows(text: &str) -> ParsedTable {
    let mut state = ScanState::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match state.mode {
            Mode::Quoted => {
                if ch == QUOTE {
                    if chars.peek() == Some(&QUOTE) {
                        chars.next();
                        state.field.push(QUOTE);
                    } else {
                        state.mode = Mode::Unquoted;
                    }
                } else {
                    if ch == NEWLINE {
                        state.line += 1;
                    }
                    state.field.push(ch);
                }
            }
            Mode::Unquoted => match ch {
                QUOTE => {
                    state.mode = Mode::Quoted;
                    state.quote_opened_at = state.line;
                }
                DELIMITER => state.end_field(),
                NEWLINE => {
                    state.line += 1;
                    state.end_row();
                }
                _ => state.field.push(ch),
            },
        }
    }

    state.finish()
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
