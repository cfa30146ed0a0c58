const BYTE_ORDER_MARK: char = '\u{feff}';

/// Collapse `\r\n` and lone `\r` into `\n`, dropping a leading byte-order mark.
pub fn normalize_line_endings(raw: &str) -> String {
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    out
}
