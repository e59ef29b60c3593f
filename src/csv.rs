// src/csv.rs
//
// Delimiter-separated-values parsing for roster files. Tolerance is the
// contract here: unmatched quotes run to end of input, ragged rows pass
// through, all-blank rows are dropped. Nothing in this module fails.

/// Strip a single leading byte-order mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Pick a delimiter by inspecting the raw first line: tab wins, then
/// semicolon, else comma.
///
/// Known limitation: this looks at raw text, not parsed cells, so a quoted
/// header containing a literal tab or semicolon can mis-detect. Kept as-is
/// for compatibility with the files we actually receive.
pub fn detect_delimiter(first_line: &str) -> char {
    if first_line.contains('\t') {
        '\t'
    } else if first_line.contains(';') {
        ';'
    } else {
        ','
    }
}

/// Parse `text` into rows of cells.
///
/// - `"` both opens/closes a quoted region and escapes itself by doubling;
///   a quoted region may span delimiter and newline characters.
/// - Row breaks are `\n`, `\r\n` (one break) or bare `\r`.
/// - A final line without a trailing newline is still captured.
/// - Rows whose every cell is empty or whitespace-only are filtered out.
pub fn parse(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' && in_quotes && chars.peek() == Some(&'"') {
            // escaped quote
            cell.push('"');
            chars.next();
            continue;
        }
        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if !in_quotes && (ch == '\r' || ch == '\n') {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(std::mem::take(&mut cell));
            rows.push(std::mem::take(&mut row));
            continue;
        }
        if !in_quotes && ch == delimiter {
            row.push(std::mem::take(&mut cell));
            continue;
        }
        cell.push(ch);
    }

    // last cell of an unterminated final line
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows.retain(|r| r.iter().any(|c| !c.trim().is_empty()));
    rows
}

/// Serialize rows back to delimiter-separated text. A cell is quoted iff it
/// contains the delimiter, a quote, or a line break; embedded quotes are
/// doubled. Inverse of [`parse`] on cell content.
pub fn serialize(rows: &[Vec<String>], delimiter: char) -> String {
    let mut out = String::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            if cell.contains(delimiter)
                || cell.contains('"')
                || cell.contains('\n')
                || cell.contains('\r')
            {
                out.push('"');
                for ch in cell.chars() {
                    if ch == '"' {
                        out.push('"');
                    }
                    out.push(ch);
                }
                out.push('"');
            } else {
                out.push_str(cell);
            }
        }
        out.push('\n');
    }
    out
}
