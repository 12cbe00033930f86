//! Delimited text parsing
//!
//! Line mode is a per-line two-state scanner. Record mode hands the whole
//! buffer to the csv crate so quoted fields may contain line breaks.

use super::dialect::{DelimiterConfig, ParseMode};
use super::model::Grid;

/// Parse text into a rectangular grid.
pub fn parse(text: &str, config: &DelimiterConfig) -> Grid {
    let grid = normalize(parse_rows(text, config));
    tracing::debug!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        mode = ?config.mode(),
        "parsed delimited text"
    );
    grid
}

/// Parse text into rows as they appear, without padding.
///
/// Empty text yields no rows. Every row has at least one field.
pub fn parse_rows(text: &str, config: &DelimiterConfig) -> Vec<Vec<String>> {
    if text.is_empty() {
        return Vec::new();
    }

    match config.mode() {
        ParseMode::Lines => parse_lines(text, config),
        ParseMode::Records => parse_records(text, config).unwrap_or_else(|| {
            tracing::warn!("record parsing unavailable, falling back to line mode");
            parse_lines(text, config)
        }),
    }
}

/// Pad every row to the widest row's field count.
pub fn normalize(rows: Vec<Vec<String>>) -> Grid {
    Grid::from_rows(rows)
}

/// Largest field count across rows
pub fn max_column_count(rows: &[Vec<String>]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

fn parse_lines(text: &str, config: &DelimiterConfig) -> Vec<Vec<String>> {
    let quote = config.use_quotes().then(|| config.quote_char());
    let lines = split_lines(text, quote);
    let last = lines.len() - 1;

    let mut rows = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        // A final terminator leaves one empty line behind; drop it unless it
        // is the only row.
        if i == last && line.is_empty() && !rows.is_empty() {
            continue;
        }
        rows.push(parse_line(line, config));
    }
    rows
}

/// Split on `\n`, `\r\n` and bare `\r`.
///
/// `\n` always ends a line. A carriage return only ends one outside quotes,
/// so a quoted field keeps its `\r`.
fn split_lines(text: &str, quote: Option<char>) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            lines.push(&text[start..i]);
            start = i + 1;
            in_quotes = false;
        } else if c == '\r' && !in_quotes {
            lines.push(&text[start..i]);
            start = i + 1;
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        } else if Some(c) == quote {
            in_quotes = !in_quotes;
        }
    }
    lines.push(&text[start..]);
    lines
}

fn parse_line(line: &str, config: &DelimiterConfig) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }

    let delimiter = config.delimiter();
    if !config.use_quotes() {
        return line.split(delimiter).map(str::to_string).collect();
    }

    let quote = config.quote_char();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == quote {
                if chars.peek() == Some(&quote) {
                    field.push(quote);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == quote {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    fields.push(field);
    fields
}

fn parse_records(text: &str, config: &DelimiterConfig) -> Option<Vec<Vec<String>>> {
    let delimiter = ascii_byte(config.delimiter())?;
    let quote = ascii_byte(config.quote_char())?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(quote)
        .quoting(config.use_quotes())
        .double_quote(true)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (record_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => {
                tracing::warn!(record = record_num + 1, error = %e, "csv record error");
                return None;
            }
        }
    }
    Some(rows)
}

fn ascii_byte(c: char) -> Option<u8> {
    c.is_ascii().then_some(c as u8)
}
