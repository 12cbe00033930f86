//! Grid serialization

use super::dialect::DelimiterConfig;
use super::model::Grid;

/// Serialize a grid back to delimited text.
///
/// Rows are joined with `\n` and the last row has no terminator.
pub fn serialize(grid: &Grid, config: &DelimiterConfig) -> String {
    let mut out = String::new();
    let delimiter = config.delimiter();

    for (r, row) in grid.rows().enumerate() {
        if r > 0 {
            out.push('\n');
        }
        for (c, field) in row.iter().enumerate() {
            if c > 0 {
                out.push(delimiter);
            }
            out.push_str(&escape_field(field, config));
        }
    }
    out
}

/// Quote a field if it contains the delimiter, the quote character or a
/// line break. Inner quote characters are doubled. With quoting disabled the
/// field is written as is.
pub fn escape_field(field: &str, config: &DelimiterConfig) -> String {
    let quote = config.quote_char();
    let needs_quoting = config.use_quotes()
        && field
            .chars()
            .any(|c| c == config.delimiter() || c == quote || c == '\n' || c == '\r');

    if !needs_quoting {
        return field.to_string();
    }

    let mut escaped = String::with_capacity(field.len() + 2);
    escaped.push(quote);
    for c in field.chars() {
        if c == quote {
            escaped.push(quote);
        }
        escaped.push(c);
    }
    escaped.push(quote);
    escaped
}
