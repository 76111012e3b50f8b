//! Raw delimited-text splitting.
//!
//! This is deliberately minimal: no quoting or escaping. A field containing the
//! delimiter is split like any other, which shifts the columns of that row.

pub const DEFAULT_DELIMITER: char = ',';

/// Split `text` into rows of trimmed comma-separated fields.
///
/// A trailing newline produces a trailing row with a single empty field.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    parse_with_delimiter(text, DEFAULT_DELIMITER)
}

pub fn parse_with_delimiter(text: &str, delimiter: char) -> Vec<Vec<String>> {
    text.split('\n')
        .map(|line| {
            line.trim_end_matches('\r')
                .split(delimiter)
                .map(|field| field.trim().to_string())
                .collect()
        })
        .collect()
}
