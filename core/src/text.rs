//! Line and field tokenization shared by every parser.

/// Splits `input` into trimmed, non-empty lines, preserving order.
///
/// # Examples
///
/// ```
/// use term_json_core::split_lines;
///
/// let lines = split_lines("  a b \n\n\tc\r\n");
/// assert_eq!(lines, vec!["a b", "c"]);
/// ```
pub fn split_lines(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits a line into fields on runs of whitespace.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Joins `fields[from..]` with single spaces, or returns an empty string when
/// `from` is out of range.
///
/// Used for trailing free-text columns (commands, descriptions, paths with
/// spaces) that the whitespace split broke apart.
pub fn join_from(fields: &[&str], from: usize) -> String {
    fields.get(from..).map(|rest| rest.join(" ")).unwrap_or_default()
}

/// Returns the field at `index`, or an empty string when the line is short.
pub fn field_or_empty(fields: &[&str], index: usize) -> String {
    fields.get(index).map(|f| (*f).to_string()).unwrap_or_default()
}
