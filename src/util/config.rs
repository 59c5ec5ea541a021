//! `key = value` file helpers.
//!
//! Used by the file-backed preference store, which keeps the persisted
//! locale in a small settings-style file next to other user settings.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Trims whitespace from both key and value
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// What: Find the value of `key` in `key = value` content.
///
/// Inputs:
/// - `contents`: Whole file content
/// - `key`: Key to look for (exact match after trimming)
///
/// Output:
/// - Last value assigned to `key`, or `None` when absent
#[must_use]
pub fn find_value(contents: &str, key: &str) -> Option<String> {
    contents
        .lines()
        .filter(|line| !skip_comment_or_empty(line))
        .filter_map(parse_key_value)
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v)
        .last()
}

/// What: Set `key` to `value`, preserving every other line.
///
/// Inputs:
/// - `contents`: Whole file content
/// - `key`: Key to set
/// - `value`: New value
///
/// Output:
/// - Updated content ending with a newline
///
/// Details:
/// - Rewrites the first assignment of `key` in place and drops later duplicates
/// - Appends `key = value` when the key is not present
/// - Comments and unrelated keys are kept verbatim
#[must_use]
pub fn upsert_value(contents: &str, key: &str, value: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut written = false;
    for line in contents.lines() {
        let is_target = !skip_comment_or_empty(line)
            && parse_key_value(line).is_some_and(|(k, _)| k == key);
        if !is_target {
            out.push(line.to_string());
        } else if !written {
            out.push(format!("{key} = {value}"));
            written = true;
        }
    }
    if !written {
        out.push(format!("{key} = {value}"));
    }
    let mut joined = out.join("\n");
    joined.push('\n');
    joined
}
