//! `//` comments in JSON-like data, detected by quote parity

use super::retain;

pub(super) fn strip_line(line: &str) -> Option<String> {
    match comment_start(line) {
        Some(pos) => retain(line[..pos].trim_end(), line),
        None => Some(line.to_string()),
    }
}

/// First `//` preceded by an even number of `"` on the line
///
/// Escaped quotes are counted like any other, so a value holding an odd
/// number of literal quotes before a `//` can be cut short.
fn comment_start(line: &str) -> Option<usize> {
    line.match_indices("//")
        .map(|(pos, _)| pos)
        .find(|&pos| line[..pos].matches('"').count() % 2 == 0)
}
