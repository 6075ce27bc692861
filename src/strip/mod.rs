//! Comment stripping
//!
//! Each comment family is a small line-oriented state machine. One
//! `ScanState` value is created per file, threaded through the family's
//! `strip_line` function for every line, and dropped when the file is done.
//! String and character literals are never modified.

mod brace;
mod hash;
mod markup;
mod tagged;

pub use brace::{BraceSyntax, BRACE, SCRIPT};

use crate::language::Family;

/// State carried from one line to the next within a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Inside a `/* */` comment opened on an earlier line
    pub in_block_comment: bool,
    /// Delimiter of an open triple-quoted string (hash family only)
    pub open_string: Option<char>,
}

/// Strip comments from `raw` using the rules of `family`
///
/// Never fails: malformed input, such as an unterminated block comment,
/// simply loses everything after the opening marker.
pub fn strip(raw: &str, family: Family) -> String {
    match family {
        Family::Brace => strip_lines(raw, |line, state| brace::strip_line(line, state, &BRACE)),
        Family::Script => strip_lines(raw, |line, state| brace::strip_line(line, state, &SCRIPT)),
        Family::Tagged => strip_lines(raw, |line, _| tagged::strip_line(line)),
        Family::Hash => strip_lines(raw, hash::strip_line),
        Family::Markup => markup::strip(raw),
        Family::Documentation => raw.to_string(),
    }
}

fn strip_lines<F>(raw: &str, mut strip_line: F) -> String
where
    F: FnMut(&str, &mut ScanState) -> Option<String>,
{
    let mut state = ScanState::default();
    let mut kept = Vec::new();

    for line in raw.split('\n') {
        if let Some(cleaned) = strip_line(line, &mut state) {
            kept.push(cleaned);
        }
    }

    kept.join("\n")
}

/// Keep a stripped line if it still has content, or if it was blank to begin with
fn retain(stripped: &str, original: &str) -> Option<String> {
    if !stripped.trim().is_empty() || original.trim().is_empty() {
        Some(stripped.to_string())
    } else {
        None
    }
}
