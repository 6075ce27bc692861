//! `//` and `/* */` comments for C-like languages

use super::{retain, ScanState};

/// Literal and doc-comment rules of a brace-comment language
#[derive(Debug, Clone, Copy)]
pub struct BraceSyntax {
    /// Characters that open and close a string literal
    pub quotes: &'static [u8],
    /// Drop lines that consist of a `///` doc comment
    pub drop_doc_lines: bool,
}

/// C# and Razor: `"` strings, `///` XML documentation lines
pub const BRACE: BraceSyntax = BraceSyntax {
    quotes: b"\"",
    drop_doc_lines: true,
};

/// JavaScript and TypeScript: `"`, `'` and backtick strings
pub const SCRIPT: BraceSyntax = BraceSyntax {
    quotes: b"\"'`",
    drop_doc_lines: false,
};

pub(super) fn strip_line(line: &str, state: &mut ScanState, syntax: &BraceSyntax) -> Option<String> {
    let original = line;
    let mut line = line.trim_end();

    if state.in_block_comment {
        match line.find("*/") {
            Some(end) => {
                line = &line[end + 2..];
                state.in_block_comment = false;
            }
            None => return None,
        }
    }

    if syntax.drop_doc_lines && line.trim_start().starts_with("///") {
        return None;
    }

    let code = strip_code(line, state, syntax);
    retain(code.trim_end(), original)
}

/// Remove comments that start on this line, outside string literals
///
/// All markers are ASCII, so byte offsets always fall on char boundaries.
fn strip_code(line: &str, state: &mut ScanState, syntax: &BraceSyntax) -> String {
    let mut text = line.to_string();
    let mut open_quote: Option<u8> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < text.len() {
        let bytes = text.as_bytes();
        let c = bytes[i];

        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        if c == b'\\' {
            escaped = true;
            i += 1;
            continue;
        }

        match open_quote {
            Some(quote) => {
                if c == quote {
                    open_quote = None;
                }
            }
            None if syntax.quotes.contains(&c) => open_quote = Some(c),
            None if c == b'/' && i + 1 < bytes.len() => match bytes[i + 1] {
                b'/' => {
                    text.truncate(i);
                    break;
                }
                b'*' => match text[i + 2..].find("*/") {
                    Some(offset) => {
                        // Same-line block: cut it out and rescan from here
                        text.replace_range(i..i + 2 + offset + 2, "");
                        continue;
                    }
                    None => {
                        text.truncate(i);
                        state.in_block_comment = true;
                        break;
                    }
                },
                _ => {}
            },
            None => {}
        }

        i += 1;
    }

    text
}
