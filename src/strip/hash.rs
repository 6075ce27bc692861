//! `#` comments with triple-quoted multi-line strings

use super::{retain, ScanState};

const QUOTES: [char; 2] = ['"', '\''];

pub(super) fn strip_line(line: &str, state: &mut ScanState) -> Option<String> {
    let trimmed = line.trim_end();

    if let Some(delimiter) = state.open_string {
        if trimmed.contains(triple(delimiter).as_str()) {
            state.open_string = None;
        }
        return Some(trimmed.to_string());
    }

    // An odd number of triple quotes leaves a string open past this line
    for quote in QUOTES {
        if trimmed.matches(triple(quote).as_str()).count() % 2 == 1 {
            state.open_string = Some(quote);
            return Some(trimmed.to_string());
        }
    }

    let code = strip_code(trimmed);
    retain(code.trim_end(), line)
}

fn triple(quote: char) -> String {
    std::iter::repeat(quote).take(3).collect()
}

fn strip_code(line: &str) -> &str {
    let mut open_quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }

        match open_quote {
            Some(quote) if c == quote => open_quote = None,
            Some(_) => {}
            None if QUOTES.contains(&c) => open_quote = Some(c),
            None if c == '#' => return &line[..i],
            None => {}
        }
    }

    line
}
