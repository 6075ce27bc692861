//! `<!-- -->` comments in XML-like project files

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("markup comment pattern is valid"));

/// A line of output and whether a comment was cut out of it
#[derive(Debug, Default)]
struct MarkupLine {
    text: String,
    touched: bool,
}

/// Remove every comment span in one pass over the whole text
///
/// Lines that a removal leaves blank are dropped; blank lines that were
/// already blank survive.
pub(super) fn strip(raw: &str) -> String {
    let mut lines = vec![MarkupLine::default()];
    let mut last = 0;

    for found in COMMENT.find_iter(raw) {
        push_text(&mut lines, &raw[last..found.start()]);
        if let Some(current) = lines.last_mut() {
            current.touched = true;
        }
        last = found.end();
    }
    push_text(&mut lines, &raw[last..]);

    lines
        .into_iter()
        .filter(|line| !line.text.trim().is_empty() || !line.touched)
        .map(|line| line.text.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_text(lines: &mut Vec<MarkupLine>, text: &str) {
    let mut pieces = text.split('\n');
    if let (Some(first), Some(current)) = (pieces.next(), lines.last_mut()) {
        current.text.push_str(first);
    }
    lines.extend(pieces.map(|piece| MarkupLine {
        text: piece.to_string(),
        touched: false,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_comment_removed() {
        assert_eq!(strip("<!-- disabled --> <Tag/>"), " <Tag/>");
    }

    #[test]
    fn test_multiline_comment_joins_surrounding_text() {
        assert_eq!(strip("<A><!-- one\ntwo\nthree --></A>"), "<A></A>");
    }

    #[test]
    fn test_non_greedy_match() {
        assert_eq!(
            strip("<!-- a --><Keep/><!-- b -->"),
            "<Keep/>"
        );
    }

    #[test]
    fn test_blank_lines_survive_unless_emptied() {
        assert_eq!(strip("<A>\n\n  <!-- gone -->\n   \n</A>"), "<A>\n\n\n</A>");
    }

    #[test]
    fn test_unterminated_comment_left_alone() {
        assert_eq!(strip("<A/> <!-- open"), "<A/> <!-- open");
    }
}
