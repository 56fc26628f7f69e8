//! Inline code span masking.
//!
//! Rewrite passes locate their matches in the masked view of a line (code
//! spans removed) and only ever rewrite text outside code spans, so literal
//! markup inside backticks survives unchanged.

use regex::Regex;
use std::sync::LazyLock;

/// A backtick pair with a non-empty interior, shortest match.
static CODE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`.+?`").unwrap());

/// A piece of a line, either inline code or ordinary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any code span
    Text(&'a str),
    /// A code span including its backticks
    Code(&'a str),
}

/// Split a line into alternating text and code segments.
///
/// Unmatched backticks stay inside the surrounding text segment. Empty text
/// segments are omitted.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in CODE_SPAN_RE.find_iter(line) {
        if m.start() > last {
            out.push(Segment::Text(&line[last..m.start()]));
        }
        out.push(Segment::Code(m.as_str()));
        last = m.end();
    }
    if last < line.len() {
        out.push(Segment::Text(&line[last..]));
    }
    out
}

/// Return the line with every code span removed.
pub fn mask(line: &str) -> String {
    segments(line)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Code(_) => None,
        })
        .collect()
}

/// Rewrite the text segments of a line, copying code spans verbatim.
pub fn map_text<F>(line: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(line.len());
    for segment in segments(line) {
        match segment {
            Segment::Text(text) => out.push_str(&f(text)),
            Segment::Code(code) => out.push_str(code),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_removes_code_spans() {
        assert_eq!(mask("a `[[b]]` c"), "a  c");
        assert_eq!(mask("`x` and `y`"), " and ");
        assert_eq!(mask("no code"), "no code");
    }

    #[test]
    fn test_mask_keeps_unmatched_backtick() {
        assert_eq!(mask("a `b` c `d"), "a  c `d");
        assert_eq!(mask("trailing `"), "trailing `");
    }

    #[test]
    fn test_segments() {
        let segs = segments("x `y` z");
        assert_eq!(
            segs,
            vec![Segment::Text("x "), Segment::Code("`y`"), Segment::Text(" z")]
        );
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_map_text_leaves_code_alone() {
        let out = map_text("up `up` up", |t| t.to_uppercase());
        assert_eq!(out, "UP `up` UP");
    }
}
