//! Message text sanitization.
//!
//! Channel posts arrive with formatting residue: carriage returns, zero-width
//! spaces, runs of spaces and blank lines. The write path runs every text
//! through a [`Sanitizer`] once, before the primary insert, and skips the
//! message entirely when nothing is left.

// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// Normalizes message text before storage.
///
/// Implementations must be total: every input yields some output, possibly
/// empty.
pub trait Sanitizer: Send + Sync {
    /// Returns the cleaned text.
    fn sanitize(&self, text: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn sanitize(&self, text: &str) -> String {
        self(text)
    }
}

static HORIZONTAL_WS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}]+")
        .expect("static regex: horizontal whitespace pattern")
});

static BLANK_LINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex: blank lines pattern"));

/// Default sanitizer.
///
/// - Normalizes `\r\n` and `\r` to `\n`
/// - Drops control characters (except newline and tab) and zero-width
///   spaces. U+200D ZERO WIDTH JOINER is kept so emoji sequences survive
/// - Collapses runs of horizontal whitespace to one space and trims each line
/// - Collapses three or more newlines to a single blank line
/// - Trims the result
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSanitizer;

impl TextSanitizer {
    /// Creates a new sanitizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}')
}

impl Sanitizer for TextSanitizer {
    fn sanitize(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let visible: String = unified
            .chars()
            .filter(|&c| c == '\n' || c == '\t' || !(c.is_control() || is_invisible(c)))
            .collect();

        let lines: Vec<String> = visible
            .split('\n')
            .map(|line| HORIZONTAL_WS_REGEX.replace_all(line, " ").trim().to_string())
            .collect();

        let joined = lines.join("\n");
        BLANK_LINES_REGEX
            .replace_all(&joined, "\n\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        let s = TextSanitizer::new();
        assert_eq!(s.sanitize("NATO aid package"), "NATO aid package");
        assert_eq!(s.sanitize("ракета ударила"), "ракета ударила");
    }

    #[test]
    fn test_collapses_whitespace() {
        let s = TextSanitizer::new();
        assert_eq!(s.sanitize("  a \t  b\u{00A0}\u{00A0}c  "), "a b c");
    }

    #[test]
    fn test_normalizes_line_endings_and_blank_lines() {
        let s = TextSanitizer::new();
        assert_eq!(
            s.sanitize("headline\r\n\r\n\r\n\r\nbody\rtail"),
            "headline\n\nbody\ntail"
        );
    }

    #[test]
    fn test_strips_control_and_invisible_characters() {
        let s = TextSanitizer::new();
        assert_eq!(s.sanitize("ale\u{0007}rt\u{200B}!\u{FEFF}"), "alert!");
    }

    #[test]
    fn test_keeps_zero_width_joiner_in_emoji() {
        let s = TextSanitizer::new();
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(s.sanitize(&format!("родина {family}")), format!("родина {family}"));
        assert_eq!(s.sanitize("a\u{200C}b\u{2060}c"), "abc");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        let s = TextSanitizer::new();
        assert_eq!(s.sanitize(" \n\t\u{200B} \r\n "), "");
        assert_eq!(s.sanitize(""), "");
    }

    #[test]
    fn test_closure_sanitizer() {
        let upper = |t: &str| t.to_uppercase();
        assert_eq!(upper.sanitize("nato"), "NATO");
    }
}
