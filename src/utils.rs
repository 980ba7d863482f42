//! String helpers for report output.
//!
//! Scraped text can carry zero-width characters, stray control characters,
//! and ragged whitespace from flattened HTML. Everything headed for stdout
//! passes through [`tidy_text`] so reports stay clean regardless of what the
//! pages contained.

use once_cell::sync::Lazy;
use regex::Regex;

static RUN_OF_BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static RUN_OF_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean a report before it reaches stdout.
///
/// Drops zero-width and control characters (newline and tab survive),
/// collapses runs of spaces/tabs to a single space and runs of three or more
/// newlines to two, then trims.
pub fn tidy_text(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|&c| c != '\u{200b}')
        .filter(|&c| c == '\n' || c == '\t' || c as u32 >= 32)
        .collect();
    let kept = RUN_OF_BLANKS.replace_all(&kept, " ");
    let kept = RUN_OF_NEWLINES.replace_all(&kept, "\n\n");
    kept.trim().to_string()
}

/// Truncate to `max` characters, appending an ellipsis when anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-char.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_text_collapses_whitespace() {
        assert_eq!(tidy_text("a   b\t\tc"), "a b c");
        assert_eq!(tidy_text("one\n\n\n\ntwo"), "one\n\ntwo");
        assert_eq!(tidy_text("  padded  "), "padded");
    }

    #[test]
    fn test_tidy_text_drops_control_chars() {
        assert_eq!(tidy_text("a\u{200b}b"), "ab");
        assert_eq!(tidy_text("a\u{0007}b"), "ab");
        // Newlines and lone tabs survive.
        assert_eq!(tidy_text("a\nb"), "a\nb");
        assert_eq!(tidy_text("a\tb"), "a\tb");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc…");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_with_ellipsis("é é é", 3), "é é…");
    }
}
