//! Standalone reading-time estimate for post listings.
//!
//! Deliberately separate from [`MarkdownStats::reading_time`]: this one
//! strips markup more aggressively and clamps to a minimum of one minute,
//! since listings always show *some* reading time. The stats variant does
//! neither. Callers depend on both behaviors, so they stay distinct.
//!
//! [`MarkdownStats::reading_time`]: crate::stats::MarkdownStats

use std::sync::LazyLock;

use regex::Regex;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());
static HEADING_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

pub(crate) fn strip_markup(text: &str) -> String {
    let text = FENCE_RE.replace_all(text, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = HEADING_MARKER_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HTML_TAG_RE.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Estimated minutes to read, at a given words-per-minute rate, never
/// less than one.
pub fn estimate_with_rate(text: &str, words_per_minute: usize) -> usize {
    let words = strip_markup(text).split_whitespace().count();
    words.div_ceil(words_per_minute).max(1)
}

/// Estimated minutes to read at the default 200 words per minute.
pub fn estimate(text: &str) -> usize {
    estimate_with_rate(text, 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_one_minute() {
        assert_eq!(estimate(""), 1);
        assert_eq!(estimate("three short words"), 1);
    }

    #[test]
    fn test_rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(estimate(&text), 2);
    }

    #[test]
    fn test_markup_excluded() {
        let text = format!("# Title\n```\n{}\n```\n**bold** [link](https://x) <b>tag</b>", "code ".repeat(500));
        // Remaining prose: "Title bold link tag".
        assert_eq!(estimate(&text), 1);
    }

    #[test]
    fn test_custom_rate() {
        let text = "word ".repeat(100);
        assert_eq!(estimate_with_rate(&text, 50), 2);
    }
}
