//! Markdown-to-plain-text conversion, cleanup, and excerpting.
//!
//! The plain-text pipeline applies its replacements in a fixed order:
//! code first (so nothing inside a fence is mistaken for markup), then
//! images before links (an image is a link with a bang), then per-line
//! markers. Reordering changes output on inputs like links whose text
//! carries emphasis markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::extract_frontmatter;
use crate::reading_time::strip_markup;

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static HEADING_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~([^~]+)~~").unwrap());
static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^>\s+").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").unwrap());
static HR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---+$").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());
static EXCESS_BLANK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip all markdown syntax, leaving readable prose.
///
/// Idempotent on its own output: a second pass produces no further
/// changes.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let content = extract_frontmatter(markdown).content;

    let text = FENCE_RE.replace_all(&content, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = IMAGE_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HEADING_MARKER_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = STRIKE_RE.replace_all(&text, "$1");
    let text = BLOCKQUOTE_RE.replace_all(&text, "");
    let text = BULLET_RE.replace_all(&text, "");
    let text = ORDERED_RE.replace_all(&text, "");
    let text = HR_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_owned()
}

/// Normalize formatting without removing syntax: collapse runs of three or
/// more newlines to a blank line, trim trailing whitespace per line, trim
/// the whole document.
pub fn clean_markdown(markdown: &str) -> String {
    let collapsed = EXCESS_BLANK_RE.replace_all(markdown, "\n\n");
    collapsed
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

/// A cleaned, word-boundary-truncated excerpt with a trailing ellipsis
/// when truncation occurred. `max_length` is in characters.
pub fn excerpt(text: &str, max_length: usize) -> String {
    let clean = strip_markup(text);
    if clean.chars().count() <= max_length {
        return clean;
    }

    let truncated: String = clean.chars().take(max_length).collect();
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &truncated[..last_space]),
        _ => format!("{truncated}..."),
    }
}
