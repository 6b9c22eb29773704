//! Document statistics: word/character counts, structural tallies, and a
//! rough reading-time estimate.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::frontmatter::extract_frontmatter;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+.+$").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\([^)]+\)").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").unwrap());
static BULLET_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").unwrap());
static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").unwrap());
static ORDERED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// Aggregate statistics for one document. Frontmatter is excluded from
/// every figure; code content counts toward characters but not words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownStats {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub paragraphs: usize,
    pub headings: usize,
    pub links: usize,
    pub images: usize,
    pub code_blocks: usize,
    pub lists: usize,
    /// Minutes at 200 words per minute, rounded up. Unlike
    /// [`reading_time::estimate`](crate::reading_time::estimate) this is
    /// not clamped to a minimum of one, so an empty document reads as zero.
    pub reading_time: usize,
}

fn is_paragraph_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with('#')
        && !trimmed.starts_with('-')
        && !trimmed.starts_with('*')
        && !trimmed.starts_with('+')
        && !trimmed.starts_with('>')
        && !ORDERED_MARKER_RE.is_match(trimmed)
}

/// Compute statistics over the body of a markdown document.
pub fn markdown_stats(markdown: &str) -> MarkdownStats {
    let content = extract_frontmatter(markdown).content;

    let without_fences = FENCE_RE.replace_all(&content, "");
    let prose = INLINE_CODE_RE.replace_all(&without_fences, "");
    let words = prose.split_whitespace().count();

    let characters = content.chars().count();
    let characters_no_spaces = content.chars().filter(|c| !c.is_whitespace()).count();
    let paragraphs = content.split('\n').filter(|l| is_paragraph_line(l)).count();

    MarkdownStats {
        words,
        characters,
        characters_no_spaces,
        paragraphs,
        headings: HEADING_RE.find_iter(&content).count(),
        links: LINK_RE.find_iter(&content).count(),
        images: IMAGE_RE.find_iter(&content).count(),
        code_blocks: FENCE_RE.find_iter(&content).count(),
        lists: BULLET_ITEM_RE.find_iter(&content).count()
            + ORDERED_ITEM_RE.find_iter(&content).count(),
        reading_time: words.div_ceil(200),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_exclude_code() {
        let stats = markdown_stats("```\nword word\n```\nreal words");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.code_blocks, 1);
    }

    #[test]
    fn test_inline_code_excluded_from_words() {
        let stats = markdown_stats("use `some_function_name` here");
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_characters_include_code() {
        let stats = markdown_stats("`ab`");
        assert_eq!(stats.characters, 4);
        assert_eq!(stats.characters_no_spaces, 4);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_frontmatter_excluded() {
        let stats = markdown_stats("---\ntitle: Post\n---\none two three");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 13);
    }

    #[test]
    fn test_structural_counts() {
        let doc = "# Head\n\npara one\n\n- item\n- item\n1. first\n> quoted\n[x](/a) ![y](/b)";
        let stats = markdown_stats(doc);
        assert_eq!(stats.headings, 1);
        assert_eq!(stats.lists, 3);
        // The image's inner `[y](/b)` also matches the link pattern.
        assert_eq!(stats.links, 2);
        assert_eq!(stats.images, 1);
        // "para one" plus the link/image line count as paragraphs.
        assert_eq!(stats.paragraphs, 2);
    }

    #[test]
    fn test_reading_time_not_clamped() {
        assert_eq!(markdown_stats("").reading_time, 0);
        let two_hundred_one = "word ".repeat(201);
        assert_eq!(markdown_stats(&two_hundred_one).reading_time, 2);
    }

    #[test]
    fn test_multibyte_character_count() {
        let stats = markdown_stats("héllo 🌍");
        assert_eq!(stats.characters, 7);
        assert_eq!(stats.characters_no_spaces, 6);
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let value = serde_json::to_value(markdown_stats("one two three")).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "words",
            "characters",
            "charactersNoSpaces",
            "paragraphs",
            "headings",
            "links",
            "images",
            "codeBlocks",
            "lists",
            "readingTime",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object.len(), 10);
        assert_eq!(value["words"], 3);
        assert_eq!(value["readingTime"], 1);
    }
}
