//! Heading extraction and table-of-contents construction.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

// Anchor slugs keep word characters plus CJK ideographs and kana, so
// non-English headings still get usable ids. Input is lowercased first,
// so the ASCII range here is lowercase-only.
static NON_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[^a-z0-9_\x{4e00}-\x{9fff}\x{3400}-\x{4dbf}\x{3040}-\x{309f}\x{30a0}-\x{30ff}]",
    )
    .unwrap()
});

static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// A heading found in the document, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub title: String,
    pub id: String,
    pub line: usize,
}

/// One node of the table-of-contents tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub children: Vec<TocItem>,
}

/// Derive a URL-safe anchor id from heading text.
///
/// Lowercases, replaces disallowed characters with hyphens, collapses
/// hyphen runs, trims edge hyphens, and falls back to `"heading"` when
/// nothing survives.
pub fn generate_anchor_id(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let hyphenated = NON_ANCHOR_RE.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "heading".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Scan the document line by line for ATX headings.
pub fn parse_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let captures = HEADING_RE.captures(line)?;
            let title = captures[2].trim().to_owned();
            Some(Heading {
                level: captures[1].len() as u8,
                id: generate_anchor_id(&title),
                title,
                line: index + 1,
            })
        })
        .collect()
}

fn build_subtree(headings: &[Heading], pos: &mut usize, parent_level: u8) -> Vec<TocItem> {
    let mut items = Vec::new();
    while let Some(heading) = headings.get(*pos) {
        if heading.level <= parent_level {
            break;
        }
        *pos += 1;
        let children = build_subtree(headings, pos, heading.level);
        items.push(TocItem {
            id: heading.id.clone(),
            title: heading.title.clone(),
            level: heading.level,
            children,
        });
    }
    items
}

/// Nest a flat heading list into a document outline.
///
/// A heading becomes a child of the nearest preceding heading with a
/// strictly lower level, so skipped levels (H1 then H3) attach the H3
/// directly under the H1.
pub fn build_toc_tree(headings: &[Heading]) -> Vec<TocItem> {
    let mut pos = 0;
    build_subtree(headings, &mut pos, 0)
}

/// Parse and nest in one call.
pub fn generate_toc(content: &str) -> Vec<TocItem> {
    build_toc_tree(&parse_headings(content))
}

/// Render a `## Table of Contents` markdown section with nested list
/// entries linking to each heading's anchor. Empty input yields an empty
/// string, not an empty section.
pub fn generate_toc_markdown(content: &str) -> String {
    let headings = parse_headings(content);
    if headings.is_empty() {
        return String::new();
    }

    let entries = headings
        .iter()
        .map(|h| {
            let indent = "  ".repeat((h.level - 1) as usize);
            format!("{indent}- [{}](#{})", h.title, h.id)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("## Table of Contents\n\n{entries}\n")
}

/// Append `{#anchor}` attribute markers to every heading line.
pub fn add_anchor_ids(content: &str) -> String {
    static LINE_HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").unwrap());
    LINE_HEADING_RE
        .replace_all(content, |captures: &regex::Captures<'_>| {
            let title = captures[2].trim();
            format!("{} {} {{#{}}}", &captures[1], title, generate_anchor_id(title))
        })
        .into_owned()
}

/// Depth-first flattening of a TOC tree.
pub fn flatten_toc(toc: &[TocItem]) -> Vec<&TocItem> {
    let mut flattened = Vec::new();
    fn traverse<'a>(items: &'a [TocItem], out: &mut Vec<&'a TocItem>) {
        for item in items {
            out.push(item);
            traverse(&item.children, out);
        }
    }
    traverse(toc, &mut flattened);
    flattened
}
