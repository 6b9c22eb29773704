//! quill-markdown: Line-oriented markdown analysis for blog tooling.
//!
//! This crate provides:
//! - Frontmatter extraction/rewriting with light type coercion
//! - Heading extraction, anchor slugs, and TOC tree construction
//! - Document statistics and reading-time estimation
//! - A best-effort structural/content-policy linter
//! - Plain-text conversion, cleanup, and excerpting
//!
//! Everything works on plain strings; no parser state survives a call.

pub mod frontmatter;
pub mod plain_text;
pub mod reading_time;
pub mod stats;
pub mod toc;
pub mod validate;

pub use frontmatter::{extract_frontmatter, update_frontmatter, Extracted, Frontmatter, Scalar};
pub use plain_text::{clean_markdown, excerpt, markdown_to_plain_text};
pub use stats::{markdown_stats, MarkdownStats};
pub use toc::{
    add_anchor_ids, build_toc_tree, flatten_toc, generate_anchor_id, generate_toc,
    generate_toc_markdown, parse_headings, Heading, TocItem,
};
pub use validate::{
    validate_frontmatter, validate_markdown, validation_summary, Severity, ValidationError,
    ValidationOptions, ValidationSummary,
};
