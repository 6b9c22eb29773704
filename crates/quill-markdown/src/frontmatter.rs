//! Frontmatter extraction and rewriting.
//!
//! Parses the leading `---` block with light, YAML-like `key: value`
//! semantics. Values get minimal type coercion: `true`/`false` become
//! booleans, numeric strings become numbers, surrounding quotes are
//! stripped. Anything else stays a string. Input without frontmatter
//! passes through untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\n(.*?)\n---[ \t]*\n(.*)\z").unwrap()
});

/// A coerced frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_owned())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

pub type Frontmatter = BTreeMap<String, Scalar>;

/// Result of splitting a document into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extracted {
    pub frontmatter: Frontmatter,
    pub content: String,
}

fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}

fn coerce(value: &str) -> Scalar {
    let clean = strip_quotes(value);
    if clean == "true" {
        return Scalar::Bool(true);
    }
    if clean == "false" {
        return Scalar::Bool(false);
    }
    if !clean.is_empty() {
        if let Ok(n) = clean.parse::<f64>() {
            return Scalar::Number(n);
        }
    }
    Scalar::String(clean.to_owned())
}

/// Split a markdown document into its frontmatter map and body content.
///
/// No frontmatter block means a pass-through: empty map, full input as
/// content. Malformed lines inside the block are logged and skipped, never
/// propagated as errors.
pub fn extract_frontmatter(markdown: &str) -> Extracted {
    let Some(captures) = FRONTMATTER_RE.captures(markdown) else {
        return Extracted {
            frontmatter: Frontmatter::new(),
            content: markdown.to_owned(),
        };
    };

    let block = &captures[1];
    let content = captures[2].to_owned();

    let mut frontmatter = Frontmatter::new();
    for line in block.split('\n') {
        match line.find(':') {
            Some(colon) if colon > 0 => {
                let key = line[..colon].trim().to_owned();
                let value = line[colon + 1..].trim();
                frontmatter.insert(key, coerce(value));
            }
            _ if line.trim().is_empty() => {}
            _ => {
                tracing::warn!(line, "skipping malformed frontmatter line");
            }
        }
    }

    Extracted {
        frontmatter,
        content,
    }
}

/// Merge `updates` over any existing frontmatter and re-serialize the
/// document. String values are quoted; booleans and numbers are bare. An
/// empty merged map yields the bare content with no delimiter block.
pub fn update_frontmatter(markdown: &str, updates: &Frontmatter) -> String {
    let Extracted {
        mut frontmatter,
        content,
    } = extract_frontmatter(markdown);
    frontmatter.extend(updates.iter().map(|(k, v)| (k.clone(), v.clone())));

    if frontmatter.is_empty() {
        return content;
    }

    let block = frontmatter
        .iter()
        .map(|(key, value)| match value {
            Scalar::String(s) => format!("{key}: \"{s}\""),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("---\n{block}\n---\n{content}")
}
