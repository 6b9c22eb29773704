//! Best-effort, line-oriented markdown linting.
//!
//! This is deliberately a shallow regex scan, not a CommonMark parser:
//! line/column reporting and the check set assume per-line matching. The
//! fence check in particular only flags an odd number of ``` markers on a
//! single line and does not track open-fence state across lines, so
//! ordinary multi-line fences are reported as potentially unmatched. Known
//! limitation, kept for predictable line-local diagnostics.
//!
//! Validation findings are data. These functions always return a (possibly
//! empty) list and never fail on malformed input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static EMPTY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s*$").unwrap());
static DEEP_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{7,}\s").unwrap());
static ABSOLUTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.-]*:\S+$").unwrap());

/// Finding severity, ordered mildest-last in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One lint finding. Line and column are 1-based; columns count
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    pub code: &'static str,
}

impl ValidationError {
    fn new(
        line: usize,
        column: usize,
        severity: Severity,
        code: &'static str,
        message: String,
    ) -> Self {
        Self {
            line,
            column,
            message,
            severity,
            code,
        }
    }
}

/// Lint configuration. Defaults match a typical blog post policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub max_length: usize,
    pub max_lines: usize,
    pub allow_html: bool,
    pub require_frontmatter: bool,
    pub allowed_tags: Vec<String>,
    pub blocked_words: Vec<String>,
    pub check_links: bool,
    pub check_images: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_length: 50_000,
            max_lines: 1000,
            allow_html: false,
            require_frontmatter: false,
            allowed_tags: Vec::new(),
            blocked_words: Vec::new(),
            check_links: true,
            check_images: true,
        }
    }
}

fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

fn is_valid_url(url: &str) -> bool {
    if url.starts_with('/') || url.starts_with("./") || url.starts_with("../") {
        return true;
    }
    if url.starts_with('#') {
        return true;
    }
    ABSOLUTE_URL_RE.is_match(url)
}

fn check_html(line: &str, line_number: usize, options: &ValidationOptions, errors: &mut Vec<ValidationError>) {
    for tag in HTML_TAG_RE.find_iter(line) {
        let Some(name) = TAG_NAME_RE
            .captures(tag.as_str())
            .map(|c| c[1].to_lowercase())
        else {
            continue;
        };
        if !options.allowed_tags.iter().any(|t| t.eq_ignore_ascii_case(&name)) {
            errors.push(ValidationError::new(
                line_number,
                char_column(line, tag.start()),
                Severity::Error,
                "HTML_NOT_ALLOWED",
                format!("HTML tag '{name}' is not allowed"),
            ));
        }
    }
}

fn check_blocked_words(
    line: &str,
    line_number: usize,
    options: &ValidationOptions,
    errors: &mut Vec<ValidationError>,
) {
    for word in &options.blocked_words {
        let Ok(re) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))) else {
            continue;
        };
        for found in re.find_iter(line) {
            errors.push(ValidationError::new(
                line_number,
                char_column(line, found.start()),
                Severity::Warning,
                "BLOCKED_WORD",
                format!("Blocked word '{word}' found"),
            ));
        }
    }
}

fn check_links(line: &str, line_number: usize, errors: &mut Vec<ValidationError>) {
    for captures in LINK_RE.captures_iter(line) {
        let whole = captures.get(0).unwrap();
        // Image syntax is handled by check_images.
        if line[..whole.start()].ends_with('!') {
            continue;
        }
        let text = &captures[1];
        let url = &captures[2];
        let column = char_column(line, whole.start());
        let url_column = column + text.chars().count() + 3;

        if text.trim().is_empty() {
            errors.push(ValidationError::new(
                line_number,
                column,
                Severity::Warning,
                "EMPTY_LINK_TEXT",
                "Link has empty text".to_owned(),
            ));
        }
        if url.trim().is_empty() {
            errors.push(ValidationError::new(
                line_number,
                url_column,
                Severity::Error,
                "EMPTY_LINK_URL",
                "Link has empty URL".to_owned(),
            ));
        } else if !is_valid_url(url.trim()) {
            errors.push(ValidationError::new(
                line_number,
                url_column,
                Severity::Warning,
                "MALFORMED_URL",
                "Link URL appears to be malformed".to_owned(),
            ));
        }
    }
}

fn check_images(line: &str, line_number: usize, errors: &mut Vec<ValidationError>) {
    for captures in IMAGE_RE.captures_iter(line) {
        let whole = captures.get(0).unwrap();
        let alt = &captures[1];
        let src = &captures[2];
        let column = char_column(line, whole.start());

        if alt.trim().is_empty() {
            errors.push(ValidationError::new(
                line_number,
                column,
                Severity::Warning,
                "EMPTY_IMAGE_ALT",
                "Image has empty alt text".to_owned(),
            ));
        }
        if src.trim().is_empty() {
            errors.push(ValidationError::new(
                line_number,
                column + alt.chars().count() + 4,
                Severity::Error,
                "EMPTY_IMAGE_SRC",
                "Image has empty source".to_owned(),
            ));
        }
    }
}

fn check_line_structure(line: &str, line_number: usize, errors: &mut Vec<ValidationError>) {
    let fence_count = line.matches("```").count();
    if fence_count % 2 != 0 {
        let column = line.find("```").map_or(1, |i| char_column(line, i));
        errors.push(ValidationError::new(
            line_number,
            column,
            Severity::Warning,
            "UNMATCHED_CODE_BLOCK",
            "Potentially unmatched code block".to_owned(),
        ));
    }

    if EMPTY_HEADING_RE.is_match(line) {
        errors.push(ValidationError::new(
            line_number,
            1,
            Severity::Warning,
            "EMPTY_HEADING",
            "Empty heading".to_owned(),
        ));
    }

    if DEEP_HEADING_RE.is_match(line) {
        errors.push(ValidationError::new(
            line_number,
            1,
            Severity::Error,
            "HEADING_TOO_DEEP",
            "Heading level too deep (maximum is 6)".to_owned(),
        ));
    }

    if line.ends_with(' ') || line.ends_with('\t') {
        errors.push(ValidationError::new(
            line_number,
            line.chars().count(),
            Severity::Info,
            "TRAILING_WHITESPACE",
            "Line has trailing whitespace".to_owned(),
        ));
    }
}

/// Lint a markdown document against the given policy.
pub fn validate_markdown(content: &str, options: &ValidationOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let lines: Vec<&str> = content.split('\n').collect();

    if content.chars().count() > options.max_length {
        errors.push(ValidationError::new(
            1,
            1,
            Severity::Error,
            "MAX_LENGTH_EXCEEDED",
            format!(
                "Content exceeds maximum length of {} characters",
                options.max_length
            ),
        ));
    }

    if lines.len() > options.max_lines {
        errors.push(ValidationError::new(
            options.max_lines + 1,
            1,
            Severity::Error,
            "MAX_LINES_EXCEEDED",
            format!("Content exceeds maximum of {} lines", options.max_lines),
        ));
    }

    if options.require_frontmatter && !content.starts_with("---") {
        errors.push(ValidationError::new(
            1,
            1,
            Severity::Error,
            "MISSING_FRONTMATTER",
            "Frontmatter is required".to_owned(),
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        if !options.allow_html {
            check_html(line, line_number, options, &mut errors);
        }
        if !options.blocked_words.is_empty() {
            check_blocked_words(line, line_number, options, &mut errors);
        }
        if options.check_links {
            check_links(line, line_number, &mut errors);
        }
        if options.check_images {
            check_images(line, line_number, &mut errors);
        }
        check_line_structure(line, line_number, &mut errors);
    }

    tracing::debug!(findings = errors.len(), "markdown validation finished");
    errors
}

/// Lint a raw frontmatter block (the text between the `---` delimiters).
pub fn validate_frontmatter(
    frontmatter: &str,
    required_fields: &[&str],
    allowed_fields: &[&str],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = Vec::new();

    for (index, line) in frontmatter.split('\n').enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        match line.find(':') {
            Some(colon) if colon > 0 => {
                let key = line[..colon].trim().to_owned();
                let value = line[colon + 1..].trim();

                if !allowed_fields.is_empty() && !allowed_fields.contains(&key.as_str()) {
                    errors.push(ValidationError::new(
                        line_number,
                        1,
                        Severity::Warning,
                        "FIELD_NOT_ALLOWED",
                        format!("Field '{key}' is not allowed"),
                    ));
                }
                if value.is_empty() {
                    errors.push(ValidationError::new(
                        line_number,
                        char_column(line, colon) + 1,
                        Severity::Warning,
                        "EMPTY_FIELD_VALUE",
                        format!("Field '{key}' has empty value"),
                    ));
                }
                seen.push(key);
            }
            _ => {
                errors.push(ValidationError::new(
                    line_number,
                    1,
                    Severity::Error,
                    "INVALID_FRONTMATTER_SYNTAX",
                    "Invalid frontmatter syntax".to_owned(),
                ));
            }
        }
    }

    for field in required_fields {
        if !seen.iter().any(|k| k == field) {
            errors.push(ValidationError::new(
                1,
                1,
                Severity::Error,
                "MISSING_REQUIRED_FIELD",
                format!("Required field '{field}' is missing"),
            ));
        }
    }

    errors
}

/// Counts by severity, for status lines and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub has_errors: bool,
    pub has_warnings: bool,
}

pub fn validation_summary(errors: &[ValidationError]) -> ValidationSummary {
    let error_count = errors.iter().filter(|e| e.severity == Severity::Error).count();
    let warning_count = errors
        .iter()
        .filter(|e| e.severity == Severity::Warning)
        .count();
    let info_count = errors.iter().filter(|e| e.severity == Severity::Info).count();
    ValidationSummary {
        error_count,
        warning_count,
        info_count,
        has_errors: error_count > 0,
        has_warnings: warning_count > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &[ValidationError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_clean_document_passes() {
        let doc = "# Title\n\nSome prose with a [link](/page).";
        assert!(validate_markdown(doc, &ValidationOptions::default()).is_empty());
    }

    #[test]
    fn test_empty_image_reports_alt_and_src() {
        let errors = validate_markdown("![]()", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["EMPTY_IMAGE_ALT", "EMPTY_IMAGE_SRC"]);
        assert!(errors.iter().all(|e| e.line == 1));
        assert_eq!(errors[0].severity, Severity::Warning);
        assert_eq!(errors[1].severity, Severity::Error);
    }

    #[test]
    fn test_image_not_double_reported_as_link() {
        let errors = validate_markdown("![alt](/img.png)", &ValidationOptions::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_link_text_and_url() {
        let errors = validate_markdown("see [](/x) and [text]()", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["EMPTY_LINK_TEXT", "EMPTY_LINK_URL"]);
    }

    #[test]
    fn test_malformed_absolute_url() {
        let errors = validate_markdown("[x](notaurl)", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["MALFORMED_URL"]);

        // Relative paths and anchors are always fine.
        assert!(validate_markdown("[x](./rel) [y](#frag) [z](/abs)", &ValidationOptions::default()).is_empty());
        assert!(validate_markdown("[x](https://example.com)", &ValidationOptions::default()).is_empty());
    }

    #[test]
    fn test_html_policy() {
        let errors = validate_markdown("hello <script>bad</script>", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["HTML_NOT_ALLOWED", "HTML_NOT_ALLOWED"]);

        let lenient = ValidationOptions {
            allowed_tags: vec!["script".to_owned()],
            ..Default::default()
        };
        assert!(validate_markdown("<script>ok</script>", &lenient).is_empty());

        let allow_all = ValidationOptions {
            allow_html: true,
            ..Default::default()
        };
        assert!(validate_markdown("<div>fine</div>", &allow_all).is_empty());
    }

    #[test]
    fn test_blocked_words_case_insensitive() {
        let options = ValidationOptions {
            blocked_words: vec!["spam".to_owned()],
            ..Default::default()
        };
        let errors = validate_markdown("Spam and more SPAM", &options);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "BLOCKED_WORD");
        assert_eq!(errors[0].column, 1);

        // Word boundaries: no hit inside a larger word.
        assert!(validate_markdown("spammer", &options).is_empty());
    }

    #[test]
    fn test_heading_checks() {
        let errors = validate_markdown("##\n####### deep", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["EMPTY_HEADING", "HEADING_TOO_DEEP"]);
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[1].line, 2);
    }

    #[test]
    fn test_fence_heuristic_flags_odd_markers() {
        let errors = validate_markdown("```rust", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["UNMATCHED_CODE_BLOCK"]);

        // An even count on one line is fine.
        assert!(validate_markdown("``` ```", &ValidationOptions::default()).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_is_info() {
        let errors = validate_markdown("line \nclean", &ValidationOptions::default());
        assert_eq!(codes(&errors), ["TRAILING_WHITESPACE"]);
        assert_eq!(errors[0].severity, Severity::Info);
        assert_eq!(errors[0].column, 5);
    }

    #[test]
    fn test_size_limits() {
        let options = ValidationOptions {
            max_length: 5,
            max_lines: 2,
            ..Default::default()
        };
        let errors = validate_markdown("a\nb\nc\nd", &options);
        assert_eq!(codes(&errors), ["MAX_LENGTH_EXCEEDED", "MAX_LINES_EXCEEDED"]);
        assert_eq!(errors[1].line, 3);
    }

    #[test]
    fn test_frontmatter_requirement() {
        let options = ValidationOptions {
            require_frontmatter: true,
            ..Default::default()
        };
        let errors = validate_markdown("no frontmatter", &options);
        assert_eq!(codes(&errors), ["MISSING_FRONTMATTER"]);
        assert!(validate_markdown("---\nt: x\n---\nbody", &options).is_empty());
    }

    #[test]
    fn test_validate_frontmatter_fields() {
        let block = "title: Hello\nbroken line\nempty:";
        let errors = validate_frontmatter(block, &["title", "date"], &["title", "empty"]);
        assert_eq!(
            codes(&errors),
            [
                "INVALID_FRONTMATTER_SYNTAX",
                "EMPTY_FIELD_VALUE",
                "MISSING_REQUIRED_FIELD"
            ]
        );
    }

    #[test]
    fn test_summary() {
        let errors = validate_markdown("![]()\ntrailing ", &ValidationOptions::default());
        let summary = validation_summary(&errors);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.info_count, 1);
        assert!(summary.has_errors);
        assert!(summary.has_warnings);
    }

    #[test]
    fn test_multibyte_columns_are_char_based() {
        let errors = validate_markdown("héllo <b>x</b>", &ValidationOptions::default());
        assert_eq!(errors[0].code, "HTML_NOT_ALLOWED");
        assert_eq!(errors[0].column, 7);
    }

    #[test]
    fn test_error_and_summary_json_shape() {
        let errors = validate_markdown("line with trailing space ", &ValidationOptions::default());
        let value = serde_json::to_value(&errors).unwrap();
        let first = &value[0];
        assert_eq!(first["severity"], "info");
        assert_eq!(first["code"], "TRAILING_WHITESPACE");
        assert_eq!(first["line"], 1);

        let summary = serde_json::to_value(validation_summary(&errors)).unwrap();
        let object = summary.as_object().unwrap();
        for key in [
            "errorCount",
            "warningCount",
            "infoCount",
            "hasErrors",
            "hasWarnings",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(summary["infoCount"], 1);
        assert_eq!(summary["hasErrors"], false);
    }
}
