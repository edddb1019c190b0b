//! Frontmatter Extractor
//!
//! Splits a SKILL.md document into its YAML metadata block and Markdown
//! body. Any frontmatter failure is unrecoverable for downstream field
//! checks, so extraction is the sole gate before validation proceeds.
//!
//! Expected format:
//! ```text
//! ---
//! name: my-skill
//! description: Does something useful
//! ---
//!
//! Markdown body...
//! ```

use serde_json::Value;
use yaml_rust2::{Yaml, YamlLoader};

use crate::types::{IssueCode, Severity, ValidationIssue};

/// Successful extraction: the raw metadata map, the body text, and the
/// body's line count.
#[derive(Clone, Debug)]
pub struct Extraction {
    /// Frontmatter as a JSON object value.
    pub frontmatter: Value,
    /// Everything after the closing `---`, leading newlines stripped.
    pub body: String,
    /// Count of `\n`-delimited segments in the body.
    pub body_line_count: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Extract the frontmatter block and body from raw document text.
///
/// Fails with a single `FRONTMATTER_EMPTY` issue when the block is absent,
/// not a mapping, or has zero keys, and with `FRONTMATTER_PARSE_ERROR`
/// when the YAML itself is malformed.
pub fn extract(raw: &str) -> Result<Extraction, ValidationIssue> {
    let yaml_block = match split_frontmatter_block(raw) {
        Some(block) => block,
        None => return Err(empty_issue()),
    };

    let docs = match YamlLoader::load_from_str(yaml_block) {
        Ok(docs) => docs,
        Err(err) => {
            return Err(ValidationIssue {
                code: IssueCode::FrontmatterParseError,
                message: format!("Failed to parse frontmatter: {}", err),
                severity: Severity::Error,
                field: Some("frontmatter".to_string()),
                expected: None,
                actual: None,
            })
        }
    };

    let frontmatter = match docs.first().map(yaml_to_json) {
        Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
        _ => return Err(empty_issue()),
    };

    let body = extract_body(raw);
    let body_line_count = body.split('\n').count();

    Ok(Extraction {
        frontmatter,
        body,
        body_line_count,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn empty_issue() -> ValidationIssue {
    ValidationIssue {
        code: IssueCode::FrontmatterEmpty,
        message: "Frontmatter block is empty or invalid".to_string(),
        severity: Severity::Error,
        field: Some("frontmatter".to_string()),
        expected: None,
        actual: None,
    }
}

/// Locate the YAML text between the opening and closing `---` delimiters.
/// Returns `None` when either delimiter is missing.
fn split_frontmatter_block(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_start();

    if !trimmed.starts_with("---") {
        return None;
    }

    let after_open = &trimmed[3..];
    let close_idx = after_open.find("\n---")?;

    Some(after_open[..close_idx].trim())
}

/// Extract the Markdown body (everything after the closing `---` of the
/// frontmatter), with leading newlines stripped.
fn extract_body(raw: &str) -> String {
    let trimmed = raw.trim_start();

    if !trimmed.starts_with("---") {
        return raw.to_string();
    }

    let after_open = &trimmed[3..];
    match after_open.find("\n---") {
        Some(close_idx) => {
            let after_close = &after_open[close_idx + 4..];
            // Skip the remainder of the delimiter line.
            let after_line = match after_close.find('\n') {
                Some(nl) => &after_close[nl..],
                None => "",
            };
            after_line.trim_start_matches('\n').to_string()
        }
        None => String::new(),
    }
}

/// Convert a parsed YAML node into a JSON value. Aliases and bad values
/// collapse to null; mapping keys are stringified.
fn yaml_to_json(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Real(s) => s
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(s.clone())),
        Yaml::Integer(i) => Value::Number((*i).into()),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        Yaml::Hash(hash) => {
            let mut map = serde_json::Map::new();
            for (key, value) in hash {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Integer(i) => i.to_string(),
                    Yaml::Real(s) => s.clone(),
                    Yaml::Boolean(b) => b.to_string(),
                    _ => continue,
                };
                map.insert(key, yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let raw = "---\nname: test\ndescription: A test skill\n---\n\n## Summary\nBody";
        let extraction = extract(raw).unwrap();
        assert_eq!(
            extraction.frontmatter.get("name").and_then(Value::as_str),
            Some("test")
        );
        assert_eq!(extraction.body, "## Summary\nBody");
        assert_eq!(extraction.body_line_count, 2);
    }

    #[test]
    fn test_extract_no_delimiters_is_empty() {
        let raw = "Just some markdown without frontmatter.";
        let issue = extract(raw).unwrap_err();
        assert_eq!(issue.code, IssueCode::FrontmatterEmpty);
        assert_eq!(issue.severity, Severity::Error);
    }

    #[test]
    fn test_extract_unclosed_block_is_empty() {
        let raw = "---\nname: test\ndescription: no closing delimiter";
        let issue = extract(raw).unwrap_err();
        assert_eq!(issue.code, IssueCode::FrontmatterEmpty);
    }

    #[test]
    fn test_extract_zero_keys_is_empty() {
        let raw = "---\n\n---\nBody";
        let issue = extract(raw).unwrap_err();
        assert_eq!(issue.code, IssueCode::FrontmatterEmpty);
    }

    #[test]
    fn test_extract_scalar_block_is_empty() {
        let raw = "---\njust a string\n---\nBody";
        let issue = extract(raw).unwrap_err();
        assert_eq!(issue.code, IssueCode::FrontmatterEmpty);
    }

    #[test]
    fn test_extract_malformed_yaml_is_parse_error() {
        let raw = "---\nname: [unclosed\n---\nBody";
        let issue = extract(raw).unwrap_err();
        assert_eq!(issue.code, IssueCode::FrontmatterParseError);
        assert!(issue.message.starts_with("Failed to parse frontmatter"));
    }

    #[test]
    fn test_extract_nested_metadata() {
        let raw = "---\nname: test\nmetadata:\n  industry: healthcare\n  priority: 3\n---\nBody";
        let extraction = extract(raw).unwrap();
        let metadata = extraction.frontmatter.get("metadata").unwrap();
        assert_eq!(
            metadata.get("industry").and_then(Value::as_str),
            Some("healthcare")
        );
        assert_eq!(metadata.get("priority").and_then(Value::as_i64), Some(3));
    }

    #[test]
    fn test_body_line_count() {
        let raw = "---\nname: test\n---\nline1\nline2\nline3";
        let extraction = extract(raw).unwrap();
        assert_eq!(extraction.body_line_count, 3);
    }

    #[test]
    fn test_body_empty_when_nothing_follows() {
        let raw = "---\nname: test\n---";
        let extraction = extract(raw).unwrap();
        assert_eq!(extraction.body, "");
        assert_eq!(extraction.body_line_count, 1);
    }
}
