//! Skill Validation
//!
//! Rule sets that check a parsed SKILL.md against the naming and shape
//! conventions. Each rule is an independent issue-emitting check; rules
//! never abort their siblings, and validation itself never fails -- even
//! the worst-malformed input produces a structured result.

use regex::Regex;
use serde_json::Value;

use crate::frontmatter;
use crate::types::{
    IssueCode, Severity, SkillFrontmatter, ValidationIssue, ValidationResult,
};

// Validation patterns
const NAME_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

// Field constraints
const NAME_MIN_LENGTH: usize = 1;
const NAME_MAX_LENGTH: usize = 64;
const DESCRIPTION_MIN_LENGTH: usize = 1;
const DESCRIPTION_MAX_LENGTH: usize = 1024;
const DESCRIPTION_BRIEF_LENGTH: usize = 50;
const COMPATIBILITY_MAX_LENGTH: usize = 500;
const SKILL_MD_MAX_LINES: usize = 500;

/// Options for bundle validation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateOptions {
    /// Promote every warning to an error before the verdict is computed.
    pub strict_mode: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate a SKILL.md content string.
pub fn validate_skill(content: &str) -> ValidationResult {
    validate_content(content, None, ValidateOptions::default())
}

/// Validate a skill bundle: the SKILL.md content plus the expected
/// bundle/directory name the frontmatter `name` must match.
pub fn validate_skill_bundle(
    content: &str,
    bundle_name: &str,
    options: ValidateOptions,
) -> ValidationResult {
    validate_content(content, Some(bundle_name), options)
}

fn validate_content(
    content: &str,
    bundle_name: Option<&str>,
    options: ValidateOptions,
) -> ValidationResult {
    let extraction = match frontmatter::extract(content) {
        Ok(e) => e,
        // Frontmatter failures short-circuit: there is nothing meaningful
        // left to check.
        Err(issue) => return ValidationResult::from_issues(vec![issue], None),
    };

    let fm = SkillFrontmatter::from_value(&extraction.frontmatter);

    let mut issues: Vec<ValidationIssue> = Vec::new();
    issues.extend(validate_name(fm.name.as_deref(), bundle_name));
    issues.extend(validate_description(fm.description.as_deref()));
    issues.extend(validate_compatibility(fm.compatibility.as_deref()));
    issues.extend(validate_metadata(fm.metadata.as_ref()));
    issues.extend(validate_body(content, extraction.body_line_count));

    if options.strict_mode {
        escalate_warnings(&mut issues);
    }

    ValidationResult::from_issues(issues, Some(fm))
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Validate the skill name against the naming convention, and against the
/// bundle name when one is supplied.
fn validate_name(name: Option<&str>, bundle_name: Option<&str>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let name = match name {
        Some(n) => n,
        None => {
            issues.push(ValidationIssue {
                code: IssueCode::NameRequired,
                message: "Frontmatter \"name\" field is required".to_string(),
                severity: Severity::Error,
                field: Some("name".to_string()),
                expected: None,
                actual: None,
            });
            return issues;
        }
    };

    let length = name.chars().count();

    if length < NAME_MIN_LENGTH {
        issues.push(ValidationIssue {
            code: IssueCode::NameTooShort,
            message: format!("Skill name must be at least {} character", NAME_MIN_LENGTH),
            severity: Severity::Error,
            field: Some("name".to_string()),
            expected: Some(format!(">= {} chars", NAME_MIN_LENGTH)),
            actual: Some(format!("{} chars", length)),
        });
    }

    if length > NAME_MAX_LENGTH {
        issues.push(ValidationIssue {
            code: IssueCode::NameTooLong,
            message: format!("Skill name must be {} characters or fewer", NAME_MAX_LENGTH),
            severity: Severity::Error,
            field: Some("name".to_string()),
            expected: Some(format!("<= {} chars", NAME_MAX_LENGTH)),
            actual: Some(format!("{} chars", length)),
        });
    }

    let matches_pattern = Regex::new(NAME_PATTERN)
        .map(|re| re.is_match(name))
        .unwrap_or(false);

    if !matches_pattern {
        issues.push(ValidationIssue {
            code: IssueCode::NameInvalidFormat,
            message: "Skill name must contain only lowercase letters, numbers, and single hyphens"
                .to_string(),
            severity: Severity::Error,
            field: Some("name".to_string()),
            expected: Some("lowercase letters, numbers, single hyphens".to_string()),
            actual: Some(name.to_string()),
        });
    }

    // A name with consecutive hyphens also fails the master pattern; both
    // issues are emitted, not deduplicated.
    if name.contains("--") {
        issues.push(ValidationIssue {
            code: IssueCode::NameConsecutiveHyphens,
            message: "Skill name must not contain consecutive hyphens".to_string(),
            severity: Severity::Error,
            field: Some("name".to_string()),
            expected: None,
            actual: Some(name.to_string()),
        });
    }

    if name.starts_with('-') || name.ends_with('-') {
        issues.push(ValidationIssue {
            code: IssueCode::NameHyphenBoundary,
            message: "Skill name must not start or end with a hyphen".to_string(),
            severity: Severity::Error,
            field: Some("name".to_string()),
            expected: None,
            actual: Some(name.to_string()),
        });
    }

    if let Some(bundle) = bundle_name {
        if name != bundle {
            issues.push(ValidationIssue {
                code: IssueCode::NameMismatch,
                message: "Frontmatter name must match the bundle/directory name".to_string(),
                severity: Severity::Error,
                field: Some("name".to_string()),
                expected: Some(bundle.to_string()),
                actual: Some(name.to_string()),
            });
        }
    }

    issues
}

/// Validate the skill description.
fn validate_description(description: Option<&str>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let description = match description {
        Some(d) => d,
        None => {
            issues.push(ValidationIssue {
                code: IssueCode::DescriptionRequired,
                message: "Frontmatter \"description\" field is required".to_string(),
                severity: Severity::Error,
                field: Some("description".to_string()),
                expected: None,
                actual: None,
            });
            return issues;
        }
    };

    let length = description.chars().count();

    if length < DESCRIPTION_MIN_LENGTH {
        issues.push(ValidationIssue {
            code: IssueCode::DescriptionTooShort,
            message: format!(
                "Description must be at least {} character",
                DESCRIPTION_MIN_LENGTH
            ),
            severity: Severity::Error,
            field: Some("description".to_string()),
            expected: Some(format!(">= {} chars", DESCRIPTION_MIN_LENGTH)),
            actual: Some(format!("{} chars", length)),
        });
    }

    if length > DESCRIPTION_MAX_LENGTH {
        issues.push(ValidationIssue {
            code: IssueCode::DescriptionTooLong,
            message: format!(
                "Description must be {} characters or fewer",
                DESCRIPTION_MAX_LENGTH
            ),
            severity: Severity::Error,
            field: Some("description".to_string()),
            expected: Some(format!("<= {} chars", DESCRIPTION_MAX_LENGTH)),
            actual: Some(format!("{} chars", length)),
        });
    }

    if length < DESCRIPTION_BRIEF_LENGTH {
        issues.push(ValidationIssue {
            code: IssueCode::DescriptionTooBrief,
            message: "Description should describe what the skill does AND when to use it"
                .to_string(),
            severity: Severity::Warning,
            field: Some("description".to_string()),
            expected: None,
            actual: Some(format!("{} chars", length)),
        });
    }

    issues
}

/// Validate the optional compatibility field.
fn validate_compatibility(compatibility: Option<&str>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Some(compatibility) = compatibility {
        let length = compatibility.chars().count();
        if length > COMPATIBILITY_MAX_LENGTH {
            issues.push(ValidationIssue {
                code: IssueCode::CompatibilityTooLong,
                message: format!(
                    "Compatibility field must be {} characters or fewer",
                    COMPATIBILITY_MAX_LENGTH
                ),
                severity: Severity::Error,
                field: Some("compatibility".to_string()),
                expected: Some(format!("<= {} chars", COMPATIBILITY_MAX_LENGTH)),
                actual: Some(format!("{} chars", length)),
            });
        }
    }

    issues
}

/// Validate the metadata map structure. The map itself is optional; when
/// present it must be a mapping whose values are scalars.
fn validate_metadata(metadata: Option<&Value>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let metadata = match metadata {
        Some(Value::Null) | None => return issues,
        Some(m) => m,
    };

    let map = match metadata.as_object() {
        Some(map) => map,
        None => {
            issues.push(ValidationIssue {
                code: IssueCode::MetadataInvalidType,
                message: "Metadata must be a key-value object".to_string(),
                severity: Severity::Error,
                field: Some("metadata".to_string()),
                expected: None,
                actual: None,
            });
            return issues;
        }
    };

    for (key, value) in map {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {}
            _ => {
                issues.push(ValidationIssue {
                    code: IssueCode::MetadataValueInvalid,
                    message: format!(
                        "Metadata value for \"{}\" must be a string, number, or boolean",
                        key
                    ),
                    severity: Severity::Warning,
                    field: Some(format!("metadata.{}", key)),
                    expected: None,
                    actual: Some(value_kind(value).to_string()),
                });
            }
        }
    }

    issues
}

// ---------------------------------------------------------------------------
// Body heuristics
// ---------------------------------------------------------------------------

/// Advisory checks over the body: line-count ceiling and presence of the
/// conventional section headers. These never affect validity.
///
/// The heading scans run over the entire raw document, not just the body.
fn validate_body(raw: &str, body_line_count: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if body_line_count > SKILL_MD_MAX_LINES {
        issues.push(ValidationIssue {
            code: IssueCode::BodyTooLong,
            message: format!("SKILL.md should be under {} lines", SKILL_MD_MAX_LINES),
            severity: Severity::Warning,
            field: None,
            expected: Some(format!("<= {} lines", SKILL_MD_MAX_LINES)),
            actual: Some(format!("{} lines", body_line_count)),
        });
    }

    if !has_heading(raw, r"(?i)##\s*(summary|overview)") {
        issues.push(ValidationIssue {
            code: IssueCode::BodyMissingSummary,
            message: "Consider adding a ## Summary section".to_string(),
            severity: Severity::Info,
            field: None,
            expected: None,
            actual: None,
        });
    }

    if !has_heading(raw, r"(?i)##\s*(inputs|input required)") {
        issues.push(ValidationIssue {
            code: IssueCode::BodyMissingInputs,
            message: "Consider adding a ## Inputs section".to_string(),
            severity: Severity::Info,
            field: None,
            expected: None,
            actual: None,
        });
    }

    if !has_heading(raw, r"(?i)##\s*(outputs|output)") {
        issues.push(ValidationIssue {
            code: IssueCode::BodyMissingOutputs,
            message: "Consider adding a ## Outputs section".to_string(),
            severity: Severity::Info,
            field: None,
            expected: None,
            actual: None,
        });
    }

    issues
}

fn has_heading(text: &str, pattern: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Aggregation helpers
// ---------------------------------------------------------------------------

/// Promote every warning to an error in place. Info issues are untouched.
fn escalate_warnings(issues: &mut [ValidationIssue]) {
    for issue in issues.iter_mut() {
        if issue.severity == Severity::Warning {
            issue.severity = Severity::Error;
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
