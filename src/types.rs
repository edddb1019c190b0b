//! Skillkit - Type Definitions
//!
//! All shared types for skill parsing, validation, and cataloging.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Validation ──────────────────────────────────────────────────

/// How severely an issue affects a skill document.
///
/// Only `Error` blocks validity; `Warning` is advisory but can be
/// escalated in strict mode, and `Info` is always advisory.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// Stable identifier for each validation rule.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    FrontmatterEmpty,
    FrontmatterParseError,
    NameRequired,
    NameTooShort,
    NameTooLong,
    NameInvalidFormat,
    NameConsecutiveHyphens,
    NameHyphenBoundary,
    NameMismatch,
    DescriptionRequired,
    DescriptionTooShort,
    DescriptionTooLong,
    DescriptionTooBrief,
    CompatibilityTooLong,
    MetadataInvalidType,
    MetadataValueInvalid,
    BodyTooLong,
    BodyMissingSummary,
    BodyMissingInputs,
    BodyMissingOutputs,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::FrontmatterEmpty => "FRONTMATTER_EMPTY",
            IssueCode::FrontmatterParseError => "FRONTMATTER_PARSE_ERROR",
            IssueCode::NameRequired => "NAME_REQUIRED",
            IssueCode::NameTooShort => "NAME_TOO_SHORT",
            IssueCode::NameTooLong => "NAME_TOO_LONG",
            IssueCode::NameInvalidFormat => "NAME_INVALID_FORMAT",
            IssueCode::NameConsecutiveHyphens => "NAME_CONSECUTIVE_HYPHENS",
            IssueCode::NameHyphenBoundary => "NAME_HYPHEN_BOUNDARY",
            IssueCode::NameMismatch => "NAME_MISMATCH",
            IssueCode::DescriptionRequired => "DESCRIPTION_REQUIRED",
            IssueCode::DescriptionTooShort => "DESCRIPTION_TOO_SHORT",
            IssueCode::DescriptionTooLong => "DESCRIPTION_TOO_LONG",
            IssueCode::DescriptionTooBrief => "DESCRIPTION_TOO_BRIEF",
            IssueCode::CompatibilityTooLong => "COMPATIBILITY_TOO_LONG",
            IssueCode::MetadataInvalidType => "METADATA_INVALID_TYPE",
            IssueCode::MetadataValueInvalid => "METADATA_VALUE_INVALID",
            IssueCode::BodyTooLong => "BODY_TOO_LONG",
            IssueCode::BodyMissingSummary => "BODY_MISSING_SUMMARY",
            IssueCode::BodyMissingInputs => "BODY_MISSING_INPUTS",
            IssueCode::BodyMissingOutputs => "BODY_MISSING_OUTPUTS",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding. Issues are independent; one issue never
/// suppresses another.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

/// Per-severity issue counts.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

/// The outcome of validating one skill document.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Messages of all error-severity issues, in issue order.
    pub errors: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<SkillFrontmatter>,
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// Build a result from an ordered issue list. `is_valid` is true iff
    /// no error-severity issue is present.
    pub fn from_issues(
        issues: Vec<ValidationIssue>,
        frontmatter: Option<SkillFrontmatter>,
    ) -> Self {
        let mut summary = ValidationSummary::default();
        for issue in &issues {
            match issue.severity {
                Severity::Error => summary.error_count += 1,
                Severity::Warning => summary.warning_count += 1,
                Severity::Info => summary.info_count += 1,
            }
        }

        let errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| i.message.clone())
            .collect();

        ValidationResult {
            is_valid: summary.error_count == 0,
            errors,
            issues,
            frontmatter,
            summary,
        }
    }
}

// ─── Frontmatter ─────────────────────────────────────────────────

/// Parsed SKILL.md frontmatter. All fields are optional at this level;
/// the validator and loader decide which are required.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillFrontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub compatibility: Option<String>,
    #[serde(rename = "allowed-tools")]
    pub allowed_tools: Option<String>,
    /// Free-form metadata map, kept dynamically typed so validation can
    /// inspect the actual kind of each value.
    pub metadata: Option<Value>,
}

impl SkillFrontmatter {
    /// Project a raw frontmatter map into the typed view. String fields
    /// holding a non-string value are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        fn str_field(value: &Value, key: &str) -> Option<String> {
            value.get(key).and_then(Value::as_str).map(str::to_string)
        }

        SkillFrontmatter {
            name: str_field(value, "name"),
            description: str_field(value, "description"),
            license: str_field(value, "license"),
            compatibility: str_field(value, "compatibility"),
            allowed_tools: str_field(value, "allowed-tools"),
            metadata: value.get("metadata").cloned(),
        }
    }
}

/// Skill complexity bucket used by catalog filters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }

    /// Parse a complexity bucket; anything unrecognized is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Complexity::Low),
            "medium" => Some(Complexity::Medium),
            "high" => Some(Complexity::High),
            _ => None,
        }
    }
}

/// Where a skill definition originally came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DerivedFrom {
    UseCase,
    WorkflowTemplate,
    Assessment,
    User,
}

impl DerivedFrom {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "use_case" => Some(DerivedFrom::UseCase),
            "workflow_template" => Some(DerivedFrom::WorkflowTemplate),
            "assessment" => Some(DerivedFrom::Assessment),
            "user" => Some(DerivedFrom::User),
            _ => None,
        }
    }
}

/// Typed projection of the frontmatter `metadata` map. Known keys are
/// narrowed; everything else lands in `extra` untouched.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SkillMetadata {
    pub industry: Option<String>,
    pub segment: Option<String>,
    pub function: Option<String>,
    pub value_driver: Option<String>,
    pub complexity: Option<Complexity>,
    pub derived_from: Option<DerivedFrom>,
    pub source_id: Option<String>,
    pub extra: serde_json::Map<String, Value>,
}

impl SkillMetadata {
    const KNOWN_KEYS: [&'static str; 7] = [
        "industry",
        "segment",
        "function",
        "value_driver",
        "complexity",
        "derived_from",
        "source_id",
    ];

    /// Build the typed view from a raw metadata value. Non-mapping input
    /// yields the empty default; values of the wrong kind are skipped.
    pub fn from_value(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(m) => m,
            None => return SkillMetadata::default(),
        };

        let str_key = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        let mut extra = serde_json::Map::new();
        for (key, val) in map {
            if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                extra.insert(key.clone(), val.clone());
            }
        }

        SkillMetadata {
            industry: str_key("industry"),
            segment: str_key("segment"),
            function: str_key("function"),
            value_driver: str_key("value_driver"),
            complexity: map
                .get("complexity")
                .and_then(Value::as_str)
                .and_then(Complexity::parse),
            derived_from: map
                .get("derived_from")
                .and_then(Value::as_str)
                .and_then(DerivedFrom::parse),
            source_id: str_key("source_id"),
            extra,
        }
    }
}

// ─── Skill ───────────────────────────────────────────────────────

/// A loaded skill: identity, summary, the full frontmatter, the raw and
/// body text, and the derived section map.
#[derive(Clone, Debug, Serialize)]
pub struct Skill {
    /// Skill name from frontmatter.
    pub name: String,
    /// Skill description from frontmatter.
    pub description: String,
    /// Full parsed frontmatter.
    pub frontmatter: SkillFrontmatter,
    /// Markdown body (after frontmatter), trimmed.
    pub body: String,
    /// Full raw content.
    pub content: String,
    /// File path if loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Body sections keyed by normalized `##` heading
    /// (lowercased, whitespace collapsed to hyphens).
    pub sections: HashMap<String, String>,
}

impl Skill {
    /// Typed view of the frontmatter metadata map. Absent or malformed
    /// metadata yields the empty default.
    pub fn metadata(&self) -> SkillMetadata {
        self.frontmatter
            .metadata
            .as_ref()
            .map(SkillMetadata::from_value)
            .unwrap_or_default()
    }
}

// ─── Catalog ─────────────────────────────────────────────────────

/// Filter and search options for listing skills. All filters compose
/// with logical AND.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// Filter by metadata `industry` (case-insensitive).
    pub industry: Option<String>,
    /// Filter by metadata `complexity`.
    pub complexity: Option<Complexity>,
    /// Filter by metadata `value_driver` (case-insensitive).
    pub value_driver: Option<String>,
    /// Case-insensitive substring search over name + description.
    pub search: Option<String>,
    /// Base directory for skills; defaults to `skills`.
    pub base_path: Option<std::path::PathBuf>,
}

/// Skill counts per complexity bucket.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ComplexityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub unknown: usize,
}
