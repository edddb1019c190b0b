//! Skill Loader
//!
//! Loads SKILL.md files into [`Skill`] values for display and consumption.
//! Unlike validation, loading fails hard when the document has no usable
//! identity: a skill without `name` or `description` cannot be used
//! downstream.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use thiserror::Error;

use crate::frontmatter;
use crate::types::{IssueCode, Skill, SkillFrontmatter};

/// Hard failures while loading a skill document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read skill file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse frontmatter: {0}")]
    Frontmatter(String),
    #[error("SKILL.md must have a \"name\" field in frontmatter")]
    MissingName,
    #[error("SKILL.md must have a \"description\" field in frontmatter")]
    MissingDescription,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load a skill from a SKILL.md file path.
pub fn load_skill(path: &Path) -> Result<Skill, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut skill = load_skill_from_string(&content)?;
    skill.path = Some(path.display().to_string());
    Ok(skill)
}

/// Load a skill from raw SKILL.md content.
///
/// Fails when the frontmatter cannot be parsed or when `name` or
/// `description` is missing.
pub fn load_skill_from_string(content: &str) -> Result<Skill, LoadError> {
    let extraction = frontmatter::extract(content).map_err(|issue| match issue.code {
        IssueCode::FrontmatterParseError => LoadError::Frontmatter(issue.message),
        // An absent or empty block carries no name at all.
        _ => LoadError::MissingName,
    })?;

    let fm = SkillFrontmatter::from_value(&extraction.frontmatter);

    let name = fm.name.clone().ok_or(LoadError::MissingName)?;
    let description = fm.description.clone().ok_or(LoadError::MissingDescription)?;

    Ok(Skill {
        name,
        description,
        frontmatter: fm,
        body: extraction.body.trim().to_string(),
        content: content.to_string(),
        path: None,
        sections: parse_sections(&extraction.body),
    })
}

// ---------------------------------------------------------------------------
// Section parsing
// ---------------------------------------------------------------------------

/// Derive the section map from a Markdown body.
///
/// A line-scanning pass: each `##` heading opens a section keyed by the
/// lowercased heading with whitespace collapsed to hyphens; following
/// lines accumulate until the next heading. Text before the first heading
/// is not captured, and a repeated heading overwrites its predecessor.
pub fn parse_sections(body: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();

    let header_re = match Regex::new(r"^##\s+(.+)$") {
        Ok(re) => re,
        Err(_) => return sections,
    };
    let whitespace_re = match Regex::new(r"\s+") {
        Ok(re) => re,
        Err(_) => return sections,
    };

    let mut current_section = String::new();
    let mut current_content: Vec<&str> = Vec::new();

    for line in body.split('\n') {
        if let Some(caps) = header_re.captures(line) {
            if !current_section.is_empty() {
                sections.insert(
                    current_section.clone(),
                    current_content.join("\n").trim().to_string(),
                );
            }
            let heading = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            current_section = whitespace_re
                .replace_all(&heading.to_lowercase(), "-")
                .to_string();
            current_content.clear();
        } else if !current_section.is_empty() {
            current_content.push(line);
        }
    }

    if !current_section.is_empty() {
        sections.insert(
            current_section,
            current_content.join("\n").trim().to_string(),
        );
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "---\nname: patient-intake\ndescription: Collect patient information for the intake queue.\nmetadata:\n  industry: healthcare\n---\nIntro text before any section.\n## Summary\nHandles patient intake.\n## Input Required\nA completed intake form.\n## Outputs\nA normalized record.\n";

    #[test]
    fn test_load_from_string() {
        let skill = load_skill_from_string(CONTENT).unwrap();
        assert_eq!(skill.name, "patient-intake");
        assert_eq!(
            skill.description,
            "Collect patient information for the intake queue."
        );
        assert!(skill.path.is_none());
        assert!(skill.body.starts_with("Intro text"));
        assert_eq!(skill.content, CONTENT);
        assert_eq!(skill.metadata().industry.as_deref(), Some("healthcare"));
    }

    #[test]
    fn test_sections_normalized_keys() {
        let skill = load_skill_from_string(CONTENT).unwrap();
        assert_eq!(
            skill.sections.get("summary").map(String::as_str),
            Some("Handles patient intake.")
        );
        assert_eq!(
            skill.sections.get("input-required").map(String::as_str),
            Some("A completed intake form.")
        );
        assert_eq!(
            skill.sections.get("outputs").map(String::as_str),
            Some("A normalized record.")
        );
    }

    #[test]
    fn test_text_before_first_heading_not_captured() {
        let skill = load_skill_from_string(CONTENT).unwrap();
        assert!(!skill
            .sections
            .values()
            .any(|s| s.contains("Intro text before any section.")));
        // But it stays part of the body.
        assert!(skill.body.contains("Intro text before any section."));
    }

    #[test]
    fn test_repeated_heading_overwrites() {
        let sections = parse_sections("## Notes\nfirst\n## Notes\nsecond");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get("notes").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_deeper_headings_are_not_sections() {
        let sections = parse_sections("## Top\ncontent\n### Nested\nmore");
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections.get("top").map(String::as_str),
            Some("content\n### Nested\nmore")
        );
    }

    #[test]
    fn test_missing_name_fails() {
        let content = "---\ndescription: Something descriptive.\n---\nBody";
        assert!(matches!(
            load_skill_from_string(content),
            Err(LoadError::MissingName)
        ));
    }

    #[test]
    fn test_missing_description_fails() {
        let content = "---\nname: a-skill\n---\nBody";
        assert!(matches!(
            load_skill_from_string(content),
            Err(LoadError::MissingDescription)
        ));
    }

    #[test]
    fn test_no_frontmatter_fails_as_missing_name() {
        assert!(matches!(
            load_skill_from_string("No frontmatter here."),
            Err(LoadError::MissingName)
        ));
    }

    #[test]
    fn test_malformed_yaml_fails_as_frontmatter_error() {
        let content = "---\nname: [broken\n---\nBody";
        assert!(matches!(
            load_skill_from_string(content),
            Err(LoadError::Frontmatter(_))
        ));
    }

    #[test]
    fn test_load_skill_sets_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SKILL.md");
        std::fs::write(&path, CONTENT).unwrap();

        let skill = load_skill(&path).unwrap();
        assert_eq!(skill.path.as_deref(), Some(path.display().to_string().as_str()));
    }

    #[test]
    fn test_load_skill_missing_file_is_io_error() {
        let result = load_skill(Path::new("/nonexistent/SKILL.md"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
