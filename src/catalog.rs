//! Skill Catalog
//!
//! Discovers SKILL.md files on disk and supports filtering and searching
//! over their metadata. Discovery is best-effort: a document that fails
//! to load is logged and skipped, never fatal to the overall listing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::loader::load_skill;
use crate::types::{ComplexityCounts, ListOptions, Skill};

/// Default base path for the skills directory.
pub const DEFAULT_SKILLS_PATH: &str = "skills";

// ---------------------------------------------------------------------------
// Paths and lookup
// ---------------------------------------------------------------------------

/// Path to a skill's SKILL.md file: `<base>/<name>/SKILL.md`.
pub fn get_skill_path(skill_name: &str, base_path: &Path) -> PathBuf {
    base_path.join(skill_name).join("SKILL.md")
}

/// Find a skill by name. Returns `None` when the bundle does not exist or
/// fails to load.
pub fn find_skill(skill_name: &str, base_path: &Path) -> Option<Skill> {
    load_skill(&get_skill_path(skill_name, base_path)).ok()
}

/// Recursively collect every SKILL.md path under `base_path`.
pub fn find_skill_files(base_path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_skill_files(base_path, &mut files);
    files.sort();
    files
}

fn collect_skill_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_skill_files(&path, files);
        } else if path.file_name().and_then(|n| n.to_str()) == Some("SKILL.md") {
            files.push(path);
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// List all available skills with optional filtering.
///
/// Documents that fail to load are skipped with a warning so a single bad
/// file never breaks the batch. Filters compose with logical AND; results
/// are sorted by name.
pub fn list_skills(options: &ListOptions) -> Vec<Skill> {
    let base_path = options
        .base_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SKILLS_PATH));

    let mut skills: Vec<Skill> = Vec::new();
    for file in find_skill_files(&base_path) {
        match load_skill(&file) {
            Ok(skill) => skills.push(skill),
            Err(err) => {
                warn!("Failed to load skill from {}: {}", file.display(), err);
            }
        }
    }

    let mut filtered: Vec<Skill> = skills
        .into_iter()
        .filter(|skill| matches_options(skill, options))
        .collect();

    filtered.sort_by(|a, b| a.name.cmp(&b.name));
    filtered
}

fn matches_options(skill: &Skill, options: &ListOptions) -> bool {
    let metadata = skill.metadata();

    if let Some(industry) = &options.industry {
        let matches = metadata
            .industry
            .as_deref()
            .is_some_and(|i| i.eq_ignore_ascii_case(industry));
        if !matches {
            return false;
        }
    }

    if let Some(complexity) = options.complexity {
        if metadata.complexity != Some(complexity) {
            return false;
        }
    }

    if let Some(driver) = &options.value_driver {
        let matches = metadata
            .value_driver
            .as_deref()
            .is_some_and(|d| d.eq_ignore_ascii_case(driver));
        if !matches {
            return false;
        }
    }

    if let Some(search) = &options.search {
        let needle = search.to_lowercase();
        let matches = skill.name.to_lowercase().contains(&needle)
            || skill.description.to_lowercase().contains(&needle);
        if !matches {
            return false;
        }
    }

    true
}

// ---------------------------------------------------------------------------
// Aggregate queries
// ---------------------------------------------------------------------------

/// All distinct industries across available skills, sorted.
pub fn get_industries(base_path: &Path) -> Vec<String> {
    let options = ListOptions {
        base_path: Some(base_path.to_path_buf()),
        ..Default::default()
    };

    let industries: BTreeSet<String> = list_skills(&options)
        .iter()
        .filter_map(|s| s.metadata().industry)
        .collect();

    industries.into_iter().collect()
}

/// All distinct value drivers across available skills, sorted.
pub fn get_value_drivers(base_path: &Path) -> Vec<String> {
    let options = ListOptions {
        base_path: Some(base_path.to_path_buf()),
        ..Default::default()
    };

    let drivers: BTreeSet<String> = list_skills(&options)
        .iter()
        .filter_map(|s| s.metadata().value_driver)
        .collect();

    drivers.into_iter().collect()
}

/// Skill counts per complexity bucket. Skills without a recognized
/// `complexity` value land in `unknown`.
pub fn get_skill_count_by_complexity(base_path: &Path) -> ComplexityCounts {
    let options = ListOptions {
        base_path: Some(base_path.to_path_buf()),
        ..Default::default()
    };

    let mut counts = ComplexityCounts::default();
    for skill in list_skills(&options) {
        match skill.metadata().complexity {
            Some(crate::types::Complexity::Low) => counts.low += 1,
            Some(crate::types::Complexity::Medium) => counts.medium += 1,
            Some(crate::types::Complexity::High) => counts.high += 1,
            None => counts.unknown += 1,
        }
    }

    counts
}
