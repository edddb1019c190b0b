//! Skillkit CLI
//!
//! Validates SKILL.md files and lists the skill catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use skillkit::catalog;
use skillkit::types::{Complexity, ListOptions, Severity, ValidationIssue, ValidationResult};
use skillkit::validator::{self, ValidateOptions};

/// Skillkit -- validate and browse SKILL.md skill bundles.
#[derive(Parser, Debug)]
#[command(name = "skillkit", version, about = "Validate and browse SKILL.md skill bundles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a skill file, or all skills with --all.
    Validate {
        /// Path to a SKILL.md file.
        file: Option<PathBuf>,

        /// Validate all skills under the base directory.
        #[arg(long, short = 'a')]
        all: bool,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Base directory for --all.
        #[arg(long, default_value = catalog::DEFAULT_SKILLS_PATH)]
        base: PathBuf,
    },
    /// List skills in the catalog.
    List {
        /// Filter by metadata industry.
        #[arg(long)]
        industry: Option<String>,

        /// Filter by complexity (low, medium, high).
        #[arg(long)]
        complexity: Option<String>,

        /// Filter by metadata value driver.
        #[arg(long)]
        value_driver: Option<String>,

        /// Search name and description.
        #[arg(long)]
        search: Option<String>,

        /// Base directory for skills.
        #[arg(long, default_value = catalog::DEFAULT_SKILLS_PATH)]
        base: PathBuf,
    },
}

// ---- Issue Rendering --------------------------------------------------------

fn print_issue(issue: &ValidationIssue) {
    let icon = match issue.severity {
        Severity::Error => "✗".red(),
        Severity::Warning => "⚠".yellow(),
        Severity::Info => "ℹ".blue(),
    };

    let field_info = match &issue.field {
        Some(field) => format!(" [{}]", field).dimmed().to_string(),
        None => String::new(),
    };

    println!("  {} {}{}", icon, issue.message, field_info);

    if let Some(expected) = &issue.expected {
        println!("    {} {}", "expected:".dimmed(), expected);
    }
    if let Some(actual) = &issue.actual {
        println!("    {} {}", "actual:".dimmed(), actual);
    }
}

fn print_result(path: &Path, result: &ValidationResult) {
    let status = if result.is_valid {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("\n{} {}", status, path.display());

    for issue in &result.issues {
        print_issue(issue);
    }

    println!(
        "{}",
        format!(
            "  {} errors, {} warnings, {} info",
            result.summary.error_count,
            result.summary.warning_count,
            result.summary.info_count
        )
        .dimmed()
    );
}

// ---- Validate Command -------------------------------------------------------

/// Validate one file against its bundle directory name. Returns whether
/// the file passed.
fn validate_file(path: &Path, strict: bool) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let bundle_name = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());

    let options = ValidateOptions {
        strict_mode: strict,
    };

    let result = match bundle_name {
        Some(bundle) => validator::validate_skill_bundle(&content, bundle, options),
        None => validator::validate_skill(&content),
    };

    print_result(path, &result);
    Ok(result.is_valid)
}

fn validate_all(base: &Path, strict: bool) -> Result<i32> {
    let files = catalog::find_skill_files(base);

    if files.is_empty() {
        println!("No SKILL.md files found in {}/ directory", base.display());
        return Ok(0);
    }

    println!("Found {} skill(s) to validate", files.len());

    let mut passed = 0;
    let mut failed = 0;

    for file in &files {
        if validate_file(file, strict)? {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    println!("\n{}", "─".repeat(50));
    let passed_text = format!("{} passed", passed).green();
    let failed_text = if failed > 0 {
        format!("{} failed", failed).red()
    } else {
        format!("{} failed", failed).green()
    };
    println!("\nValidation complete: {}, {}", passed_text, failed_text);

    Ok(if failed > 0 { 1 } else { 0 })
}

// ---- List Command -----------------------------------------------------------

fn list(options: &ListOptions) -> Result<i32> {
    let skills = catalog::list_skills(options);

    if skills.is_empty() {
        println!("No skills found");
        return Ok(0);
    }

    for skill in &skills {
        let complexity = skill
            .metadata()
            .complexity
            .map(|c| format!(" [{}]", c.as_str()).dimmed().to_string())
            .unwrap_or_default();
        println!("{}{}", skill.name.cyan(), complexity);
        println!("  {}", skill.description.dimmed());
    }

    println!("\n{} skill(s)", skills.len());
    Ok(0)
}

// ---- Entry Point ------------------------------------------------------------

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Validate {
            file,
            all,
            strict,
            base,
        } => {
            if all {
                validate_all(&base, strict)
            } else if let Some(file) = file {
                let is_valid = validate_file(&file, strict)?;
                Ok(if is_valid { 0 } else { 1 })
            } else {
                eprintln!("Please specify a file or use --all");
                Ok(1)
            }
        }
        Commands::List {
            industry,
            complexity,
            value_driver,
            search,
            base,
        } => {
            let complexity = match complexity.as_deref() {
                Some(raw) => match Complexity::parse(raw) {
                    Some(c) => Some(c),
                    None => {
                        eprintln!("Unknown complexity: {} (expected low, medium, or high)", raw);
                        return Ok(1);
                    }
                },
                None => None,
            };

            let options = ListOptions {
                industry,
                complexity,
                value_driver,
                search,
                base_path: Some(base),
            };
            list(&options)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
