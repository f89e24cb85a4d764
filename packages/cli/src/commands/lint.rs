use super::{find_documents, load_document};
use crate::config::Config;
use anyhow::Result;
use blockmail_linter::{Linter, RuleViolation, Severity};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Input document or directory to lint
    pub input: PathBuf,

    /// Show all violations including suggestions
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Totals {
    pub violations: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Totals {
    fn of(violations: &[RuleViolation]) -> Self {
        let count = |severity: Severity| violations.iter().filter(|v| v.severity == severity).count();
        Self {
            violations: violations.len(),
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
        }
    }

    fn add(&mut self, other: Totals) {
        self.violations += other.violations;
        self.errors += other.errors;
        self.warnings += other.warnings;
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport<'a> {
    file: String,
    violations: &'a [RuleViolation],
}

pub fn lint(args: LintArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let linter = Linter::new(config.registry());
    let json = args.format == "json";

    if !json {
        println!("🔍 {} Blockmail Linter", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        println!();
    }

    let files = find_documents(&args.input)?;
    let mut totals = Totals::default();
    for file in &files {
        totals.add(lint_file(&linter, file, args.verbose, json)?);
    }

    if !json {
        print_summary(files.len(), totals);
    }

    // Exit with error code if there are errors
    if totals.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn lint_file(linter: &Linter, file_path: &Path, verbose: bool, json: bool) -> Result<Totals> {
    let document = match load_document(file_path) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("{} Failed to load {}", "✗".red(), err);
            return Ok(Totals {
                violations: 0,
                errors: 1,
                warnings: 0,
            });
        }
    };

    let violations = linter.validate(&document.blocks);
    let totals = Totals::of(&violations);

    if json {
        let report = FileReport {
            file: file_path.display().to_string(),
            violations: &violations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(totals);
    }

    if violations.is_empty() {
        if verbose {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(totals);
    }

    println!("{}", file_path.display());
    for violation in &violations {
        if !verbose && violation.severity == Severity::Suggestion {
            continue;
        }
        let level = match violation.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Suggestion => "suggestion".blue().bold(),
        };
        let fixable = if violation.auto_fixable { " (fixable)".dimmed() } else { "".normal() };
        println!(
            "  {} [{}] {}: {}{}",
            level, violation.rule_id, violation.block_id, violation.message, fixable
        );
    }
    println!();

    Ok(totals)
}

fn print_summary(files_checked: usize, totals: Totals) {
    println!();
    println!(
        "✨ {} Linting complete!",
        if totals.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", files_checked);
    println!("   Total violations: {}", totals.violations);

    if totals.errors > 0 {
        println!("   {} {}", "Errors:".red(), totals.errors);
    }
    if totals.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), totals.warnings);
    }
    if totals.errors == 0 && totals.warnings == 0 {
        println!("   {} No issues found!", "✓".green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_count_by_severity() {
        let violations = vec![
            RuleViolation::new("b1", "button-link", Severity::Error, "dead link"),
            RuleViolation::new("b2", "image-alt-text", Severity::Warning, "no alt"),
            RuleViolation::new("b3", "heading-hierarchy", Severity::Suggestion, "small heading"),
        ];

        let mut totals = Totals::of(&violations);
        assert_eq!(
            totals,
            Totals {
                violations: 3,
                errors: 1,
                warnings: 1
            }
        );

        totals.add(Totals::of(&violations[..1]));
        assert_eq!(totals.errors, 2);
        assert_eq!(totals.violations, 4);
    }
}
