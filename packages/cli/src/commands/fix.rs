use super::{load_document, write_document};
use crate::config::Config;
use anyhow::{anyhow, Result};
use blockmail_editor::{EditSession, History};
use blockmail_linter::{Linter, RuleViolation};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct FixArgs {
    /// Document to repair
    pub input: PathBuf,

    /// Write the result back to the input file instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

/// Outcome of one fix run
#[derive(Debug)]
pub(crate) struct FixReport {
    pub fixed: Vec<RuleViolation>,
    pub remaining: Vec<RuleViolation>,
}

pub fn fix(args: FixArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let linter = Linter::new(config.registry());
    let document = load_document(&args.input)?;

    let key = args.input.display().to_string();
    let mut session = EditSession::with_history(key, document, History::with_max_levels(config.history_limit))?;
    let report = fix_session(&linter, &mut session)?;

    let document = session
        .document()
        .ok_or_else(|| anyhow!("Session has no document"))?;

    if args.write {
        write_document(&args.input, &document)?;
    } else {
        println!("{}", document.to_json_pretty()?);
    }

    // Report on stderr so the printed document stays pipeable
    for violation in &report.fixed {
        eprintln!("  {} [{}] {}", "✓".green(), violation.rule_id, violation.block_id);
    }
    for violation in &report.remaining {
        eprintln!(
            "  {} [{}] {}: {}",
            "•".yellow(),
            violation.rule_id,
            violation.block_id,
            violation.message
        );
    }
    eprintln!(
        "{} Fixed {} issues, {} need manual attention{}",
        "🔧".green(),
        report.fixed.len(),
        report.remaining.len(),
        if args.write {
            format!(" ({} updated)", args.input.display())
        } else {
            String::new()
        }
    );

    Ok(())
}

/// Apply every available fix as a single history step
pub(crate) fn fix_session(linter: &Linter, session: &mut EditSession) -> Result<FixReport> {
    let before = linter.validate(session.blocks());
    let fixed_blocks = linter.auto_fix_all(session.blocks());

    if fixed_blocks.as_slice() != session.blocks() {
        session.replace_blocks(fixed_blocks)?;
    }

    let remaining = linter.validate(session.blocks());
    let fixed = before
        .into_iter()
        .filter(|v| v.auto_fixable && !remaining.iter().any(|r| r.is(&v.block_id, &v.rule_id)))
        .collect();

    Ok(FixReport { fixed, remaining })
}
