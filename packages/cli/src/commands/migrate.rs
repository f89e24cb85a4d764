use super::write_document;
use anyhow::{anyhow, Context, Result};
use blockmail_model::document::schema_version_of;
use blockmail_model::{Document, SCHEMA_VERSION};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Document to upgrade
    pub input: PathBuf,

    /// Write the upgraded document back to the input file
    #[arg(short, long)]
    pub write: bool,
}

pub fn migrate(args: MigrateArgs, _cwd: &Path) -> Result<()> {
    let source = fs::read_to_string(&args.input).with_context(|| format!("Cannot read {}", args.input.display()))?;
    let (from, document) = upgrade(&source).map_err(|e| anyhow!("{}: {}", args.input.display(), e))?;

    if !args.write {
        println!("{}", document.to_json_pretty()?);
        return Ok(());
    }

    if from == SCHEMA_VERSION as u64 {
        println!(
            "{} {} is already at schema version {}",
            "✓".green(),
            args.input.display(),
            SCHEMA_VERSION
        );
        return Ok(());
    }

    write_document(&args.input, &document)?;
    println!(
        "{} Migrated {} from schema {} to {}",
        "✓".green(),
        args.input.display(),
        from,
        SCHEMA_VERSION
    );
    Ok(())
}

/// Returns the stored schema version and the decoded, current-schema document
pub(crate) fn upgrade(source: &str) -> Result<(u64, Document)> {
    let value: Value = serde_json::from_str(source)?;
    let from = schema_version_of(&value)?;
    let document = Document::from_value(value)?;
    Ok((from, document))
}
