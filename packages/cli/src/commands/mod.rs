pub mod fix;
pub mod init;
pub mod lint;
pub mod migrate;
pub mod render;
pub mod sections;

pub use fix::{fix, FixArgs};
pub use init::{init, InitArgs};
pub use lint::{lint, LintArgs};
pub use migrate::{migrate, MigrateArgs};
pub use render::{render, RenderArgs};
pub use sections::{sections, SectionsArgs};

use crate::config::DEFAULT_CONFIG_NAME;
use anyhow::{anyhow, Context, Result};
use blockmail_model::Document;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read and migrate a document file
pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json(&source).map_err(|e| anyhow!("{}: {}", path.display(), e))
}

pub(crate) fn write_document(path: &Path, document: &Document) -> Result<()> {
    let json = document.to_json_pretty()?;
    fs::write(path, json + "\n").with_context(|| format!("Cannot write {}", path.display()))
}

/// A single document, or every `.json` document under a directory
pub(crate) fn find_documents(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().map(|e| e == "json").unwrap_or(false)
                && path.file_name().map(|n| n != DEFAULT_CONFIG_NAME).unwrap_or(false)
        })
        .collect();
    files.sort();

    Ok(files)
}
