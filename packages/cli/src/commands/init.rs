use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use blockmail_editor::{EditSession, SectionTarget};
use blockmail_model::{find_builtin, Document};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

const STARTER_SECTIONS: [&str; 3] = ["header", "welcome", "footer"];

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Name of the starter document
    #[arg(short, long, default_value = "welcome")]
    pub name: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Blockmail project...".bright_blue().bold());

    let config = Config::default();
    fs::write(&config_path, serde_json::to_string_pretty(&config)? + "\n")?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let document_name = format!("{}.json", args.name);
    let document_path = cwd.join(&document_name);
    if !document_path.exists() || args.force {
        let document = starter_document(&args.name)?;
        super::write_document(&document_path, &document)?;
        println!("  {} Created {}", "✓".green(), document_name);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", document_name);
    println!("  2. Run: blockmail lint {}", document_name);
    println!("  3. Run: blockmail render {}", document_name);
    println!("  4. Check output in {}/", config.out_dir);

    Ok(())
}

/// Header, welcome hero and footer, built through the editor
pub(crate) fn starter_document(key: &str) -> Result<Document> {
    let mut session = EditSession::new(key, Document::default())?;
    for id in STARTER_SECTIONS {
        let template = find_builtin(id).ok_or_else(|| anyhow!("Missing built-in section {id}"))?;
        session.insert_section(&template, SectionTarget::Append)?;
    }
    session.document().ok_or_else(|| anyhow!("Session has no document"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmail_model::BlockKind;

    #[test]
    fn test_starter_document_shape() {
        let document = starter_document("welcome").unwrap();
        let kinds: Vec<_> = document.blocks.iter().filter_map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Logo,
                BlockKind::Spacer,
                BlockKind::Hero,
                BlockKind::Divider,
                BlockKind::Footer
            ]
        );
    }

    #[test]
    fn test_init_writes_config_and_document() {
        let dir = tempfile::tempdir().unwrap();
        init(
            InitArgs {
                name: "hello".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
        let document = super::super::load_document(&dir.path().join("hello.json")).unwrap();
        assert_eq!(document.blocks.len(), 5);
    }
}
