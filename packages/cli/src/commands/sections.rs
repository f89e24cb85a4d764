use anyhow::Result;
use blockmail_model::{builtin_sections, SectionTemplate};
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct SectionsArgs {
    /// Print templates as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn sections(args: SectionsArgs, _cwd: &Path) -> Result<()> {
    let templates = builtin_sections();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    println!("{}", "📦 Built-in sections".bright_blue().bold());
    for template in &templates {
        println!("  {:<16} {}", template.id.bright_white(), describe(template).dimmed());
    }
    Ok(())
}

fn describe(template: &SectionTemplate) -> String {
    let kinds: Vec<&str> = template.blocks.iter().map(|data| data.type_name()).collect();
    format!("{} ({})", template.name, kinds.join(" + "))
}
