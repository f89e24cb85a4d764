mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    fix, init, lint, migrate, render, sections, FixArgs, InitArgs, LintArgs, MigrateArgs, RenderArgs, SectionsArgs,
};
use tracing_subscriber::EnvFilter;

/// Blockmail CLI - Block-based email documents
#[derive(Parser, Debug)]
#[command(name = "blockmail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a starter document
    Init(InitArgs),

    /// Render documents to HTML and plain text
    Render(RenderArgs),

    /// Check documents against the composition rules
    Lint(LintArgs),

    /// Apply every automatic fix to a document
    Fix(FixArgs),

    /// Upgrade a document to the current schema
    Migrate(MigrateArgs),

    /// List the built-in section templates
    Sections(SectionsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("BLOCKMAIL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Lint(args) => lint(args, &cwd),
            Command::Fix(args) => fix(args, &cwd),
            Command::Migrate(args) => migrate(args, &cwd),
            Command::Sections(args) => sections(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
