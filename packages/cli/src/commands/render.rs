use super::{find_documents, load_document};
use crate::config::Config;
use anyhow::{anyhow, Result};
use blockmail_compiler_html::{render_with_options, RenderOptions, RenderOutput};
use blockmail_model::Document;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document or directory of documents to render
    pub input: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit HTML without indentation
    #[arg(long)]
    pub compact: bool,

    /// Print the HTML to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let files = find_documents(&args.input)?;

    if files.is_empty() {
        println!("{}", "⚠️  No documents found".yellow());
        return Ok(());
    }

    let out_dir = match &args.out {
        Some(out) => cwd.join(out),
        None => config.get_out_dir(cwd),
    };
    let options = render_options(&config, args.compact);

    if !args.stdout {
        println!("{}", "📨 Rendering email documents...".bright_blue().bold());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let result = load_document(file).and_then(|document| {
            let output = render_document(&document, file, &options);
            if args.stdout {
                println!("{}", output.html);
                Ok(None)
            } else {
                write_output(file, &out_dir, &output).map(Some)
            }
        });

        match result {
            Ok(Some(html_path)) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), file.display(), html_path.display());
            }
            Ok(None) => success_count += 1,
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), file.display(), e.to_string().red());
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} documents failed to render", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!("{} Rendered {} documents successfully", "✅".green(), success_count);
        Ok(())
    } else {
        println!(
            "{} Rendered {} documents, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} documents failed to render", error_count))
    }
}

pub(crate) fn render_options(config: &Config, compact: bool) -> RenderOptions {
    RenderOptions {
        pretty: config.pretty && !compact,
        assets: config.assets.clone(),
        ..RenderOptions::default()
    }
}

fn render_document(document: &Document, file: &Path, options: &RenderOptions) -> RenderOutput {
    let options = RenderOptions {
        title: file_stem(file),
        ..options.clone()
    };
    let output = render_with_options(&document.blocks, &document.global_settings, &options);

    for fault in &output.faults {
        eprintln!(
            "    {} block {} has unsupported type {:?}; rendered a placeholder",
            "⚠".yellow(),
            fault.block_id,
            fault.type_name
        );
    }
    output
}

/// Writes `<stem>.html` and `<stem>.txt`, returning the HTML path
pub(crate) fn write_output(file: &Path, out_dir: &Path, output: &RenderOutput) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;

    let stem = file_stem(file);
    let html_path = out_dir.join(format!("{stem}.html"));
    let text_path = out_dir.join(format!("{stem}.txt"));
    fs::write(&html_path, &output.html)?;
    fs::write(&text_path, &output.plain_text)?;

    info!(html = %html_path.display(), text = %text_path.display(), "Wrote rendered email");
    Ok(html_path)
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "email".to_string())
}
