//! extdoc — generate a markdown reference page from an annotated native
//! extension source file.
//!
//! `extdoc graphics.cpp > Graphics.md`

use anyhow::{Context, Result};
use clap::Parser;
use extdoc::render;
use extdoc::revision;
use extdoc::source::Source;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "extdoc",
    about = "Generate reference documentation from annotated native extension sources"
)]
struct Cli {
    /// Native extension source file. Use - to read from stdin.
    file: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Repository web URL used for the revision link in the footer
    #[arg(long, default_value = "https://github.com/nasser/zajal")]
    repo_url: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let renderer = render::create_renderer(&cli.format, &cli.repo_url)?;
    let (source, repo_dir) = load(&cli.file)?;

    let doc = extdoc::document(&source, revision::timestamp(), revision::current(&repo_dir))
        .with_context(|| format!("cannot document {}", cli.file.display()))?;

    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// Warnings and diagnostics go to stderr; `EXTDOC_LOG` overrides the level.
fn init_logging() {
    let filter = EnvFilter::try_from_env("EXTDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read the source and pick the directory revision metadata is taken from.
fn load(path: &Path) -> Result<(Source, PathBuf)> {
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok((Source::new(input), PathBuf::from(".")));
    }

    let source = Source::read(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((source, dir))
}
