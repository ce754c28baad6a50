//! # Dirctl Generate Command
//!
//! File: cli/src/commands/generate.rs
//!
//! ## Overview
//!
//! Implements `dirctl generate`, which walks a directory and writes it out as
//! tree notation (by default to `directory-structure.txt` in that directory).
//! The written document can be fed straight back into `dirctl build`.
//!
//! ## Examples
//!
//! ```bash
//! # Snapshot the current directory
//! dirctl generate
//!
//! # Print the document for another directory without writing anything
//! dirctl generate --root ../api --stdout
//! ```
//!
use crate::common::fs::io;
use crate::core::config::{self, GenerateConfig};
use crate::core::error::Result;
use crate::tree::serializer::{render_document, root_label, TreeSerializer};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// # Generate Command Arguments (`GenerateArgs`)
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory to describe.
    #[arg(long, short, default_value = ".")]
    pub root: PathBuf,

    /// File to write the document to (relative paths resolve against the root).
    /// Defaults to `generate.output` from the configuration.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

/// # Handle Generate Command (`handle_generate`)
///
/// Walks `args.root`, renders the tree, and either prints the whole document
/// (`--stdout`) or shows the tree and saves the document.
pub fn handle_generate(args: GenerateArgs) -> Result<()> {
    info!("Handling generate command...");
    let cfg = config::load_config().context("Failed to load dirctl configuration")?;

    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve directory '{}'", args.root.display()))?;

    let serializer = TreeSerializer::new().with_excludes(&cfg.generate.excludes);
    let (tree, stats) = serializer.render_tree(&root)?;
    let document = render_document(&root_label(&root), &tree, stats);
    info!(
        "Rendered {} file(s) and {} dir(s) under {}",
        stats.files,
        stats.dirs,
        root.display()
    );

    if args.stdout {
        print!("{}", document);
        return Ok(());
    }

    let target = output_path(&root, args.output.as_deref(), &cfg.generate);
    println!("\n→ Generating '{}'...\n", target.display());
    println!("{}", tree.trim_end());
    io::write_string_to_file(&target, &document)?;
    println!("\n ✓ Success: Saved to {}", target.display());
    Ok(())
}

/// Chooses the output file: the CLI flag, otherwise the configured path, resolved against `root`.
fn output_path(root: &Path, flag: Option<&Path>, config: &GenerateConfig) -> PathBuf {
    let chosen = flag
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output));
    if chosen.is_absolute() {
        chosen
    } else {
        root.join(chosen)
    }
}
