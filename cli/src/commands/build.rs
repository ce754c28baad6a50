//! # Dirctl Build Command
//!
//! File: cli/src/commands/build.rs
//!
//! ## Overview
//!
//! Implements `dirctl build`, which reads a tree-notation file and materializes
//! it below a working root:
//! - Locating the structure file (explicit argument, or discovery)
//! - Parsing and classifying its entries
//! - Creating directories, moving flat files into place, scaffolding the rest
//! - Reporting one line per change and a summary
//!
//! ## Examples
//!
//! ```bash
//! # Discover the structure file in the current directory and build it
//! dirctl build
//!
//! # Build a named file into another directory, without touching anything
//! dirctl build layout.txt --root ../new-service --dry-run
//! ```
//!
//! Example output:
//!
//! ```text
//! → Preview
//!  Working Root: /home/me/new-service
//!  Parsed Items: 4
//!
//! → Executing Build Plan
//!  [DIR ]  src
//!  [MOVE]  src/main.go                                        (from ./main.go)
//!  [FILE]  src/handlers.go
//!  [SKIP]  README.md                                          (exists)
//!
//! Summary: 1 Dirs | 1 Files | 1 Moved | 1 Skipped | 0 Failed
//! ```
//!
use crate::common::fs::io;
use crate::core::config;
use crate::core::error::{DirctlError, Result};
use crate::tree::{
    self,
    builder::{BuildSummary, NodeReport, Outcome, TreeBuilder},
    classifier::NodeKind,
    discovery,
};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Width of the path column in report lines.
const PATH_COLUMN_WIDTH: usize = 50;

/// # Build Command Arguments (`BuildArgs`)
///
/// Defines the command-line arguments accepted by `dirctl build`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Tree-notation file to build. When omitted, the working root is searched for one.
    pub file: Option<PathBuf>,

    /// Directory the tree is built in. Flat files to relocate are also looked up here.
    #[arg(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Show what would be done without changing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// # Handle Build Command (`handle_build`)
///
/// ## Workflow:
/// 1. Loads configuration and resolves the working root.
/// 2. Uses the given file, or discovers one (`MissingInputFile` if none).
/// 3. Parses and classifies it (`NoValidNodes` if it yields nothing).
/// 4. Runs the builder and prints the report.
///
/// Failures of individual nodes are part of the report and do not make the
/// command fail. Fatal errors happen before anything is written.
pub fn handle_build(args: BuildArgs) -> Result<()> {
    info!("Handling build command...");
    let cfg = config::load_config().context("Failed to load dirctl configuration")?;

    let root = resolve_root(&args.root)?;
    let structure_file = match args.file {
        Some(file) if file.is_file() => file,
        Some(file) => anyhow::bail!(DirctlError::MissingInputFile { searched: file }),
        None => discovery::find_structure_file(&root, &cfg.discovery)
            .ok_or_else(|| DirctlError::MissingInputFile {
                searched: root.clone(),
            })?,
    };
    println!("\n→ Using structure file: {}", structure_file.display());

    let content = io::read_file_to_string(&structure_file)?;
    let nodes = tree::read_nodes(&content);
    if nodes.is_empty() {
        anyhow::bail!(DirctlError::NoValidNodes {
            path: structure_file
        });
    }
    debug!("Classified nodes: {:?}", nodes);

    println!("\n→ Preview");
    println!(" Working Root: {}", root.display());
    println!(" Parsed Items: {}", nodes.len());

    println!("\n→ Executing Build Plan");
    let summary = TreeBuilder::new(&root, &cfg.build)
        .dry_run(args.dry_run)
        .build(&nodes);

    print_report(&summary, &root);
    Ok(())
}

/// Resolves the working root to an absolute path, requiring an existing directory.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        anyhow::bail!(DirctlError::FileSystem(format!(
            "Working root '{}' is not an existing directory.",
            root.display()
        )));
    }
    root.canonicalize()
        .with_context(|| format!("Failed to resolve working root '{}'", root.display()))
}

fn print_report(summary: &BuildSummary, root: &Path) {
    println!("{}", "-".repeat(70));
    for report in &summary.reports {
        if let Some(line) = format_report_line(report, root) {
            println!("{}", line);
        }
    }
    println!("{}", "-".repeat(70));

    let stats = summary.stats;
    println!(
        "Summary: {} Dirs | {} Files | {} Moved | {} Skipped | {} Failed",
        stats.created_dirs, stats.created_files, stats.moved, stats.skipped, stats.failed
    );
    if summary.dry_run {
        println!("\n - Dry run: nothing was changed -");
    } else {
        println!("\n ✓ Operation Complete");
    }
}

/// Formats one report line, or `None` for directories that already existed.
fn format_report_line(report: &NodeReport, root: &Path) -> Option<String> {
    let mut path = display_path(&report.target, root);
    if report.kind == NodeKind::Directory {
        path.push('/');
    }
    let (tag, details) = match &report.outcome {
        Outcome::ExistingDir => return None,
        Outcome::CreatedDir => ("[DIR ]", None),
        Outcome::Scaffolded => ("[FILE]", None),
        Outcome::Skipped => ("[SKIP]", Some("exists".to_string())),
        Outcome::Moved { from } => (
            "[MOVE]",
            Some(format!("from ./{}", display_path(from, root))),
        ),
        Outcome::Failed { reason } => ("[FAIL]", Some(reason.clone())),
    };
    Some(match details {
        Some(details) => format!(
            " {}  {:<width$} ({})",
            tag,
            path,
            details,
            width = PATH_COLUMN_WIDTH
        ),
        None => format!(" {}  {}", tag, path),
    })
}

fn display_path(path: &Path, root: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
