//! # Dirctl Tree Builder
//!
//! File: cli/src/tree/builder.rs
//!
//! ## Overview
//!
//! Materializes a classified node list on disk, below a working root.
//!
//! ## Architecture
//!
//! Parent resolution uses a stack of `(depth, path)` pairs holding the chain
//! of currently open directories. For every node, in document order:
//!
//! 1. **Unwind**: pop every entry whose depth is `>=` the node's depth. Only
//!    strictly increasing depths are ever pushed, so one pass handles dedents
//!    of any size.
//! 2. **Resolve**: the top of the stack is the parent; an empty stack means the
//!    working root.
//! 3. **Plan** one `Action` by inspecting the target path (and, for files, the
//!    working root).
//! 4. **Apply** the action unless this is a dry run, recording a `NodeReport`.
//!
//! | Node      | Target state                    | Action      |
//! |-----------|---------------------------------|-------------|
//! | directory | missing                         | `CreateDir` |
//! | directory | directory                       | `KeepDir`   |
//! | directory | something else                  | `Conflict`  |
//! | file      | exists                          | `Skip`      |
//! | file      | missing, `<root>/<name>` a file | `Move`      |
//! | file      | missing                         | `Scaffold`  |
//!
//! Failures never stop the pass. Each failed node is logged, reported as
//! `Outcome::Failed`, and the builder moves on to the next node. Directories
//! are always pushed, including conflicting ones, so their children fail
//! visibly instead of landing in the wrong place.
//!
//! ## Usage
//!
//! ```rust
//! let summary = TreeBuilder::new(&root, &cfg.build)
//!     .dry_run(args.dry_run)
//!     .build(&nodes);
//! println!("{} created", summary.stats.created_dirs);
//! ```
//!
use super::classifier::{Node, NodeKind};
use crate::common::fs::io;
use crate::core::config::BuildConfig;
use crate::core::error::DirctlError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// The stack of open ancestor directories.
#[derive(Debug, Default)]
struct PathStack {
    entries: Vec<(usize, PathBuf)>,
}

impl PathStack {
    fn unwind(&mut self, depth: usize) {
        while self.entries.last().is_some_and(|(d, _)| *d >= depth) {
            self.entries.pop();
        }
    }

    fn parent<'a>(&'a self, root: &'a Path) -> &'a Path {
        self.entries.last().map_or(root, |(_, path)| path.as_path())
    }

    fn push(&mut self, depth: usize, path: PathBuf) {
        self.entries.push((depth, path));
    }
}

/// Computes the target path of every node without touching the filesystem.
///
/// A node's parent is the nearest preceding *directory* node with a strictly
/// smaller depth; nodes without one are placed directly under `root`.
pub fn resolve_targets(nodes: &[Node], root: &Path) -> Vec<PathBuf> {
    let mut stack = PathStack::default();
    nodes
        .iter()
        .map(|node| {
            stack.unwind(node.depth);
            let target = stack.parent(root).join(&node.name);
            if node.is_dir() {
                stack.push(node.depth, target.clone());
            }
            target
        })
        .collect()
}

/// What the builder intends to do for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir,
    KeepDir,
    Conflict,
    Skip,
    Move { from: PathBuf },
    Scaffold,
}

/// What happened to one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    CreatedDir,
    ExistingDir,
    Skipped,
    Moved { from: PathBuf },
    Scaffolded,
    Failed { reason: String },
}

/// Per-node result of a build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    pub kind: NodeKind,
    pub target: PathBuf,
    pub outcome: Outcome,
}

/// Running tallies of a build pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub created_dirs: usize,
    pub created_files: usize,
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BuildStats {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::CreatedDir => self.created_dirs += 1,
            Outcome::ExistingDir => {}
            Outcome::Skipped => self.skipped += 1,
            Outcome::Moved { .. } => self.moved += 1,
            Outcome::Scaffolded => self.created_files += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Number of filesystem changes made (or planned, for a dry run).
    pub fn mutations(&self) -> usize {
        self.created_dirs + self.created_files + self.moved
    }
}

/// Everything a build pass produced.
#[derive(Debug, Default, Clone)]
pub struct BuildSummary {
    pub reports: Vec<NodeReport>,
    pub stats: BuildStats,
    pub dry_run: bool,
}

/// Materializes node lists below a working root.
pub struct TreeBuilder<'a> {
    root: &'a Path,
    config: &'a BuildConfig,
    dry_run: bool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(root: &'a Path, config: &'a BuildConfig) -> Self {
        Self {
            root,
            config,
            dry_run: false,
        }
    }

    /// When enabled, actions are planned and reported but never applied.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs one pass over `nodes` in document order.
    pub fn build(&self, nodes: &[Node]) -> BuildSummary {
        info!(
            "Building {} node(s) under {} (dry run: {})",
            nodes.len(),
            self.root.display(),
            self.dry_run
        );
        let mut summary = BuildSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };
        let targets = resolve_targets(nodes, self.root);
        // Flat files a dry run has already planned to move away.
        let mut claimed = HashSet::new();

        for (node, target) in nodes.iter().zip(targets) {
            let action = self.plan(node, &target, &claimed);
            debug!("{} ({}) -> {:?}", target.display(), node.rule, action);
            let outcome = if self.dry_run {
                if let Action::Move { from } = &action {
                    claimed.insert(from.clone());
                }
                planned_outcome(&action, &target)
            } else {
                self.apply(node, &target, action)
            };

            if let Outcome::Failed { reason } = &outcome {
                error!("{}: {}", target.display(), reason);
            }
            summary.stats.record(&outcome);
            summary.reports.push(NodeReport {
                kind: node.kind,
                target,
                outcome,
            });
        }

        info!(
            "Build pass finished: {} change(s), {} failure(s)",
            summary.stats.mutations(),
            summary.stats.failed
        );
        summary
    }

    /// Decides the action for one node from the current state of the filesystem.
    ///
    /// Flat files listed in `claimed` are treated as already moved.
    pub fn plan(&self, node: &Node, target: &Path, claimed: &HashSet<PathBuf>) -> Action {
        match node.kind {
            NodeKind::Directory if !target.exists() => Action::CreateDir,
            NodeKind::Directory if target.is_dir() => Action::KeepDir,
            NodeKind::Directory => Action::Conflict,
            NodeKind::File if target.exists() => Action::Skip,
            NodeKind::File => {
                let flat = self.root.join(&node.name);
                if flat.is_file() && !claimed.contains(&flat) {
                    Action::Move { from: flat }
                } else {
                    Action::Scaffold
                }
            }
        }
    }

    fn apply(&self, node: &Node, target: &Path, action: Action) -> Outcome {
        match action {
            Action::CreateDir => match io::ensure_dir_exists(target) {
                Ok(()) => Outcome::CreatedDir,
                Err(e) => failed(format!("{:#}", e)),
            },
            Action::KeepDir => Outcome::ExistingDir,
            Action::Conflict => failed(
                DirctlError::DirectoryConflict {
                    path: target.to_path_buf(),
                }
                .to_string(),
            ),
            Action::Skip => Outcome::Skipped,
            Action::Move { from } => self.relocate(from, target),
            Action::Scaffold => {
                let content = self.config.render_placeholder(&node.name);
                match io::create_new_file(target, &content) {
                    Ok(()) => Outcome::Scaffolded,
                    Err(e) => failed(
                        DirctlError::Scaffold {
                            path: target.to_path_buf(),
                            reason: format!("{:#}", e),
                        }
                        .to_string(),
                    ),
                }
            }
        }
    }

    fn relocate(&self, from: PathBuf, target: &Path) -> Outcome {
        let moved = target
            .parent()
            .map_or(Ok(()), io::ensure_dir_exists)
            .and_then(|()| io::move_file(&from, target).map_err(anyhow::Error::from));
        match moved {
            Ok(()) => Outcome::Moved { from },
            Err(e) => failed(
                DirctlError::Relocation {
                    from,
                    to: target.to_path_buf(),
                    reason: format!("{:#}", e),
                }
                .to_string(),
            ),
        }
    }
}

fn failed(reason: String) -> Outcome {
    Outcome::Failed { reason }
}

/// The outcome a dry run reports for a planned action.
fn planned_outcome(action: &Action, target: &Path) -> Outcome {
    match action {
        Action::CreateDir => Outcome::CreatedDir,
        Action::KeepDir => Outcome::ExistingDir,
        Action::Conflict => failed(
            DirctlError::DirectoryConflict {
                path: target.to_path_buf(),
            }
            .to_string(),
        ),
        Action::Skip => Outcome::Skipped,
        Action::Move { from } => Outcome::Moved { from: from.clone() },
        Action::Scaffold => Outcome::Scaffolded,
    }
}
