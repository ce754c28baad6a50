//! # Dirctl Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for dirctl, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, and project-specific
//! overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.dirctl.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/dirctl/config.toml`
//! 3. Default values defined in the code
//!
//! Command-line flags are applied on top by the command handlers.
//!
//! ## Examples
//!
//! ```toml
//! [discovery]
//! candidates = ["layout.txt", "tree.txt"]
//! sniff_lines = 20
//!
//! [build]
//! placeholder = "// TODO: {name}"
//!
//! [generate]
//! output = "~/layouts/current.txt"
//! excludes = ["target", "coverage"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let candidates = &cfg.discovery.candidates;
//! let placeholder = cfg.build.render_placeholder("main.go");
//! ```
//!
use crate::core::error::{DirctlError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// File name searched for in the current directory and its ancestors.
const PROJECT_CONFIG_FILENAME: &str = ".dirctl.toml";
/// Token replaced by the node name in the scaffold placeholder template.
const NAME_TOKEN: &str = "{name}";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Settings for locating a structure file when none is named on the command line.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// File names checked, in order, before falling back to content sniffing.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    /// Number of leading lines inspected when sniffing a `.txt`/`.md` file.
    #[serde(default = "default_sniff_lines")]
    pub sniff_lines: usize,
}

/// Settings for `dirctl build`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Content written into scaffolded files. `{name}` is replaced by the entry name.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

/// Settings for `dirctl generate`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Where the generated document is written (can use ~). Relative paths resolve against the walked root.
    #[serde(default = "default_output")]
    pub output: String,
    /// Entry names skipped in addition to the built-in system excludes.
    #[serde(default)]
    pub excludes: Vec<String>,
}

fn default_candidates() -> Vec<String> {
    [
        "directory-structure.txt",
        "dir-structure.txt",
        "structure.txt",
        "tree.txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_sniff_lines() -> usize {
    15
}
fn default_placeholder() -> String {
    format!("# Placeholder for {}", NAME_TOKEN)
}
fn default_output() -> String {
    "directory-structure.txt".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            sniff_lines: default_sniff_lines(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            excludes: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Renders the placeholder template for a scaffolded entry.
    pub fn render_placeholder(&self, name: &str) -> String {
        self.placeholder.replace(NAME_TOKEN, name)
    }
}

/// Loads the effective configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Loads user and project configuration, with the project search starting at `start_dir`.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Dirctl", "dirctl") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start_dir` towards the filesystem root looking for `.dirctl.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.discovery.candidates = if project_cfg.discovery.candidates != default_candidates() {
        project_cfg.discovery.candidates
    } else {
        user.discovery.candidates
    };
    merged.discovery.sniff_lines = if project_cfg.discovery.sniff_lines != default_sniff_lines() {
        project_cfg.discovery.sniff_lines
    } else {
        user.discovery.sniff_lines
    };
    merged.build.placeholder = if project_cfg.build.placeholder != default_placeholder() {
        project_cfg.build.placeholder
    } else {
        user.build.placeholder
    };
    merged.generate.output = if project_cfg.generate.output != default_output() {
        project_cfg.generate.output
    } else {
        user.generate.output
    };
    merged.generate.excludes = if !project_cfg.generate.excludes.is_empty() {
        project_cfg.generate.excludes
    } else {
        user.generate.excludes
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.generate.output = shellexpand::tilde(&config.generate.output).into_owned();
    debug!("Expanded generate output path: {}", config.generate.output);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.discovery.sniff_lines == 0 {
        return Err(anyhow!(DirctlError::Config(
            "discovery.sniff_lines must be greater than 0.".to_string()
        )));
    }
    if config.discovery.candidates.iter().any(|c| c.trim().is_empty()) {
        return Err(anyhow!(DirctlError::Config(
            "discovery.candidates cannot contain an empty file name.".to_string()
        )));
    }
    if config.generate.output.trim().is_empty() {
        return Err(anyhow!(DirctlError::Config(
            "generate.output cannot be empty.".to_string()
        )));
    }
    if !config.build.placeholder.contains(NAME_TOKEN) {
        return Err(anyhow!(DirctlError::Config(format!(
            "build.placeholder must contain '{}' (got '{}').",
            NAME_TOKEN, config.build.placeholder
        ))));
    }
    Ok(())
}
