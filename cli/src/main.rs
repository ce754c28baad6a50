//! # Dirctl Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the dirctl CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the `build` and `generate` handlers
//!
//! ## Examples
//!
//! ```bash
//! # Turn directory-structure.txt (or any discovered tree file) into real folders
//! dirctl build
//!
//! # Describe the current directory in tree notation, with debug logs
//! dirctl -vv generate
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` overrides it)
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // `build` and `generate` command handlers
mod common; // Shared utilities (filesystem I/O)
mod core; // Core infrastructure (errors, config)
mod tree; // Tree-notation engine (parser, classifier, builder, serializer, discovery)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "dirctl",
    about = "🌳 dirctl: Build project layouts from tree notation, and tree notation from project layouts",
    long_about = "Turns an indented or ASCII-art tree (├──, └──, │) into real directories and files,\n\
                  moving loose files into place and scaffolding the missing ones.\n\
                  Also generates the same notation from an existing directory.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Read a tree-notation file and create the structure it describes.
    #[command(alias = "b")]
    Build(commands::build::BuildArgs),
    /// Write the structure of a directory as tree notation.
    #[command(alias = "g", alias = "gen")]
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Build(args) => commands::build::handle_build(args),
        Commands::Generate(args) => commands::generate::handle_generate(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
