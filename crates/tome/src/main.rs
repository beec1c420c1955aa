//! Tome CLI - site structure tool.
//!
//! Provides commands for:
//! - `files`: List discovered source files and their destinations
//! - `nav`: Show the navigation tree, reading order or effective nav spec
//! - `copy-static`: Copy non-Markdown files into the site directory

mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{CopyStaticArgs, FilesArgs, GlobalArgs, NavArgs};
use output::Output;

/// Tome - site structure tool.
#[derive(Parser)]
#[command(name = "tome", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat warnings as errors (overrides config).
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered files with their category, destination and URL.
    Files(FilesArgs),
    /// Show site navigation.
    Nav(NavArgs),
    /// Copy static files to the site directory.
    CopyStatic(CopyStaticArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let warnings = logging::init(cli.verbose);

    let global = GlobalArgs {
        config: cli.config,
        strict: cli.strict.then_some(true),
        warnings,
    };
    let result = match cli.command {
        Commands::Files(args) => args.execute(&global),
        Commands::Nav(args) => args.execute(&global),
        Commands::CopyStatic(args) => args.execute(&global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
