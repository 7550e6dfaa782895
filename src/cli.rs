//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `railshift`.
#[derive(Debug, Parser)]
#[command(name = "railshift", version, about = "Migrate a Rails source tree into a Django project skeleton")]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full conversion pipeline.
    Convert {
        /// Root of the Rails application.
        #[arg(short, long)]
        input: PathBuf,
        /// Directory the Django project is generated below.
        #[arg(short, long)]
        output: PathBuf,
        /// Directory for per-stage state snapshots.
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Extract the source model and print it as JSON.
    Analyze {
        /// Root of the Rails application.
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Generate a project from a plan file without calling any collaborator.
    Generate {
        /// JSON plan file.
        #[arg(short, long)]
        plan: PathBuf,
        /// Directory the Django project is generated below.
        #[arg(short, long)]
        output: PathBuf,
    },
}
