//! Core library entry for the `railshift` CLI.
//!
//! Converts a Rails application into a Django project skeleton: the source
//! tree is reduced to a [`source::SourceModel`], a collaborator turns it into a
//! [`plan::Plan`], and [`generate`] writes the project.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod collaborators;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod generate;
pub mod logging;
pub mod pipeline;
pub mod plan;
pub mod ports;
pub mod source;
pub mod stages;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| format!("Failed to print help: {e}"));
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["railshift", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_analyzes_an_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().to_str().unwrap();
        assert!(run(["railshift", "analyze", "--input", input]).is_ok());
    }
}
