//! Command dispatch and handlers.

pub mod analyze;
pub mod convert;
pub mod generate;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;

/// Env var naming a directory to record LLM and clock interactions into.
pub const RECORD_VAR: &str = "RAILSHIFT_RECORD";
/// Env var naming a cassette file, or a recording directory, to replay.
pub const REPLAY_VAR: &str = "RAILSHIFT_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// When `RAILSHIFT_REPLAY` is set, collaborator and clock calls are served
/// from cassettes. Otherwise, when `RAILSHIFT_RECORD` is set to a directory,
/// those interactions are recorded to per-port cassette files below it.
///
/// # Errors
///
/// Returns an error string if settings are invalid or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::from_env()?;

    if let Ok(path) = env::var(REPLAY_VAR) {
        let ctx = ServiceContext::replaying(&replay_cassettes(Path::new(&path)))?;
        return dispatch_with_context(&cli.command, &ctx, &settings);
    }

    let (ctx, session) = if let Ok(path) = env::var(RECORD_VAR) {
        let (ctx, session) = ServiceContext::recording_at(Path::new(&path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(&cli.command, &ctx, &settings);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), String> {
    match command {
        Command::Convert { input, output, log_dir } => {
            convert::run(ctx, settings, input, output, log_dir.as_deref())
        }
        Command::Analyze { input } => analyze::run(ctx, input),
        Command::Generate { plan, output } => generate::run(ctx, settings, plan, output),
    }
}

/// Cassette files to replay: the file itself, or the per-port files in a directory.
fn replay_cassettes(path: &Path) -> Vec<PathBuf> {
    if path.is_dir() {
        ["llm", "clock"]
            .iter()
            .map(|port| path.join(format!("{port}.cassette.yaml")))
            .filter(|file| file.exists())
            .collect()
    } else {
        vec![path.to_path_buf()]
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_directory_uses_existing_port_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("llm.cassette.yaml"), "").unwrap();

        assert_eq!(replay_cassettes(dir.path()), vec![dir.path().join("llm.cassette.yaml")]);
    }

    #[test]
    fn replay_file_is_used_as_is() {
        let path = Path::new("session/full.cassette.yaml");
        assert_eq!(replay_cassettes(path), vec![path.to_path_buf()]);
    }
}
