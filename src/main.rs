//! Binary entrypoint for the `railshift` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are handled in commands::dispatch via
    // RAILSHIFT_RECORD=<dir> and RAILSHIFT_REPLAY=<cassette>.
    match railshift::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
