//! `railshift analyze` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::source::analyzer::analyze;

/// Extract the source model under `input` and print it as JSON.
///
/// # Errors
///
/// Returns an error string if the input directory does not exist.
pub fn run(ctx: &ServiceContext, input: &Path) -> Result<(), String> {
    if !ctx.fs.exists(input) {
        return Err(format!("Input directory not found: {}", input.display()));
    }
    let model = analyze(ctx.fs.as_ref(), input);
    let json = serde_json::to_string_pretty(&model)
        .map_err(|e| format!("Failed to serialize source model: {e}"))?;
    println!("{json}");
    Ok(())
}
