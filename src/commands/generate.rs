//! `railshift generate` command.

use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::generate::{generate, scaffold};
use crate::plan::Plan;

/// Generate a project below `output` from the plan file at `plan_path`.
///
/// # Errors
///
/// Returns an error string if the plan file cannot be read or generation fails.
pub fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    plan_path: &Path,
    output: &Path,
) -> Result<(), String> {
    let text = ctx
        .fs
        .read_to_string(plan_path)
        .map_err(|e| format!("Failed to read plan {}: {e}", plan_path.display()))?;
    let plan = Plan::parse(&text);

    let project_root = output.join(&settings.project_name);
    let project_files = scaffold(ctx.fs.as_ref(), &plan, &project_root, &settings.project_name)
        .map_err(|e| format!("Generation failed: {e}"))?;
    let project = generate(ctx.fs.as_ref(), &plan, &project_root)
        .map_err(|e| format!("Generation failed: {e}"))?;

    println!("Project generated at {}", project.root.display());
    for app in &project.apps {
        println!("  {} ({} files)", app.name, app.files.len());
    }
    println!("  {} project files", project_files.len());
    Ok(())
}
