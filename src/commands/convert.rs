//! `railshift convert` command.

use std::path::Path;

use crate::collaborators::llm::LlmCollaborator;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::pipeline::sequencer::StageSequencer;
use crate::pipeline::snapshot::SnapshotWriter;
use crate::pipeline::PipelineState;
use crate::stages::Stages;

/// Execute the full pipeline from `input` into `output`.
///
/// # Errors
///
/// Returns an error string if the run aborts.
pub fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    input: &Path,
    output: &Path,
    log_dir: Option<&Path>,
) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let collaborator = LlmCollaborator::new(ctx.llm.as_ref(), settings);
    let stages = Stages {
        fs: ctx.fs.as_ref(),
        synthesizer: &collaborator,
        docs: &collaborator,
        project_name: &settings.project_name,
    };
    let snapshots =
        SnapshotWriter::new(ctx.fs.as_ref(), log_dir.unwrap_or(settings.log_dir.as_path()), ctx.clock.now());
    tracing::debug!(dir = %snapshots.dir().display(), "snapshot directory");
    let mut sequencer = StageSequencer::new(stages, ctx.fs.as_ref(), snapshots);

    let state = runtime
        .block_on(sequencer.run(PipelineState::new(input, output)))
        .map_err(|e| format!("Conversion failed: {e}"))?;

    print_summary(&state);
    Ok(())
}

fn print_summary(state: &PipelineState) {
    if let Some(generated) = &state.generated {
        println!("Project generated at {}", generated.root.display());
        for app in &generated.apps {
            println!("  {} ({} files)", app.name, app.files.len());
        }
        println!("  {} templates converted", generated.converted_templates.len());
    }
    if state.plan.as_ref().is_some_and(crate::plan::Plan::is_raw) {
        println!("Plan could not be parsed; no apps were generated. See the snapshots for the raw plan.");
    }
}
