//! Runs the stages in fixed order with fail-fast preconditions.

use super::snapshot::SnapshotWriter;
use super::{PipelineState, RunStatus, Stage};
use crate::error::PipelineError;
use crate::ports::filesystem::FileSystem;
use crate::stages::Stages;

/// Drives one pipeline run.
///
/// Transitions are strictly linear: not started, then each stage running and
/// complete in turn, ending in either complete or aborted.
pub struct StageSequencer<'a> {
    stages: Stages<'a>,
    fs: &'a dyn FileSystem,
    snapshots: SnapshotWriter<'a>,
    status: RunStatus,
}

impl<'a> StageSequencer<'a> {
    /// Creates a sequencer that records a snapshot after every stage.
    #[must_use]
    pub fn new(stages: Stages<'a>, fs: &'a dyn FileSystem, snapshots: SnapshotWriter<'a>) -> Self {
        Self { stages, fs, snapshots, status: RunStatus::NotStarted }
    }

    /// Current run status.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Runs every stage in [`Stage::ORDER`] and returns the final state.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] before any stage runs if the input
    /// root does not exist, a precondition violation if a stage's required field
    /// is unset, or the first fatal error a stage reports.
    pub async fn run(&mut self, state: PipelineState) -> Result<PipelineState, PipelineError> {
        if !self.fs.exists(&state.input_root) {
            self.status = RunStatus::Aborted(None);
            return Err(PipelineError::MissingInput { path: state.input_root });
        }

        let mut state = state;
        for stage in Stage::ORDER {
            state = self.run_stage(stage, state).await?;
        }

        self.status = RunStatus::Complete;
        Ok(state)
    }

    /// Runs a single stage after checking its declared preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::PreconditionViolation`] naming the first missing
    /// field, or the stage's own fatal error. Either aborts the run.
    pub async fn run_stage(
        &mut self,
        stage: Stage,
        state: PipelineState,
    ) -> Result<PipelineState, PipelineError> {
        if let Some(field) = state.missing_for(stage) {
            tracing::error!(stage = %stage, field = %field, "precondition not met");
            self.status = RunStatus::Aborted(Some(stage));
            return Err(PipelineError::PreconditionViolation { stage, field });
        }

        tracing::info!("[{}/{}] {stage} started", stage.position(), Stage::ORDER.len());
        self.status = RunStatus::Running(stage);

        let mut state = match self.stages.run(stage, state).await {
            Ok(next) => next,
            Err(e) => {
                tracing::error!(stage = %stage, error = %e, "stage failed");
                self.status = RunStatus::Aborted(Some(stage));
                return Err(e);
            }
        };

        state.last_stage = Some(stage);
        self.snapshots.capture(stage, &state);
        self.status = RunStatus::StageComplete(stage);
        tracing::info!("[{}/{}] {stage} complete", stage.position(), Stage::ORDER.len());
        Ok(state)
    }
}
