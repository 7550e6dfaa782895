//! Pipeline state and the fixed stage order.
//!
//! A run threads one [`PipelineState`] value through the five stages in
//! [`Stage::ORDER`]. Each stage takes the state by value and hands back the
//! updated state; nothing is shared between stages.

pub mod sequencer;
pub mod snapshot;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::generate::GeneratedProject;
use crate::plan::Plan;
use crate::source::SourceModel;

/// One step of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Ask for a free-form migration outline.
    Plan,
    /// Extract the source model and ask for a summary of it.
    Discovery,
    /// Turn the source model into a build plan.
    Convert,
    /// Generate the project from the plan.
    Build,
    /// Write README and requirements into the project.
    Integrate,
}

impl Stage {
    /// Every stage, in run order.
    pub const ORDER: [Self; 5] =
        [Self::Plan, Self::Discovery, Self::Convert, Self::Build, Self::Integrate];

    /// Stable lower-case name, used in logs and snapshot file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Discovery => "discovery",
            Self::Convert => "convert",
            Self::Build => "build",
            Self::Integrate => "integrate",
        }
    }

    /// 1-based position in [`Stage::ORDER`].
    #[must_use]
    pub fn position(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).map_or(0, |i| i + 1)
    }

    /// State fields that must be set before this stage may run.
    #[must_use]
    pub fn requires(self) -> &'static [StateField] {
        match self {
            Self::Plan | Self::Discovery => &[],
            Self::Convert => &[StateField::SourceModel],
            Self::Build => &[StateField::Plan],
            Self::Integrate => &[StateField::ProjectRoot, StateField::SourceModel, StateField::Plan],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional state fields a stage can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateField {
    /// [`PipelineState::source_model`]
    SourceModel,
    /// [`PipelineState::plan`]
    Plan,
    /// [`PipelineState::project_root`]
    ProjectRoot,
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SourceModel => "source_model",
            Self::Plan => "plan",
            Self::ProjectRoot => "project_root",
        })
    }
}

/// Everything a run has produced so far.
///
/// Stages only fill in fields they own and never clear a field set by an
/// earlier stage.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    /// Root of the legacy source tree.
    pub input_root: PathBuf,
    /// Directory the project is generated below.
    pub output_root: PathBuf,
    /// Free-form migration outline. Informational only.
    pub outline: Option<String>,
    /// Extracted source model.
    pub source_model: Option<SourceModel>,
    /// Free-form summary of the source model.
    pub summary: Option<String>,
    /// Build plan, structured or raw.
    pub plan: Option<Plan>,
    /// Root of the generated project.
    pub project_root: Option<PathBuf>,
    /// Files written by the build stage.
    pub generated: Option<GeneratedProject>,
    /// Most recently completed stage.
    pub last_stage: Option<Stage>,
    /// Raw text of the most recent collaborator response.
    pub last_response: Option<String>,
}

impl PipelineState {
    /// Fresh state for a run from `input_root` into `output_root`.
    #[must_use]
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            outline: None,
            source_model: None,
            summary: None,
            plan: None,
            project_root: None,
            generated: None,
            last_stage: None,
            last_response: None,
        }
    }

    /// Returns `true` if the given field is set.
    #[must_use]
    pub fn has(&self, field: StateField) -> bool {
        match field {
            StateField::SourceModel => self.source_model.is_some(),
            StateField::Plan => self.plan.is_some(),
            StateField::ProjectRoot => self.project_root.is_some(),
        }
    }

    /// First field required by `stage` that is not set.
    #[must_use]
    pub fn missing_for(&self, stage: Stage) -> Option<StateField> {
        stage.requires().iter().copied().find(|field| !self.has(*field))
    }
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No stage has started.
    NotStarted,
    /// A stage is executing.
    Running(Stage),
    /// A stage finished and the next has not started.
    StageComplete(Stage),
    /// The run stopped on an error; holds the stage that failed, if any had started.
    Aborted(Option<Stage>),
    /// All stages finished.
    Complete,
}
