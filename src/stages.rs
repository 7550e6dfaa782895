//! The five pipeline stages.
//!
//! Each stage takes the state by value, fills in the fields it owns, and
//! returns it. Preconditions are checked by the sequencer before a stage runs.

use std::path::Path;

use crate::collaborators::{DocGenerator, PlanSynthesizer};
use crate::error::{GenerateError, PipelineError};
use crate::generate::{convert_templates, generate, scaffold};
use crate::pipeline::{PipelineState, Stage, StateField};
use crate::plan::Plan;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;
use crate::source::analyzer::{analyze, VIEWS_DIR};

/// README body written when the doc generator returns nothing.
pub const README_PLACEHOLDER: &str =
    "# Converted project\n\nGenerated from a Rails application. Documentation was not produced for this run.\n";

/// Requirements written when the doc generator returns nothing.
pub const REQUIREMENTS_FALLBACK: &str = "Django>=5.0\n";

/// Everything the stages need to do their work.
pub struct Stages<'a> {
    /// Filesystem for analysis and generation.
    pub fs: &'a dyn FileSystem,
    /// Planning collaborator.
    pub synthesizer: &'a dyn PlanSynthesizer,
    /// Documentation collaborator.
    pub docs: &'a dyn DocGenerator,
    /// Directory name of the generated project below the output root.
    pub project_name: &'a str,
}

impl Stages<'_> {
    /// Runs one stage.
    ///
    /// # Errors
    ///
    /// Returns the stage's fatal failure.
    pub async fn run(&self, stage: Stage, state: PipelineState) -> Result<PipelineState, PipelineError> {
        match stage {
            Stage::Plan => self.plan(state).await,
            Stage::Discovery => self.discovery(state).await,
            Stage::Convert => self.convert(state).await,
            Stage::Build => self.build(state),
            Stage::Integrate => self.integrate(state).await,
        }
    }

    async fn plan(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let outline = self
            .synthesizer
            .outline(&state.input_root)
            .await
            .map_err(|e| collaborator_failure(Stage::Plan, &e))?;
        state.outline = Some(outline.clone());
        state.last_response = Some(outline);
        Ok(state)
    }

    async fn discovery(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let model = analyze(self.fs, &state.input_root);
        let summary = self
            .synthesizer
            .summarize(&model)
            .await
            .map_err(|e| collaborator_failure(Stage::Discovery, &e))?;
        state.source_model = Some(model);
        state.summary = Some(summary.clone());
        state.last_response = Some(summary);
        Ok(state)
    }

    async fn convert(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let stage = Stage::Convert;
        let model = required(state.source_model.as_ref(), stage, StateField::SourceModel)?;
        let summary = state.summary.as_deref().unwrap_or_default();
        let text = self
            .synthesizer
            .synthesize(model, summary)
            .await
            .map_err(|e| collaborator_failure(stage, &e))?;

        let plan = Plan::parse(&text);
        if plan.is_raw() {
            tracing::warn!(stage = %stage, "collaborator output kept as raw plan");
        }
        state.plan = Some(plan);
        state.last_response = Some(text);
        Ok(state)
    }

    fn build(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let stage = Stage::Build;
        let plan = required(state.plan.as_ref(), stage, StateField::Plan)?;
        let project_root = state.output_root.join(self.project_name);

        let to_pipeline = |source| PipelineError::FileSystem { stage, source };

        let project_files =
            scaffold(self.fs, plan, &project_root, self.project_name).map_err(to_pipeline)?;
        let mut generated = generate(self.fs, plan, &project_root).map_err(to_pipeline)?;
        generated.scaffold = project_files;
        generated.converted_templates =
            convert_templates(self.fs, &state.input_root.join(VIEWS_DIR), &project_root)
                .map_err(to_pipeline)?;

        state.project_root = Some(project_root);
        state.generated = Some(generated);
        Ok(state)
    }

    async fn integrate(&self, mut state: PipelineState) -> Result<PipelineState, PipelineError> {
        let stage = Stage::Integrate;
        let project_root = required(state.project_root.as_ref(), stage, StateField::ProjectRoot)?;
        let model = required(state.source_model.as_ref(), stage, StateField::SourceModel)?;
        let plan = required(state.plan.as_ref(), stage, StateField::Plan)?;

        let readme =
            self.docs.describe(model, plan).await.map_err(|e| collaborator_failure(stage, &e))?;
        let readme_body = if readme.trim().is_empty() {
            tracing::warn!(stage = %stage, "empty project description, writing placeholder README");
            README_PLACEHOLDER.to_string()
        } else {
            format!("{}\n", readme.trim_end())
        };
        self.write(stage, &project_root.join("README.md"), &readme_body)?;

        let requirements =
            self.docs.requirements().await.map_err(|e| collaborator_failure(stage, &e))?;
        let requirements_body = if requirements.trim().is_empty() {
            tracing::warn!(stage = %stage, "empty requirements, writing default");
            REQUIREMENTS_FALLBACK.to_string()
        } else {
            format!("{}\n", requirements.trim_end())
        };
        self.write(stage, &project_root.join("requirements.txt"), &requirements_body)?;

        tracing::info!(root = %project_root.display(), "project documented");
        state.last_response = Some(requirements);
        Ok(state)
    }

    fn write(&self, stage: Stage, path: &Path, contents: &str) -> Result<(), PipelineError> {
        self.fs.write(path, contents).map_err(|source| PipelineError::FileSystem {
            stage,
            source: GenerateError::Io { path: path.to_path_buf(), source },
        })
    }
}

/// Borrows a field listed in [`Stage::requires`]. The sequencer checks those
/// before a stage runs, so this only fails when a stage is run on its own.
fn required<T>(value: Option<&T>, stage: Stage, field: StateField) -> Result<&T, PipelineError> {
    value.ok_or(PipelineError::PreconditionViolation { stage, field })
}

fn collaborator_failure(stage: Stage, error: &PortError) -> PipelineError {
    PipelineError::CollaboratorFailure { stage, message: error.to_string() }
}
