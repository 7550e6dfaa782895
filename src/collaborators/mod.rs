//! External collaborators: planning and documentation text producers.
//!
//! Both return free text with no guaranteed grammar. The pipeline only
//! relies on the contract here; [`llm`] holds the language-model backed
//! implementations.

pub mod llm;
pub mod prompts;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::plan::Plan;
use crate::ports::PortError;
use crate::source::SourceModel;

/// Boxed future returned by collaborator calls, keeping the traits dyn-compatible.
pub type TextFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PortError>> + Send + 'a>>;

/// Produces planning text for the plan, discovery and convert stages.
pub trait PlanSynthesizer: Send + Sync {
    /// Free-form migration outline for the tree at `input_root`.
    fn outline<'a>(&'a self, input_root: &'a Path) -> TextFuture<'a>;

    /// Free-form architectural summary of an extracted source model.
    fn summarize<'a>(&'a self, model: &'a SourceModel) -> TextFuture<'a>;

    /// Build plan text, expected but not guaranteed to be plan JSON.
    fn synthesize<'a>(&'a self, model: &'a SourceModel, summary: &'a str) -> TextFuture<'a>;
}

/// Produces documentation for the integrate stage.
pub trait DocGenerator: Send + Sync {
    /// README body for the generated project.
    fn describe<'a>(&'a self, model: &'a SourceModel, plan: &'a Plan) -> TextFuture<'a>;

    /// `requirements.txt` body for the generated project.
    fn requirements(&self) -> TextFuture<'_>;
}
