//! Collaborators backed by the `LlmClient` port.

use std::path::Path;

use super::{prompts, DocGenerator, PlanSynthesizer, TextFuture};
use crate::config::Settings;
use crate::plan::Plan;
use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::source::SourceModel;

const OUTLINE_TEMPERATURE: f32 = 0.2;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const DESCRIBE_TEMPERATURE: f32 = 0.2;
const REQUIREMENTS_TEMPERATURE: f32 = 0.1;

/// Plan synthesizer and doc generator that prompt a language model.
pub struct LlmCollaborator<'a> {
    llm: &'a dyn LlmClient,
    model: String,
    max_tokens: u32,
}

impl<'a> LlmCollaborator<'a> {
    /// Creates a collaborator using the model and token budget from `settings`.
    #[must_use]
    pub fn new(llm: &'a dyn LlmClient, settings: &Settings) -> Self {
        Self { llm, model: settings.model.clone(), max_tokens: settings.max_tokens }
    }

    fn ask(&self, prompt: Result<String, serde_json::Error>, temperature: f32) -> TextFuture<'_> {
        Box::pin(async move {
            let request = CompletionRequest {
                model: self.model.clone(),
                system: Some(prompts::SYSTEM.to_string()),
                prompt: prompt?,
                max_tokens: self.max_tokens,
                temperature,
            };
            tracing::debug!(prompt = %request.prompt, "collaborator prompt");

            let response = self.llm.complete(&request).await?;
            tracing::debug!(
                text = %response.text,
                prompt_tokens = response.prompt_tokens,
                completion_tokens = response.completion_tokens,
                "collaborator response"
            );
            Ok(response.text.trim().to_string())
        })
    }
}

impl PlanSynthesizer for LlmCollaborator<'_> {
    fn outline<'a>(&'a self, input_root: &'a Path) -> TextFuture<'a> {
        self.ask(Ok(prompts::outline(input_root)), OUTLINE_TEMPERATURE)
    }

    fn summarize<'a>(&'a self, model: &'a SourceModel) -> TextFuture<'a> {
        self.ask(prompts::summarize(model), ANALYSIS_TEMPERATURE)
    }

    fn synthesize<'a>(&'a self, model: &'a SourceModel, summary: &'a str) -> TextFuture<'a> {
        self.ask(prompts::synthesize(model, summary), ANALYSIS_TEMPERATURE)
    }
}

impl DocGenerator for LlmCollaborator<'_> {
    fn describe<'a>(&'a self, model: &'a SourceModel, plan: &'a Plan) -> TextFuture<'a> {
        self.ask(prompts::describe(model, plan), DESCRIBE_TEMPERATURE)
    }

    fn requirements(&self) -> TextFuture<'_> {
        self.ask(Ok(prompts::REQUIREMENTS.to_string()), REQUIREMENTS_TEMPERATURE)
    }
}
