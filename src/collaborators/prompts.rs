//! Prompt text for the language-model collaborators.

use std::fmt::Write as _;
use std::path::Path;

use crate::plan::Plan;
use crate::source::SourceModel;

/// System prompt framing every collaborator call.
pub const SYSTEM: &str = "You are a senior software architect migrating Ruby on Rails applications to Django.";

/// Shape the synthesizer is asked to answer with.
const PLAN_SHAPE: &str = r#"{
  "apps": [
    {
      "name": "blog",
      "models": [{"name": "Post", "fields": {"title": "CharField(max_length=200)", "body": "TextField"}}],
      "views": [{"name": "PostListView", "type": "ListView", "model": "Post", "template": "blog/post_list.html"}],
      "urls": [{"pattern": "posts/", "view": "PostListView"}],
      "templates": [{"name": "blog/post_list.html"}]
    }
  ]
}"#;

/// Asks for a step-by-step migration outline.
#[must_use]
pub fn outline(input_root: &Path) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Analyze the Rails project located at '{}'.", input_root.display());
    prompt.push_str(
        "Produce a step-by-step plan for converting it to Django. \
         List each step with a short action, a description, and the steps it depends on.",
    );
    prompt
}

/// Asks for an architectural summary of the extracted structure.
///
/// # Errors
///
/// Returns an error if the source model cannot be encoded as JSON.
pub fn summarize(model: &SourceModel) -> Result<String, serde_json::Error> {
    let mut prompt = String::from("Structure extracted from a Rails application:\n\n");
    let _ = writeln!(prompt, "{}", serde_json::to_string_pretty(model)?);
    prompt.push_str(
        "\nDescribe the application's architecture: the domain models and how they relate, \
         what each controller is responsible for, how requests are routed, and what the views render. \
         Be concise.",
    );
    Ok(prompt)
}

/// Asks for a Django build plan as JSON.
///
/// # Errors
///
/// Returns an error if the source model cannot be encoded as JSON.
pub fn synthesize(model: &SourceModel, summary: &str) -> Result<String, serde_json::Error> {
    let mut prompt = String::from("Convert this Rails application into a Django project plan.\n\n");
    let _ = writeln!(prompt, "Rails structure:\n{}\n", serde_json::to_string_pretty(model)?);
    if !summary.trim().is_empty() {
        let _ = writeln!(prompt, "Architecture summary:\n{summary}\n");
    }
    let _ = writeln!(
        prompt,
        "Group related models into Django apps. Respond with JSON only, no prose, in this shape:\n{PLAN_SHAPE}"
    );
    Ok(prompt)
}

/// Asks for the generated project's README.
///
/// # Errors
///
/// Returns an error if the model or plan cannot be encoded as JSON.
pub fn describe(model: &SourceModel, plan: &Plan) -> Result<String, serde_json::Error> {
    let mut prompt =
        String::from("Write a README.md for a Django project converted from a Rails application.\n\n");
    let _ = writeln!(prompt, "Rails structure:\n{}\n", serde_json::to_string_pretty(model)?);
    let _ = writeln!(prompt, "Django plan:\n{}\n", serde_json::to_string_pretty(plan)?);
    prompt.push_str(
        "Cover what the project contains, how the Rails pieces map to Django apps, \
         how to install dependencies and run migrations, and what still needs manual work. \
         Respond with Markdown only.",
    );
    Ok(prompt)
}

/// Asks for the generated project's `requirements.txt`.
pub const REQUIREMENTS: &str = "Generate a minimal requirements.txt for a Django 5 project using SQLite. \
     Respond with the file contents only.";
