//! End-to-end pipeline runs with in-test collaborators.

use std::path::Path;

use chrono::{TimeZone, Utc};

use railshift::adapters::live::filesystem::LiveFileSystem;
use railshift::collaborators::{DocGenerator, PlanSynthesizer, TextFuture};
use railshift::error::{GenerateError, PipelineError};
use railshift::pipeline::sequencer::StageSequencer;
use railshift::pipeline::snapshot::SnapshotWriter;
use railshift::pipeline::{PipelineState, RunStatus, Stage, StateField};
use railshift::plan::Plan;
use railshift::ports::FileSystem;
use railshift::source::SourceModel;
use railshift::stages::{Stages, README_PLACEHOLDER};

const BLOG_PLAN: &str = r#"```json
{
  "apps": [
    {
      "name": "blog",
      "models": [{"name": "Post", "fields": {"title": "CharField(max_length=200)", "body": "TextField"}}],
      "views": [{"name": "PostList", "type": "ListView", "model": "Post", "template": "blog/post_list.html"}],
      "urls": [{"pattern": "posts/", "view": "PostList"}],
      "templates": [{"name": "blog/post_list.html"}]
    }
  ]
}
```"#;

struct Scripted {
    plan: &'static str,
    readme: &'static str,
    fail_summary: bool,
}

impl Scripted {
    fn new(plan: &'static str) -> Self {
        Self { plan, readme: "# Blog\n\nConverted.", fail_summary: false }
    }
}

fn reply(text: &str) -> TextFuture<'static> {
    let text = text.to_string();
    Box::pin(async move { Ok(text) })
}

impl PlanSynthesizer for Scripted {
    fn outline<'a>(&'a self, _input_root: &'a Path) -> TextFuture<'a> {
        reply("1. analyze\n2. convert")
    }

    fn summarize<'a>(&'a self, model: &'a SourceModel) -> TextFuture<'a> {
        if self.fail_summary {
            return Box::pin(async { Err("connection reset".into()) });
        }
        reply(&format!("{} records", model.domain_records.len()))
    }

    fn synthesize<'a>(&'a self, _model: &'a SourceModel, _summary: &'a str) -> TextFuture<'a> {
        reply(self.plan)
    }
}

impl DocGenerator for Scripted {
    fn describe<'a>(&'a self, _model: &'a SourceModel, _plan: &'a Plan) -> TextFuture<'a> {
        reply(self.readme)
    }

    fn requirements(&self) -> TextFuture<'_> {
        reply("Django>=5.0,<6.0")
    }
}

fn rails_app(root: &Path) {
    let fs = LiveFileSystem;
    fs.write(
        &root.join("app/models/post.rb"),
        "class Post < ApplicationRecord\n  has_many :comments\nend\n",
    )
    .unwrap();
    fs.write(
        &root.join("app/controllers/posts_controller.rb"),
        "class PostsController < ApplicationController\n  def show\n    @post = Post.find(params[:id])\n  end\nend\n",
    )
    .unwrap();
    fs.write(
        &root.join("config/routes.rb"),
        "Rails.application.routes.draw do\n  resources :posts\n  get 'about', to: 'pages#about'\nend\n",
    )
    .unwrap();
    fs.write(&root.join("app/views/posts/show.html.erb"), "<h1><%= @post.title %></h1>\n").unwrap();
}

async fn run_pipeline(
    collaborator: &Scripted,
    input: &Path,
    output: &Path,
    logs: &Path,
) -> (Result<PipelineState, PipelineError>, RunStatus) {
    let fs = LiveFileSystem;
    let stages =
        Stages { fs: &fs, synthesizer: collaborator, docs: collaborator, project_name: "site" };
    let started = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let mut sequencer = StageSequencer::new(stages, &fs, SnapshotWriter::new(&fs, logs, started));
    let result = sequencer.run(PipelineState::new(input, output)).await;
    (result, sequencer.status())
}

#[tokio::test]
async fn full_run_generates_and_documents_the_project() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rails");
    rails_app(&input);
    let output = dir.path().join("out");
    let logs = dir.path().join("logs");

    let (result, status) = run_pipeline(&Scripted::new(BLOG_PLAN), &input, &output, &logs).await;
    let state = result.unwrap();

    assert_eq!(status, RunStatus::Complete);
    assert_eq!(state.last_stage, Some(Stage::Integrate));
    assert_eq!(state.outline.as_deref(), Some("1. analyze\n2. convert"));
    assert_eq!(state.summary.as_deref(), Some("1 records"));
    assert_eq!(state.last_response.as_deref(), Some("Django>=5.0,<6.0"));

    let model = state.source_model.as_ref().unwrap();
    assert_eq!(model.routes.len(), 2);
    assert_eq!(model.templates[0].name, "posts/show");

    let root = output.join("site");
    assert_eq!(state.project_root.as_deref(), Some(root.as_path()));
    let models_py = std::fs::read_to_string(root.join("blog/models.py")).unwrap();
    assert!(models_py.contains("    title = models.CharField(max_length=200)\n"));
    assert!(models_py.contains("    body = models.TextField()\n"));
    assert!(root.join("blog/templates/blog/post_list.html").exists());
    assert_eq!(
        std::fs::read_to_string(root.join("templates/posts/show.html")).unwrap(),
        "<h1>{{ post.title }}</h1>\n"
    );
    assert_eq!(std::fs::read_to_string(root.join("README.md")).unwrap(), "# Blog\n\nConverted.\n");
    let settings = std::fs::read_to_string(root.join("site/settings.py")).unwrap();
    assert!(settings.contains("    'blog',\n]"));
    assert!(root.join("manage.py").exists());
    assert!(root.join("templates/base.html").exists());
    assert_eq!(state.generated.as_ref().unwrap().scaffold.len(), 6);
    assert_eq!(std::fs::read_to_string(root.join("requirements.txt")).unwrap(), "Django>=5.0,<6.0\n");

    let snapshots = logs.join("snapshots/20250102_030405");
    for name in ["01-plan", "02-discovery", "03-convert", "04-build", "05-integrate"] {
        assert!(snapshots.join(format!("{name}.yaml")).exists(), "missing snapshot {name}");
    }
}

#[tokio::test]
async fn malformed_plan_degrades_to_raw_and_the_run_completes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rails");
    rails_app(&input);
    let output = dir.path().join("out");

    let collaborator = Scripted::new("Sorry, I can only describe the plan in prose.");
    let (result, status) = run_pipeline(&collaborator, &input, &output, &dir.path().join("logs")).await;
    let state = result.unwrap();

    assert_eq!(status, RunStatus::Complete);
    assert_eq!(
        state.plan,
        Some(Plan::Raw("Sorry, I can only describe the plan in prose.".into()))
    );
    let generated = state.generated.unwrap();
    assert!(generated.apps.is_empty());
    assert_eq!(generated.converted_templates.len(), 1);
    assert!(output.join("site/README.md").exists());

    let convert_snapshot = std::fs::read_to_string(
        dir.path().join("logs/snapshots/20250102_030405/03-convert.yaml"),
    )
    .unwrap();
    assert!(convert_snapshot.contains("raw_plan"));
}

#[tokio::test]
async fn empty_description_writes_placeholder_readme() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rails");
    rails_app(&input);
    let output = dir.path().join("out");

    let collaborator = Scripted { readme: "   ", ..Scripted::new(BLOG_PLAN) };
    let (result, _) = run_pipeline(&collaborator, &input, &output, &dir.path().join("logs")).await;
    result.unwrap();

    assert_eq!(std::fs::read_to_string(output.join("site/README.md")).unwrap(), README_PLACEHOLDER);
}

#[tokio::test]
async fn missing_input_aborts_before_any_stage() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");

    let (result, status) =
        run_pipeline(&Scripted::new(BLOG_PLAN), &dir.path().join("absent"), dir.path(), &logs).await;

    assert!(matches!(result, Err(PipelineError::MissingInput { .. })));
    assert_eq!(status, RunStatus::Aborted(None));
    assert!(!logs.exists());
}

#[tokio::test]
async fn collaborator_failure_is_fatal_and_names_the_stage() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rails");
    rails_app(&input);
    let logs = dir.path().join("logs");

    let collaborator = Scripted { fail_summary: true, ..Scripted::new(BLOG_PLAN) };
    let (result, status) = run_pipeline(&collaborator, &input, &dir.path().join("out"), &logs).await;

    match result {
        Err(PipelineError::CollaboratorFailure { stage, message }) => {
            assert_eq!(stage, Stage::Discovery);
            assert_eq!(message, "connection reset");
        }
        other => panic!("expected collaborator failure, got {other:?}"),
    }
    assert_eq!(status, RunStatus::Aborted(Some(Stage::Discovery)));
    let snapshots = logs.join("snapshots/20250102_030405");
    assert!(snapshots.join("01-plan.yaml").exists());
    assert!(!snapshots.join("02-discovery.yaml").exists());
}

#[tokio::test]
async fn build_without_a_plan_is_a_precondition_violation() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LiveFileSystem;
    let collaborator = Scripted::new(BLOG_PLAN);
    let stages =
        Stages { fs: &fs, synthesizer: &collaborator, docs: &collaborator, project_name: "site" };
    let mut sequencer =
        StageSequencer::new(stages, &fs, SnapshotWriter::new(&fs, dir.path(), Utc::now()));

    let result = sequencer.run_stage(Stage::Build, PipelineState::new(dir.path(), dir.path())).await;

    match result {
        Err(PipelineError::PreconditionViolation { stage, field }) => {
            assert_eq!(stage, Stage::Build);
            assert_eq!(field, StateField::Plan);
        }
        other => panic!("expected precondition violation, got {other:?}"),
    }
    assert_eq!(sequencer.status(), RunStatus::Aborted(Some(Stage::Build)));
    assert!(!dir.path().join("site").exists());
}

#[tokio::test]
async fn write_failure_during_build_aborts_before_integrate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("rails");
    rails_app(&input);
    let output = dir.path().join("out");
    let logs = dir.path().join("logs");
    // A regular file where app `b` needs its directory.
    LiveFileSystem.write(&output.join("site/b"), "in the way").unwrap();

    let plan = r#"{"apps": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}"#;
    let (result, status) = run_pipeline(&Scripted::new(plan), &input, &output, &logs).await;

    match result {
        Err(PipelineError::FileSystem { stage, source: GenerateError::Io { path, .. } }) => {
            assert_eq!(stage, Stage::Build);
            assert_eq!(path, output.join("site/b"));
        }
        other => panic!("expected filesystem failure, got {other:?}"),
    }
    assert_eq!(status, RunStatus::Aborted(Some(Stage::Build)));
    assert!(output.join("site/a/apps.py").exists());
    assert!(!output.join("site/c").exists());
    assert!(!output.join("site/README.md").exists());
    let snapshots = logs.join("snapshots/20250102_030405");
    assert!(snapshots.join("03-convert.yaml").exists());
    assert!(!snapshots.join("04-build.yaml").exists());
}

#[tokio::test]
async fn stage_run_on_its_own_still_reports_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let fs = LiveFileSystem;
    let collaborator = Scripted::new(BLOG_PLAN);
    let stages =
        Stages { fs: &fs, synthesizer: &collaborator, docs: &collaborator, project_name: "site" };

    let result = stages.run(Stage::Integrate, PipelineState::new(dir.path(), dir.path())).await;

    match result {
        Err(PipelineError::PreconditionViolation { stage, field }) => {
            assert_eq!(stage, Stage::Integrate);
            assert_eq!(field, StateField::ProjectRoot);
        }
        other => panic!("expected precondition violation, got {other:?}"),
    }
}
