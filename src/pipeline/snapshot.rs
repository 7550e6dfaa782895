//! Per-stage YAML snapshots of the pipeline state.
//!
//! Snapshots are an audit trail only; no stage ever reads them back. Layout:
//!
//! ```text
//! <log_dir>/snapshots/<run id>/
//!   ├── 01-plan.yaml
//!   ├── 02-discovery.yaml
//!   └── ...
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{PipelineState, Stage};
use crate::ports::filesystem::FileSystem;

/// Writes one snapshot per completed stage and logs what changed.
pub struct SnapshotWriter<'a> {
    fs: &'a dyn FileSystem,
    dir: PathBuf,
    previous: Option<Value>,
}

impl<'a> SnapshotWriter<'a> {
    /// Creates a writer for the run started at `started`, below `log_dir`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, log_dir: &Path, started: DateTime<Utc>) -> Self {
        let run_id = started.format("%Y%m%d_%H%M%S").to_string();
        Self { fs, dir: log_dir.join("snapshots").join(run_id), previous: None }
    }

    /// Directory this run's snapshots go to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Records the state after `stage`. Failures are logged, never returned.
    pub fn capture(&mut self, stage: Stage, state: &PipelineState) {
        let current = match serde_json::to_value(state) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(stage = %stage, error = %e, "failed to serialize state snapshot");
                return;
            }
        };

        let changed = changed_fields(self.previous.as_ref(), &current);
        tracing::info!(stage = %stage, changed = %changed.join(", "), "state updated");

        let path = self.dir.join(format!("{:02}-{stage}.yaml", stage.position()));
        match serde_yaml::to_string(&current) {
            Ok(yaml) => match self.fs.write(&path, &yaml) {
                Ok(()) => tracing::debug!(path = %path.display(), "snapshot written"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to write snapshot");
                }
            },
            Err(e) => tracing::warn!(stage = %stage, error = %e, "failed to encode snapshot"),
        }

        self.previous = Some(current);
    }
}

/// Top-level keys of `new` whose values differ from `old`, in key order.
#[must_use]
pub fn changed_fields(old: Option<&Value>, new: &Value) -> Vec<String> {
    let Some(new_fields) = new.as_object() else {
        return Vec::new();
    };
    new_fields
        .iter()
        .filter(|(key, value)| {
            let before = old.and_then(|o| o.get(key.as_str())).unwrap_or(&Value::Null);
            before != *value
        })
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn first_snapshot_reports_every_non_null_field() {
        let new = json!({"a": 1, "b": null, "c": "x"});
        assert_eq!(changed_fields(None, &new), vec!["a", "c"]);
    }

    #[test]
    fn later_snapshots_report_only_differences() {
        let old = json!({"a": 1, "b": null, "c": "x"});
        let new = json!({"a": 1, "b": [1], "c": "y"});
        assert_eq!(changed_fields(Some(&old), &new), vec!["b", "c"]);
        assert!(changed_fields(Some(&new), &new).is_empty());
    }

    #[test]
    fn snapshots_are_numbered_by_stage() {
        let dir = tempfile::tempdir().unwrap();
        let started = Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap();
        let mut writer = SnapshotWriter::new(&LiveFileSystem, dir.path(), started);
        let mut state = PipelineState::new("in", "out");
        state.outline = Some("step one".into());

        writer.capture(Stage::Plan, &state);
        writer.capture(Stage::Discovery, &state);

        let run_dir = dir.path().join("snapshots/20250315_143000");
        assert_eq!(writer.dir(), run_dir);
        let yaml = LiveFileSystem.read_to_string(&run_dir.join("01-plan.yaml")).unwrap();
        assert!(yaml.contains("outline: step one"));
        assert!(run_dir.join("02-discovery.yaml").exists());
    }
}
