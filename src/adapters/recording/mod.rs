//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use clock::RecordingClock;
pub use llm::RecordingLlmClient;

/// Record an interaction with a plain (non-`Result`) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output = serde_json::to_value(output).unwrap_or(serde_json::Value::Null);
    push(recorder, port, method, input, output);
}

/// Record a `Result<T, E>` interaction as `{"ok": value}` or `{"err": message}`.
///
/// This is the shape `replaying::replay_result` decodes.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output = match result {
        Ok(v) => {
            serde_json::json!({ "ok": serde_json::to_value(v).unwrap_or(serde_json::Value::Null) })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    push(recorder, port, method, input, output);
}

fn push(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(e) => tracing::warn!(port, method, error = %e, "recorder lock poisoned, dropping interaction"),
    }
}
