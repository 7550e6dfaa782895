//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Records LLM interactions while delegating to an inner implementation.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Creates a new recording LLM client wrapping the given implementation.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            record_result(&self.recorder, "llm", "complete", &request, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::ports::CompletionResponse;

    struct EchoLlm;

    impl LlmClient for EchoLlm {
        fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
            let text = request.prompt.to_uppercase();
            Box::pin(async move {
                Ok(CompletionResponse { text, prompt_tokens: 1, completion_tokens: 1 })
            })
        }
    }

    #[tokio::test]
    async fn records_request_and_ok_response() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llm.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "t")));

        {
            let llm = RecordingLlmClient::new(Box::new(EchoLlm), Arc::clone(&recorder));
            let request = CompletionRequest {
                model: "m".into(),
                system: None,
                prompt: "describe".into(),
                max_tokens: 8,
                temperature: 0.0,
            };
            assert_eq!(llm.complete(&request).await.unwrap().text, "DESCRIBE");
        }

        Arc::try_unwrap(recorder).unwrap().into_inner().unwrap().finish().unwrap();
        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].input["prompt"], "describe");
        assert_eq!(cassette.interactions[0].output["ok"]["text"], "DESCRIBE");
    }
}
