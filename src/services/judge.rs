//! Grading pipeline
//!
//! One request, one upstream call, no retries:
//! credential check, prompt assembly, completion, tolerant JSON parse.

use serde_json::Value;
use std::sync::Arc;

use crate::config::UpstreamConfig;
use crate::error::JudgeError;
use crate::schemas::deepseek::{ChatCompletionRequest, ResponseFormat};
use crate::schemas::{CheckPhysicsRequest, Verdict};
use crate::services::completion::CompletionBackend;
use crate::services::prompt;
use crate::utils::{recover_json, string::LOG_PREVIEW_CHARS, truncate_with_suffix};

/// Grades player explanations through a chat-completion backend
#[derive(Clone)]
pub struct JudgeService {
    config: UpstreamConfig,
    backend: Arc<dyn CompletionBackend>,
}

impl JudgeService {
    pub fn new(config: UpstreamConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { config, backend }
    }

    /// Whether a credential is configured
    pub fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    /// Build the outbound request for a grading task
    pub fn build_request(&self, request: &CheckPhysicsRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: prompt::build_messages(request),
            temperature: self.config.temperature,
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    /// Grade one explanation and return the parsed model reply unchanged
    pub async fn grade(&self, request: &CheckPhysicsRequest) -> Result<Value, JudgeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(JudgeError::MissingApiKey)?;

        let completion_request = self.build_request(request);
        let content = self.backend.complete(api_key, &completion_request).await?;

        let verdict = recover_json(&content).map_err(|e| {
            tracing::debug!(
                error = %e,
                content = %truncate_with_suffix(&content, LOG_PREVIEW_CHARS, "..."),
                "Failed to parse model reply"
            );
            JudgeError::InvalidVerdict(e)
        })?;

        match Verdict::from_value(&verdict) {
            Some(parsed) => {
                if !parsed.score_in_range() {
                    tracing::warn!(
                        score = parsed.score,
                        "Verdict score outside 0-100, relaying as-is"
                    );
                }
                tracing::info!(
                    card = %request.card,
                    pass = parsed.pass,
                    score = parsed.score,
                    "Explanation graded"
                );
            }
            None => tracing::warn!(
                card = %request.card,
                "Model reply does not match the verdict shape, relaying as-is"
            ),
        }

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records calls and replies with a canned result
    struct FakeBackend {
        reply: Mutex<Option<Result<String, JudgeError>>>,
        calls: Mutex<Vec<(String, ChatCompletionRequest)>>,
    }

    impl FakeBackend {
        fn replying(reply: Result<String, JudgeError>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for FakeBackend {
        async fn complete(
            &self,
            api_key: &str,
            request: &ChatCompletionRequest,
        ) -> Result<String, JudgeError> {
            self.calls
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(JudgeError::MalformedResponse("called twice".to_string())))
        }
    }

    fn sample_request() -> CheckPhysicsRequest {
        CheckPhysicsRequest {
            poem_text: "池塘倒映著月亮".to_string(),
            card: "光的反射".to_string(),
            reasoning: "水面像鏡子一樣反射了月光，所以看得到倒影".to_string(),
        }
    }

    fn service(api_key: Option<&str>, backend: Arc<FakeBackend>) -> JudgeService {
        let mut config = UpstreamConfig::default();
        config.api_key = api_key.map(str::to_string);
        JudgeService::new(config, backend)
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_backend() {
        let backend = FakeBackend::replying(Ok("{}".to_string()));
        let judge = service(None, backend.clone());

        let err = judge.grade(&sample_request()).await.unwrap_err();
        assert!(matches!(err, JudgeError::MissingApiKey));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_api_key_is_missing() {
        let backend = FakeBackend::replying(Ok("{}".to_string()));
        let judge = service(Some(""), backend.clone());

        assert!(matches!(
            judge.grade(&sample_request()).await,
            Err(JudgeError::MissingApiKey)
        ));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_plain_json_reply_relayed() {
        let backend =
            FakeBackend::replying(Ok(r#"{"pass":true,"score":85,"comment":"良好"}"#.to_string()));
        let judge = service(Some("sk-test"), backend.clone());

        let verdict = judge.grade(&sample_request()).await.unwrap();
        assert_eq!(verdict, json!({"pass": true, "score": 85, "comment": "良好"}));

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sk-test");
    }

    #[tokio::test]
    async fn test_fenced_reply_recovered() {
        let backend = FakeBackend::replying(Ok(
            "```json\n{\"pass\":true,\"score\":85,\"comment\":\"良好\"}\n```".to_string(),
        ));
        let judge = service(Some("sk-test"), backend);

        let verdict = judge.grade(&sample_request()).await.unwrap();
        assert_eq!(verdict, json!({"pass": true, "score": 85, "comment": "良好"}));
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_error() {
        let backend = FakeBackend::replying(Ok("解釋得不錯，通過。".to_string()));
        let judge = service(Some("sk-test"), backend);

        assert!(matches!(
            judge.grade(&sample_request()).await,
            Err(JudgeError::InvalidVerdict(_))
        ));
    }

    #[tokio::test]
    async fn test_unexpected_shape_passes_through() {
        let backend = FakeBackend::replying(Ok(r#"{"verdict":"ok","score":"high"}"#.to_string()));
        let judge = service(Some("sk-test"), backend);

        let verdict = judge.grade(&sample_request()).await.unwrap();
        assert_eq!(verdict, json!({"verdict": "ok", "score": "high"}));
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend = FakeBackend::replying(Err(JudgeError::Upstream {
            status: 429,
            message: "rate limited".to_string(),
        }));
        let judge = service(Some("sk-test"), backend);

        let err = judge.grade(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }

    #[tokio::test]
    async fn test_outbound_request_shape() {
        let backend = FakeBackend::replying(Ok("{}".to_string()));
        let judge = service(Some("sk-test"), backend.clone());
        let request = sample_request();

        judge.grade(&request).await.unwrap();

        let calls = backend.calls.lock().unwrap();
        let sent = &calls[0].1;
        assert_eq!(sent.model, "deepseek-chat");
        assert_eq!(sent.temperature, 0.3);
        assert_eq!(sent.response_format, Some(ResponseFormat::json_object()));
        assert_eq!(sent.messages.len(), 2);
        assert!(sent.messages[1].content.contains(&request.poem_text));
        assert!(sent.messages[1].content.contains(&request.card));
        assert!(sent.messages[1].content.contains(&request.reasoning));
    }
}
