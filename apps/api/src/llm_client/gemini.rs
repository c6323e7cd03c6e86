//! Google Gemini chat over the `generateContent` REST endpoint.
//!
//! Gemini chats are stateless on the server side: the chat session keeps the
//! history locally and resends it with every turn. A turn is only committed to
//! history once the model answered.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::llm_client::{ChatProvider, ChatSession, ProviderError, ProviderReply};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a [Content],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_reply(self) -> Result<Content, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::Blocked(reason));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyContent)?;

        let content = match candidate.content {
            Some(content) => content,
            None => {
                return Err(match candidate.finish_reason {
                    Some(reason) if reason != "STOP" => ProviderError::Blocked(reason),
                    _ => ProviderError::EmptyContent,
                })
            }
        };

        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            return Err(ProviderError::EmptyContent);
        }

        Ok(Content::text("model", &text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini API client. Cheap to clone; every chat session holds its own copy.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let builder = Client::builder().timeout(timeout);
        #[cfg(test)]
        let builder = builder.no_proxy();
        Ok(Self {
            client: builder.build()?,
            api_key,
            model: model.trim_start_matches("models/").to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    /// Confirms the key is accepted and the configured model exists.
    async fn verify_model(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;
        check_status(response).await?;
        debug!("Gemini model {} is available", self.model);
        Ok(())
    }

    async fn generate(&self, contents: &[Content]) -> Result<Content, ProviderError> {
        let response = self
            .client
            .post(format!("{}:generateContent", self.model_url()))
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest { contents })
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: GenerateContentResponse = serde_json::from_str(&response.text().await?)?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        body.into_reply()
    }
}

/// Maps non-2xx responses to `ProviderError::Api`, pulling the provider's
/// message out of the error envelope when there is one.
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Gemini API returned {}: {}", status, body);
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn start_chat(&self) -> Result<Arc<dyn ChatSession>, ProviderError> {
        self.verify_model().await?;
        Ok(Arc::new(GeminiChat {
            client: self.clone(),
            history: Mutex::new(Vec::new()),
        }))
    }
}

/// A Gemini conversation with its locally held history.
pub struct GeminiChat {
    client: GeminiClient,
    history: Mutex<Vec<Content>>,
}

impl GeminiChat {
    #[cfg(test)]
    async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send_message(&self, text: &str) -> Result<ProviderReply, ProviderError> {
        let mut history = self.history.lock().await;

        let user_turn = Content::text("user", text);
        let mut contents = history.clone();
        contents.push(user_turn.clone());

        let reply = self.client.generate(&contents).await?;
        let reply_text: String = reply.parts.iter().filter_map(|p| p.text.as_deref()).collect();

        history.push(user_turn);
        history.push(reply);

        Ok(ProviderReply { text: reply_text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::error::Error as _;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::chat::bridge;
    use crate::session::{ConversationStatus, SessionStore};

    const KEY: &str = "test-key";
    const TIMEOUT: Duration = Duration::from_millis(200);

    #[derive(Clone, Default)]
    struct FakeGemini {
        fail_next: Arc<AtomicBool>,
        stall: Arc<AtomicBool>,
        last_request: Arc<std::sync::Mutex<Option<Value>>>,
    }

    impl FakeGemini {
        async fn maybe_stall(&self) {
            if self.stall.load(Ordering::SeqCst) {
                tokio::time::sleep(TIMEOUT * 10).await;
            }
        }
    }

    async fn get_model(
        State(fake): State<FakeGemini>,
        headers: HeaderMap,
        Path(model): Path<String>,
    ) -> (StatusCode, Json<Value>) {
        fake.maybe_stall().await;
        if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "API key not valid."}})),
            );
        }
        if model != "gemini-pro" {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"code": 404, "message": format!("models/{model} is not found")}})),
            );
        }
        (StatusCode::OK, Json(json!({"name": "models/gemini-pro"})))
    }

    async fn generate_content(
        State(fake): State<FakeGemini>,
        Path(path): Path<String>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if path != "gemini-pro:generateContent" {
            return (StatusCode::NOT_FOUND, Json(json!({"error": {"code": 404, "message": path}})));
        }
        *fake.last_request.lock().unwrap() = Some(body.clone());
        fake.maybe_stall().await;
        if fake.fail_next.swap(false, Ordering::SeqCst) {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": {"code": 503, "message": "The model is overloaded."}})),
            );
        }
        let turns = body["contents"].as_array().map(|c| c.len()).unwrap_or(0);
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "reply "}, {"text": turns.to_string()}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2}
            })),
        )
    }

    async fn spawn_fake(fake: FakeGemini) -> String {
        let app = Router::new()
            .route("/models/*path", get(get_model).post(generate_content))
            .with_state(fake);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base: &str, key: &str, model: &str) -> GeminiClient {
        GeminiClient::new(key.to_string(), model, base, TIMEOUT).unwrap()
    }

    async fn verified_chat(base: &str) -> GeminiChat {
        let gemini = client(base, KEY, "gemini-pro");
        gemini.verify_model().await.unwrap();
        GeminiChat {
            client: gemini,
            history: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_model_prefix_and_trailing_slash_are_normalized() {
        let c = client("http://localhost/v1beta/", KEY, "models/gemini-pro");
        assert_eq!(c.model(), "gemini-pro");
        assert_eq!(c.model_url(), "http://localhost/v1beta/models/gemini-pro");
    }

    #[test]
    fn test_into_reply_joins_text_parts() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "a"}, {"text": "b"}]}}]
        }))
        .unwrap();
        let reply = body.into_reply().unwrap();
        assert_eq!(reply.parts[0].text.as_deref(), Some("ab"));
    }

    #[test]
    fn test_into_reply_reports_blocked_prompt() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(body.into_reply(), Err(ProviderError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_into_reply_without_candidates_is_empty() {
        let body: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(body.into_reply(), Err(ProviderError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_start_chat_rejects_bad_key() {
        let base = spawn_fake(FakeGemini::default()).await;
        let err = client(&base, "wrong", "gemini-pro")
            .start_chat()
            .await
            .err()
            .expect("bad key must fail");
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_chat_rejects_unknown_model() {
        let base = spawn_fake(FakeGemini::default()).await;
        let result = client(&base, KEY, "gemini-nope").start_chat().await;
        assert!(matches!(result, Err(ProviderError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_history_grows_only_on_success() {
        let fake = FakeGemini::default();
        let base = spawn_fake(fake.clone()).await;
        let chat = verified_chat(&base).await;

        // First turn: only the new user message is sent.
        let reply = chat.send_message("hello").await.unwrap();
        assert_eq!(reply.text, "reply 1");
        assert_eq!(chat.history_len().await, 2);

        // Failed turn leaves history alone.
        fake.fail_next.store(true, Ordering::SeqCst);
        let err = chat.send_message("are you there?").await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 503, .. }));
        assert_eq!(chat.history_len().await, 2);

        // Next turn resends the two committed turns plus the new one.
        let reply = chat.send_message("again").await.unwrap();
        assert_eq!(reply.text, "reply 3");
        assert_eq!(chat.history_len().await, 4);

        let sent = fake.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent["contents"][0]["role"], "user");
        assert_eq!(sent["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(sent["contents"][1]["role"], "model");
        assert_eq!(sent["contents"][2]["parts"][0]["text"], "again");
    }

    #[tokio::test]
    async fn test_stalled_reply_times_out_and_keeps_history() {
        let fake = FakeGemini::default();
        let base = spawn_fake(fake.clone()).await;
        let chat = verified_chat(&base).await;
        chat.send_message("hello").await.unwrap();
        assert_eq!(chat.history_len().await, 2);

        fake.stall.store(true, Ordering::SeqCst);
        let err = chat.send_message("still there?").await.unwrap_err();
        assert!(matches!(&err, ProviderError::Http(e) if e.is_timeout()), "got {err:?}");
        assert_eq!(chat.history_len().await, 2);
    }

    #[tokio::test]
    async fn test_stalled_reply_surfaces_as_transport_error() {
        let fake = FakeGemini::default();
        let base = spawn_fake(fake.clone()).await;
        let gemini = client(&base, KEY, "gemini-pro");
        let mut store = SessionStore::new();
        let session = store.get_or_create_session(&gemini).await.unwrap();

        fake.stall.store(true, Ordering::SeqCst);
        let err = bridge::send(&session, "hello").await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("An error occurred while sending the message:"));
        let cause = err.source().and_then(|e| e.downcast_ref::<ProviderError>());
        assert!(matches!(cause, Some(ProviderError::Http(e)) if e.is_timeout()));
        assert_eq!(store.status(), ConversationStatus::Active);
    }

    #[tokio::test]
    async fn test_stalled_model_check_fails_session_init() {
        let fake = FakeGemini {
            stall: Arc::new(AtomicBool::new(true)),
            ..FakeGemini::default()
        };
        let base = spawn_fake(fake).await;
        let gemini = client(&base, KEY, "gemini-pro");
        let mut store = SessionStore::new();

        let err = store.get_or_create_session(&gemini).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to initialize the chat session:"));
        assert_eq!(store.status(), ConversationStatus::Failed);
    }
}
