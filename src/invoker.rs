//! Upstream model calls: the only network boundary in the pipelines.
//!
//! [`ModelInvoker`] is deliberately thin — (credentials, model, messages,
//! optional image, optional token cap) in, raw completion text out. All
//! prompt engineering lives in [`crate::prompts`] and all response cleanup
//! in [`crate::sanitize`], so this module never needs to know which task it
//! is serving. The trait is also the seam the integration tests stub: a
//! scripted invoker records calls and replays canned completions without
//! touching the network.
//!
//! No retry or backoff happens here. Credentials arrive with each request
//! and are dropped with it; a transient upstream failure surfaces to the
//! caller immediately as a server error.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Default endpoint when a credential block carries no `baseUrl`.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// API key and endpoint a single request bound together.
///
/// `Debug` redacts the key so it can never leak through a log line.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// One role-tagged message in a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// One upstream call, fully described.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    pub credentials: Credentials,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Image payload (data-URL or plain URL) attached to the last user
    /// message, passed through without decoding or validation.
    pub image: Option<String>,
    pub max_tokens: Option<u32>,
}

/// The external-collaborator boundary: given a fully described call, return
/// the raw completion text or an upstream failure.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn complete(&self, request: InvokeRequest) -> Result<String, GatewayError>;
}

// ── OpenAI-compatible adapter ────────────────────────────────────────────

/// Calls any OpenAI-compatible `/chat/completions` endpoint via reqwest.
///
/// The reqwest client (connection pool, per-call timeout) is shared across
/// requests; credentials are not — the bearer header is set fresh from each
/// request's own [`Credentials`].
pub struct OpenAiInvoker {
    http: reqwest::Client,
}

impl OpenAiInvoker {
    /// Build an invoker whose every upstream call is capped at `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ModelInvoker for OpenAiInvoker {
    async fn complete(&self, request: InvokeRequest) -> Result<String, GatewayError> {
        let base = request
            .credentials
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{base}/chat/completions");
        let body = build_body(&request);

        debug!(model = %request.model, messages = request.messages.len(), "calling model endpoint");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&request.credentials.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(model = %request.model, error = %e, "model request failed");
                GatewayError::Upstream {
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(model = %request.model, %status, "model API error");
            return Err(GatewayError::Upstream {
                detail: format!("model API returned {status}: {text}"),
            });
        }

        let completion: ChatCompletionRaw = response.json().await.map_err(|e| {
            GatewayError::Upstream {
                detail: format!("invalid completion payload: {e}"),
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::Upstream {
                detail: "completion contained no choices".into(),
            })
    }
}

/// Assemble the `/chat/completions` JSON body.
///
/// Text-only messages serialize as plain strings. When an image is present
/// it rides on the last user message as a content-part array, the shape
/// every OpenAI-compatible vision endpoint accepts.
fn build_body(request: &InvokeRequest) -> Value {
    let last_user = request
        .messages
        .iter()
        .rposition(|m| m.role == "user")
        .unwrap_or(request.messages.len().saturating_sub(1));

    let messages: Vec<Value> = request
        .messages
        .iter()
        .enumerate()
        .map(|(i, m)| match &request.image {
            Some(image) if i == last_user => json!({
                "role": m.role,
                "content": [
                    { "type": "text", "text": m.content },
                    { "type": "image_url", "image_url": { "url": image } },
                ],
            }),
            _ => json!({ "role": m.role, "content": m.content }),
        })
        .collect();

    let mut body = json!({
        "model": request.model,
        "messages": messages,
    });
    if let Some(cap) = request.max_tokens {
        body["max_tokens"] = json!(cap);
    }
    body
}

// ── Response shape ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatCompletionRaw {
    #[serde(default)]
    choices: Vec<ChoiceRaw>,
}

#[derive(Debug, Deserialize)]
struct ChoiceRaw {
    message: MessageRaw,
}

#[derive(Debug, Deserialize)]
struct MessageRaw {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image: Option<&str>, max_tokens: Option<u32>) -> InvokeRequest {
        InvokeRequest {
            credentials: Credentials {
                api_key: "sk-test".into(),
                base_url: None,
            },
            model: "test-model".into(),
            messages: vec![
                ChatMessage::system("be brief"),
                ChatMessage::user("transcribe this"),
            ],
            image: image.map(Into::into),
            max_tokens,
        }
    }

    #[test]
    fn text_only_body() {
        let body = build_body(&request(None, None));
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "transcribe this");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn image_attaches_to_user_message() {
        let body = build_body(&request(Some("data:image/png;base64,AAAA"), Some(2000)));
        // System message stays plain text
        assert_eq!(body["messages"][0]["content"], "be brief");
        // User message becomes a content-part array with the untouched URL
        let parts = &body["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "transcribe this");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,AAAA");
        assert_eq!(body["max_tokens"], 2000);
    }

    #[test]
    fn completion_parses_first_choice() {
        let raw: ChatCompletionRaw = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        let content = raw.choices.into_iter().next().unwrap().message.content;
        assert_eq!(content.as_deref(), Some("hello"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let creds = Credentials {
            api_key: "sk-secret".into(),
            base_url: None,
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
