//! Anthropic Messages API client.

use super::service::{Completion, CompletionRequest, LlmClient, LlmError, LlmResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const API_VERSION: &str = "2023-06-01";

/// LLM client backed by the Anthropic Messages API.
///
/// Holds a shared `reqwest::Client`; cloning the client is cheap.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl AnthropicClient {
    /// Creates a client.
    ///
    /// `api_key = None` yields a client whose calls fail with [`LlmError::NotConfigured`].
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> LlmResult<Completion> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: [Message {
                role: "user",
                content: &request.user_message,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.api_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            warn!(status = status.as_u16(), %message, "LLM request rejected");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyResponse)?;

        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "LLM completion received"
        );

        Ok(Completion {
            text,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        })
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "You write invoices".to_string(),
            user_message: "Invoice for ACME".to_string(),
            max_tokens: 100,
        }
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "test-key")
                .header("anthropic-version", API_VERSION);
            then.status(200).json_body(json!({
                "content": [{ "type": "text", "text": "<h1>Invoice</h1>" }],
                "usage": { "input_tokens": 12, "output_tokens": 34 }
            }));
        });

        let client = AnthropicClient::new(
            reqwest::Client::new(),
            server.base_url(),
            Some("test-key".to_string()),
            "test-model",
        );

        let completion = client.complete(request()).await.unwrap();

        assert_eq!(completion.text, "<h1>Invoice</h1>");
        assert_eq!(completion.input_tokens, 12);
        assert_eq!(completion.output_tokens, 34);
        mock.assert();
    }

    #[tokio::test]
    async fn test_complete_maps_provider_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(429).json_body(json!({
                "type": "error",
                "error": { "type": "rate_limit_error", "message": "Too many requests" }
            }));
        });

        let client = AnthropicClient::new(
            reqwest::Client::new(),
            server.base_url(),
            Some("test-key".to_string()),
            "test-model",
        );

        let err = client.complete(request()).await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too many requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_without_text_block() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(json!({
                "content": [],
                "usage": { "input_tokens": 1, "output_tokens": 0 }
            }));
        });

        let client = AnthropicClient::new(
            reqwest::Client::new(),
            server.base_url(),
            Some("test-key".to_string()),
            "test-model",
        );

        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unconfigured_client() {
        let client = AnthropicClient::new(
            reqwest::Client::new(),
            "http://localhost",
            None,
            "test-model",
        );

        assert!(!client.is_configured());
        let err = client.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }
}
