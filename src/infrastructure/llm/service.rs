//! LLM client trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM provider is not configured")]
    NotConfigured,

    #[error("LLM transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("LLM response contained no text")]
    EmptyResponse,

    #[error("LLM output could not be parsed: {0}")]
    MalformedOutput(String),
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// A single-turn completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user_message: String,
    pub max_tokens: u32,
}

/// Text returned by the model with token accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Trait for hosted LLM completion providers.
///
/// # Implementations
///
/// - [`crate::infrastructure::llm::AnthropicClient`] - Anthropic Messages API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one system prompt and one user message, returns the first text block.
    ///
    /// # Errors
    ///
    /// - [`LlmError::NotConfigured`] when no API key is set
    /// - [`LlmError::Api`] when the provider rejects the request
    /// - [`LlmError::EmptyResponse`] when the reply carries no text block
    async fn complete(&self, request: CompletionRequest) -> LlmResult<Completion>;

    /// Whether the client has credentials to make calls.
    fn is_configured(&self) -> bool;
}
