//! Hosted LLM completion client.
//!
//! Provides an [`LlmClient`] trait with one implementation:
//! - [`AnthropicClient`] - Messages API over HTTPS

mod anthropic;
mod service;

pub use anthropic::AnthropicClient;
pub use service::{Completion, CompletionRequest, LlmClient, LlmError, LlmResult};

#[cfg(test)]
pub use service::MockLlmClient;
