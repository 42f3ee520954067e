//! Generation gateway
//!
//! Single entry point to the model provider: one-shot content generation
//! and scoped chat sessions. No retries, no caching.

use crate::config::SamplingConfig;
use crate::llm::adapters::{Adapter, AdapterError, LlmAdapter, LlmMessage};
use crate::llm::chat::ChatSession;
use copilot_core::chat_instruction;
use tracing::{debug, info};

/// Text returned when the provider answers with nothing
pub const EMPTY_RESULT: &str = "No content generated.";

/// Generation failed; `message` is the provider's own wording
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<AdapterError> for GenerationFailure {
    fn from(err: AdapterError) -> Self {
        Self::new(err.message())
    }
}

/// Map "no text" and whitespace-only replies to [`EMPTY_RESULT`]
pub(crate) fn normalize_reply(reply: Option<String>) -> String {
    match reply {
        Some(text) if !text.trim().is_empty() => text,
        _ => EMPTY_RESULT.to_string(),
    }
}

/// Provider access for generation and chat
#[derive(Debug)]
pub struct GenerationGateway {
    adapter: Adapter,
    sampling: SamplingConfig,
}

impl GenerationGateway {
    pub fn new(adapter: Adapter, sampling: SamplingConfig) -> Self {
        Self { adapter, sampling }
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.sampling
    }

    pub fn provider_name(&self) -> &str {
        self.adapter.provider_name()
    }

    /// One request/response call
    pub fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> Result<String, GenerationFailure> {
        debug!(
            provider = self.provider_name(),
            prompt_len = prompt.len(),
            temperature,
            "generate"
        );

        let messages = [
            LlmMessage::system(system_instruction),
            LlmMessage::user(prompt),
        ];
        let reply = self.adapter.complete(&messages, temperature)?;
        let text = normalize_reply(reply);

        info!(provider = self.provider_name(), reply_len = text.len(), "content generated");
        Ok(text)
    }

    /// Open a chat session restricted to `scope`
    pub fn open_chat_session(&self, scope: impl Into<String>) -> ChatSession<'_> {
        let scope = scope.into();
        let instruction = chat_instruction(&scope);
        ChatSession::new(self, scope, instruction, self.sampling.chat_temperature)
    }

    /// Send a raw conversation (used by chat sessions)
    pub(crate) fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<String, GenerationFailure> {
        let reply = self.adapter.complete(messages, temperature)?;
        Ok(normalize_reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::stub::StubAdapter;

    fn gateway(stub: StubAdapter) -> GenerationGateway {
        GenerationGateway::new(Adapter::Stub(stub), SamplingConfig::default())
    }

    #[test]
    fn test_generate_returns_text() {
        let g = gateway(StubAdapter::with_reply("## Summary"));
        assert_eq!(g.generate("p", "s", 0.1).unwrap(), "## Summary");
    }

    #[test]
    fn test_generate_empty_becomes_placeholder() {
        let g = gateway(StubAdapter::empty());
        assert_eq!(g.generate("p", "s", 0.1).unwrap(), EMPTY_RESULT);

        let g = gateway(StubAdapter::with_reply("  \n "));
        assert_eq!(g.generate("p", "s", 0.1).unwrap(), EMPTY_RESULT);
    }

    #[test]
    fn test_failure_carries_provider_message() {
        let g = gateway(StubAdapter::failing("quota exceeded"));
        let err = g.generate("p", "s", 0.1).unwrap_err();
        assert_eq!(err.message, "quota exceeded");
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_from_adapter_error_drops_prefix() {
        let err: GenerationFailure = AdapterError::Network("connection refused".to_string()).into();
        assert_eq!(err.message, "connection refused");
    }
}
