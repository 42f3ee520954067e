//! LLM Adapters
//!
//! Provider-agnostic interface for LLM HTTP APIs.
//! Supports Gemini, OpenAI-compatible endpoints, and Ollama.

pub mod factory;
pub mod gemini;
pub mod gemini_parse;
pub mod ollama;
pub mod ollama_parse;
pub mod openai;
pub mod openai_parse;
pub mod stub;
pub mod transport;
pub mod transport_fake;
pub mod transport_types;
pub mod transport_ureq;

// Re-export common types
pub use factory::{create_adapter, create_adapter_with_transport};
pub use transport::{AdapterError, SyncTransport, Transport};

/// LLM message role (universal subset across providers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmRole {
    /// System message (sets behavior/context)
    System,
    /// User message (human input)
    User,
    /// Assistant message (LLM response)
    Assistant,
}

impl LlmRole {
    /// Role name used by OpenAI-style chat APIs
    pub fn as_str(self) -> &'static str {
        match self {
            LlmRole::System => "system",
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

/// Single LLM message (provider-agnostic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::Assistant,
            content: content.into(),
        }
    }
}

/// Convert messages to the OpenAI/Ollama `messages` array
pub(crate) fn role_content_array(messages: &[LlmMessage]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| {
            serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content
            })
        })
        .collect()
}

/// LLM adapter trait
///
/// All providers implement this trait.
pub trait LlmAdapter: Send + Sync {
    /// Send the whole conversation and return the reply text
    ///
    /// `Ok(None)` means the provider answered without any text.
    fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<Option<String>, AdapterError>;

    /// Get provider name for logging
    fn provider_name(&self) -> &str;
}

/// Adapter enum — concrete type for all providers
#[derive(Debug)]
pub enum Adapter {
    Gemini(gemini::GeminiAdapter),
    OpenAi(openai::OpenAiAdapter),
    Ollama(ollama::OllamaAdapter),
    Stub(stub::StubAdapter),
}

impl LlmAdapter for Adapter {
    fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<Option<String>, AdapterError> {
        match self {
            Adapter::Gemini(a) => a.complete(messages, temperature),
            Adapter::OpenAi(a) => a.complete(messages, temperature),
            Adapter::Ollama(a) => a.complete(messages, temperature),
            Adapter::Stub(a) => a.complete(messages, temperature),
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Adapter::Gemini(a) => a.provider_name(),
            Adapter::OpenAi(a) => a.provider_name(),
            Adapter::Ollama(a) => a.provider_name(),
            Adapter::Stub(a) => a.provider_name(),
        }
    }
}
