//! OpenAI Adapter
//!
//! OpenAI-compatible `/chat/completions` adapter.

use crate::llm::adapters::transport::{SyncTransport, Transport, UreqTransport};
use crate::llm::adapters::{role_content_array, AdapterError, LlmAdapter, LlmMessage};

pub use crate::llm::adapters::openai_parse::parse_chat_completion;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible adapter
#[derive(Debug)]
pub struct OpenAiAdapter {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    model: String,
    api_key: String,
    transport: Transport,
}

impl OpenAiAdapter {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self::with_transport(
            base_url,
            model,
            api_key,
            Transport::Real(UreqTransport::new()),
        )
    }

    /// Create adapter with custom transport (for testing)
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: String,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Build chat request body from a message array
    pub fn build_request(&self, messages: &[LlmMessage], temperature: f32) -> String {
        serde_json::json!({
            "model": self.model,
            "messages": role_content_array(messages),
            "temperature": temperature,
            "stream": false
        })
        .to_string()
    }
}

impl LlmAdapter for OpenAiAdapter {
    fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<Option<String>, AdapterError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.build_request(messages, temperature);

        let auth_header = format!("Bearer {}", self.api_key);
        let headers = [
            ("Authorization", auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.transport.post_json(&url, &headers, &body)?;
        parse_chat_completion(&response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
