//! Ollama Adapter
//!
//! Local Ollama server, `/api/chat` without streaming.

use crate::llm::adapters::transport::{SyncTransport, Transport, UreqTransport};
use crate::llm::adapters::{role_content_array, AdapterError, LlmAdapter, LlmMessage};

pub use crate::llm::adapters::ollama_parse::parse_chat_completion;

/// Default model
pub const DEFAULT_MODEL: &str = "llama3";

/// Ollama adapter (local HTTP API)
#[derive(Debug)]
pub struct OllamaAdapter {
    host: String,
    port: u16,
    model: String,
    transport: Transport,
}

impl OllamaAdapter {
    pub fn new(host: String, port: u16, model: String) -> Self {
        Self::with_transport(host, port, model, Transport::Real(UreqTransport::new()))
    }

    /// Create adapter with custom transport (for testing)
    pub fn with_transport(host: String, port: u16, model: String, transport: Transport) -> Self {
        Self {
            host,
            port,
            model,
            transport,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn build_request(&self, messages: &[LlmMessage], temperature: f32) -> String {
        serde_json::json!({
            "model": self.model,
            "messages": role_content_array(messages),
            "stream": false,
            "options": {"temperature": temperature}
        })
        .to_string()
    }
}

impl LlmAdapter for OllamaAdapter {
    fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<Option<String>, AdapterError> {
        let url = format!("{}/api/chat", self.base_url());
        let body = self.build_request(messages, temperature);
        let headers = [("Content-Type", "application/json")];

        let response = self.transport.post_json(&url, &headers, &body)?;
        parse_chat_completion(&response)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::transport::FakeTransport;
    use serde_json::Value as JsonValue;

    #[test]
    fn test_complete_hits_api_chat() {
        let adapter = OllamaAdapter::with_transport(
            "127.0.0.1".to_string(),
            11434,
            "llama3".to_string(),
            Transport::Fake(FakeTransport::new(
                r#"{"message":{"role":"assistant","content":"namaste"},"done":true}"#,
            )),
        );

        let reply = adapter.complete(&[LlmMessage::user("hello")], 0.1).unwrap();
        assert_eq!(reply, Some("namaste".to_string()));

        let request = &adapter.transport().as_fake().unwrap().requests()[0];
        assert_eq!(request.url, "http://127.0.0.1:11434/api/chat");
        let json: JsonValue = serde_json::from_str(&request.body).unwrap();
        assert_eq!(json["stream"], false);
        assert!(json["options"]["temperature"].is_number());
    }
}
