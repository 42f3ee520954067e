//! Gemini Adapter
//!
//! Google Generative Language API (`models/{model}:generateContent`).

use crate::llm::adapters::transport::{SyncTransport, Transport, UreqTransport};
use crate::llm::adapters::{AdapterError, LlmAdapter, LlmMessage, LlmRole};
use serde_json::Value as JsonValue;

pub use crate::llm::adapters::gemini_parse::parse_generate_content;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Gemini adapter
#[derive(Debug)]
pub struct GeminiAdapter {
    base_url: String,
    model: String,
    api_key: String,
    transport: Transport,
}

impl GeminiAdapter {
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

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Endpoint URL for this model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Build request body
    ///
    /// System messages are merged into `systemInstruction`; the rest become
    /// `contents` with Gemini's `user`/`model` roles.
    pub fn build_request(&self, messages: &[LlmMessage], temperature: f32) -> String {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == LlmRole::System)
            .map(|m| m.content.as_str())
            .collect();

        let contents: Vec<JsonValue> = messages
            .iter()
            .filter(|m| m.role != LlmRole::System)
            .map(|m| {
                let role = if m.role == LlmRole::Assistant { "model" } else { "user" };
                serde_json::json!({
                    "role": role,
                    "parts": [{"text": m.content}]
                })
            })
            .collect();

        let mut request = serde_json::json!({
            "contents": contents,
            "generationConfig": {"temperature": temperature}
        });
        if !system.is_empty() {
            request["systemInstruction"] = serde_json::json!({
                "parts": [{"text": system.join("\n")}]
            });
        }

        request.to_string()
    }
}

impl LlmAdapter for GeminiAdapter {
    fn complete(
        &self,
        messages: &[LlmMessage],
        temperature: f32,
    ) -> Result<Option<String>, AdapterError> {
        let body = self.build_request(messages, temperature);
        let headers = [
            ("x-goog-api-key", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.transport.post_json(&self.endpoint(), &headers, &body)?;
        parse_generate_content(&response)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::adapters::transport::FakeTransport;

    fn adapter(response: &str) -> GeminiAdapter {
        GeminiAdapter::with_transport(
            DEFAULT_BASE_URL.to_string(),
            "gemini-test".to_string(),
            "key-123".to_string(),
            Transport::Fake(FakeTransport::new(response)),
        )
    }

    #[test]
    fn test_request_shape() {
        let a = adapter("{}");
        let body = a.build_request(
            &[
                LlmMessage::system("be brief"),
                LlmMessage::user("hi"),
                LlmMessage::assistant("hello"),
                LlmMessage::user("again"),
            ],
            0.1,
        );
        let json: JsonValue = serde_json::from_str(&body).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "again");
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_complete_sends_key_and_endpoint() {
        let a = adapter(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#);
        let reply = a.complete(&[LlmMessage::user("q")], 0.2).unwrap();
        assert_eq!(reply, Some("ok".to_string()));

        let fake = a.transport().as_fake().unwrap();
        let request = &fake.requests()[0];
        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
        assert!(request
            .headers
            .contains(&("x-goog-api-key".to_string(), "key-123".to_string())));
    }

    #[test]
    fn test_no_system_instruction_when_absent() {
        let a = adapter("{}");
        let body = a.build_request(&[LlmMessage::user("q")], 0.1);
        let json: JsonValue = serde_json::from_str(&body).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }
}
