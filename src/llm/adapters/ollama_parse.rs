//! Ollama response parsing

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse an Ollama `/api/chat` response (non-streaming)
pub fn parse_chat_completion(response: &str) -> Result<Option<String>, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(error) = json.get("error").and_then(|e| e.as_str()) {
        return Err(AdapterError::Provider {
            code: "ollama".to_string(),
            message: error.to_string(),
        });
    }

    let content = json
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| AdapterError::InvalidResponse("Missing message.content".to_string()))?;

    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content.to_string()))
    }
}
