//! OpenAI response parsing
//!
//! Public functions for parsing OpenAI chat completion JSON.

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse OpenAI chat completion JSON response
///
/// A `null` or empty `content` yields `Ok(None)`.
pub fn parse_chat_completion(response: &str) -> Result<Option<String>, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(error) = json.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        let code = error
            .get("code")
            .and_then(|c| c.as_str())
            .or_else(|| error.get("type").and_then(|t| t.as_str()))
            .unwrap_or_default()
            .to_string();
        return Err(AdapterError::Provider { code, message });
    }

    let message = json["choices"]
        .get(0)
        .and_then(|c| c.get("message"))
        .ok_or_else(|| AdapterError::InvalidResponse("Missing choices[0].message".to_string()))?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_completion_valid() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"test content"}}]}"#;
        assert_eq!(
            parse_chat_completion(json).unwrap(),
            Some("test content".to_string())
        );
    }

    #[test]
    fn test_parse_chat_completion_null_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_chat_completion(json).unwrap(), None);
    }

    #[test]
    fn test_parse_chat_completion_missing_choices() {
        let json = r#"{"model":"gpt-4"}"#;
        assert!(matches!(
            parse_chat_completion(json),
            Err(AdapterError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_error_object() {
        let json = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let err = parse_chat_completion(json).unwrap_err();
        assert_eq!(err.message(), "You exceeded your current quota");
    }
}
