//! Gemini response parsing

use crate::llm::adapters::AdapterError;
use serde_json::Value as JsonValue;

/// Parse a `generateContent` response
///
/// Returns the concatenated text of the first candidate's parts, or `None`
/// when the candidate carries no text (e.g. blocked by safety filters).
pub fn parse_generate_content(response: &str) -> Result<Option<String>, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(error) = json.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        let code = error
            .get("status")
            .and_then(|s| s.as_str())
            .map(|s| s.to_string())
            .or_else(|| error.get("code").map(|c| c.to_string()))
            .unwrap_or_default();
        return Err(AdapterError::Provider { code, message });
    }

    let parts = json["candidates"]
        .get(0)
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    let Some(parts) = parts else {
        return Ok(None);
    };

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_part() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"hello"}]}}]}"#;
        assert_eq!(parse_generate_content(json).unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn test_parse_joins_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        assert_eq!(parse_generate_content(json).unwrap(), Some("ab".to_string()));
    }

    #[test]
    fn test_parse_blocked_prompt_is_empty() {
        let json = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert_eq!(parse_generate_content(json).unwrap(), None);
    }

    #[test]
    fn test_parse_error_body() {
        let json = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = parse_generate_content(json).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::Provider { ref code, ref message }
                if code == "RESOURCE_EXHAUSTED" && message == "quota exceeded"
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_generate_content("not json"),
            Err(AdapterError::Json(_))
        ));
    }
}
