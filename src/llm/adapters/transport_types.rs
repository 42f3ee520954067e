//! Transport types
//!
//! Common types shared across transport implementations.

use serde_json::Value as JsonValue;

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network error (connection refused, DNS, TLS, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status); `message` holds the response body
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited or quota exhausted
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider-reported error
    #[error("Provider error: {code} - {message}")]
    Provider { code: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

impl AdapterError {
    /// The provider's own message, without the variant prefix
    pub fn message(&self) -> String {
        match self {
            AdapterError::Network(m)
            | AdapterError::Authentication(m)
            | AdapterError::RateLimited(m)
            | AdapterError::InvalidResponse(m)
            | AdapterError::Configuration(m)
            | AdapterError::Io(m)
            | AdapterError::Json(m) => m.clone(),
            AdapterError::Provider { message, .. } => message.clone(),
            AdapterError::Http { status, message } => extract_error_message(message)
                .or_else(|| (!message.trim().is_empty()).then(|| message.trim().to_string()))
                .unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    /// Classify an HTTP error status with its response body
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => AdapterError::Authentication(
                extract_error_message(&body).unwrap_or_else(|| "Invalid API key".to_string()),
            ),
            429 => AdapterError::RateLimited(
                extract_error_message(&body).unwrap_or_else(|| "Too many requests".to_string()),
            ),
            _ => AdapterError::Http {
                status,
                message: body,
            },
        }
    }
}

/// Pull a human-readable message out of a provider error body
///
/// Handles `{"error":{"message":"..."}}` (Gemini, OpenAI) and
/// `{"error":"..."}` (Ollama).
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: JsonValue = serde_json::from_str(body).ok()?;
    let error = json.get("error")?;
    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(|s| s.to_string())
}

impl From<std::io::Error> for AdapterError {
    fn from(err: std::io::Error) -> Self {
        AdapterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Json(err.to_string())
    }
}

impl From<ureq::Error> for AdapterError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                AdapterError::from_status(code, body)
            }
            ureq::Error::Transport(err) => AdapterError::Network(err.to_string()),
        }
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over the HTTP client so adapters can run against
/// `FakeTransport` in tests.
pub trait SyncTransport: Send + Sync {
    /// POST a JSON request and return the response body
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError>;
}
