//! Stub Adapter
//!
//! Offline adapter that answers without network calls.
//! Used by tests and as the default when no provider is configured.

use crate::llm::adapters::{AdapterError, LlmAdapter, LlmMessage, LlmRole};

/// Reply used by [`StubAdapter::new`]
pub const OFFLINE_REPLY: &str = "# Offline preview

No model provider is configured, so this is a placeholder answer.

- Set `provider` under `[llm]` in config.toml
- Supply an `api_key` (or `env:NAME`)";

#[derive(Debug, Clone)]
enum StubReply {
    Text(String),
    Empty,
    Fail(String),
}

/// Stub adapter for testing (returns canned responses)
#[derive(Debug, Clone)]
pub struct StubAdapter {
    reply: StubReply,
}

impl StubAdapter {
    /// Offline placeholder reply
    pub fn new() -> Self {
        Self::with_reply(OFFLINE_REPLY)
    }

    /// Always answer with `reply`
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: StubReply::Text(reply.into()),
        }
    }

    /// Answer with no text at all
    pub fn empty() -> Self {
        Self {
            reply: StubReply::Empty,
        }
    }

    /// Fail every call with a provider error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: StubReply::Fail(message.into()),
        }
    }
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmAdapter for StubAdapter {
    fn complete(
        &self,
        messages: &[LlmMessage],
        _temperature: f32,
    ) -> Result<Option<String>, AdapterError> {
        if !messages.iter().any(|m| m.role == LlmRole::User) {
            return Err(AdapterError::InvalidResponse(
                "No user message to answer".to_string(),
            ));
        }

        match &self.reply {
            StubReply::Text(text) => Ok(Some(text.clone())),
            StubReply::Empty => Ok(None),
            StubReply::Fail(message) => Err(AdapterError::Provider {
                code: "stub".to_string(),
                message: message.clone(),
            }),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
