//! Chat sessions
//!
//! A session owns its scope, its system instruction and the turn history.
//! Each send replays the whole history to the provider.

use crate::llm::adapters::LlmMessage;
use crate::llm::gateway::{GenerationFailure, GenerationGateway};
use tracing::{debug, warn};

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One completed utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    fn to_message(&self) -> LlmMessage {
        match self.role {
            ChatRole::User => LlmMessage::user(self.text.clone()),
            ChatRole::Model => LlmMessage::assistant(self.text.clone()),
        }
    }
}

/// Scoped multi-turn conversation
///
/// History only ever holds exchanges the provider completed: a failed send
/// leaves it as it was before the call.
#[derive(Debug)]
pub struct ChatSession<'g> {
    gateway: &'g GenerationGateway,
    scope: String,
    system_instruction: String,
    temperature: f32,
    turns: Vec<ChatTurn>,
}

impl<'g> ChatSession<'g> {
    pub(crate) fn new(
        gateway: &'g GenerationGateway,
        scope: String,
        system_instruction: String,
        temperature: f32,
    ) -> Self {
        Self {
            gateway,
            scope,
            system_instruction,
            temperature,
            turns: Vec::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Send a user message and return the model's reply
    pub fn send(&mut self, text: &str) -> Result<String, GenerationFailure> {
        self.turns.push(ChatTurn {
            role: ChatRole::User,
            text: text.to_string(),
        });

        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(LlmMessage::system(self.system_instruction.clone()));
        messages.extend(self.turns.iter().map(ChatTurn::to_message));

        debug!(scope = %self.scope, turns = self.turns.len(), "chat send");

        match self.gateway.complete(&messages, self.temperature) {
            Ok(reply) => {
                self.turns.push(ChatTurn {
                    role: ChatRole::Model,
                    text: reply.clone(),
                });
                Ok(reply)
            }
            Err(err) => {
                self.turns.pop();
                warn!(scope = %self.scope, error = %err, "chat send failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;
    use crate::llm::adapters::stub::StubAdapter;
    use crate::llm::adapters::Adapter;

    #[test]
    fn test_session_seeded_with_scope() {
        let gateway = GenerationGateway::new(
            Adapter::Stub(StubAdapter::with_reply("ok")),
            SamplingConfig::default(),
        );
        let session = gateway.open_chat_session("Science: Matter in Our Surroundings (Class 9)");

        assert_eq!(session.scope(), "Science: Matter in Our Surroundings (Class 9)");
        assert!(session
            .system_instruction()
            .contains("focusing ONLY on: Science: Matter in Our Surroundings (Class 9)."));
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_send_records_both_turns() {
        let gateway = GenerationGateway::new(
            Adapter::Stub(StubAdapter::with_reply("Evaporation is a surface phenomenon.")),
            SamplingConfig::default(),
        );
        let mut session = gateway.open_chat_session("scope");

        let reply = session.send("What is evaporation?").unwrap();
        assert_eq!(reply, "Evaporation is a surface phenomenon.");
        assert_eq!(
            session.turns(),
            &[
                ChatTurn {
                    role: ChatRole::User,
                    text: "What is evaporation?".to_string()
                },
                ChatTurn {
                    role: ChatRole::Model,
                    text: "Evaporation is a surface phenomenon.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_failed_send_rolls_back() {
        let gateway = GenerationGateway::new(
            Adapter::Stub(StubAdapter::failing("quota exceeded")),
            SamplingConfig::default(),
        );
        let mut session = gateway.open_chat_session("scope");

        let err = session.send("hello").unwrap_err();
        assert_eq!(err.message, "quota exceeded");
        assert!(session.turns().is_empty());
    }
}
