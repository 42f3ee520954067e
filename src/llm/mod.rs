//! LLM integration
//!
//! Provider adapters plus the generation gateway and chat sessions built
//! on top of them. Everything is blocking request/response.

pub mod adapters;
pub mod chat;
pub mod gateway;

pub use adapters::{create_adapter, Adapter, AdapterError, LlmAdapter, LlmMessage, LlmRole};
pub use chat::{ChatRole, ChatSession, ChatTurn};
pub use gateway::{GenerationFailure, GenerationGateway, EMPTY_RESULT};
