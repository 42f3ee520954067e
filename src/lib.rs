//! Study Copilot: NCERT-aligned study material for CBSE Classes 9-10
//!
//! The binary-side half of the workspace: provider adapters, the
//! generation gateway and chat sessions, configuration, the selection
//! state machine, terminal rendering, and the CLI. The pure domain
//! (catalog, uploads, prompts) lives in `copilot-core`.

pub mod cli;
pub mod config;
pub mod llm;
pub mod render;
pub mod selection;
pub mod study;

pub use config::{Config, ConfigError, Provider};
pub use llm::{ChatSession, GenerationFailure, GenerationGateway, EMPTY_RESULT};
pub use render::{render_plain, render_terminal};
pub use selection::{Selection, SelectionError};
pub use study::{ChapterChat, StudyCopilot, CHAT_APOLOGY};
