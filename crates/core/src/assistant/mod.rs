//! Local-LLM assistant
//!
//! Title enhancement, category suggestions, daily summaries and the streaming
//! chat. The backend proxies every request to the user's Ollama instance.

pub mod ports;
pub mod service;

pub use ports::{AiApi, ChatStream};
pub use service::{strip_quotes, AssistantService};
