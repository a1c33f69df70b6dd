//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Configuration defaults
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Settings defaults (mirrors the backend's defaults)
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral:7b-instruct-q4_0";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// Break tracking
pub const BREAK_TITLE: &str = "Break Time";
pub const BREAK_DESCRIPTION: &str = "Taking a break";
pub const BREAK_MARKER: &str = "break";

// Assistant
pub const CHAT_RECENT_TASKS: usize = 5;
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please make sure AI is \
                                       enabled in settings and Ollama is running.";

// Data transfer
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";
