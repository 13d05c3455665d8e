//! Session module - input buffer, chat history and configuration
//!
//! Re-exports only. All logic in submodules.

mod channel;
mod chat;
mod config;
mod state;

pub use channel::{ConnectionState, MessageChannel};
pub use chat::{ChatHistory, ChatMessage, Role};
pub use config::{SessionConfig, DEFAULT_CYCLE_PERIOD_MS, DEFAULT_DETECTOR_TIMEOUT_MS, DEFAULT_SOCKET_URL};
pub use state::{SendOutcome, SessionState};
