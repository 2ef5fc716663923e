pub mod prompt;
pub mod service;

pub use service::{ChatOutcome, ConversationService, FALLBACK_REPLY};
