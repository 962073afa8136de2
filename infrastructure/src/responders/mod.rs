//! Responder adapters
//!
//! - [`ChatCompletionsResponder`] — OpenAI-compatible HTTP endpoint
//! - [`OfflineResponder`] — canned replies for dry runs
//! - [`ResponderFactory`] — wires one responder per participant from config

mod chat_completions;
mod factory;
mod offline;

pub use chat_completions::{ChatCompletionsResponder, ChatMessage, ChatRequest};
pub use factory::{MODERATOR_NAME, ResponderFactory, ResponderSetupError};
pub use offline::OfflineResponder;
