//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DiscussionParams;
pub use ports::{
    composite_progress::CompositeObserver,
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{DiscussionObserver, NoProgress},
    responder::{Responder, ResponderError, ResponderRegistry, TurnContext},
};
pub use use_cases::execute_turn::{TurnError, TurnExecutor};
pub use use_cases::run_discussion::{RunDiscussionError, RunDiscussionInput, RunDiscussionUseCase};
pub use use_cases::run_round::{RoundError, RoundOrchestrator};
pub use use_cases::summarize::{SummaryError, SummaryGenerator, SummaryMode};
