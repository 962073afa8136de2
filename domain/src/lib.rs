//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roundtable
//!
//! A fixed roster of personas answers one question over several rounds.
//! Inside a round every participant speaks once, in roster order, and sees
//! everything said before it, including earlier speakers of the same round.
//!
//! - [`Transcript`]: the append-only record of [`Turn`]s
//! - [`PromptBuilder`]: what each participant is asked on its turn
//! - [`SummaryTemplate`]: the closing report once all rounds are played

pub mod config;
pub mod core;
pub mod discussion;
pub mod prompt;
pub mod summary;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    participant::{Participant, ParticipantId, Roster},
    question::Question,
};
pub use discussion::{
    session::{DEFAULT_MAX_ROUNDS, Session, SessionStatus},
    transcript::Transcript,
    turn::{Turn, render_turns},
};
pub use prompt::{PromptBuilder, SynthesisPrompt};
pub use summary::{DiscussionSummary, SummarySource, SummaryTemplate};
