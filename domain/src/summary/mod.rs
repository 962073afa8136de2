//! Discussion summary
//!
//! - [`DiscussionSummary`] — the report attached to a completed session
//! - [`SummaryTemplate`] — deterministic templated narrative

mod template;

pub use template::SummaryTemplate;

use serde::{Deserialize, Serialize};

/// Where a summary came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummarySource {
    /// Fixed narrative template
    Template,
    /// Content-derived synthesis written by a moderator responder
    Moderator { moderator: String },
}

/// Final report of a session (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionSummary {
    pub text: String,
    pub source: SummarySource,
    /// Round bound the session ran with
    pub rounds: u32,
    pub total_turns: usize,
}

impl DiscussionSummary {
    pub fn new(
        text: impl Into<String>,
        source: SummarySource,
        rounds: u32,
        total_turns: usize,
    ) -> Self {
        Self {
            text: text.into(),
            source,
            rounds,
            total_turns,
        }
    }
}
