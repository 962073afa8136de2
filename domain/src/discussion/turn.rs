//! Turn value object

use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One participant's contribution in one round (Value Object)
///
/// Fields are private: a turn cannot change once it has been produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: ParticipantId,
    content: String,
    round: u32,
    timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current instant
    pub fn new(speaker: ParticipantId, content: impl Into<String>, round: u32) -> Self {
        Self::at(speaker, content, round, Utc::now())
    }

    /// Create a turn with an explicit timestamp
    pub fn at(
        speaker: ParticipantId,
        content: impl Into<String>,
        round: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            speaker,
            content: content.into(),
            round,
            timestamp,
        }
    }

    pub fn speaker(&self) -> &ParticipantId {
        &self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Deterministic single-entry rendering: `speaker (round r): content`
    pub fn render(&self) -> String {
        format!("{} (round {}): {}", self.speaker, self.round, self.content)
    }

    pub(crate) fn clamp_timestamp(mut self, not_before: DateTime<Utc>) -> Self {
        if self.timestamp < not_before {
            self.timestamp = not_before;
        }
        self
    }
}

/// Render a sequence of turns, one entry per paragraph
pub fn render_turns<'a>(turns: impl IntoIterator<Item = &'a Turn>) -> String {
    turns
        .into_iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
