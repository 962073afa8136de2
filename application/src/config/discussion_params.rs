//! Discussion parameters — round loop control.
//!
//! [`DiscussionParams`] groups the static parameters that control the round
//! loop in [`RunDiscussionUseCase`](crate::use_cases::run_discussion::RunDiscussionUseCase).
//! These are application-layer concerns, not domain policy.

use roundtable_domain::DEFAULT_MAX_ROUNDS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Round loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionParams {
    /// Number of rounds to play. Zero is allowed and yields a summary only.
    pub max_rounds: u32,
    /// Pause between rounds. Never applied after the last round.
    pub round_delay: Option<Duration>,
    /// Upper bound for a single responder call.
    pub turn_timeout: Option<Duration>,
}

impl Default for DiscussionParams {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            round_delay: None,
            turn_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl DiscussionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_round_delay(mut self, delay: Option<Duration>) -> Self {
        self.round_delay = delay.filter(|d| !d.is_zero());
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Same as [`with_turn_timeout`](Self::with_turn_timeout) with seconds;
    /// `None` or zero disables the timeout.
    pub fn with_timeout_seconds(self, seconds: Option<u64>) -> Self {
        self.with_turn_timeout(seconds.filter(|s| *s > 0).map(Duration::from_secs))
    }
}
