//! Progress notification port
//!
//! Defines the interface for observing a discussion while it runs. The
//! orchestration never prints; everything user-visible goes through here.

use roundtable_domain::{Participant, Session, Turn};

/// Callback for progress updates during a discussion
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, live transcript, etc.)
pub trait DiscussionObserver: Send + Sync {
    /// Called when a round starts
    fn on_round_start(&self, round: u32, max_rounds: u32);

    /// Called after a participant's reply has been recorded
    fn on_turn_complete(&self, speaker: &Participant, turn: &Turn);

    /// Called when every participant has spoken in a round
    fn on_round_complete(&self, round: u32, max_rounds: u32);

    // ==================== Optional Callbacks ====================

    /// Called once before the first round
    fn on_session_start(&self, _session: &Session) {}

    /// Called right before a responder is asked for a reply
    fn on_turn_start(&self, _speaker: &Participant, _round: u32) {}

    /// Called before the closing summary is produced
    fn on_summary_start(&self) {}

    /// Called once the session has its summary
    fn on_session_complete(&self, _session: &Session) {}

    /// Called when the session stops early; `session` holds the partial transcript
    fn on_session_failed(&self, _session: &Session, _error: &str) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoProgress;

impl DiscussionObserver for NoProgress {
    fn on_round_start(&self, _round: u32, _max_rounds: u32) {}
    fn on_turn_complete(&self, _speaker: &Participant, _turn: &Turn) {}
    fn on_round_complete(&self, _round: u32, _max_rounds: u32) {}
}
