//! Composite observer — delegates to multiple observers.
//!
//! Used to fan out discussion events to the progress spinner and the live
//! transcript at the same time.

use super::progress::DiscussionObserver;
use roundtable_domain::{Participant, Session, Turn};

/// An observer that delegates to multiple inner observers.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed observers can be composed without wrapper types.
pub struct CompositeObserver<'a> {
    delegates: Vec<&'a dyn DiscussionObserver>,
}

impl<'a> CompositeObserver<'a> {
    pub fn new(delegates: Vec<&'a dyn DiscussionObserver>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, observer: &'a dyn DiscussionObserver) {
        self.delegates.push(observer);
    }
}

/// Macro to delegate a method call to all inner observers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl DiscussionObserver for CompositeObserver<'_> {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        delegate!(self, on_round_start, round, max_rounds);
    }

    fn on_turn_complete(&self, speaker: &Participant, turn: &Turn) {
        delegate!(self, on_turn_complete, speaker, turn);
    }

    fn on_round_complete(&self, round: u32, max_rounds: u32) {
        delegate!(self, on_round_complete, round, max_rounds);
    }

    fn on_session_start(&self, session: &Session) {
        delegate!(self, on_session_start, session);
    }

    fn on_turn_start(&self, speaker: &Participant, round: u32) {
        delegate!(self, on_turn_start, speaker, round);
    }

    fn on_summary_start(&self) {
        delegate!(self, on_summary_start);
    }

    fn on_session_complete(&self, session: &Session) {
        delegate!(self, on_session_complete, session);
    }

    fn on_session_failed(&self, session: &Session, error: &str) {
        delegate!(self, on_session_failed, session, error);
    }
}
