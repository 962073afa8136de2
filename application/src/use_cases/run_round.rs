//! Run Round use case
//!
//! Plays one round: every participant speaks once, in roster order, and each
//! prompt is built from the transcript as it stands at that moment.

use super::execute_turn::{TurnError, TurnExecutor};
use crate::ports::progress::DiscussionObserver;
use roundtable_domain::core::string::truncate;
use roundtable_domain::{DomainError, PromptBuilder, Session, Turn};
use thiserror::Error;
use tracing::debug;

/// Errors that stop a round
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("Could not record turn: {0}")]
    Domain(#[from] DomainError),
}

/// Drives a single round of a session
///
/// Turns are strictly sequential: a participant's prompt includes every reply
/// recorded before it, so nothing in a round can run concurrently.
pub struct RoundOrchestrator<'a> {
    executor: &'a TurnExecutor,
}

impl<'a> RoundOrchestrator<'a> {
    pub fn new(executor: &'a TurnExecutor) -> Self {
        Self { executor }
    }

    /// Play `round` on `session`
    ///
    /// Stops at the first failing turn. Turns recorded before the failure
    /// stay in the session's transcript.
    pub async fn run_round(
        &self,
        session: &mut Session,
        round: u32,
        observer: &dyn DiscussionObserver,
    ) -> Result<(), RoundError> {
        let roster = session.roster().clone();
        let builder = PromptBuilder::new(&roster).with_max_rounds(session.max_rounds());

        for participant in roster.iter() {
            let prompt =
                builder.build(&participant.id, session.question(), round, session.transcript())?;

            observer.on_turn_start(participant, round);
            let reply = self.executor.execute(&participant.id, &prompt, round).await?;
            debug!(
                "{} answered round {}: {}",
                participant.id,
                round,
                truncate(&reply, 80)
            );

            session.record_turn(Turn::new(participant.id.clone(), reply, round))?;
            if let Some(turn) = session.transcript().last() {
                observer.on_turn_complete(participant, turn);
            }
        }

        Ok(())
    }
}
