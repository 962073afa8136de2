//! Run Discussion use case
//!
//! Orchestrates the full roundtable: round after round until the bound is
//! reached, then the closing summary.

use super::execute_turn::TurnExecutor;
use super::run_round::{RoundError, RoundOrchestrator};
use super::summarize::{SummaryError, SummaryGenerator};
use crate::config::DiscussionParams;
use crate::ports::composite_progress::CompositeObserver;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{DiscussionObserver, NoProgress};
use crate::ports::responder::ResponderRegistry;
use roundtable_domain::{
    DEFAULT_MAX_ROUNDS, DomainError, Participant, ParticipantId, Question, Roster, Session, Turn,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that can occur during a discussion
///
/// Failures after the first round started carry the partial session, so the
/// turns already spoken are never lost.
#[derive(Error, Debug)]
pub enum RunDiscussionError {
    #[error("Invalid discussion: {0}")]
    Configuration(#[from] DomainError),

    #[error("Discussion stopped in round {round}: {source}")]
    Round {
        round: u32,
        #[source]
        source: RoundError,
        session: Box<Session>,
    },

    #[error("Summary failed: {source}")]
    Summary {
        #[source]
        source: SummaryError,
        session: Box<Session>,
    },
}

impl RunDiscussionError {
    /// The session as it stood when the discussion stopped
    pub fn partial_session(&self) -> Option<&Session> {
        match self {
            Self::Configuration(_) => None,
            Self::Round { session, .. } | Self::Summary { session, .. } => Some(session),
        }
    }
}

/// Input for the RunDiscussion use case
#[derive(Debug, Clone)]
pub struct RunDiscussionInput {
    /// The question, as typed
    pub question: String,
    /// Number of rounds to play
    pub max_rounds: u32,
    /// Pause between rounds
    pub round_delay: Option<Duration>,
    /// Subset of the roster to seat; `None` seats everyone
    pub participants: Option<Vec<ParticipantId>>,
}

impl RunDiscussionInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            round_delay: None,
            participants: None,
        }
    }

    /// Take rounds and pacing from `params`
    pub fn from_params(question: impl Into<String>, params: &DiscussionParams) -> Self {
        Self::new(question)
            .with_max_rounds(params.max_rounds)
            .with_round_delay(params.round_delay)
    }

    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_round_delay(mut self, delay: Option<Duration>) -> Self {
        self.round_delay = delay;
        self
    }

    pub fn with_participants(mut self, ids: Vec<ParticipantId>) -> Self {
        self.participants = Some(ids);
        self
    }
}

/// Use case for running a roundtable discussion
///
/// Stateless between calls: every `execute` builds a fresh session.
#[derive(Clone)]
pub struct RunDiscussionUseCase {
    roster: Roster,
    executor: TurnExecutor,
    summary: SummaryGenerator,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunDiscussionUseCase {
    pub fn new(roster: Roster, registry: ResponderRegistry) -> Self {
        Self {
            roster,
            executor: TurnExecutor::new(Arc::new(registry)),
            summary: SummaryGenerator::templated(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Bound every responder call
    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.executor = self.executor.with_timeout(timeout);
        self
    }

    pub fn with_summary(mut self, summary: SummaryGenerator) -> Self {
        self.summary = summary;
        self
    }

    /// Set a conversation logger for structured event logging.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDiscussionInput) -> Result<Session, RunDiscussionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDiscussionInput,
        progress: &dyn DiscussionObserver,
    ) -> Result<Session, RunDiscussionError> {
        let question = Question::new(input.question)?;
        let roster = match &input.participants {
            Some(ids) => self.roster.select(ids)?,
            None => self.roster.clone(),
        };

        let mut session = Session::new(
            Uuid::new_v4().to_string(),
            question,
            roster,
            input.max_rounds,
        );

        let log_observer = LogObserver {
            logger: self.conversation_logger.as_ref(),
            session_id: session.id().to_string(),
        };
        let observer = CompositeObserver::new(vec![progress, &log_observer as &dyn DiscussionObserver]);

        info!(
            "Starting discussion {} with {} participants over {} rounds",
            session.id(),
            session.roster().len(),
            session.max_rounds()
        );
        observer.on_session_start(&session);

        let rounds = RoundOrchestrator::new(&self.executor);
        while session.has_rounds_remaining() {
            let round = session.current_round();
            let max_rounds = session.max_rounds();
            observer.on_round_start(round, max_rounds);

            if let Err(source) = rounds.run_round(&mut session, round, &observer).await {
                warn!("Round {} failed: {}", round, source);
                session.fail(source.to_string());
                observer.on_session_failed(&session, &source.to_string());
                return Err(RunDiscussionError::Round {
                    round,
                    source,
                    session: Box::new(session),
                });
            }

            observer.on_round_complete(round, max_rounds);
            session.advance_round();

            if let Some(delay) = input.round_delay
                && session.has_rounds_remaining()
            {
                tokio::time::sleep(delay).await;
            }
        }

        observer.on_summary_start();
        match self.summary.generate(&session).await {
            Ok(summary) => session.complete(summary),
            Err(source) => {
                warn!("Summary failed: {}", source);
                session.fail(source.to_string());
                observer.on_session_failed(&session, &source.to_string());
                return Err(RunDiscussionError::Summary {
                    source,
                    session: Box::new(session),
                });
            }
        }

        info!(
            "Discussion {} completed with {} turns",
            session.id(),
            session.transcript().len()
        );
        observer.on_session_complete(&session);

        Ok(session)
    }
}

/// Mirrors discussion events into the conversation log
struct LogObserver<'a> {
    logger: &'a dyn ConversationLogger,
    session_id: String,
}

impl DiscussionObserver for LogObserver<'_> {
    fn on_round_start(&self, _round: u32, _max_rounds: u32) {}

    fn on_turn_complete(&self, speaker: &Participant, turn: &Turn) {
        self.logger.log(ConversationEvent::new(
            "turn",
            serde_json::json!({
                "session_id": self.session_id,
                "speaker": speaker.id.as_str(),
                "display_name": speaker.display_name,
                "round": turn.round(),
                "content": turn.content(),
                "bytes": turn.content().len(),
            }),
        ));
    }

    fn on_round_complete(&self, _round: u32, _max_rounds: u32) {}

    fn on_session_start(&self, session: &Session) {
        let participants: Vec<&str> = session.roster().ids().map(|id| id.as_str()).collect();
        self.logger.log(ConversationEvent::new(
            "session_started",
            serde_json::json!({
                "session_id": self.session_id,
                "question": session.question().content(),
                "participants": participants,
                "max_rounds": session.max_rounds(),
            }),
        ));
    }

    fn on_session_complete(&self, session: &Session) {
        if let Some(summary) = session.summary() {
            self.logger.log(ConversationEvent::new(
                "summary",
                serde_json::json!({
                    "session_id": self.session_id,
                    "source": summary.source,
                    "text": summary.text,
                    "total_turns": summary.total_turns,
                }),
            ));
        }
    }

    fn on_session_failed(&self, session: &Session, error: &str) {
        self.logger.log(ConversationEvent::new(
            "session_failed",
            serde_json::json!({
                "session_id": self.session_id,
                "error": error,
                "turns": session.transcript().len(),
            }),
        ));
    }
}
