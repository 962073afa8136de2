//! Summarize use case
//!
//! Produces the closing report of a session, either from the fixed template
//! or by asking a moderator responder to synthesize the transcript.

use crate::ports::responder::{Responder, ResponderError};
use roundtable_domain::{DiscussionSummary, Session, SummarySource, SummaryTemplate, SynthesisPrompt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while summarizing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Moderator '{moderator}' failed: {source}")]
    Moderator {
        moderator: String,
        #[source]
        source: ResponderError,
    },
}

/// How the closing summary is written
#[derive(Clone, Default)]
pub enum SummaryMode {
    /// Deterministic narrative; no responder is called
    #[default]
    Template,
    /// A responder reads the whole transcript and writes the summary
    Moderator {
        name: String,
        responder: Arc<dyn Responder>,
    },
}

impl std::fmt::Debug for SummaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template => f.write_str("Template"),
            Self::Moderator { name, .. } => f.debug_struct("Moderator").field("name", name).finish(),
        }
    }
}

/// Writes the summary attached to a completed session
#[derive(Debug, Clone, Default)]
pub struct SummaryGenerator {
    mode: SummaryMode,
    timeout: Option<Duration>,
}

impl SummaryGenerator {
    pub fn new(mode: SummaryMode) -> Self {
        Self {
            mode,
            timeout: None,
        }
    }

    pub fn templated() -> Self {
        Self::new(SummaryMode::Template)
    }

    pub fn moderated(name: impl Into<String>, responder: Arc<dyn Responder>) -> Self {
        Self::new(SummaryMode::Moderator {
            name: name.into(),
            responder,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Summarize `session`
    ///
    /// A session without any turn always gets the templated summary; the
    /// moderator is never asked to summarize nothing.
    pub async fn generate(&self, session: &Session) -> Result<DiscussionSummary, SummaryError> {
        let template = || {
            SummaryTemplate::generate(
                session.question(),
                session.roster(),
                session.max_rounds(),
                session.transcript(),
            )
        };

        let (name, responder) = match &self.mode {
            SummaryMode::Template => return Ok(template()),
            SummaryMode::Moderator { name, responder } => (name, responder),
        };

        if session.transcript().is_empty() {
            debug!("Empty transcript, skipping moderator");
            return Ok(template());
        }

        info!("Asking {} to synthesize {} turns", name, session.transcript().len());
        let prompt = SynthesisPrompt::build(
            session.question(),
            session.roster(),
            session.max_rounds(),
            session.transcript(),
        );

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, responder.generate(&prompt, None))
                .await
                .unwrap_or(Err(ResponderError::Timeout)),
            None => responder.generate(&prompt, None).await,
        };

        let text = result.map_err(|source| SummaryError::Moderator {
            moderator: name.clone(),
            source,
        })?;

        Ok(DiscussionSummary::new(
            text,
            SummarySource::Moderator {
                moderator: name.clone(),
            },
            session.max_rounds(),
            session.transcript().len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::responder::TurnContext;
    use async_trait::async_trait;
    use roundtable_domain::{ParticipantId, Question, Roster, Turn};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Moderator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Responder for Moderator {
        async fn generate(
            &self,
            prompt: &str,
            context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            assert!(context.is_none());
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("synthesis of {} chars", prompt.len()))
        }
    }

    struct Broken;

    #[async_trait]
    impl Responder for Broken {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            Err(ResponderError::InvalidResponse("empty choices".into()))
        }
    }

    fn played_session() -> Session {
        let roster = Roster::from_ids(["A", "B"]).unwrap();
        let mut session = Session::new("s", Question::new("Q?").unwrap(), roster, 1);
        for speaker in ["A", "B"] {
            session
                .record_turn(Turn::new(ParticipantId::new(speaker).unwrap(), "view", 1))
                .unwrap();
        }
        session.advance_round();
        session
    }

    #[tokio::test]
    async fn test_template_mode() {
        let summary = SummaryGenerator::templated()
            .generate(&played_session())
            .await
            .unwrap();
        assert_eq!(summary.source, SummarySource::Template);
        assert_eq!(summary.total_turns, 2);
        assert!(summary.text.contains("Question: Q?"));
    }

    #[tokio::test]
    async fn test_moderator_mode() {
        let moderator = Arc::new(Moderator::default());
        let summary = SummaryGenerator::moderated("moderator", moderator.clone())
            .generate(&played_session())
            .await
            .unwrap();
        assert!(summary.text.starts_with("synthesis of"));
        assert_eq!(
            summary.source,
            SummarySource::Moderator {
                moderator: "moderator".into()
            }
        );
        assert_eq!(moderator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_moderator_skipped_for_empty_transcript() {
        let moderator = Arc::new(Moderator::default());
        let roster = Roster::from_ids(["A"]).unwrap();
        let session = Session::new("s", Question::new("Q?").unwrap(), roster, 0);

        let summary = SummaryGenerator::moderated("moderator", moderator.clone())
            .generate(&session)
            .await
            .unwrap();
        assert_eq!(summary.source, SummarySource::Template);
        assert_eq!(moderator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_moderator_failure() {
        let err = SummaryGenerator::moderated("moderator", Arc::new(Broken))
            .generate(&played_session())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty choices"));
    }
}
