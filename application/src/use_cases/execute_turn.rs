//! Execute Turn use case
//!
//! Asks the responder registered for one participant for its reply.

use crate::ports::responder::{ResponderError, ResponderRegistry, TurnContext};
use roundtable_domain::ParticipantId;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while a participant takes its turn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("No responder registered for participant '{0}'")]
    ResponderUnavailable(ParticipantId),

    #[error("Responder for '{speaker}' failed: {source}")]
    Responder {
        speaker: ParticipantId,
        #[source]
        source: ResponderError,
    },
}

impl TurnError {
    pub fn speaker(&self) -> &ParticipantId {
        match self {
            Self::ResponderUnavailable(speaker) => speaker,
            Self::Responder { speaker, .. } => speaker,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Responder {
                source: ResponderError::Timeout,
                ..
            }
        )
    }
}

/// Resolves a speaker to its responder and obtains the reply
///
/// Replies are returned verbatim; an empty string is a valid reply.
#[derive(Debug, Clone)]
pub struct TurnExecutor {
    registry: Arc<ResponderRegistry>,
    timeout: Option<Duration>,
}

impl TurnExecutor {
    pub fn new(registry: Arc<ResponderRegistry>) -> Self {
        Self {
            registry,
            timeout: None,
        }
    }

    /// Bound every responder call; `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(
        &self,
        speaker: &ParticipantId,
        prompt: &str,
        round: u32,
    ) -> Result<String, TurnError> {
        let responder = self
            .registry
            .get(speaker)
            .ok_or_else(|| TurnError::ResponderUnavailable(speaker.clone()))?;

        let context = TurnContext {
            speaker: speaker.clone(),
            round,
        };

        debug!("Asking {} for round {} ({} chars)", speaker, round, prompt.len());

        let result = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, responder.generate(prompt, Some(&context))).await
                {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("{} timed out after {:?}", speaker, limit);
                        Err(ResponderError::Timeout)
                    }
                }
            }
            None => responder.generate(prompt, Some(&context)).await,
        };

        result.map_err(|source| TurnError::Responder {
            speaker: speaker.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::responder::Responder;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl Responder for Echo {
        async fn generate(
            &self,
            prompt: &str,
            context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            let ctx = context.ok_or_else(|| ResponderError::Other("no context".into()))?;
            Ok(format!("{}-{}: {}", ctx.speaker, ctx.round, prompt))
        }
    }

    struct Failing;

    #[async_trait]
    impl Responder for Failing {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            Err(ResponderError::RequestFailed("boom".into()))
        }
    }

    struct Slow;

    #[async_trait]
    impl Responder for Slow {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("late".into())
        }
    }

    struct Blank;

    #[async_trait]
    impl Responder for Blank {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            Ok(String::new())
        }
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn executor(responders: Vec<(&str, Arc<dyn Responder>)>) -> TurnExecutor {
        let mut registry = ResponderRegistry::new();
        for (name, responder) in responders {
            registry.insert(id(name), responder);
        }
        TurnExecutor::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_returns_reply_verbatim() {
        let exec = executor(vec![("A", Arc::new(Echo))]);
        let reply = exec.execute(&id("A"), "hello", 2).await.unwrap();
        assert_eq!(reply, "A-2: hello");
    }

    #[tokio::test]
    async fn test_empty_reply_is_valid() {
        let exec = executor(vec![("A", Arc::new(Blank))]);
        assert_eq!(exec.execute(&id("A"), "p", 1).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_responder() {
        let exec = executor(vec![("A", Arc::new(Echo))]);
        let err = exec.execute(&id("Z"), "p", 1).await.unwrap_err();
        assert_eq!(err, TurnError::ResponderUnavailable(id("Z")));
        assert_eq!(err.speaker(), &id("Z"));
    }

    #[tokio::test]
    async fn test_responder_failure_is_wrapped() {
        let exec = executor(vec![("A", Arc::new(Failing))]);
        let err = exec.execute(&id("A"), "p", 1).await.unwrap_err();
        assert!(matches!(
            err,
            TurnError::Responder {
                source: ResponderError::RequestFailed(_),
                ..
            }
        ));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let exec = executor(vec![("A", Arc::new(Slow))])
            .with_timeout(Some(Duration::from_millis(50)));
        let err = exec.execute(&id("A"), "p", 1).await.unwrap_err();
        assert!(err.is_timeout());
    }
}
