//! Responder port
//!
//! Defines the interface to whatever turns a prompt into a participant's
//! reply (an LLM persona in production, a scripted stub in tests).

use async_trait::async_trait;
use roundtable_domain::{ParticipantId, Roster};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while a responder produces text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Who is speaking and when, handed to the responder alongside the prompt
///
/// Responders are free to ignore it; the prompt already carries everything
/// the participant needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub speaker: ParticipantId,
    pub round: u32,
}

/// Something that answers a prompt with text
///
/// Implementations (adapters) live in the infrastructure layer. A call may
/// fail or hang; the caller decides about timeouts, never the responder.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply to `prompt`
    ///
    /// `context` is `None` for calls that are not a participant turn
    /// (e.g. the moderator's synthesis).
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&TurnContext>,
    ) -> Result<String, ResponderError>;
}

/// Mapping from participant to the responder that speaks for it
///
/// Injected into the use case at construction; there is no global registry.
#[derive(Clone, Default)]
pub struct ResponderRegistry {
    responders: HashMap<ParticipantId, Arc<dyn Responder>>,
}

impl ResponderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with(mut self, id: ParticipantId, responder: Arc<dyn Responder>) -> Self {
        self.insert(id, responder);
        self
    }

    pub fn insert(&mut self, id: ParticipantId, responder: Arc<dyn Responder>) {
        self.responders.insert(id, responder);
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Arc<dyn Responder>> {
        self.responders.get(id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.responders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.responders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }

    /// Roster members with no registered responder, in roster order
    pub fn missing_for(&self, roster: &Roster) -> Vec<ParticipantId> {
        roster
            .ids()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for ResponderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.responders.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        f.debug_struct("ResponderRegistry")
            .field("participants", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl Responder for Fixed {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&TurnContext>,
        ) -> Result<String, ResponderError> {
            Ok("ok".to_string())
        }
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn test_missing_for_roster() {
        let registry = ResponderRegistry::new().with(id("B"), Arc::new(Fixed));
        let roster = Roster::from_ids(["A", "B", "C"]).unwrap();
        assert_eq!(registry.missing_for(&roster), vec![id("A"), id("C")]);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_and_generate() {
        let registry = ResponderRegistry::new().with(id("A"), Arc::new(Fixed));
        let responder = registry.get(&id("A")).unwrap();
        assert_eq!(responder.generate("hi", None).await.unwrap(), "ok");
        assert!(registry.get(&id("Z")).is_none());
    }

    #[test]
    fn test_debug_lists_ids() {
        let registry = ResponderRegistry::new()
            .with(id("b"), Arc::new(Fixed))
            .with(id("a"), Arc::new(Fixed));
        assert_eq!(
            format!("{:?}", registry),
            r#"ResponderRegistry { participants: ["a", "b"] }"#
        );
    }
}
