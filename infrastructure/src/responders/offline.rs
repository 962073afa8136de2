//! Offline responder for dry runs without an API key

use async_trait::async_trait;
use roundtable_application::{Responder, ResponderError, TurnContext};
use roundtable_domain::SummaryTemplate;

/// Deterministic canned replies, one instance per persona
#[derive(Debug, Clone)]
pub struct OfflineResponder {
    display_name: String,
}

impl OfflineResponder {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

#[async_trait]
impl Responder for OfflineResponder {
    async fn generate(
        &self,
        prompt: &str,
        context: Option<&TurnContext>,
    ) -> Result<String, ResponderError> {
        let reply = match context {
            Some(ctx) => format!(
                "[offline] {} in round {}: {}. (prompt was {} characters)",
                self.display_name,
                ctx.round,
                SummaryTemplate::round_stage(ctx.round),
                prompt.chars().count()
            ),
            None => format!(
                "[offline] {} would summarize a transcript of {} characters here.",
                self.display_name,
                prompt.chars().count()
            ),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::ParticipantId;

    #[tokio::test]
    async fn test_deterministic_reply() {
        let responder = OfflineResponder::new("Warren Buffett");
        let ctx = TurnContext {
            speaker: ParticipantId::new("buffett").unwrap(),
            round: 1,
        };
        let a = responder.generate("abc", Some(&ctx)).await.unwrap();
        let b = responder.generate("abc", Some(&ctx)).await.unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("[offline] Warren Buffett in round 1"));
        assert!(a.contains("3 characters"));
    }

    #[tokio::test]
    async fn test_moderator_reply() {
        let reply = OfflineResponder::new("Moderator")
            .generate("transcript", None)
            .await
            .unwrap();
        assert!(reply.contains("summarize"));
    }
}
