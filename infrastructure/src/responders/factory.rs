//! Builds the responder registry from the file configuration

use super::chat_completions::ChatCompletionsResponder;
use super::offline::OfflineResponder;
use crate::config::FileConfig;
use reqwest::Client;
use roundtable_application::{Responder, ResponderError, ResponderRegistry};
use roundtable_domain::{Roster, SynthesisPrompt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Name used for the moderator in summaries and logs
pub const MODERATOR_NAME: &str = "Moderator";

/// Errors that can occur while wiring responders
#[derive(Error, Debug)]
pub enum ResponderSetupError {
    #[error("No API key found: set ${env} or provider.api_key (or run with --offline)")]
    MissingApiKey { env: String },

    #[error("Could not create HTTP client: {0}")]
    Client(#[from] ResponderError),
}

/// Creates one responder per seated participant
pub struct ResponderFactory<'a> {
    config: &'a FileConfig,
    offline: bool,
}

enum Backend {
    Offline,
    Http { client: Client, api_key: String },
}

impl<'a> ResponderFactory<'a> {
    pub fn new(config: &'a FileConfig) -> Self {
        Self {
            config,
            offline: false,
        }
    }

    /// Use canned replies instead of the network
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    fn backend(&self) -> Result<Backend, ResponderSetupError> {
        if self.offline {
            return Ok(Backend::Offline);
        }
        let provider = &self.config.provider;
        let api_key =
            provider
                .resolve_api_key()
                .ok_or_else(|| ResponderSetupError::MissingApiKey {
                    env: provider.api_key_env.clone(),
                })?;
        let client = ChatCompletionsResponder::http_client(Duration::from_secs(
            provider.request_timeout_seconds,
        ))?;
        Ok(Backend::Http { client, api_key })
    }

    fn http_responder(
        &self,
        client: &Client,
        api_key: &str,
        model: &str,
        system_prompt: &str,
    ) -> ChatCompletionsResponder {
        let provider = &self.config.provider;
        ChatCompletionsResponder::new(client.clone(), &provider.base_url, api_key, model)
            .with_system_prompt(system_prompt)
            .with_max_tokens(provider.max_tokens)
            .with_temperature(provider.temperature)
    }

    /// One responder per roster member, persona instructions as system prompt
    pub fn build_registry(&self, roster: &Roster) -> Result<ResponderRegistry, ResponderSetupError> {
        let backend = self.backend()?;
        let mut registry = ResponderRegistry::new();

        for participant in roster.iter() {
            let responder: Arc<dyn Responder> = match &backend {
                Backend::Offline => Arc::new(OfflineResponder::new(&participant.display_name)),
                Backend::Http { client, api_key } => Arc::new(self.http_responder(
                    client,
                    api_key,
                    self.config.model_for(participant.id.as_str()),
                    &participant.instructions,
                )),
            };
            registry.insert(participant.id.clone(), responder);
        }

        info!(
            "Registered {} responders ({})",
            registry.len(),
            if self.offline { "offline" } else { "chat completions" }
        );
        Ok(registry)
    }

    /// The responder that writes a moderated summary
    pub fn build_moderator(&self) -> Result<Arc<dyn Responder>, ResponderSetupError> {
        Ok(match self.backend()? {
            Backend::Offline => Arc::new(OfflineResponder::new(MODERATOR_NAME)),
            Backend::Http { client, api_key } => Arc::new(self.http_responder(
                &client,
                &api_key,
                self.config.moderator_model(),
                SynthesisPrompt::system(),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::TurnContext;
    use roundtable_domain::ParticipantId;

    #[tokio::test]
    async fn test_offline_registry_covers_roster() {
        let config = FileConfig::default();
        let roster = config.roster().unwrap();
        let registry = ResponderFactory::new(&config)
            .offline(true)
            .build_registry(&roster)
            .unwrap();

        assert!(registry.missing_for(&roster).is_empty());

        let id = ParticipantId::new("munger").unwrap();
        let ctx = TurnContext {
            speaker: id.clone(),
            round: 2,
        };
        let reply = registry
            .get(&id)
            .unwrap()
            .generate("prompt", Some(&ctx))
            .await
            .unwrap();
        assert!(reply.contains("Charlie Munger"));
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = None;
        config.provider.api_key_env = "ROUNDTABLE_TEST_NO_SUCH_KEY".to_string();
        let roster = config.roster().unwrap();

        let err = ResponderFactory::new(&config)
            .build_registry(&roster)
            .unwrap_err();
        assert!(matches!(err, ResponderSetupError::MissingApiKey { .. }));
        assert!(err.to_string().contains("ROUNDTABLE_TEST_NO_SUCH_KEY"));
    }

    #[test]
    fn test_http_registry_with_direct_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("sk-test".to_string());
        let roster = config.roster().unwrap();

        let registry = ResponderFactory::new(&config)
            .build_registry(&roster)
            .unwrap();
        assert_eq!(registry.len(), 3);
        assert!(ResponderFactory::new(&config).build_moderator().is_ok());
    }
}
