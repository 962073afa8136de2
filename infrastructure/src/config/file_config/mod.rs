//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod discussion;
mod logging;
mod output;
mod participants;
mod provider;
mod repl;

pub use discussion::{FileDiscussionConfig, FileSummaryMode};
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use participants::{FileParticipantConfig, default_participants};
pub use provider::FileProviderConfig;
pub use repl::FileReplConfig;

use roundtable_domain::{ConfigIssue, DomainError, Roster};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round loop settings
    pub discussion: FileDiscussionConfig,
    /// Seated participants, in speaking order
    pub participants: Vec<FileParticipantConfig>,
    /// Chat completions endpoint
    pub provider: FileProviderConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            discussion: FileDiscussionConfig::default(),
            participants: default_participants(),
            provider: FileProviderConfig::default(),
            output: FileOutputConfig::default(),
            repl: FileReplConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks participant ids and instructions, the summary mode, and the
    /// round count.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = participants::validate_participants(&self.participants);
        issues.extend(self.discussion.validate());
        issues
    }

    /// The roster described by `[[participants]]`
    pub fn roster(&self) -> Result<Roster, DomainError> {
        participants::build_roster(&self.participants)
    }

    /// Model for one participant: its override or the provider default
    pub fn model_for(&self, participant_id: &str) -> &str {
        self.participants
            .iter()
            .find(|p| p.id == participant_id)
            .and_then(|p| p.model.as_deref())
            .unwrap_or(&self.provider.model)
    }

    /// Model for the moderator summary
    pub fn moderator_model(&self) -> &str {
        self.discussion
            .moderator_model
            .as_deref()
            .unwrap_or(&self.provider.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ConfigIssueCode, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[discussion]
max_rounds = 3
round_delay_ms = 500
summary = "moderator"

[[participants]]
id = "bull"
name = "The Bull"
instructions = "Always optimistic."
model = "gpt-4o"

[[participants]]
id = "bear"
instructions = "Always pessimistic."

[provider]
base_url = "http://localhost:11434"
model = "llama3"

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/roundtable/history.txt"

[logging]
conversation_log = "logs/talk.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discussion.max_rounds, 3);
        assert_eq!(config.discussion.parse_summary().0, FileSummaryMode::Moderator);
        assert_eq!(config.participants.len(), 2);
        assert_eq!(config.participants[1].display_name(), "bear");
        assert_eq!(config.model_for("bull"), "gpt-4o");
        assert_eq!(config.model_for("bear"), "llama3");
        assert_eq!(config.moderator_model(), "llama3");
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("logs/talk.jsonl")
        );
        assert!(config.validate().is_empty());

        let roster = config.roster().unwrap();
        assert_eq!(roster.iter().next().unwrap().display_name, "The Bull");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[discussion]
max_rounds = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discussion.max_rounds, 2);
        // Defaults should apply
        assert_eq!(config.participants.len(), 3);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.discussion.max_rounds, 5);
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(config.logging.conversation_log.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[discussion]
max_rounds = 0
summary = "vote"

[[participants]]
id = "a"
instructions = "x"

[[participants]]
id = "a"
instructions = "y"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let codes: Vec<_> = issues.iter().map(|i| i.code.clone()).collect();
        assert!(codes.contains(&ConfigIssueCode::DuplicateParticipant { id: "a".into() }));
        assert!(codes.contains(&ConfigIssueCode::ZeroRounds));
        assert!(codes.iter().any(|c| matches!(c, ConfigIssueCode::InvalidEnumValue { .. })));
        assert!(config.roster().is_err());
    }
}
