//! Discussion configuration from TOML (`[discussion]` section)

use roundtable_application::DiscussionParams;
use roundtable_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_MAX_ROUNDS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the closing summary is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSummaryMode {
    #[default]
    Template,
    Moderator,
}

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Rounds per discussion
    pub max_rounds: u32,
    /// Pause between rounds in milliseconds (0 = none)
    pub round_delay_ms: u64,
    /// Per-turn responder timeout in seconds (0 = none)
    pub timeout_seconds: u64,
    /// "template" or "moderator"
    pub summary: String,
    /// Model used by the moderator (defaults to `[provider] model`)
    pub moderator_model: Option<String>,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            round_delay_ms: 0,
            timeout_seconds: 120,
            summary: "template".to_string(),
            moderator_model: None,
        }
    }
}

impl FileDiscussionConfig {
    /// Parse the summary mode; unknown values fall back to the template.
    pub fn parse_summary(&self) -> (FileSummaryMode, Vec<ConfigIssue>) {
        match self.summary.trim().to_lowercase().as_str() {
            "template" | "templated" => (FileSummaryMode::Template, vec![]),
            "moderator" | "moderated" => (FileSummaryMode::Moderator, vec![]),
            other => (
                FileSummaryMode::Template,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "discussion.summary".to_string(),
                        value: other.to_string(),
                        valid_values: vec!["template".to_string(), "moderator".to_string()],
                    },
                    format!(
                        "discussion.summary: unknown value '{}', falling back to 'template'",
                        other
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_summary().1;
        if self.max_rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroRounds,
                "discussion.max_rounds is 0: nobody will speak, only the summary is produced",
            ));
        }
        issues
    }

    pub fn to_params(&self) -> DiscussionParams {
        DiscussionParams::default()
            .with_max_rounds(self.max_rounds)
            .with_round_delay(Some(Duration::from_millis(self.round_delay_ms)))
            .with_timeout_seconds(Some(self.timeout_seconds))
    }
}
