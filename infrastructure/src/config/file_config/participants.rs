//! Participant configuration from TOML (`[[participants]]` tables)
//!
//! When no table is given the built-in investor panel is seated.

use roundtable_domain::{
    ConfigIssue, ConfigIssueCode, DomainError, Participant, ParticipantId, Roster,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One `[[participants]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileParticipantConfig {
    /// Stable id used in the transcript (`[A-Za-z0-9_-]+`)
    pub id: String,
    /// Name shown in prompts and output (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,
    /// Persona instructions, sent as the system prompt
    #[serde(default)]
    pub instructions: String,
    /// Model override for this participant
    #[serde(default)]
    pub model: Option<String>,
}

impl FileParticipantConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn to_participant(&self) -> Result<Participant, DomainError> {
        let id = ParticipantId::new(self.id.as_str())?;
        Ok(Participant::new(id, self.display_name()).with_instructions(self.instructions.as_str()))
    }
}

/// Build the roster, keeping file order
pub fn build_roster(entries: &[FileParticipantConfig]) -> Result<Roster, DomainError> {
    let participants = entries
        .iter()
        .map(FileParticipantConfig::to_participant)
        .collect::<Result<Vec<_>, _>>()?;
    Roster::new(participants)
}

pub fn validate_participants(entries: &[FileParticipantConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if entries.is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::NoParticipants,
            "participants: at least one participant is required",
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if ParticipantId::new(entry.id.as_str()).is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidParticipantId {
                    id: entry.id.clone(),
                },
                format!(
                    "participants: invalid id '{}' (use letters, digits, '-' or '_')",
                    entry.id
                ),
            ));
        }
        if !seen.insert(entry.id.as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateParticipant {
                    id: entry.id.clone(),
                },
                format!("participants: '{}' is listed more than once", entry.id),
            ));
        }
        if entry.instructions.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingInstructions {
                    id: entry.id.clone(),
                },
                format!(
                    "participants: '{}' has no instructions and will answer without a persona",
                    entry.id
                ),
            ));
        }
    }

    issues
}

/// The built-in panel: three investors with distinct philosophies
pub fn default_participants() -> Vec<FileParticipantConfig> {
    vec![
        FileParticipantConfig {
            id: "buffett".to_string(),
            name: Some("Warren Buffett".to_string()),
            instructions: BUFFETT.to_string(),
            model: None,
        },
        FileParticipantConfig {
            id: "munger".to_string(),
            name: Some("Charlie Munger".to_string()),
            instructions: MUNGER.to_string(),
            model: None,
        },
        FileParticipantConfig {
            id: "wood".to_string(),
            name: Some("Cathie Wood".to_string()),
            instructions: WOOD.to_string(),
            model: None,
        },
    ]
}

const BUFFETT: &str = r#"You are a value investor in the tradition of Warren Buffett.

Core beliefs:
- Price is what you pay, value is what you get. Look for wonderful businesses below intrinsic value.
- Favourite holding period is forever. Let compounding work and avoid frequent trading.
- Only invest in businesses you understand, with a durable moat and honest, able management.
- Be fearful when others are greedy and greedy when others are fearful.
- Rule one: never lose money. Rule two: never forget rule one.

Style: plain language, concrete examples from real businesses, patience and a long horizon, a little homespun humour."#;

const MUNGER: &str = r#"You are a multidisciplinary thinker in the tradition of Charlie Munger.

Core beliefs:
- Use a latticework of mental models from psychology, economics, mathematics and history.
- Invert, always invert: first work out how to fail, then avoid it.
- Wait for the fat pitch and concentrate on the few things you truly understand.
- Incentives drive behaviour; watch for cognitive biases, including your own.
- Better to be roughly right than precisely wrong.

Style: blunt and occasionally caustic, fond of analogies and stories, more interested in how to think than in what to buy."#;

const WOOD: &str = r#"You are a growth investor focused on disruptive innovation, in the tradition of Cathie Wood.

Core beliefs:
- Innovation platforms such as AI, robotics, energy storage, genomics and blockchain are converging.
- Wright's law cost declines create exponential growth that traditional valuation misses.
- Think in five-year horizons and accept volatility as the price of exposure to change.
- Incumbents relying on yesterday's moats are often the ones being disrupted.

Style: optimistic and research-driven, cites adoption curves and cost curves, willing to challenge conventional value thinking respectfully."#;
