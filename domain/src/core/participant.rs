//! Participant value objects and the ordered roster

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of a discussion participant (Value Object)
///
/// Short, machine-friendly key such as `buffett` or `A`. Only ASCII
/// alphanumerics, `-` and `_` are allowed so ids render unambiguously in
/// transcripts (`speaker (round r): ...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidParticipantId(
                "participant id cannot be empty".to_string(),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidParticipantId(format!(
                "'{}' may only contain ASCII letters, digits, '-' and '_'",
                id
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

/// A persona taking part in the discussion
///
/// `instructions` is the persona's standing brief (handed to the responder
/// as its system prompt). The orchestrator never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
}

impl Participant {
    pub fn new(id: ParticipantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            instructions: String::new(),
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

/// Ordered, non-empty participant configuration
///
/// The order is the speaking order inside every round and never changes
/// for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster, rejecting empty lists and duplicate ids
    pub fn new(participants: Vec<Participant>) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        for (i, p) in participants.iter().enumerate() {
            if participants[..i].iter().any(|q| q.id == p.id) {
                return Err(DomainError::DuplicateParticipant(p.id.to_string()));
            }
        }
        Ok(Self { participants })
    }

    /// Build a roster from bare ids (display name = id)
    pub fn from_ids<I, S>(ids: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let participants = ids
            .into_iter()
            .map(|s| {
                let id = ParticipantId::new(s)?;
                let name = id.to_string();
                Ok(Participant::new(id, name))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Self::new(participants)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.participants.iter().map(|p| &p.id)
    }

    /// Speaking position of `id` (0-based)
    pub fn position(&self, id: &ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| &p.id == id)
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.position(id).is_some()
    }

    /// Display name for `id`, falling back to the id itself
    pub fn display_name<'a>(&'a self, id: &'a ParticipantId) -> &'a str {
        self.get(id).map(|p| p.display_name.as_str()).unwrap_or(id.as_str())
    }

    /// Keep only the participants named in `ids`, preserving roster order
    pub fn select(&self, ids: &[ParticipantId]) -> Result<Self, DomainError> {
        if let Some(unknown) = ids.iter().find(|id| !self.contains(id)) {
            return Err(DomainError::UnknownParticipant(unknown.to_string()));
        }
        Self::new(
            self.participants
                .iter()
                .filter(|p| ids.contains(&p.id))
                .cloned()
                .collect(),
        )
    }
}

impl TryFrom<Vec<Participant>> for Roster {
    type Error = DomainError;

    fn try_from(participants: Vec<Participant>) -> Result<Self, Self::Error> {
        Self::new(participants)
    }
}

impl From<Roster> for Vec<Participant> {
    fn from(roster: Roster) -> Self {
        roster.participants
    }
}
