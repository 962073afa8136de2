//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Everything here is a configuration or programmer error: it is raised
/// before (or instead of) any responder call and is never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No participants configured for the discussion")]
    NoParticipants,

    #[error("Participant '{0}' is configured more than once")]
    DuplicateParticipant(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid participant id: {0}")]
    InvalidParticipantId(String),

    #[error("Turn out of order: {0}")]
    OrderingViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_participant_display() {
        let error = DomainError::UnknownParticipant("soros".to_string());
        assert_eq!(error.to_string(), "Unknown participant: soros");
    }
}
