//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The user's question put to the roundtable (Value Object)
///
/// Immutable for the lifetime of a session. Every participant's prompt
/// quotes it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    ///
    /// Leading and trailing whitespace is trimmed. Fails if nothing is left.
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("Is the S&P 500 overvalued?").unwrap();
        assert_eq!(q.content(), "Is the S&P 500 overvalued?");
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::new("  Should I buy bonds?\n").unwrap();
        assert_eq!(q.content(), "Should I buy bonds?");
    }

    #[test]
    fn test_empty_question_is_rejected() {
        assert!(matches!(
            Question::new(""),
            Err(DomainError::InvalidQuestion(_))
        ));
    }

    #[test]
    fn test_whitespace_only_question_is_rejected() {
        assert!(Question::new("   \n").is_err());
    }

    #[test]
    fn test_try_from_str() {
        let q: Question = "Q".try_into().unwrap();
        assert_eq!(q.to_string(), "Q");
    }
}
