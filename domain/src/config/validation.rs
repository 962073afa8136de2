//! Structured configuration issues
//!
//! Config loading reports problems as [`ConfigIssue`]s instead of failing
//! on the first one, so the binary can print every warning and only abort
//! on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A participant entry has an id that is empty or has invalid characters.
    InvalidParticipantId { id: String },
    /// Two participant entries share an id.
    DuplicateParticipant { id: String },
    /// A participant has no persona instructions.
    MissingInstructions { id: String },
    /// An enum-like string field has an unknown value.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// `max_rounds = 0`: the discussion will be empty.
    ZeroRounds,
    /// The `[[participants]]` list is present but empty.
    NoParticipants,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
