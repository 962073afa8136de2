//! Discussion session entity

use crate::core::error::DomainError;
use crate::core::participant::Roster;
use crate::core::question::Question;
use crate::discussion::transcript::Transcript;
use crate::discussion::turn::Turn;
use crate::summary::DiscussionSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conventional round bound for a roundtable
pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// Lifecycle state of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Rounds are still being played
    Running,
    /// All rounds played and the summary attached; read-only from here on
    Completed,
    /// Abandoned after a responder failure; the transcript is partial
    Failed { reason: String },
}

/// One roundtable discussion (Entity)
///
/// Created with an empty transcript and `current_round = 1`. Only the round
/// orchestrator appends turns and advances the round counter. Once
/// `current_round > max_rounds` and a summary is attached the session is
/// [`SessionStatus::Completed`].
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: String,
    question: Question,
    roster: Roster,
    max_rounds: u32,
    current_round: u32,
    transcript: Transcript,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<DiscussionSummary>,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: impl Into<String>, question: Question, roster: Roster, max_rounds: u32) -> Self {
        let transcript = Transcript::new(&roster);
        Self {
            id: id.into(),
            question,
            roster,
            max_rounds,
            current_round: 1,
            transcript,
            summary: None,
            status: SessionStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&DiscussionSummary> {
        self.summary.as_ref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Whether the round loop should keep going
    pub fn has_rounds_remaining(&self) -> bool {
        self.is_running() && self.current_round <= self.max_rounds
    }

    /// Append a turn produced during the current round
    pub fn record_turn(&mut self, turn: Turn) -> Result<(), DomainError> {
        if !self.is_running() {
            return Err(DomainError::OrderingViolation(format!(
                "session {} no longer accepts turns",
                self.id
            )));
        }
        if turn.round() != self.current_round {
            return Err(DomainError::OrderingViolation(format!(
                "turn for round {} recorded during round {}",
                turn.round(),
                self.current_round
            )));
        }
        self.transcript.append(turn)
    }

    /// Move to the next round
    pub fn advance_round(&mut self) {
        self.current_round += 1;
    }

    /// Attach the summary and make the session terminal
    pub fn complete(&mut self, summary: DiscussionSummary) {
        self.summary = Some(summary);
        self.status = SessionStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Abandon the session, keeping the partial transcript
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = SessionStatus::Failed {
            reason: reason.into(),
        };
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, if finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::ParticipantId;
    use crate::summary::SummarySource;

    fn session(max_rounds: u32) -> Session {
        Session::new(
            "s-1",
            Question::new("Q").unwrap(),
            Roster::from_ids(["A", "B"]).unwrap(),
            max_rounds,
        )
    }

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let s = session(5);
        assert_eq!(s.current_round(), 1);
        assert!(s.transcript().is_empty());
        assert!(s.is_running());
        assert!(s.has_rounds_remaining());
        assert!(s.summary().is_none());
    }

    #[test]
    fn test_zero_rounds_has_nothing_to_play() {
        assert!(!session(0).has_rounds_remaining());
    }

    #[test]
    fn test_record_turn_checks_round() {
        let mut s = session(2);
        assert!(s.record_turn(Turn::new(id("A"), "a", 2)).is_err());
        s.record_turn(Turn::new(id("A"), "a", 1)).unwrap();
        s.advance_round();
        s.record_turn(Turn::new(id("A"), "a", 2)).unwrap();
        assert_eq!(s.transcript().len(), 2);
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut s = session(1);
        s.advance_round();
        assert!(!s.has_rounds_remaining());
        s.complete(DiscussionSummary::new("done", SummarySource::Template, 1, 0));
        assert_eq!(s.status(), &SessionStatus::Completed);
        assert!(s.finished_at().is_some());
        assert!(s.record_turn(Turn::new(id("A"), "late", 2)).is_err());
    }

    #[test]
    fn test_fail_keeps_transcript() {
        let mut s = session(3);
        s.record_turn(Turn::new(id("A"), "a", 1)).unwrap();
        s.fail("responder down");
        assert_eq!(
            s.status(),
            &SessionStatus::Failed {
                reason: "responder down".to_string()
            }
        );
        assert_eq!(s.transcript().len(), 1);
        assert!(!s.has_rounds_remaining());
    }
}
