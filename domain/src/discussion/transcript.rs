//! Append-only transcript of a discussion

use crate::core::error::DomainError;
use crate::core::participant::{ParticipantId, Roster};
use crate::discussion::turn::{Turn, render_turns};
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered, append-only history of turns (Entity)
///
/// Insertion order encodes both the round and the speaking order inside a
/// round. [`Transcript::append`] enforces that:
///
/// - rounds never go backwards,
/// - inside a round, speakers follow the roster order and speak at most once,
/// - timestamps never go backwards (a late clock reading is clamped).
///
/// Turns are never mutated or removed.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    #[serde(skip)]
    order: Vec<ParticipantId>,
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript for the given speaking order
    pub fn new(roster: &Roster) -> Self {
        Self {
            order: roster.ids().cloned().collect(),
            turns: Vec::new(),
        }
    }

    /// Append a turn, checking the ordering invariant
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        let position = self
            .order
            .iter()
            .position(|id| id == turn.speaker())
            .ok_or_else(|| DomainError::UnknownParticipant(turn.speaker().to_string()))?;

        if turn.round() == 0 {
            return Err(DomainError::OrderingViolation(
                "rounds are 1-indexed".to_string(),
            ));
        }

        let turn = match self.turns.last() {
            None => turn,
            Some(last) => {
                if turn.round() < last.round() {
                    return Err(DomainError::OrderingViolation(format!(
                        "{} spoke in round {} after round {} had started",
                        turn.speaker(),
                        turn.round(),
                        last.round()
                    )));
                }
                if turn.round() == last.round() {
                    let last_position = self
                        .order
                        .iter()
                        .position(|id| id == last.speaker())
                        .unwrap_or(0);
                    if position <= last_position {
                        return Err(DomainError::OrderingViolation(format!(
                            "{} cannot speak after {} in round {}",
                            turn.speaker(),
                            last.speaker(),
                            turn.round()
                        )));
                    }
                }
                turn.clamp_timestamp(last.timestamp())
            }
        };

        self.turns.push(turn);
        Ok(())
    }

    /// New ordered sequence of the turns matching `predicate`
    pub fn filter<P>(&self, predicate: P) -> Vec<Turn>
    where
        P: Fn(&Turn) -> bool,
    {
        self.turns.iter().filter(|t| predicate(t)).cloned().collect()
    }

    pub fn by_speaker(&self, speaker: &ParticipantId) -> Vec<Turn> {
        self.filter(|t| t.speaker() == speaker)
    }

    pub fn in_round(&self, round: u32) -> Vec<Turn> {
        self.filter(|t| t.round() == round)
    }

    /// All turns from rounds strictly before `round`
    pub fn before_round(&self, round: u32) -> Vec<Turn> {
        self.filter(|t| t.round() < round)
    }

    /// Deterministic text rendering of the full transcript
    pub fn render(&self) -> String {
        render_turns(&self.turns)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns per round, in round order
    pub fn turns_per_round(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for turn in &self.turns {
            *counts.entry(turn.round()).or_insert(0) += 1;
        }
        counts
    }
}
