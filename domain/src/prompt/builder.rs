//! Per-turn prompt construction

use crate::core::error::DomainError;
use crate::core::participant::{ParticipantId, Roster};
use crate::core::question::Question;
use crate::discussion::transcript::Transcript;
use crate::discussion::turn::{Turn, render_turns};

/// Builds the prompt a participant answers on its turn
///
/// A pure function of `(speaker, question, round, transcript)` plus the
/// roster it was created with. The prompt for participant `i` in round `r`
/// renders every turn of rounds `< r` and every turn of round `r` spoken
/// before `i`, and nothing else. Current-round context always comes before
/// the earlier-rounds history.
pub struct PromptBuilder<'a> {
    roster: &'a Roster,
    max_rounds: Option<u32>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self {
            roster,
            max_rounds: None,
        }
    }

    /// Mention the round bound in the prompt header ("round 2 of 5")
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    pub fn build(
        &self,
        speaker: &ParticipantId,
        question: &Question,
        round: u32,
        transcript: &Transcript,
    ) -> Result<String, DomainError> {
        let position = self
            .roster
            .position(speaker)
            .ok_or_else(|| DomainError::UnknownParticipant(speaker.to_string()))?;
        let name = self.roster.display_name(speaker);

        if round == 1 && position == 0 {
            return Ok(self.opening(name, question));
        }

        let this_round: Vec<&Turn> = transcript
            .iter()
            .filter(|t| {
                t.round() == round
                    && self
                        .roster
                        .position(t.speaker())
                        .is_some_and(|p| p < position)
            })
            .collect();
        let earlier: Vec<&Turn> = transcript.iter().filter(|t| t.round() < round).collect();

        Ok(self.response(name, question, round, &this_round, &earlier))
    }

    fn round_label(&self, round: u32) -> String {
        match self.max_rounds {
            Some(max) => format!("round {} of {}", round, max),
            None => format!("round {}", round),
        }
    }

    fn opening(&self, name: &str, question: &Question) -> String {
        format!(
            r#"You are {name}, taking part in a roundtable discussion with other experts. This is {label} and you are the first to speak.

Question: {question}

Give your opening position on the question. State your view directly and support it with reasoning or concrete examples."#,
            name = name,
            label = self.round_label(1),
            question = question,
        )
    }

    fn response(
        &self,
        name: &str,
        question: &Question,
        round: u32,
        this_round: &[&Turn],
        earlier: &[&Turn],
    ) -> String {
        let mut prompt = format!(
            "You are {}, taking part in a roundtable discussion with other experts. This is {}.\n\nQuestion: {}\n",
            name,
            self.round_label(round),
            question
        );

        if !this_round.is_empty() {
            prompt.push_str("\nThis round so far:\n");
            prompt.push_str(&render_turns(this_round.iter().copied()));
            prompt.push('\n');
        }

        if !earlier.is_empty() {
            prompt.push_str("\nEarlier rounds:\n");
            prompt.push_str(&render_turns(earlier.iter().copied()));
            prompt.push('\n');
        }

        prompt.push_str(
            "\nRespond to the points raised above. Agree, challenge or refine them from your own perspective, and add something the discussion has not covered yet.",
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn fixture() -> (Roster, Question, Transcript) {
        let roster = Roster::from_ids(["A", "B", "C"]).unwrap();
        let transcript = Transcript::new(&roster);
        (roster, Question::new("Should I buy index funds?").unwrap(), transcript)
    }

    fn play(transcript: &mut Transcript, turns: &[(&str, u32)]) {
        for (speaker, round) in turns {
            transcript
                .append(Turn::new(id(speaker), format!("{speaker}-{round}"), *round))
                .unwrap();
        }
    }

    #[test]
    fn test_opening_prompt_has_only_question() {
        let (roster, q, transcript) = fixture();
        let prompt = PromptBuilder::new(&roster)
            .build(&id("A"), &q, 1, &transcript)
            .unwrap();
        assert!(prompt.contains("Should I buy index funds?"));
        assert!(prompt.contains("first to speak"));
        assert!(!prompt.contains("(round "));
        assert!(!prompt.contains("This round so far"));
        assert!(!prompt.contains("Earlier rounds"));
    }

    #[test]
    fn test_round_one_later_speaker_sees_predecessors_only() {
        let (roster, q, mut transcript) = fixture();
        play(&mut transcript, &[("A", 1)]);
        let prompt = PromptBuilder::new(&roster)
            .build(&id("B"), &q, 1, &transcript)
            .unwrap();
        assert!(prompt.contains("This round so far:\nA (round 1): A-1"));
        assert!(!prompt.contains("Earlier rounds"));
    }

    #[test]
    fn test_context_visibility() {
        let (roster, q, mut transcript) = fixture();
        play(
            &mut transcript,
            &[("A", 1), ("B", 1), ("C", 1), ("A", 2), ("B", 2)],
        );
        let builder = PromptBuilder::new(&roster);

        // B in round 2 sees all of round 1 and A's round-2 turn
        let b = builder.build(&id("B"), &q, 2, &transcript).unwrap();
        for visible in ["A-1", "B-1", "C-1", "A-2"] {
            assert!(b.contains(visible), "missing {visible}");
        }
        assert!(!b.contains("B-2"));

        // A in round 2 (first speaker) sees only round 1
        let a = builder.build(&id("A"), &q, 2, &transcript).unwrap();
        assert!(!a.contains("A-2"));
        assert!(!a.contains("This round so far"));
        assert!(a.contains("Earlier rounds:\nA (round 1): A-1\n\nB (round 1): B-1\n\nC (round 1): C-1"));
    }

    #[test]
    fn test_current_round_precedes_history() {
        let (roster, q, mut transcript) = fixture();
        play(&mut transcript, &[("A", 1), ("B", 1), ("C", 1), ("A", 2)]);
        let prompt = PromptBuilder::new(&roster)
            .build(&id("C"), &q, 2, &transcript)
            .unwrap();
        let current = prompt.find("This round so far").unwrap();
        let history = prompt.find("Earlier rounds").unwrap();
        assert!(current < history);
    }

    #[test]
    fn test_build_is_deterministic() {
        let (roster, q, mut transcript) = fixture();
        play(&mut transcript, &[("A", 1), ("B", 1)]);
        let builder = PromptBuilder::new(&roster).with_max_rounds(5);
        let first = builder.build(&id("C"), &q, 1, &transcript).unwrap();
        let second = builder.build(&id("C"), &q, 1, &transcript).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("round 1 of 5"));
    }

    #[test]
    fn test_unknown_speaker_fails() {
        let (roster, q, transcript) = fixture();
        let err = PromptBuilder::new(&roster)
            .build(&id("Z"), &q, 1, &transcript)
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownParticipant("Z".to_string()));
    }

    #[test]
    fn test_display_name_is_used_in_header() {
        let roster = Roster::new(vec![crate::core::participant::Participant::new(
            id("buffett"),
            "Warren Buffett",
        )])
        .unwrap();
        let transcript = Transcript::new(&roster);
        let q = Question::new("Q").unwrap();
        let prompt = PromptBuilder::new(&roster)
            .build(&id("buffett"), &q, 1, &transcript)
            .unwrap();
        assert!(prompt.starts_with("You are Warren Buffett"));
    }
}
