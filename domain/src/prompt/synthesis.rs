//! Prompts for the moderator that writes a content-derived summary

use crate::core::participant::Roster;
use crate::core::question::Question;
use crate::discussion::transcript::Transcript;

/// Templates for the optional moderator synthesis
pub struct SynthesisPrompt;

impl SynthesisPrompt {
    /// System prompt for the moderator
    pub fn system() -> &'static str {
        r#"You are a moderator summarising a roundtable discussion between experts with different investment philosophies.
Your task is to:
1. Trace how each participant's position evolved across the rounds
2. Identify areas of consensus and the disagreements that remain
3. Turn the discussion into practical guidance for the person who asked

Be balanced. Weigh arguments by their reasoning, not by who made them."#
    }

    /// User prompt for the moderator
    pub fn build(question: &Question, roster: &Roster, rounds: u32, transcript: &Transcript) -> String {
        let mut prompt = format!(
            "Original question: {}\n\nParticipants:\n",
            question
        );

        for participant in roster.iter() {
            prompt.push_str(&format!("- {}: {}\n", participant.id, participant.display_name));
        }

        prompt.push_str(&format!(
            "\nFull transcript ({} rounds, {} turns):\n\n",
            rounds,
            transcript.len()
        ));
        prompt.push_str(&transcript.render());

        prompt.push_str(
            r#"

Based on the discussion above, please provide:

1. **Evolution**: How each participant's view developed over the rounds

2. **Consensus**: Points the participants agreed on (bullet list)

3. **Disagreements**: Points still in dispute and which side is better supported (bullet list)

4. **Recommendation**: Practical guidance that combines the strongest arguments

Format your response with clear markdown headers."#,
        );

        prompt
    }
}
