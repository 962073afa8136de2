//! Templated discussion summary
//!
//! The summary is a fixed narrative filled in from the question, the round
//! bound, the roster and the per-round turn counts. It never reads turn
//! content, so the same inputs always give the same text.

use crate::core::participant::Roster;
use crate::core::question::Question;
use crate::core::string::count_noun;
use crate::discussion::transcript::Transcript;
use crate::summary::{DiscussionSummary, SummarySource};

/// Stage description for each of the first five rounds
const ROUND_STAGES: [&str; 5] = [
    "each participant establishes an opening position",
    "positions are challenged in light of the others' views",
    "points of divergence and common ground are explored",
    "the arguments are consolidated into a strategy",
    "final conclusions and practical recommendations",
];

const LATER_ROUND_STAGE: &str = "earlier points are refined further";

/// Builds the templated summary
pub struct SummaryTemplate;

impl SummaryTemplate {
    /// Stage description for a 1-indexed round
    pub fn round_stage(round: u32) -> &'static str {
        round
            .checked_sub(1)
            .and_then(|i| ROUND_STAGES.get(i as usize))
            .copied()
            .unwrap_or(LATER_ROUND_STAGE)
    }

    pub fn generate(
        question: &Question,
        roster: &Roster,
        max_rounds: u32,
        transcript: &Transcript,
    ) -> DiscussionSummary {
        let counts = transcript.turns_per_round();
        let names: Vec<&str> = roster.iter().map(|p| p.display_name.as_str()).collect();

        let mut text = String::new();
        text.push_str("Roundtable summary\n\n");
        text.push_str(&format!("Question: {}\n", question));
        text.push_str(&format!("Participants: {}\n", names.join(", ")));
        text.push_str(&format!(
            "Rounds: {} ({})\n",
            max_rounds,
            count_noun(transcript.len(), "turn")
        ));

        if max_rounds == 0 {
            text.push_str("\nNo rounds were held; no participant spoke.\n");
            return DiscussionSummary::new(text, SummarySource::Template, max_rounds, 0);
        }

        text.push_str("\nRound review:\n");
        for round in 1..=max_rounds {
            let turns = counts.get(&round).copied().unwrap_or(0);
            text.push_str(&format!(
                "- Round {}: {} ({})\n",
                round,
                Self::round_stage(round),
                count_noun(turns, "turn")
            ));
        }

        text.push_str("\nPerspectives:\n");
        for participant in roster.iter() {
            let spoken = transcript
                .iter()
                .filter(|t| t.speaker() == &participant.id)
                .count();
            text.push_str(&format!(
                "- {}: {}\n",
                participant.display_name,
                count_noun(spoken, "contribution")
            ));
        }

        text.push_str(&format!(
            "\nTakeaway:\nOver {}, the panel weighed {} against each other. \
             A sound decision draws on each of them rather than any single one.\n",
            count_noun(max_rounds as usize, "round"),
            count_noun(roster.len(), "perspective")
        ));

        DiscussionSummary::new(text, SummarySource::Template, max_rounds, transcript.len())
    }
}
