//! Live transcript: prints every turn the moment it is recorded

use colored::Colorize;
use roundtable_application::DiscussionObserver;
use roundtable_domain::{Participant, Session, SummaryTemplate, Turn};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// Streams the discussion to a writer as it happens
pub struct LiveTranscript<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl LiveTranscript<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LiveTranscript<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
}

impl<W: Write + Send> DiscussionObserver for LiveTranscript<W> {
    fn on_session_start(&self, session: &Session) {
        self.write(&format!(
            "\n{} {}\n",
            "Question:".cyan().bold(),
            session.question()
        ));
    }

    fn on_round_start(&self, round: u32, max_rounds: u32) {
        self.write(&format!(
            "\n{}\n",
            format!(
                "═══ Round {}/{}: {} ═══",
                round,
                max_rounds,
                SummaryTemplate::round_stage(round)
            )
            .cyan()
            .bold()
        ));
    }

    fn on_turn_complete(&self, speaker: &Participant, turn: &Turn) {
        self.write(&format!(
            "\n{}\n{}\n",
            format!("{}:", speaker.display_name).yellow().bold(),
            turn.content().trim_end()
        ));
    }

    fn on_round_complete(&self, _round: u32, _max_rounds: u32) {}

    fn on_summary_start(&self) {
        self.write(&format!("\n{}\n", "Summarizing...".dimmed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ParticipantId, Question, Roster};

    #[test]
    fn test_streams_rounds_and_turns() {
        colored::control::set_override(false);
        let live = LiveTranscript::new(Vec::new());
        let roster = Roster::from_ids(["A"]).unwrap();
        let session = Session::new("s", Question::new("Why?").unwrap(), roster.clone(), 1);
        let speaker = roster.iter().next().unwrap().clone();

        live.on_session_start(&session);
        live.on_round_start(1, 1);
        live.on_turn_complete(
            &speaker,
            &Turn::new(ParticipantId::new("A").unwrap(), "Because.", 1),
        );

        let text = String::from_utf8(live.into_inner()).unwrap();
        assert!(text.contains("Question: Why?"));
        assert!(text.contains("Round 1/1"));
        assert!(text.contains("A:\nBecause."));
    }
}
