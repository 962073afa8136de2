//! Console output formatter for discussion sessions

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use roundtable_domain::core::string::count_noun;
use roundtable_domain::{Session, SessionStatus, SummarySource, SummaryTemplate};

/// Formats sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `session` in the requested format
    pub fn render(session: &Session, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(session),
            OutputFormat::Summary => Self::format_summary_only(session),
            OutputFormat::Json => Self::format_json(session),
        }
    }

    /// Format the complete session
    pub fn format(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Roundtable Discussion"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            session.question()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            Self::participant_names(session)
        ));

        output.push_str(&Self::transcript(session));

        if let Some(summary) = session.summary() {
            let title = match &summary.source {
                SummarySource::Template => "Summary".to_string(),
                SummarySource::Moderator { moderator } => format!("Summary by {}", moderator),
            };
            output.push_str(&Self::section_header(&title));
            output.push_str(&format!("\n{}\n", summary.text.trim_end()));
        }

        if let SessionStatus::Failed { reason } = session.status() {
            output.push_str(&format!("\n{} {}\n", "Stopped:".red().bold(), reason));
        }

        output.push_str(&Self::footer(session));

        output
    }

    /// Transcript grouped by round
    pub fn transcript(session: &Session) -> String {
        let mut output = String::new();
        for (round, _) in session.transcript().turns_per_round() {
            output.push_str(&Self::section_header(&format!(
                "Round {}/{}: {}",
                round,
                session.max_rounds(),
                SummaryTemplate::round_stage(round)
            )));
            for turn in session.transcript().in_round(round) {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", session.roster().display_name(turn.speaker()))
                        .yellow()
                        .bold(),
                    turn.content().trim_end()
                ));
            }
        }
        output
    }

    /// Format as JSON
    pub fn format_json(session: &Session) -> String {
        serde_json::to_string_pretty(session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(session: &Session) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Roundtable Summary ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), session.question()));
        output.push_str(&format!(
            "{} {}\n\n",
            "Participants:".dimmed(),
            Self::participant_names(session)
        ));

        match session.summary() {
            Some(summary) => output.push_str(summary.text.trim_end()),
            None => output.push_str(&format!("{}", "(no summary)".dimmed())),
        }
        output.push('\n');

        output
    }

    /// A failed session: the reason, then whatever was said before it
    pub fn format_failure(session: &Session, error: &str, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return Self::format_json(session);
        }

        let mut output = format!("{} {}\n", "Error:".red().bold(), error);
        if session.transcript().is_empty() {
            return output;
        }

        output.push_str(&format!(
            "{}\n",
            format!(
                "{} turn(s) were recorded before the discussion stopped:",
                session.transcript().len()
            )
            .dimmed()
        ));
        output.push_str(&Self::transcript(session));
        output
    }

    fn participant_names(session: &Session) -> String {
        session
            .roster()
            .iter()
            .map(|p| p.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer(session: &Session) -> String {
        let elapsed = session
            .elapsed()
            .map(|d| format!("{:.1}s", d.num_milliseconds() as f64 / 1000.0))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "\n{}\n{}\n",
            format!(
                "{} over {} in {}",
                count_noun(session.transcript().len(), "turn"),
                count_noun(session.max_rounds() as usize, "round"),
                elapsed
            )
            .dimmed(),
            "=".repeat(60).cyan()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{Participant, ParticipantId, Question, Roster, Turn};

    fn played_session(complete: bool) -> Session {
        let roster = Roster::new(vec![
            Participant::new(ParticipantId::new("buffett").unwrap(), "Warren Buffett"),
            Participant::new(ParticipantId::new("wood").unwrap(), "Cathie Wood"),
        ])
        .unwrap();
        let mut session = Session::new("s-1", Question::new("Buy now?").unwrap(), roster, 2);
        for round in 1..=2 {
            for (id, text) in [("buffett", "Be patient."), ("wood", "Think exponential.")] {
                session
                    .record_turn(Turn::new(ParticipantId::new(id).unwrap(), text, round))
                    .unwrap();
            }
            session.advance_round();
        }
        if complete {
            let summary = SummaryTemplate::generate(
                session.question(),
                session.roster(),
                session.max_rounds(),
                session.transcript(),
            );
            session.complete(summary);
        }
        session
    }

    #[test]
    fn test_full_format_groups_by_round() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&played_session(true));

        assert!(output.contains("Question: Buy now?"));
        assert!(output.contains("Participants: Warren Buffett, Cathie Wood"));
        let round1 = output.find("Round 1/2").unwrap();
        let round2 = output.find("Round 2/2").unwrap();
        assert!(round1 < round2);
        assert!(output.contains("── Warren Buffett ──\nBe patient."));
        assert!(output.contains("Summary"));
        assert!(output.contains("4 turns over 2 rounds"));
    }

    #[test]
    fn test_summary_only() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_summary_only(&played_session(true));
        assert!(output.contains("=== Roundtable Summary ==="));
        assert!(output.contains("Rounds: 2 (4 turns)"));
        assert!(!output.contains("Think exponential."));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = ConsoleFormatter::render(&played_session(true), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["question"], "Buy now?");
        assert_eq!(value["transcript"]["turns"].as_array().unwrap().len(), 4);
        assert_eq!(value["status"]["state"], "completed");
    }

    #[test]
    fn test_failure_shows_partial_transcript() {
        colored::control::set_override(false);
        let mut session = played_session(false);
        session.fail("rate limited");
        let output = ConsoleFormatter::format_failure(&session, "rate limited", OutputFormat::Full);
        assert!(output.starts_with("Error: rate limited"));
        assert!(output.contains("4 turn(s) were recorded"));
        assert!(output.contains("Think exponential."));
    }
}
