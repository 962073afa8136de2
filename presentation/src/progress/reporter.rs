//! Progress reporting for discussions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::DiscussionObserver;
use roundtable_domain::core::string::preview;
use roundtable_domain::{Participant, Session, Turn};
use std::io::{self, Stderr, Write};
use std::sync::Mutex;

/// Reports progress with a single bar counting turns across all rounds
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscussionObserver for ProgressReporter {
    fn on_session_start(&self, session: &Session) {
        let total = session.max_rounds() as u64 * session.roster().len() as u64;
        let pb = ProgressBar::new(total);
        pb.set_style(Self::style());
        pb.set_prefix("Roundtable");
        pb.set_message("Starting...");
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_round_start(&self, round: u32, max_rounds: u32) {
        self.with_bar(|pb| pb.set_prefix(format!("Round {}/{}", round, max_rounds)));
    }

    fn on_turn_start(&self, speaker: &Participant, _round: u32) {
        self.with_bar(|pb| pb.set_message(format!("{} is thinking...", speaker.display_name)));
    }

    fn on_turn_complete(&self, speaker: &Participant, _turn: &Turn) {
        self.with_bar(|pb| {
            pb.set_message(format!("{} {}", "v".green(), speaker.display_name));
            pb.inc(1);
        });
    }

    fn on_round_complete(&self, _round: u32, _max_rounds: u32) {}

    fn on_summary_start(&self) {
        self.with_bar(|pb| {
            pb.set_prefix("Summary");
            pb.set_message("Writing summary...");
        });
    }

    fn on_session_complete(&self, _session: &Session) {
        if let Some(pb) = self.take_bar() {
            pb.finish_with_message(format!("{}", "complete!".green()));
        }
    }

    fn on_session_failed(&self, _session: &Session, error: &str) {
        if let Some(pb) = self.take_bar() {
            pb.abandon_with_message(format!("{} {}", "x".red(), error));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr by default
///
/// Keeps stdout free for the rendered result.
pub struct SimpleProgress<W: Write + Send = Stderr> {
    out: Mutex<W>,
}

impl SimpleProgress<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> SimpleProgress<W> {
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

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
        }
    }
}

impl<W: Write + Send> DiscussionObserver for SimpleProgress<W> {
    fn on_round_start(&self, round: u32, max_rounds: u32) {
        self.line(&format!(
            "{} {}",
            "->".cyan(),
            format!("Round {}/{}", round, max_rounds).bold()
        ));
    }

    fn on_turn_complete(&self, speaker: &Participant, turn: &Turn) {
        self.line(&format!(
            "  {} {}: {}",
            "v".green(),
            speaker.display_name.bold(),
            preview(turn.content(), 70).dimmed()
        ));
    }

    fn on_round_complete(&self, _round: u32, _max_rounds: u32) {
        self.line("");
    }

    fn on_session_failed(&self, _session: &Session, error: &str) {
        self.line(&format!("  {} {}", "x".red(), error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ParticipantId, Question, Roster};

    #[test]
    fn test_simple_progress_writes_round_and_turn_lines() {
        colored::control::set_override(false);
        let progress = SimpleProgress::new(Vec::new());
        let roster = Roster::from_ids(["A"]).unwrap();
        let speaker = roster.iter().next().unwrap().clone();
        let session = Session::new("s", Question::new("Why?").unwrap(), roster, 1);

        progress.on_round_start(1, 2);
        progress.on_turn_complete(
            &speaker,
            &Turn::new(ParticipantId::new("A").unwrap(), "Because the moat is wide.", 1),
        );
        progress.on_round_complete(1, 2);
        progress.on_session_failed(&session, "timeout");

        let text = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(
            text,
            "-> Round 1/2\n  v A: Because the moat is wide.\n\n  x timeout\n"
        );
    }
}
