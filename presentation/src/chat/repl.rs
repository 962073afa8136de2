//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::cli::commands::OutputFormat;
use crate::{ConsoleFormatter, LiveTranscript, ProgressReporter};
use roundtable_application::{
    CompositeObserver, DiscussionObserver, DiscussionParams, NoProgress, RunDiscussionInput,
    RunDiscussionUseCase,
};
use roundtable_domain::ParticipantId;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::time::Instant;

/// Sample questions shown by `/examples`
pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "How should I think about investing in AI stocks right now?",
    "Does value investing still work for technology companies?",
    "How do I balance long-term holdings against short-term opportunities?",
    "How should a portfolio adapt to a high-inflation environment?",
];

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Participants,
    Examples,
    /// `/rounds` alone shows the current value
    Rounds(Option<u32>),
    Quit,
    Invalid(String),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            "/participants" | "/p" => Self::Participants,
            "/examples" | "/e" => Self::Examples,
            "/rounds" | "/r" => match arg {
                None => Self::Rounds(None),
                Some(n) => match n.parse::<u32>() {
                    Ok(n) => Self::Rounds(Some(n)),
                    Err(_) => Self::Invalid(format!("not a round count: {}", n)),
                },
            },
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunDiscussionUseCase,
    params: DiscussionParams,
    participants: Option<Vec<ParticipantId>>,
    show_progress: bool,
    live: bool,
    output: OutputFormat,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: RunDiscussionUseCase, params: DiscussionParams) -> Self {
        Self {
            use_case,
            params,
            participants: None,
            show_progress: true,
            live: false,
            output: OutputFormat::Summary,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Print turns as they are spoken
    pub fn with_live_transcript(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_participants(mut self, ids: Vec<ParticipantId>) -> Self {
        self.participants = if ids.is_empty() { None } else { Some(ids) };
        self
    }

    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line)) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           Roundtable - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Participants: {}", self.participant_names().join(", "));
        println!("Rounds: {}", self.params.max_rounds);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /participants, /p  - Show the panel");
        println!("  /examples, /e      - Show sample questions");
        println!("  /rounds [N], /r    - Show or set the number of rounds");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    fn participant_names(&self) -> Vec<String> {
        self.use_case
            .roster()
            .iter()
            .filter(|p| {
                self.participants
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&p.id))
            })
            .map(|p| format!("{} ({})", p.display_name, p.id))
            .collect()
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: ReplCommand) -> bool {
        match cmd {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Participants => {
                println!();
                println!("Current panel:");
                for name in self.participant_names() {
                    println!("  - {}", name);
                }
                println!();
            }
            ReplCommand::Examples => {
                println!();
                println!("Try asking:");
                for question in EXAMPLE_QUESTIONS {
                    println!("  - {}", question);
                }
                println!();
            }
            ReplCommand::Rounds(None) => {
                println!("Rounds: {}", self.params.max_rounds);
            }
            ReplCommand::Rounds(Some(n)) => {
                self.params.max_rounds = n;
                println!("Rounds set to {}", n);
            }
            ReplCommand::Invalid(reason) => {
                println!("Invalid command: {}", reason);
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&self, question: &str) {
        println!();

        let mut input = RunDiscussionInput::from_params(question, &self.params);
        if let Some(ids) = &self.participants {
            input = input.with_participants(ids.clone());
        }

        let progress = ProgressReporter::new();
        let live = LiveTranscript::stdout();
        let mut observers: Vec<&dyn DiscussionObserver> = Vec::new();
        if self.live {
            observers.push(&live);
        } else if self.show_progress {
            observers.push(&progress);
        } else {
            observers.push(&NoProgress);
        }
        let observer = CompositeObserver::new(observers);

        let started = Instant::now();
        let result = self.use_case.execute_with_progress(input, &observer).await;
        let elapsed = started.elapsed();

        match result {
            Ok(session) => {
                println!("{}", ConsoleFormatter::render(&session, self.output));
            }
            Err(e) => match e.partial_session() {
                Some(session) => eprintln!(
                    "{}",
                    ConsoleFormatter::format_failure(session, &e.to_string(), self.output)
                ),
                None => eprintln!("Error: {}", e),
            },
        }
        println!("(took {:.1}s)", elapsed.as_secs_f64());
        println!();
    }
}
