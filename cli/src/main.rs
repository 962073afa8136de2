//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use roundtable_application::{
    ConversationLogger, DiscussionObserver, DiscussionParams, NoProgress,
    RunDiscussionInput, RunDiscussionUseCase, SummaryGenerator,
};
use roundtable_domain::Severity;
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, FileSummaryMode, JsonlConversationLogger, MODERATOR_NAME,
    ResponderFactory,
};
use roundtable_presentation::{
    ChatRepl, Cli, ConsoleFormatter, LiveTranscript, OutputFormat, ProgressReporter,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| config.logging.log_dir.as_deref().map(expand_tilde));
    let _log_guard = logging::init(cli.verbose, log_dir.as_deref());

    info!("Starting roundtable");

    report_config_issues(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let roster = config.roster().context("Invalid participants")?;
    let params = discussion_params(&cli, &config);

    let factory = ResponderFactory::new(&config).offline(cli.offline);
    let registry = factory.build_registry(&roster)?;
    let missing = registry.missing_for(&roster);
    if !missing.is_empty() {
        bail!(
            "No responder for: {}",
            missing.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    let moderated =
        cli.moderated || config.discussion.parse_summary().0 == FileSummaryMode::Moderator;
    let summary = if moderated {
        SummaryGenerator::moderated(MODERATOR_NAME, factory.build_moderator()?)
            .with_timeout(params.turn_timeout)
    } else {
        SummaryGenerator::templated()
    };

    let mut use_case = RunDiscussionUseCase::new(roster, registry)
        .with_turn_timeout(params.turn_timeout)
        .with_summary(summary);

    let log_path = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.as_deref().map(expand_tilde));
    if let Some(path) = log_path {
        let logger = if cli.chat {
            JsonlConversationLogger::append(&path)
        } else {
            JsonlConversationLogger::new(&path)
        };
        match logger {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case = use_case
                    .with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
            }
            None => warn!("Conversation logging disabled"),
        }
    }

    let output = cli
        .output
        .or(config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Summary);
    let live = cli.live || config.output.live;
    let show_progress = !cli.quiet && config.repl.show_progress;

    // Chat mode
    if cli.chat {
        let history = config
            .repl
            .history_file
            .as_deref()
            .map(expand_tilde)
            .or_else(ConfigLoader::default_history_path);

        let mut repl = ChatRepl::new(use_case, params)
            .with_progress(show_progress)
            .with_live_transcript(live)
            .with_output(output)
            .with_participants(cli.participants.clone())
            .with_history_file(history);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question.clone() {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let mut input = RunDiscussionInput::from_params(question.clone(), &params);
    if !cli.participants.is_empty() {
        input = input.with_participants(cli.participants.clone());
    }

    let decorate = !cli.quiet && output != OutputFormat::Json;
    if decorate {
        println!();
        println!("+============================================================+");
        println!("|               Roundtable - Investor Panel                  |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question.trim());
        println!("Rounds: {}", params.max_rounds);
        println!();
    }

    let progress = ProgressReporter::new();
    let live_transcript = LiveTranscript::stdout();
    let simple_progress = SimpleProgress::stderr();
    let observer: &dyn DiscussionObserver = if live && decorate {
        &live_transcript
    } else if !show_progress || output == OutputFormat::Json {
        &NoProgress
    } else if std::io::stderr().is_terminal() {
        &progress
    } else {
        &simple_progress
    };
    match use_case.execute_with_progress(input, observer).await {
        Ok(session) => {
            println!("{}", ConsoleFormatter::render(&session, output));
            Ok(())
        }
        Err(e) => {
            if let Some(session) = e.partial_session() {
                eprintln!(
                    "{}",
                    ConsoleFormatter::format_failure(session, &e.to_string(), output)
                );
            }
            Err(e.into())
        }
    }
}

/// File settings with command-line overrides applied
fn discussion_params(cli: &Cli, config: &FileConfig) -> DiscussionParams {
    let mut params = config.discussion.to_params();
    if let Some(rounds) = cli.rounds {
        params = params.with_max_rounds(rounds);
    }
    if let Some(ms) = cli.round_delay_ms {
        params = params.with_round_delay(Some(Duration::from_millis(ms)));
    }
    params
}

/// Print every config issue; abort when one is an error
fn report_config_issues(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("{} configuration error(s), see above", errors);
    }
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
