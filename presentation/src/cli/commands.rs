//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::ParticipantId;
use std::path::PathBuf;

/// Output format for discussion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript grouped by round, then the summary
    Full,
    /// Only the closing summary
    Summary,
    /// The whole session as JSON
    Json,
}

impl From<OutputFormat> for roundtable_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

impl From<roundtable_domain::OutputFormat> for OutputFormat {
    fn from(format: roundtable_domain::OutputFormat) -> Self {
        match format {
            roundtable_domain::OutputFormat::Full => Self::Full,
            roundtable_domain::OutputFormat::Summary => Self::Summary,
            roundtable_domain::OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Investor roundtable - personas discuss your question over several rounds")]
#[command(long_about = r#"
Roundtable seats a panel of personas around one question.

Every round, each participant speaks once in a fixed order and sees everything
said before it, including earlier speakers of the same round. After the last
round a summary is produced.

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables
2. --config <path>       Explicit config file
3. ./roundtable.toml     Project-level config
4. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Is now a good time to buy index funds?"
  roundtable --rounds 3 -p buffett -p wood "Should I invest in AI stocks?"
  roundtable --offline --output full "How do I value a bank?"
  roundtable --chat
"#)]
pub struct Cli {
    /// The question to discuss (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Number of rounds (default from config, 5 if unset)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Seat only these participants (can be specified multiple times)
    #[arg(short, long = "participant", value_name = "ID")]
    pub participants: Vec<ParticipantId>,

    /// Output format (default from config, summary if unset)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Use canned replies instead of calling the API
    #[arg(long)]
    pub offline: bool,

    /// Let a moderator write a content-derived summary
    #[arg(long)]
    pub moderated: bool,

    /// Pause between rounds in milliseconds
    #[arg(long, value_name = "MS")]
    pub round_delay_ms: Option<u64>,

    /// Print each turn as soon as it is spoken
    #[arg(long)]
    pub live: bool,

    /// Write a JSONL conversation log to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Write rotating diagnostic logs into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "roundtable",
            "--rounds",
            "3",
            "-p",
            "buffett",
            "-p",
            "wood",
            "--output",
            "json",
            "--offline",
            "-vv",
            "Should I buy?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("Should I buy?"));
        assert_eq!(cli.rounds, Some(3));
        assert_eq!(cli.participants.len(), 2);
        assert_eq!(cli.participants[1].as_str(), "wood");
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.offline);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_invalid_participant_id_rejected() {
        assert!(Cli::try_parse_from(["roundtable", "-p", "not valid", "Q"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["roundtable", "--chat"]).unwrap();
        assert!(cli.chat);
        assert!(cli.question.is_none());
        assert!(cli.rounds.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.moderated);
    }

    #[test]
    fn test_format_conversion() {
        let domain: roundtable_domain::OutputFormat = OutputFormat::Summary.into();
        assert_eq!(domain, roundtable_domain::OutputFormat::Summary);
        assert_eq!(OutputFormat::from(roundtable_domain::OutputFormat::Json), OutputFormat::Json);
    }
}
