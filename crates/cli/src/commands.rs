//! CLI command definitions for Matchday.
//!
//! Covers weekly roster management and chat transcript analysis.

use clap::{Args, Parser, Subcommand, ValueEnum};
use matchday_core::Team;
use std::path::PathBuf;

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(name = "matchday", author, version, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "MATCHDAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session state file override
    #[arg(long, env = "MATCHDAY_STATE")]
    pub state: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a player for this week's match
    Register(RegisterArgs),

    /// Remove a player and move everyone behind them up
    Remove(RemoveArgs),

    /// Show the roster with each player's tier
    List(ListArgs),

    /// Show the flat main/waiting/reserve capacity view
    Status(ListArgs),

    /// Assign a player to a team
    Team(TeamArgs),

    /// Clear the roster
    Reset,

    /// Classify attendance from a chat transcript
    Analyze(AnalyzeArgs),

    /// Check that a file looks like a chat transcript
    Validate(ValidateArgs),

    /// Show or initialise the configuration file
    Config(ConfigArgs),
}

/// Registration arguments.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Player name; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Register even after the deadline
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

/// Removal arguments.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Player name as registered
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Remove even after the deadline
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

/// Roster listing arguments.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Team assignment arguments.
#[derive(Args, Debug)]
pub struct TeamArgs {
    /// Player name as registered
    pub name: String,

    /// Team to assign
    #[arg(value_enum)]
    pub team: TeamChoice,
}

/// Transcript analysis arguments.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Transcript file
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
    pub format: ExportFormat,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include senders whose intent could not be determined
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Analyze even if the file fails the format check
    #[arg(long, default_value_t = false)]
    pub skip_validation: bool,
}

/// Transcript validation arguments.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Transcript file
    pub input: PathBuf,
}

/// Configuration arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the default configuration to the config path
    #[arg(long, default_value_t = false)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Attendance export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One line per sender
    Text,
    /// JSON array of verdicts
    Json,
    /// CSV with a header row
    Csv,
    /// Summary report with totals and grouped names
    Summary,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Team choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TeamChoice {
    /// Clear the assignment
    None,
    /// Team A
    A,
    /// Team B
    B,
}

impl From<TeamChoice> for Team {
    fn from(choice: TeamChoice) -> Self {
        match choice {
            TeamChoice::None => Team::None,
            TeamChoice::A => Team::A,
            TeamChoice::B => Team::B,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_joins_multiword_name() {
        let cli = Cli::try_parse_from(["matchday", "register", "ali", "veli", "--force"])
            .expect("parse");
        match cli.command {
            Commands::Register(args) => {
                assert_eq!(args.name, vec!["ali", "veli"]);
                assert!(args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn remove_accepts_force() {
        let cli = Cli::try_parse_from(["matchday", "remove", "Ali", "--force"]).expect("parse");
        match cli.command {
            Commands::Remove(args) => assert!(args.force),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn register_requires_a_name() {
        assert!(Cli::try_parse_from(["matchday", "register"]).is_err());
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["matchday", "-vv", "analyze", "chat.txt"]).expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.format, ExportFormat::Text);
                assert!(args.output.is_none());
                assert!(!args.all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn team_choice_maps_to_core_team() {
        let cli = Cli::try_parse_from(["matchday", "team", "Ali", "b"]).expect("parse");
        match cli.command {
            Commands::Team(args) => assert_eq!(Team::from(args.team), Team::B),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
