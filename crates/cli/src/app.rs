//! CLI application entry point and configuration.
//!
//! This module provides the main CLI application logic, including argument parsing,
//! configuration loading, and command dispatch.

use crate::commands::{
    AnalyzeArgs, Cli, Commands, ConfigArgs, ListArgs, OutputFormat, RegisterArgs, RemoveArgs,
    TeamArgs, ValidateArgs,
};
use crate::deadline::{DeadlinePolicy, Window};
use crate::error::{CliError, Result};
use crate::export;
use crate::session::{SessionState, SessionStore};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use matchday_analysis::{validate_format, AttendanceClassifier, ChatParser, WhatsAppParser};
use matchday_core::config::LogLevel;
use matchday_core::constants::{MAIN_LIST_CAPACITY, TOTAL_CAPACITY};
use matchday_core::{
    assign_team, get_list_status, normalize_name, register_at, remove_player, tier, tier_counts,
    ListBand, MatchdayConfig, PlayerRecord, Team,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for the CLI application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path the configuration was read from, or would be written to.
    pub config_path: Option<PathBuf>,
    /// Logging verbosity level from `-v` flags.
    pub verbosity: u8,
    /// Effective settings.
    pub settings: MatchdayConfig,
    /// Session state file.
    pub state_path: PathBuf,
    /// Fixed current time; the local clock is used when unset.
    pub clock: Option<NaiveDateTime>,
}

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Application configuration.
    pub config: AppConfig,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { config, cli })
    }

    /// Load configuration from file and environment.
    fn load_config(cli: &Cli) -> Result<AppConfig> {
        let (config_path, settings) = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                (Some(path.clone()), MatchdayConfig::load(path)?)
            }
            None => {
                let path = MatchdayConfig::default_path().ok();
                let settings = match &path {
                    Some(p) if p.exists() => MatchdayConfig::load(p)?,
                    _ => MatchdayConfig::default(),
                };
                (path, settings)
            }
        };

        // --state and MATCHDAY_STATE take precedence over the config file
        let state_path = cli
            .state
            .clone()
            .unwrap_or_else(|| settings.state_path());

        Ok(AppConfig {
            config_path,
            verbosity: cli.verbose,
            settings,
            state_path,
            clock: None,
        })
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        // Set up logging based on verbosity
        self.setup_logging();

        // Dispatch command
        match &self.cli.command {
            Commands::Register(args) => self.handle_register(args),
            Commands::Remove(args) => self.handle_remove(args),
            Commands::List(args) => self.handle_list(args),
            Commands::Status(args) => self.handle_status(args),
            Commands::Team(args) => self.handle_team(args),
            Commands::Reset => self.handle_reset(),
            Commands::Analyze(args) => self.handle_analyze(args),
            Commands::Validate(args) => self.handle_validate(args),
            Commands::Config(args) => self.handle_config(args),
        }
    }

    /// Set up logging based on verbosity level.
    fn setup_logging(&self) {
        let level = match self.config.verbosity {
            0 => level_filter(self.config.settings.logging.level),
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_module_path(false)
            .format_target(false)
            .format_timestamp(None)
            .try_init()
            .ok(); // Ignore errors if logger already initialized
    }

    fn now(&self) -> NaiveDateTime {
        self.config
            .clock
            .unwrap_or_else(|| Local::now().naive_local())
    }

    fn policy(&self) -> DeadlinePolicy {
        DeadlinePolicy::from(&self.config.settings.deadline)
    }

    fn store(&self) -> SessionStore {
        SessionStore::new(&self.config.state_path)
    }

    /// Load the session, applying the weekly reset when it is due.
    fn load_session(&self, now: NaiveDateTime) -> Result<SessionState> {
        let store = self.store();
        let mut session = store.load()?;
        if self.config.settings.deadline.weekly_reset && session.rollover(now, &self.policy()) {
            store.save(&session)?;
            println!("A new week has started, the roster was cleared.");
        }
        Ok(session)
    }

    /// Roster changes are refused after the cutoff unless forced.
    fn ensure_window_open(&self, now: NaiveDateTime, force: bool) -> Result<()> {
        let deadline = &self.config.settings.deadline;
        if !deadline.enforce || force || self.policy().window(now).accepts_registrations() {
            return Ok(());
        }
        Err(CliError::RegistrationClosed(format!(
            "roster changes for {} close at {}",
            deadline.weekday,
            deadline.cutoff.format("%H:%M")
        )))
    }

    fn handle_register(&self, args: &RegisterArgs) -> Result<()> {
        let name = normalize_name(&args.name.join(" "));
        let now = self.now();
        let mut session = self.load_session(now)?;
        self.ensure_window_open(now, args.force)?;

        let registration = register_at(&name, &session.roster, now)?;
        session.roster = registration.roster;
        self.store().save(&session)?;

        println!("{}", band_message(&registration.player, registration.band));
        Ok(())
    }

    fn handle_remove(&self, args: &RemoveArgs) -> Result<()> {
        let name = normalize_name(&args.name.join(" "));
        let now = self.now();
        let mut session = self.load_session(now)?;
        self.ensure_window_open(now, args.force)?;

        let removal = remove_player(&name, &session.roster);
        let Some(removed) = removal.removed else {
            return Err(matchday_core::Error::NotFound(name).into());
        };
        session.roster = removal.roster;
        self.store().save(&session)?;

        println!(
            "{} removed from position {}, the lists were renumbered.",
            removed.name, removed.position
        );
        Ok(())
    }

    fn handle_list(&self, args: &ListArgs) -> Result<()> {
        let now = self.now();
        let session = self.load_session(now)?;
        let window = self.policy().window(now);

        match args.format {
            OutputFormat::Json => {
                let total = session.roster.len();
                let players: Vec<serde_json::Value> = session
                    .roster
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "name": p.name,
                            "position": p.position,
                            "timestamp": p.timestamp,
                            "team": p.team,
                            "tier": tier(p.position, total),
                        })
                    })
                    .collect();
                let body = serde_json::json!({
                    "players": players,
                    "counts": tier_counts(&session.roster),
                    "registration": window.to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&body)
                        .map_err(|e| CliError::Parse(e.to_string()))?
                );
            }
            OutputFormat::Text => print!("{}", render_roster(&session.roster, window)),
        }
        Ok(())
    }

    fn handle_status(&self, args: &ListArgs) -> Result<()> {
        let session = self.load_session(self.now())?;
        let status = get_list_status(&session.roster);

        match args.format {
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&status).map_err(|e| CliError::Parse(e.to_string()))?
            ),
            OutputFormat::Text => {
                println!("Registered: {}", status.total);
                println!(
                    "Main list: {}/{} ({} free)",
                    status.main_list.len(),
                    MAIN_LIST_CAPACITY,
                    status.main_available
                );
                println!(
                    "Waiting list: {}/{} ({} free)",
                    status.waiting_list.len(),
                    TOTAL_CAPACITY - MAIN_LIST_CAPACITY,
                    status.waiting_available
                );
                println!("Reserve list: {}", status.reserve_list.len());
            }
        }
        Ok(())
    }

    fn handle_team(&self, args: &TeamArgs) -> Result<()> {
        let name = normalize_name(&args.name);
        let team = Team::from(args.team);
        let mut session = self.load_session(self.now())?;

        assign_team(&name, team, &mut session.roster)?;
        self.store().save(&session)?;

        match team {
            Team::None => println!("{} has no team now.", name),
            _ => println!("{} plays for team {}.", name, team),
        }
        Ok(())
    }

    fn handle_reset(&self) -> Result<()> {
        let store = self.store();
        let mut session = store.load()?;
        let cleared = session.roster.len();
        session.clear(self.now());
        store.save(&session)?;
        info!("roster reset, {} players cleared", cleared);
        println!("Roster cleared ({} players removed).", cleared);
        Ok(())
    }

    fn handle_analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let content = read_transcript(&args.input)?;
        let parser = WhatsAppParser::new()?;

        if !args.skip_validation {
            validate_format(&parser, &content).ensure_valid()?;
        }

        let records = parser.parse(&content);
        let classifier = AttendanceClassifier::from_config(&self.config.settings.classifier)?;
        let verdicts = if args.all {
            classifier.evaluate(&records)
        } else {
            classifier.classify(&records)
        };

        let rendered = export::render(args.format, &verdicts, self.now())?;
        match &args.output {
            Some(path) => {
                fs::write(path, rendered)?;
                info!(
                    "wrote {} verdicts as {} to {}",
                    verdicts.len(),
                    args.format,
                    path.display()
                );
                println!("Saved {} responses to {}", verdicts.len(), path.display());
            }
            None => print!("{}", rendered),
        }
        Ok(())
    }

    fn handle_validate(&self, args: &ValidateArgs) -> Result<()> {
        let content = read_transcript(&args.input)?;
        let parser = WhatsAppParser::new()?;
        let check = validate_format(&parser, &content);
        debug!("format check for {}: {:?}", args.input.display(), check);

        let summary = check.to_string();
        check.ensure_valid()?;
        println!("{}: {}", parser.name(), summary);
        Ok(())
    }

    fn handle_config(&self, args: &ConfigArgs) -> Result<()> {
        if args.init {
            let path = self.config.config_path.as_ref().ok_or_else(|| {
                CliError::Config("no configuration path available, pass --config".to_string())
            })?;
            if path.exists() && !args.force {
                return Err(CliError::Command(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            MatchdayConfig::default().save(path)?;
            println!("Wrote default configuration to {}", path.display());
            return Ok(());
        }

        if let Some(path) = &self.config.config_path {
            println!("# config: {}", path.display());
        }
        println!("# state: {}", self.config.state_path.display());
        let raw = toml::to_string_pretty(&self.config.settings)
            .map_err(|e| CliError::Parse(e.to_string()))?;
        print!("{}", raw);
        Ok(())
    }
}

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Trace => log::LevelFilter::Trace,
    }
}

fn read_transcript(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| CliError::FileSystem(format!("cannot read {}: {}", path.display(), e)))
}

/// Confirmation shown after a successful registration.
fn band_message(player: &PlayerRecord, band: ListBand) -> String {
    match band {
        ListBand::Main => format!(
            "{} added to the main list (position {}/{}) - you're playing! 🎯",
            player.name, player.position, MAIN_LIST_CAPACITY
        ),
        ListBand::Waiting => format!(
            "{} added to the waiting list (position {}/{}) - you play if someone from the main list drops out! ⏳",
            player.name, player.position, TOTAL_CAPACITY
        ),
        ListBand::Reserve => format!(
            "{} added to the reserve list (position {}) - you get on the pitch if one of the {} drops out! 📝",
            player.name, player.position, TOTAL_CAPACITY
        ),
    }
}

fn render_roster(roster: &[PlayerRecord], window: Window) -> String {
    let counts = tier_counts(roster);
    let mut out = format!(
        "Registration {} - {} registered: {} playing, {} waiting, {} reserve\n",
        window,
        counts.total(),
        counts.playing,
        counts.waiting,
        counts.reserve
    );
    if roster.is_empty() {
        out.push_str("Nobody has signed up yet.\n");
        return out;
    }
    for p in roster {
        let team = match p.team {
            Team::None => String::new(),
            t => format!("  team {}", t),
        };
        out.push_str(&format!(
            "{:>3}. {:<24} {:<8} {}{}\n",
            p.position,
            p.name,
            tier(p.position, roster.len()).to_string(),
            p.timestamp,
            team
        ));
    }
    out
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let app = App::new()?;
    app.run()
}
