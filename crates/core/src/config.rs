use crate::constants::{
    APP_DIR_NAME, DEFAULT_CUTOFF_HOUR, DEFAULT_KICKOFF_HOUR, DEFAULT_STATE_FILE,
};
use crate::Error;
use crate::Result;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for Matchday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchdayConfig {
    /// Directory holding the session state.
    pub data_dir: PathBuf,

    /// Session state file; relative paths resolve against `data_dir`.
    pub state_file: PathBuf,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Registration deadline and weekly reset.
    pub deadline: DeadlineConfig,

    /// Attendance classifier pattern selection.
    pub classifier: ClassifierConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given.
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

/// Weekly registration window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlineConfig {
    /// Reject registrations after the cutoff.
    pub enforce: bool,

    /// Match day.
    pub weekday: Weekday,

    /// Registration closes after this time on match day.
    pub cutoff: NaiveTime,

    /// Kickoff time on match day.
    pub kickoff: NaiveTime,

    /// Clear the roster once a kickoff has passed.
    pub weekly_reset: bool,
}

/// Languages with built-in keyword patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Turkish keywords.
    Turkish,

    /// English keywords.
    English,
}

/// Attendance classifier pattern selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Built-in keyword languages to load.
    pub languages: Vec<Language>,

    /// Load the built-in emoji markers.
    pub emoji: bool,

    /// Additional positive keywords or phrases.
    pub extra_positive: Vec<String>,

    /// Additional negative keywords or phrases.
    pub extra_negative: Vec<String>,

    /// Additional maybe keywords or phrases.
    pub extra_maybe: Vec<String>,
}

impl MatchdayConfig {
    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::FileSystem(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content).map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Parse(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::FileSystem(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| Error::FileSystem(format!("Failed to write config file: {}", e)))
    }

    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?;
        Ok(dir.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Resolved path of the session state file.
    pub fn state_path(&self) -> PathBuf {
        if self.state_file.is_absolute() {
            self.state_file.clone()
        } else {
            self.data_dir.join(&self.state_file)
        }
    }
}

impl Default for MatchdayConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        Self {
            data_dir,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            logging: LoggingConfig::default(),
            deadline: DeadlineConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
        }
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            enforce: true,
            weekday: Weekday::Sun,
            cutoff: NaiveTime::from_hms_opt(DEFAULT_CUTOFF_HOUR, 0, 0).unwrap_or_default(),
            kickoff: NaiveTime::from_hms_opt(DEFAULT_KICKOFF_HOUR, 0, 0).unwrap_or_default(),
            weekly_reset: true,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            languages: vec![Language::Turkish, Language::English],
            emoji: true,
            extra_positive: Vec::new(),
            extra_negative: Vec::new(),
            extra_maybe: Vec::new(),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: MatchdayConfig = toml::from_str(
            r#"
            state_file = "/tmp/roster.json"

            [deadline]
            enforce = false

            [classifier]
            languages = ["english"]
            "#,
        )
        .expect("parse");

        assert!(!cfg.deadline.enforce);
        assert_eq!(cfg.deadline.weekday, Weekday::Sun);
        assert_eq!(cfg.classifier.languages, vec![Language::English]);
        assert!(cfg.classifier.emoji);
        assert_eq!(cfg.logging.level, LogLevel::Warn);
        assert_eq!(cfg.state_path(), PathBuf::from("/tmp/roster.json"));
    }

    #[test]
    fn relative_state_file_resolves_under_data_dir() {
        let cfg = MatchdayConfig {
            data_dir: PathBuf::from("/var/lib/matchday"),
            ..MatchdayConfig::default()
        };
        assert_eq!(
            cfg.state_path(),
            PathBuf::from("/var/lib/matchday").join(DEFAULT_STATE_FILE)
        );
    }

    #[test]
    fn default_deadline_is_sunday_afternoon() {
        let deadline = DeadlineConfig::default();
        assert_eq!(deadline.cutoff, NaiveTime::from_hms_opt(13, 0, 0).expect("time"));
        assert_eq!(deadline.kickoff, NaiveTime::from_hms_opt(20, 0, 0).expect("time"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("matchday").join("config.toml");
        let mut cfg = MatchdayConfig::default();
        cfg.classifier.extra_positive = vec!["geliyoz".to_string()];
        cfg.save(&path).expect("save");

        let loaded = MatchdayConfig::load(&path).expect("load");
        assert_eq!(loaded, cfg);
    }
}
