//! Persisted roster between CLI invocations.

use crate::deadline::DeadlinePolicy;
use crate::error::{CliError, Result};
use chrono::NaiveDateTime;
use matchday_core::PlayerRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Roster and the time it was last cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Registered players in order.
    #[serde(default)]
    pub roster: Vec<PlayerRecord>,
    /// When the roster was last emptied, by reset or weekly rollover.
    #[serde(default)]
    pub last_cleanup: Option<NaiveDateTime>,
}

impl SessionState {
    /// Empty the roster and record `now` as the cleanup time.
    pub fn clear(&mut self, now: NaiveDateTime) {
        self.roster.clear();
        self.last_cleanup = Some(now);
    }

    /// Clear the roster if a kickoff has passed since the last cleanup.
    ///
    /// A session that has never been cleaned up is stamped with `now` and
    /// left alone. Returns whether the roster was cleared.
    pub fn rollover(&mut self, now: NaiveDateTime, policy: &DeadlinePolicy) -> bool {
        let Some(last) = self.last_cleanup else {
            self.last_cleanup = Some(now);
            return false;
        };

        let kickoff = policy.last_kickoff(now);
        if last < kickoff {
            info!(
                "weekly rollover: clearing {} players after kickoff {}",
                self.roster.len(),
                kickoff
            );
            self.clear(now);
            true
        } else {
            false
        }
    }
}

/// JSON file holding a [`SessionState`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session; a missing or blank file is an empty session.
    pub fn load(&self) -> Result<SessionState> {
        if !self.path.exists() {
            debug!("no session file at {}", self.path.display());
            return Ok(SessionState::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(SessionState::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            CliError::Parse(format!(
                "invalid session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Write the session, creating the parent directory if needed.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::FileSystem(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        let raw =
            serde_json::to_string_pretty(state).map_err(|e| CliError::Parse(e.to_string()))?;
        fs::write(&self.path, raw)?;
        debug!(
            "saved {} players to {}",
            state.roster.len(),
            self.path.display()
        );
        Ok(())
    }
}
