use serde::{Deserialize, Serialize};

/// Team a registered player has been split into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    /// Not assigned yet.
    #[default]
    None,

    /// Team A.
    A,

    /// Team B.
    B,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::None => write!(f, "none"),
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// One registration on the weekly roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Title-cased display name.
    pub name: String,

    /// 1-based signup position.
    pub position: usize,

    /// Registration time, formatted with [`crate::constants::DATE_FORMAT`].
    pub timestamp: String,

    /// Team assignment.
    #[serde(default)]
    pub team: Team,
}

impl PlayerRecord {
    /// Create an unassigned record.
    pub fn new(name: impl Into<String>, position: usize, timestamp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            timestamp: timestamp.into(),
            team: Team::None,
        }
    }
}

/// Whether a player takes the pitch, derived from position and roster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Plays this week.
    Playing,

    /// Sits out so the remaining players split evenly.
    Waiting,

    /// Beyond pitch capacity.
    Reserve,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Playing => write!(f, "playing"),
            Tier::Waiting => write!(f, "waiting"),
            Tier::Reserve => write!(f, "reserve"),
        }
    }
}

/// List a new registration landed on, by flat position thresholds.
///
/// Returned by registration so the caller can pick the message to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListBand {
    /// Positions 1 to 10.
    Main,

    /// Positions 11 to 18.
    Waiting,

    /// Positions after 18.
    Reserve,
}

impl std::fmt::Display for ListBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListBand::Main => write!(f, "main"),
            ListBand::Waiting => write!(f, "waiting-band"),
            ListBand::Reserve => write!(f, "reserve-band"),
        }
    }
}

/// Flat capacity view of a roster.
///
/// Partitions strictly on the 10/18 thresholds and ignores the odd-roster
/// waiting rule applied by [`crate::tier::tier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStatus {
    pub main_list: Vec<PlayerRecord>,
    pub waiting_list: Vec<PlayerRecord>,
    pub reserve_list: Vec<PlayerRecord>,
    pub total: usize,
    pub main_available: usize,
    pub waiting_available: usize,
}

/// Per-tier head counts over a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub playing: usize,
    pub waiting: usize,
    pub reserve: usize,
}

impl TierCounts {
    /// Sum of all tiers.
    pub fn total(&self) -> usize {
        self.playing + self.waiting + self.reserve
    }
}
