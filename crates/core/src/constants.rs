//! Capacity constants and configuration defaults.

/// Positions up to this value are on the main list and always play.
pub const MAIN_LIST_CAPACITY: usize = 10;

/// Number of players that fit on the pitches; later positions are reserves.
pub const TOTAL_CAPACITY: usize = 18;

/// Timestamp layout used for roster records and exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Application directory name under the platform config/data directories.
pub const APP_DIR_NAME: &str = "matchday";

/// Default file name for the persisted session state.
pub const DEFAULT_STATE_FILE: &str = "session.json";

/// Default registration cutoff hour on match day.
pub const DEFAULT_CUTOFF_HOUR: u32 = 13;

/// Default kickoff hour on match day.
pub const DEFAULT_KICKOFF_HOUR: u32 = 20;
