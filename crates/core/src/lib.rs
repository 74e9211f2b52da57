//! Core types, errors, and configuration for Matchday
//!
//! This crate owns the roster data model together with the two rules that
//! drive weekly signup: the tier calculator and the registration engine.
//! Both are stateless; callers hand in a roster and receive a new one back.

pub mod config;
pub mod constants;
pub mod error;
pub mod names;
pub mod registration;
pub mod tier;
pub mod types;

// Re-exports for convenience
pub use config::MatchdayConfig;
pub use error::{Error, Result};
pub use names::{normalize_name, title_case};
pub use registration::{
    assign_team, get_list_status, register, register_at, remove, remove_player,
    reorder_positions, Registration, Removal,
};
pub use tier::{tier, tier_counts};
pub use types::*;
