//! Registration engine.
//!
//! Every operation takes the roster from the caller and either returns a new
//! roster or edits the slice it was given. Nothing is cached between calls.

use crate::constants::{DATE_FORMAT, MAIN_LIST_CAPACITY, TOTAL_CAPACITY};
use crate::error::{Error, Result};
use crate::types::{ListBand, ListStatus, PlayerRecord, Team};
use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

/// Successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Roster with the new record appended.
    pub roster: Vec<PlayerRecord>,
    /// The record that was added.
    pub player: PlayerRecord,
    /// Message category for the caller to render.
    pub band: ListBand,
}

/// Result of a removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Roster after removal and renumbering.
    pub roster: Vec<PlayerRecord>,
    /// The removed record, or `None` when no name matched.
    pub removed: Option<PlayerRecord>,
}

/// Register `name` at the current local time.
///
/// See [`register_at`].
pub fn register(name: &str, roster: &[PlayerRecord]) -> Result<Registration> {
    register_at(name, roster, Local::now().naive_local())
}

/// Append `name` to a copy of `roster`, stamped with `now`.
///
/// The name is expected to be normalised already; it is trimmed but kept
/// otherwise as given. Fails with [`Error::DuplicateName`] when a record with
/// the same name ignoring case exists and with [`Error::EmptyName`] for a
/// blank name.
pub fn register_at(name: &str, roster: &[PlayerRecord], now: NaiveDateTime) -> Result<Registration> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::EmptyName);
    }

    let folded = name.to_lowercase();
    if roster.iter().any(|p| p.name.to_lowercase() == folded) {
        debug!("duplicate registration rejected: {}", name);
        return Err(Error::DuplicateName(name.to_string()));
    }

    let position = roster.len() + 1;
    let player = PlayerRecord::new(name, position, now.format(DATE_FORMAT).to_string());
    let band = band_for(position);

    let mut updated = Vec::with_capacity(position);
    updated.extend_from_slice(roster);
    updated.push(player.clone());

    info!("registered {} at position {} ({})", player.name, position, band);
    Ok(Registration {
        roster: updated,
        player,
        band,
    })
}

/// Remove the first record named exactly `name` and renumber the rest.
///
/// An unknown name returns the roster unchanged.
pub fn remove(name: &str, roster: &[PlayerRecord]) -> Vec<PlayerRecord> {
    remove_player(name, roster).roster
}

/// Like [`remove`], also reporting which record was taken out.
pub fn remove_player(name: &str, roster: &[PlayerRecord]) -> Removal {
    let mut updated = roster.to_vec();
    let removed = updated
        .iter()
        .position(|p| p.name == name)
        .map(|idx| updated.remove(idx));

    match &removed {
        Some(player) => {
            reorder_positions(&mut updated);
            info!("removed {} from position {}", player.name, player.position);
        }
        None => debug!("remove requested for unknown player {}", name),
    }

    Removal {
        roster: updated,
        removed,
    }
}

/// Renumber positions to 1..N in current order.
pub fn reorder_positions(roster: &mut [PlayerRecord]) {
    for (idx, player) in roster.iter_mut().enumerate() {
        player.position = idx + 1;
    }
}

/// Set the team of the record named exactly `name`.
pub fn assign_team(name: &str, team: Team, roster: &mut [PlayerRecord]) -> Result<()> {
    let player = roster
        .iter_mut()
        .find(|p| p.name == name)
        .ok_or_else(|| Error::NotFound(name.to_string()))?;
    player.team = team;
    debug!("assigned {} to team {}", name, team);
    Ok(())
}

/// Partition the roster on the flat 10/18 position thresholds.
pub fn get_list_status(roster: &[PlayerRecord]) -> ListStatus {
    let mut main_list = Vec::new();
    let mut waiting_list = Vec::new();
    let mut reserve_list = Vec::new();

    for player in roster {
        match band_for(player.position) {
            ListBand::Main => main_list.push(player.clone()),
            ListBand::Waiting => waiting_list.push(player.clone()),
            ListBand::Reserve => reserve_list.push(player.clone()),
        }
    }

    let main_available = MAIN_LIST_CAPACITY.saturating_sub(main_list.len());
    let waiting_available = TOTAL_CAPACITY.saturating_sub(main_list.len() + waiting_list.len());

    ListStatus {
        main_list,
        waiting_list,
        reserve_list,
        total: roster.len(),
        main_available,
        waiting_available,
    }
}

fn band_for(position: usize) -> ListBand {
    if position <= MAIN_LIST_CAPACITY {
        ListBand::Main
    } else if position <= TOTAL_CAPACITY {
        ListBand::Waiting
    } else {
        ListBand::Reserve
    }
}
