//! Tier calculation for roster display.

use crate::constants::{MAIN_LIST_CAPACITY, TOTAL_CAPACITY};
use crate::types::{PlayerRecord, Tier, TierCounts};

/// Map a position on a roster of `total_count` players to its tier.
///
/// Positions 11 to 18 play unless the roster is odd-sized and the position
/// is the last one, in which case that single player waits. `total_count`
/// must be at least `position`; this is not checked.
pub fn tier(position: usize, total_count: usize) -> Tier {
    if position <= MAIN_LIST_CAPACITY {
        Tier::Playing
    } else if position <= TOTAL_CAPACITY {
        if total_count % 2 == 1 && position == total_count {
            Tier::Waiting
        } else {
            Tier::Playing
        }
    } else {
        Tier::Reserve
    }
}

/// Count players per tier, sizing the roster from the slice length.
pub fn tier_counts(roster: &[PlayerRecord]) -> TierCounts {
    let total = roster.len();
    roster
        .iter()
        .fold(TierCounts::default(), |mut counts, player| {
            match tier(player.position, total) {
                Tier::Playing => counts.playing += 1,
                Tier::Waiting => counts.waiting += 1,
                Tier::Reserve => counts.reserve += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(n: usize) -> Vec<PlayerRecord> {
        (1..=n)
            .map(|p| PlayerRecord::new(format!("Player {}", p), p, "2025-10-13 10:00:00"))
            .collect()
    }

    #[test]
    fn main_list_always_plays() {
        for total in 1..=25 {
            for position in 1..=total.min(10) {
                assert_eq!(tier(position, total), Tier::Playing);
            }
        }
    }

    #[test]
    fn boundary_positions() {
        assert_eq!(tier(10, 18), Tier::Playing);
        assert_eq!(tier(11, 18), Tier::Playing);
        assert_eq!(tier(17, 17), Tier::Waiting);
        assert_eq!(tier(18, 19), Tier::Playing);
        assert_eq!(tier(19, 19), Tier::Reserve);
        assert_eq!(tier(11, 11), Tier::Waiting);
    }

    #[test]
    fn last_player_on_odd_roster_waits_only_inside_band() {
        assert_eq!(tier(16, 17), Tier::Playing);
        assert_eq!(tier(9, 9), Tier::Playing);
        assert_eq!(tier(21, 21), Tier::Reserve);
    }

    #[test]
    fn even_rosters_never_wait() {
        for total in (12..=40).step_by(2) {
            for position in 11..=18.min(total) {
                assert_eq!(tier(position, total), Tier::Playing, "tier({position}, {total})");
            }
        }
    }

    #[test]
    fn counts_for_odd_roster_bench_one() {
        let counts = tier_counts(&roster_of(15));
        assert_eq!(
            counts,
            TierCounts {
                playing: 14,
                waiting: 1,
                reserve: 0
            }
        );
    }

    #[test]
    fn counts_beyond_capacity() {
        let counts = tier_counts(&roster_of(21));
        assert_eq!(counts.playing, 18);
        assert_eq!(counts.waiting, 0);
        assert_eq!(counts.reserve, 3);
        assert_eq!(counts.total(), 21);
    }
}
