//! Weekly registration window.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use matchday_core::config::DeadlineConfig;

/// State of the registration window at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Registration is open and match day is not today.
    Open,
    /// Match day, before the cutoff.
    ClosingToday {
        /// Time left until the cutoff.
        remaining: Duration,
    },
    /// Match day, past the cutoff.
    Closed,
}

impl Window {
    /// Whether a registration would be accepted.
    pub fn accepts_registrations(&self) -> bool {
        !matches!(self, Window::Closed)
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Open => write!(f, "open"),
            Window::ClosingToday { remaining } => write!(
                f,
                "closes in {}h {}m",
                remaining.num_hours(),
                remaining.num_minutes() % 60
            ),
            Window::Closed => write!(f, "closed"),
        }
    }
}

/// Match day with its cutoff and kickoff times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlinePolicy {
    weekday: Weekday,
    cutoff: NaiveTime,
    kickoff: NaiveTime,
}

impl DeadlinePolicy {
    /// Policy for the given match day and times.
    pub fn new(weekday: Weekday, cutoff: NaiveTime, kickoff: NaiveTime) -> Self {
        Self {
            weekday,
            cutoff,
            kickoff,
        }
    }

    /// Match day.
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Registration window at `now`.
    pub fn window(&self, now: NaiveDateTime) -> Window {
        if now.weekday() != self.weekday {
            return Window::Open;
        }
        let cutoff = now.date().and_time(self.cutoff);
        if now < cutoff {
            Window::ClosingToday {
                remaining: cutoff - now,
            }
        } else {
            Window::Closed
        }
    }

    /// Most recent kickoff at or before `now`.
    pub fn last_kickoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        let back = days_since(now.date(), self.weekday);
        let candidate = (now.date() - Duration::days(back)).and_time(self.kickoff);
        if candidate <= now {
            candidate
        } else {
            candidate - Duration::days(7)
        }
    }

    /// Next match day kickoff strictly after `now`.
    pub fn next_kickoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.last_kickoff(now) + Duration::days(7)
    }
}

impl From<&DeadlineConfig> for DeadlinePolicy {
    fn from(config: &DeadlineConfig) -> Self {
        Self::new(config.weekday, config.cutoff, config.kickoff)
    }
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self::from(&DeadlineConfig::default())
    }
}

fn days_since(date: NaiveDate, weekday: Weekday) -> i64 {
    let today = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    (today - target).rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    // 2025-10-12 is a Sunday.

    #[test]
    fn weekdays_are_open() {
        let policy = DeadlinePolicy::default();
        assert_eq!(policy.window(at(2025, 10, 8, 23, 0)), Window::Open);
        assert_eq!(policy.window(at(2025, 10, 11, 13, 30)), Window::Open);
    }

    #[test]
    fn sunday_morning_counts_down_to_cutoff() {
        let policy = DeadlinePolicy::default();
        let window = policy.window(at(2025, 10, 12, 10, 45));
        assert_eq!(
            window,
            Window::ClosingToday {
                remaining: Duration::minutes(135)
            }
        );
        assert!(window.accepts_registrations());
        assert_eq!(window.to_string(), "closes in 2h 15m");
    }

    #[test]
    fn sunday_after_cutoff_is_closed() {
        let policy = DeadlinePolicy::default();
        assert_eq!(policy.window(at(2025, 10, 12, 13, 0)), Window::Closed);
        assert!(!policy.window(at(2025, 10, 12, 18, 0)).accepts_registrations());
    }

    #[test]
    fn last_kickoff_steps_back_to_previous_match_day() {
        let policy = DeadlinePolicy::default();
        assert_eq!(policy.last_kickoff(at(2025, 10, 12, 21, 0)), at(2025, 10, 12, 20, 0));
        assert_eq!(policy.last_kickoff(at(2025, 10, 12, 19, 0)), at(2025, 10, 5, 20, 0));
        assert_eq!(policy.last_kickoff(at(2025, 10, 15, 9, 0)), at(2025, 10, 12, 20, 0));
        assert_eq!(policy.next_kickoff(at(2025, 10, 15, 9, 0)), at(2025, 10, 19, 20, 0));
    }
}
