//! Free-time accounting.
//!
//! Independent of placements. Commute is counted once in full here even
//! though the work block splits it around working hours; both views add up
//! to the same total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::MINUTES_PER_DAY;
use crate::error::ScheduleError;
use crate::schedule::Profile;

/// Breakdown of a day's occupied and free minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTime {
    pub sleep_minutes: u32,
    pub work_minutes: u32,
    pub commute_minutes: u32,
    pub morning_routine_minutes: u32,
    pub misc_minutes: u32,
    pub free_minutes: u32,
}

impl FreeTime {
    /// Compute the breakdown for a profile.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn of(profile: &Profile) -> Result<Self, ScheduleError> {
        let sleep_minutes = profile.sleep_minutes();
        let work_minutes = profile.work_minutes()?;
        let mut breakdown = Self {
            sleep_minutes,
            work_minutes,
            commute_minutes: profile.commute_minutes,
            morning_routine_minutes: profile.morning_routine_minutes,
            misc_minutes: profile.misc_minutes,
            free_minutes: 0,
        };
        breakdown.free_minutes = MINUTES_PER_DAY.saturating_sub(breakdown.occupied_minutes());
        Ok(breakdown)
    }

    /// Sum of every fixed obligation. May exceed a day.
    pub fn occupied_minutes(&self) -> u32 {
        self.sleep_minutes
            .saturating_add(self.work_minutes)
            .saturating_add(self.commute_minutes)
            .saturating_add(self.morning_routine_minutes)
            .saturating_add(self.misc_minutes)
    }

    /// Whether obligations alone fill or overflow the day.
    pub fn is_overbooked(&self) -> bool {
        self.occupied_minutes() > MINUTES_PER_DAY
    }
}

impl fmt::Display for FreeTime {
    /// `"4h 30min"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}min", self.free_minutes / 60, self.free_minutes % 60)
    }
}

/// Minutes left in the day after fixed obligations, floored at zero.
///
/// # Errors
/// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
pub fn free_minutes(profile: &Profile) -> Result<u32, ScheduleError> {
    FreeTime::of(profile).map(|f| f.free_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MinuteOfDay;

    #[test]
    fn default_profile_leaves_270_minutes() {
        let free = FreeTime::of(&Profile::default()).unwrap();
        assert_eq!(free.sleep_minutes, 480);
        assert_eq!(free.work_minutes, 480);
        assert_eq!(free.free_minutes, 1440 - (480 + 480 + 60 + 30 + 120));
        assert_eq!(free.free_minutes, 270);
        assert_eq!(free.to_string(), "4h 30min");
    }

    #[test]
    fn overbooked_day_floors_at_zero() {
        let profile = Profile {
            misc_minutes: 900,
            ..Profile::default()
        };
        let free = FreeTime::of(&profile).unwrap();
        assert_eq!(free.free_minutes, 0);
        assert!(free.is_overbooked());
    }

    #[test]
    fn zero_sleep_counts_nothing() {
        let mut profile = Profile::default();
        profile.sleep_end = profile.sleep_start;
        assert_eq!(free_minutes(&profile).unwrap(), 750);
    }

    #[test]
    fn negative_work_span_is_reported() {
        let profile = Profile {
            work_start: MinuteOfDay::parse("18:00").unwrap(),
            ..Profile::default()
        };
        assert!(matches!(
            free_minutes(&profile),
            Err(ScheduleError::NegativeDuration { .. })
        ));
    }
}
