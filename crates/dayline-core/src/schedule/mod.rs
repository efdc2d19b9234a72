//! Profile and placement types.
//!
//! A [`Profile`] is the per-user document: fixed schedule fields plus the
//! ordered list of [`Placement`]s. It is read whole and written whole.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::MinuteOfDay;
use crate::error::ScheduleError;

/// Stable identifier of a placement.
///
/// Empty only for placements read from documents written before ids existed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(String);

impl PlacementId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlacementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlacementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A habit occurrence dropped onto the timeline.
///
/// Never edited in place: moving a placement is remove + place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Older documents have no id; see [`Profile::assign_missing_ids`].
    #[serde(default)]
    pub placement_id: PlacementId,
    pub habit_id: String,
    pub habit_name: String,
    pub start_time: MinuteOfDay,
    /// Minutes.
    pub duration: u32,
}

impl Placement {
    pub fn new(
        habit_id: impl Into<String>,
        habit_name: impl Into<String>,
        start_time: MinuteOfDay,
        duration: u32,
    ) -> Self {
        Self {
            placement_id: PlacementId::generate(),
            habit_id: habit_id.into(),
            habit_name: habit_name.into(),
            start_time,
            duration,
        }
    }

    /// End in day-minutes; may pass 1440 for late placements.
    pub fn end_minutes(&self) -> u32 {
        self.start_time.minutes() + self.duration
    }
}

/// Per-user daily schedule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub sleep_start: MinuteOfDay,
    pub sleep_end: MinuteOfDay,
    pub work_start: MinuteOfDay,
    pub work_end: MinuteOfDay,
    pub commute_minutes: u32,
    pub morning_routine_minutes: u32,
    pub misc_minutes: u32,
    #[serde(default)]
    pub scheduled_habits: Vec<Placement>,
}

impl Profile {
    /// Sleep length; wraps past midnight, zero when start == end.
    pub fn sleep_minutes(&self) -> u32 {
        self.sleep_start.minutes_until(self.sleep_end)
    }

    /// Work length without commute.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn work_minutes(&self) -> Result<u32, ScheduleError> {
        self.work_end
            .minutes()
            .checked_sub(self.work_start.minutes())
            .ok_or_else(|| ScheduleError::NegativeDuration {
                field: "work",
                start: self.work_start.to_string(),
                end: self.work_end.to_string(),
            })
    }

    /// Whether the sleep interval crosses midnight.
    pub fn sleep_wraps(&self) -> bool {
        self.sleep_end < self.sleep_start
    }

    /// Check the cross-field invariants not expressible in the types.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        self.work_minutes().map(|_| ())
    }

    /// Give every placement without an id a fresh one.
    ///
    /// Returns how many were assigned. The caller must save the profile for
    /// the new ids to survive the next load.
    pub fn assign_missing_ids(&mut self) -> usize {
        let mut assigned = 0;
        for placement in &mut self.scheduled_habits {
            if placement.placement_id.is_empty() {
                placement.placement_id = PlacementId::generate();
                assigned += 1;
            }
        }
        assigned
    }

    /// Apply a single field edit from the setup form.
    ///
    /// The profile is left untouched when the value is rejected.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidTimeFormat`] for bad clock values and
    /// [`ScheduleError::InvalidField`] for bad minute counts.
    pub fn set_field(&mut self, field: ScheduleField, value: &str) -> Result<(), ScheduleError> {
        match field {
            ScheduleField::SleepStart => self.sleep_start = MinuteOfDay::parse(value)?,
            ScheduleField::SleepEnd => self.sleep_end = MinuteOfDay::parse(value)?,
            ScheduleField::WorkStart => self.work_start = MinuteOfDay::parse(value)?,
            ScheduleField::WorkEnd => self.work_end = MinuteOfDay::parse(value)?,
            ScheduleField::CommuteMinutes => self.commute_minutes = parse_minutes(field, value)?,
            ScheduleField::MorningRoutineMinutes => {
                self.morning_routine_minutes = parse_minutes(field, value)?;
            }
            ScheduleField::MiscMinutes => self.misc_minutes = parse_minutes(field, value)?,
        }
        Ok(())
    }
}

fn parse_minutes(field: ScheduleField, value: &str) -> Result<u32, ScheduleError> {
    value.trim().parse().map_err(|_| ScheduleError::InvalidField {
        field: field.as_str().to_string(),
        message: format!("'{value}' is not a non-negative number of minutes"),
    })
}

impl Default for Profile {
    /// The setup form's initial values.
    fn default() -> Self {
        Self {
            sleep_start: MinuteOfDay::wrapping(22 * 60),
            sleep_end: MinuteOfDay::wrapping(6 * 60),
            work_start: MinuteOfDay::wrapping(9 * 60),
            work_end: MinuteOfDay::wrapping(17 * 60),
            commute_minutes: 60,
            morning_routine_minutes: 30,
            misc_minutes: 120,
            scheduled_habits: Vec::new(),
        }
    }
}

/// Editable fixed-schedule fields of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleField {
    SleepStart,
    SleepEnd,
    WorkStart,
    WorkEnd,
    CommuteMinutes,
    MorningRoutineMinutes,
    MiscMinutes,
}

impl ScheduleField {
    pub const ALL: [Self; 7] = [
        Self::SleepStart,
        Self::SleepEnd,
        Self::WorkStart,
        Self::WorkEnd,
        Self::CommuteMinutes,
        Self::MorningRoutineMinutes,
        Self::MiscMinutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SleepStart => "sleepStart",
            Self::SleepEnd => "sleepEnd",
            Self::WorkStart => "workStart",
            Self::WorkEnd => "workEnd",
            Self::CommuteMinutes => "commuteMinutes",
            Self::MorningRoutineMinutes => "morningRoutineMinutes",
            Self::MiscMinutes => "miscMinutes",
        }
    }
}

impl FromStr for ScheduleField {
    type Err = ScheduleError;

    /// Accepts the document key (`sleepStart`) or snake case (`sleep_start`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('_', "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| ScheduleError::InvalidField {
                field: s.to_string(),
                message: "unknown schedule field".to_string(),
            })
    }
}
