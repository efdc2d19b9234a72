//! Pure engine operations over a [`Profile`].
//!
//! Mutating operations take the profile by value and hand back the updated
//! document for the caller to persist. Nothing here touches storage, so a
//! failed call leaves the last saved document as it was.

use crate::clock::MinuteOfDay;
use crate::error::ScheduleError;
use crate::habit::Habit;
use crate::ledger::{self, PlacementLedger};
use crate::schedule::{PlacementId, Profile};
use crate::timeline::{self, TimeBlock, TimelineAssembler};

/// Fixed blocks followed by habit blocks.
///
/// # Errors
/// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
pub fn generate_blocks(profile: &Profile) -> Result<Vec<TimeBlock>, ScheduleError> {
    TimelineAssembler::new().blocks(profile)
}

/// Minutes left after fixed obligations.
///
/// # Errors
/// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
pub fn free_minutes(profile: &Profile) -> Result<u32, ScheduleError> {
    timeline::free_minutes(profile)
}

/// Place `habit` at `start` (`"HH:MM"`).
///
/// # Errors
/// Returns [`ScheduleError::InvalidTimeFormat`] for a malformed start.
pub fn place(mut profile: Profile, habit: &Habit, start: &str) -> Result<Profile, ScheduleError> {
    let start = MinuteOfDay::parse(start)?;
    PlacementLedger::new(&mut profile.scheduled_habits).place(habit, start);
    Ok(profile)
}

/// Remove the placement at `index`.
///
/// # Errors
/// Returns [`ScheduleError::PlacementNotFound`] for an out-of-range index.
pub fn remove(mut profile: Profile, index: usize) -> Result<Profile, ScheduleError> {
    PlacementLedger::new(&mut profile.scheduled_habits).remove_at(index)?;
    Ok(profile)
}

/// Remove the placement with the given id.
///
/// # Errors
/// Returns [`ScheduleError::PlacementNotFound`] if no placement has that id.
pub fn remove_placement(mut profile: Profile, id: &PlacementId) -> Result<Profile, ScheduleError> {
    PlacementLedger::new(&mut profile.scheduled_habits).remove(id)?;
    Ok(profile)
}

/// Habits not yet placed anywhere on the profile's timeline.
pub fn unplaced<'h>(profile: &Profile, habits: &'h [Habit]) -> Vec<&'h Habit> {
    ledger::unplaced(&profile.scheduled_habits, habits)
}
