//! Ordered list of user placements.
//!
//! The ledger stores whatever is placed: duplicates and overlaps are
//! accepted. Removal is by [`PlacementId`]; positional removal remains for
//! callers that still address rows by index.

use tracing::debug;

use crate::clock::MinuteOfDay;
use crate::error::ScheduleError;
use crate::habit::{Habit, HabitCatalog, DEFAULT_HABIT_MINUTES};
use crate::schedule::{Placement, PlacementId};

/// Mutable view over a profile's `scheduledHabits`.
#[derive(Debug)]
pub struct PlacementLedger<'a> {
    placements: &'a mut Vec<Placement>,
    default_minutes: u32,
}

impl<'a> PlacementLedger<'a> {
    pub fn new(placements: &'a mut Vec<Placement>) -> Self {
        Self {
            placements,
            default_minutes: DEFAULT_HABIT_MINUTES,
        }
    }

    /// Duration used for habits without a usable `timeRequired`.
    pub fn with_default_minutes(mut self, minutes: u32) -> Self {
        self.default_minutes = minutes;
        self
    }

    /// Append a placement for `habit` at `start` and return it.
    pub fn place(&mut self, habit: &Habit, start: MinuteOfDay) -> &Placement {
        let duration = habit.required_minutes_or(self.default_minutes);
        let placement = Placement::new(&habit.id, &habit.text, start, duration);
        debug!(
            habit_id = %placement.habit_id,
            placement_id = %placement.placement_id,
            start = %start,
            duration,
            "placed habit"
        );
        self.placements.push(placement);
        &self.placements[self.placements.len() - 1]
    }

    /// Remove the placement with the given id.
    ///
    /// # Errors
    /// Returns [`ScheduleError::PlacementNotFound`] if no placement has that id.
    pub fn remove(&mut self, id: &PlacementId) -> Result<Placement, ScheduleError> {
        let index = self
            .placements
            .iter()
            .position(|p| &p.placement_id == id)
            .ok_or_else(|| ScheduleError::PlacementNotFound(id.to_string()))?;
        Ok(self.take(index))
    }

    /// Remove the placement at `index`, shifting later entries down.
    ///
    /// # Errors
    /// Returns [`ScheduleError::PlacementNotFound`] if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<Placement, ScheduleError> {
        if index >= self.placements.len() {
            return Err(ScheduleError::PlacementNotFound(format!(
                "index {index} (length: {})",
                self.placements.len()
            )));
        }
        Ok(self.take(index))
    }

    fn take(&mut self, index: usize) -> Placement {
        let removed = self.placements.remove(index);
        debug!(placement_id = %removed.placement_id, index, "removed placement");
        removed
    }

    pub fn placements(&self) -> &[Placement] {
        self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Habits from `all` that no placement refers to, in catalog order.
pub fn unplaced<'h>(placements: &[Placement], all: &'h [Habit]) -> Vec<&'h Habit> {
    all.iter()
        .filter(|h| !placements.iter().any(|p| p.habit_id == h.id))
        .collect()
}

/// Placements whose habit is missing from the catalog.
///
/// Such placements stay on the timeline; they are only left out of
/// [`unplaced`] accounting.
pub fn orphaned<'p>(placements: &'p [Placement], catalog: &HabitCatalog) -> Vec<&'p Placement> {
    placements
        .iter()
        .filter(|p| !catalog.contains(&p.habit_id))
        .collect()
}
