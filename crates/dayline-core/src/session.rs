//! One user's editing session.
//!
//! The session owns the in-memory profile between saves and applies user
//! events one at a time. Nothing is written until [`TimelineSession::save`],
//! which sends the whole document; a later save simply overwrites it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::MinuteOfDay;
use crate::error::{CoreError, ScheduleError};
use crate::habit::{Habit, HabitCatalog, DEFAULT_HABIT_MINUTES};
use crate::ledger::{self, PlacementLedger};
use crate::schedule::{Placement, PlacementId, Profile, ScheduleField};
use crate::storage::ProfileStore;
use crate::timeline::{DayTimeline, TimelineAssembler};

/// A user action against the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    /// Drop a catalog habit at `"HH:MM"`.
    Place { habit_id: String, start: String },
    /// Take a placement off the timeline.
    Remove { placement_id: PlacementId },
    /// Change one fixed-schedule field.
    EditSchedule { field: ScheduleField, value: String },
}

/// What an applied event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Placed(Placement),
    Removed(Placement),
    Edited(ScheduleField),
}

pub struct TimelineSession<S: ProfileStore> {
    user_id: String,
    store: S,
    profile: Profile,
    catalog: HabitCatalog,
    default_minutes: u32,
    dirty: bool,
}

impl<S: ProfileStore> TimelineSession<S> {
    /// Resume the stored profile for `user_id`.
    ///
    /// Returns `Ok(None)` when the user has not completed setup yet.
    /// Placements stored without an id get one and are written back right
    /// away, so ids shown from this session still match on the next load.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn resume(
        store: S,
        user_id: &str,
        catalog: HabitCatalog,
    ) -> Result<Option<Self>, CoreError> {
        let Some(mut profile) = store.load(user_id)? else {
            return Ok(None);
        };
        let assigned = profile.assign_missing_ids();
        let mut session = Self::with_profile(store, user_id, profile, catalog);
        if assigned > 0 {
            info!(user_id, assigned, "assigned ids to placements stored without one");
            session.save()?;
        }
        session.warn_orphans();
        Ok(Some(session))
    }

    /// First setup: store `profile` for `user_id` and open a session on it.
    ///
    /// # Errors
    /// Returns an error if the profile is inconsistent or cannot be saved.
    pub fn create(
        store: S,
        user_id: &str,
        profile: Profile,
        catalog: HabitCatalog,
    ) -> Result<Self, CoreError> {
        profile.validate()?;
        let mut session = Self::with_profile(store, user_id, profile, catalog);
        session.save()?;
        Ok(session)
    }

    fn with_profile(store: S, user_id: &str, profile: Profile, catalog: HabitCatalog) -> Self {
        Self {
            user_id: user_id.to_string(),
            store,
            profile,
            catalog,
            default_minutes: DEFAULT_HABIT_MINUTES,
            dirty: false,
        }
    }

    /// Duration used when a habit has no usable `timeRequired`.
    pub fn with_default_minutes(mut self, minutes: u32) -> Self {
        self.default_minutes = minutes;
        self
    }

    /// Apply one event. On error the in-memory profile is unchanged.
    ///
    /// # Errors
    /// - [`ScheduleError::UnknownHabit`] when placing a habit not in the catalog
    /// - [`ScheduleError::InvalidTimeFormat`] for a malformed start or clock field
    /// - [`ScheduleError::PlacementNotFound`] when removing an unknown placement
    /// - [`ScheduleError::InvalidField`] for a bad minute count
    pub fn apply(&mut self, event: SessionEvent) -> Result<EventOutcome, ScheduleError> {
        debug!(user_id = %self.user_id, ?event, "applying event");
        let outcome = match event {
            SessionEvent::Place { habit_id, start } => {
                let start = MinuteOfDay::parse(&start)?;
                let habit = self
                    .catalog
                    .find(&habit_id)
                    .ok_or(ScheduleError::UnknownHabit(habit_id))?;
                let placed = PlacementLedger::new(&mut self.profile.scheduled_habits)
                    .with_default_minutes(self.default_minutes)
                    .place(habit, start)
                    .clone();
                EventOutcome::Placed(placed)
            }
            SessionEvent::Remove { placement_id } => {
                let removed =
                    PlacementLedger::new(&mut self.profile.scheduled_habits).remove(&placement_id)?;
                EventOutcome::Removed(removed)
            }
            SessionEvent::EditSchedule { field, value } => {
                self.profile.set_field(field, &value)?;
                EventOutcome::Edited(field)
            }
        };
        self.dirty = true;
        Ok(outcome)
    }

    /// Write the whole profile to the store.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write; the in-memory
    /// profile is kept so the save can be retried.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.store.save(&self.user_id, &self.profile)?;
        self.dirty = false;
        Ok(())
    }

    /// Assemble the timeline for `day`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn timeline(&self, day: NaiveDate) -> Result<DayTimeline, ScheduleError> {
        TimelineAssembler::new().assemble(&self.profile, day)
    }

    /// Catalog habits not placed yet.
    pub fn unplaced(&self) -> Vec<&Habit> {
        ledger::unplaced(&self.profile.scheduled_habits, self.catalog.habits())
    }

    /// Placements whose habit left the catalog.
    pub fn orphaned(&self) -> Vec<&Placement> {
        ledger::orphaned(&self.profile.scheduled_habits, &self.catalog)
    }

    /// Swap in a fresh catalog snapshot.
    pub fn replace_catalog(&mut self, catalog: HabitCatalog) {
        self.catalog = catalog;
        self.warn_orphans();
    }

    fn warn_orphans(&self) {
        for placement in self.orphaned() {
            warn!(
                habit_id = %placement.habit_id,
                placement_id = %placement.placement_id,
                "placement refers to a habit missing from the catalog"
            );
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn catalog(&self) -> &HabitCatalog {
        &self.catalog
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Whether there are changes not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, dropping unsaved changes.
    pub fn into_store(self) -> S {
        self.store
    }
}
