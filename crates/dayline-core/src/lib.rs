//! # Dayline Core Library
//!
//! This library provides the core logic for Dayline, a planner that models
//! one 24-hour day as fixed obligations (sleep, work plus commute, morning
//! routine, a misc buffer) and lets the user drop habits into what is left.
//! The `dayline` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Clock**: `"HH:MM"` <-> minute-of-day codec
//! - **Timeline**: fixed-block generation (with midnight-crossing sleep),
//!   free-time accounting, assembly with placements, open windows
//! - **Ledger**: the ordered list of habit placements
//! - **Session**: one user's in-memory profile between saves
//! - **Storage**: profile document stores (memory, SQLite) and TOML configuration
//!
//! ## Key Components
//!
//! - [`Profile`]: Per-user schedule document
//! - [`TimelineAssembler`]: Fixed blocks plus placements for a reference day
//! - [`PlacementLedger`]: Place and remove habits
//! - [`TimelineSession`]: Event application and saving
//! - [`ProfileStore`]: Trait for profile persistence backends

pub mod clock;
pub mod engine;
pub mod error;
pub mod habit;
pub mod ledger;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod timeline;

pub use clock::{to_minutes, to_time_string, MinuteOfDay, MINUTES_PER_DAY};
pub use engine::{free_minutes, generate_blocks, place, remove, remove_placement, unplaced};
pub use error::{ConfigError, CoreError, ScheduleError, StoreError};
pub use habit::{Habit, HabitCatalog};
pub use ledger::PlacementLedger;
pub use schedule::{Placement, PlacementId, Profile, ScheduleField};
pub use session::{EventOutcome, SessionEvent, TimelineSession};
pub use storage::{Config, MemoryProfileStore, ProfileStore, SqliteProfileStore};
pub use timeline::{BlockKind, DayTimeline, FreeTime, OpenWindow, TimeBlock, TimelineAssembler};
