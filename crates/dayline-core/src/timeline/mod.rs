//! Daily timeline engine.
//!
//! This module provides:
//! - Fixed occupancy blocks derived from a profile (sleep, work, routine)
//! - Free-time accounting independent of placements
//! - Assembly of fixed blocks and placements into one day view
//! - Open-window listing and the drop-slot grid

mod assemble;
mod block;
mod fixed;
mod free;
mod gap;

pub use assemble::{DayTimeline, TimelineAssembler};
pub use block::{BlockKind, TimeBlock};
pub use fixed::{
    fixed_blocks, FixedBlockGenerator, ROUTINE_LABEL, SLEEP_CONT_LABEL, SLEEP_LABEL, WORK_LABEL,
};
pub use free::{free_minutes, FreeTime};
pub use gap::{
    clock_label, drop_slots, open_windows, OpenWindow, OpenWindowDetector, DEFAULT_SLOT_MINUTES,
};
