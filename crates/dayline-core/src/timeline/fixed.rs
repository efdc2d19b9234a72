//! Fixed occupancy blocks derived from a profile.
//!
//! Emits, in order: sleep (one block, or two when the interval crosses
//! midnight), work plus commute, morning routine. Blocks are descriptive:
//! the routine is not clipped against work even when they overlap.
//! Misc minutes have no anchor and are never emitted.

use tracing::debug;

use super::block::{BlockKind, TimeBlock};
use crate::clock::MINUTES_PER_DAY;
use crate::error::ScheduleError;
use crate::schedule::Profile;

pub const SLEEP_LABEL: &str = "Sleep";
pub const SLEEP_CONT_LABEL: &str = "Sleep (cont.)";
pub const WORK_LABEL: &str = "Work + Commute";
pub const ROUTINE_LABEL: &str = "Morning Routine";

/// Builds the non-placeable blocks of a day.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedBlockGenerator;

impl FixedBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate sleep, work and routine blocks.
    ///
    /// Zero-length sleep (start == end) and a zero-minute routine produce
    /// no block.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn generate(&self, profile: &Profile) -> Result<Vec<TimeBlock>, ScheduleError> {
        profile.validate()?;

        let mut blocks = Vec::with_capacity(4);
        self.push_sleep(profile, &mut blocks);
        blocks.push(self.work_block(profile));
        if profile.morning_routine_minutes > 0 {
            let start = f64::from(profile.sleep_end.minutes());
            blocks.push(TimeBlock::fixed(
                BlockKind::Routine,
                start,
                start + f64::from(profile.morning_routine_minutes),
                ROUTINE_LABEL,
            ));
        }

        debug!(count = blocks.len(), wraps = profile.sleep_wraps(), "generated fixed blocks");
        Ok(blocks)
    }

    fn push_sleep(&self, profile: &Profile, blocks: &mut Vec<TimeBlock>) {
        let start = f64::from(profile.sleep_start.minutes());
        let end = f64::from(profile.sleep_end.minutes());

        if profile.sleep_wraps() {
            blocks.push(TimeBlock::fixed(
                BlockKind::Sleep,
                start,
                f64::from(MINUTES_PER_DAY),
                SLEEP_LABEL,
            ));
            blocks.push(TimeBlock::fixed(BlockKind::Sleep, 0.0, end, SLEEP_CONT_LABEL));
        } else if end > start {
            blocks.push(TimeBlock::fixed(BlockKind::Sleep, start, end, SLEEP_LABEL));
        }
    }

    // Commute splits evenly around work; halves stay fractional.
    fn work_block(&self, profile: &Profile) -> TimeBlock {
        let half_commute = f64::from(profile.commute_minutes) / 2.0;
        TimeBlock::fixed(
            BlockKind::Work,
            f64::from(profile.work_start.minutes()) - half_commute,
            f64::from(profile.work_end.minutes()) + half_commute,
            WORK_LABEL,
        )
    }
}

/// Convenience function to generate fixed blocks with the default generator
pub fn fixed_blocks(profile: &Profile) -> Result<Vec<TimeBlock>, ScheduleError> {
    FixedBlockGenerator::new().generate(profile)
}
