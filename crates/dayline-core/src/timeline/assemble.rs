//! Merge fixed blocks and placements into one day view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::block::TimeBlock;
use super::fixed::FixedBlockGenerator;
use super::free::FreeTime;
use super::gap::{open_windows, OpenWindow};
use crate::error::ScheduleError;
use crate::schedule::Profile;

/// Assembled timeline for one reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimeline {
    pub day: NaiveDate,
    /// Fixed blocks first, then habit blocks in placement order.
    pub blocks: Vec<TimeBlock>,
    pub free_time: FreeTime,
}

impl DayTimeline {
    /// Blocks ordered by start, fixed before habit on ties.
    pub fn chronological(&self) -> Vec<&TimeBlock> {
        let mut sorted: Vec<&TimeBlock> = self.blocks.iter().collect();
        sorted.sort_by(|a, b| {
            a.start
                .total_cmp(&b.start)
                .then_with(|| b.kind.is_fixed().cmp(&a.kind.is_fixed()))
        });
        sorted
    }

    /// Stretches of the day no block covers.
    pub fn open_windows(&self) -> Vec<OpenWindow> {
        open_windows(&self.blocks)
    }

    /// Pairs of block indices whose intervals overlap.
    ///
    /// Overlap is allowed; this is for display warnings only.
    pub fn overlaps(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.blocks.iter().enumerate() {
            for (j, b) in self.blocks.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}

/// Combines the fixed schedule with the placement list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineAssembler {
    fixed: FixedBlockGenerator,
}

impl TimelineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed blocks followed by one habit block per placement.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn blocks(&self, profile: &Profile) -> Result<Vec<TimeBlock>, ScheduleError> {
        let mut blocks = self.fixed.generate(profile)?;
        blocks.extend(profile.scheduled_habits.iter().map(TimeBlock::from_placement));
        Ok(blocks)
    }

    /// Full day view for `day`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::NegativeDuration`] when work ends before it starts.
    pub fn assemble(
        &self,
        profile: &Profile,
        day: NaiveDate,
    ) -> Result<DayTimeline, ScheduleError> {
        Ok(DayTimeline {
            day,
            blocks: self.blocks(profile)?,
            free_time: FreeTime::of(profile)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MinuteOfDay;
    use crate::schedule::Placement;
    use crate::timeline::block::BlockKind;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn with_placements(starts: &[(&str, u32)]) -> Profile {
        let mut profile = Profile::default();
        for (i, (start, duration)) in starts.iter().enumerate() {
            profile.scheduled_habits.push(Placement::new(
                format!("h{i}"),
                format!("Habit {i}"),
                MinuteOfDay::parse(start).unwrap(),
                *duration,
            ));
        }
        profile
    }

    #[test]
    fn fixed_blocks_precede_habits() {
        let profile = with_placements(&[("20:00", 30), ("07:00", 15)]);
        let blocks = TimelineAssembler::new().blocks(&profile).unwrap();
        assert_eq!(blocks.len(), 6);
        assert!(blocks[..4].iter().all(|b| b.kind.is_fixed()));
        assert_eq!(blocks[4].label, "Habit 0");
        assert_eq!(blocks[5].label, "Habit 1");
    }

    #[test]
    fn overlapping_placements_both_appear() {
        let profile = with_placements(&[("12:00", 60), ("12:30", 60)]);
        let timeline = TimelineAssembler::new().assemble(&profile, day()).unwrap();
        let habits: Vec<_> = timeline
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Habit)
            .collect();
        assert_eq!(habits.len(), 2);
        assert!(habits[0].overlaps(habits[1]));
        // Both placements also sit inside work + commute.
        assert_eq!(timeline.overlaps().len(), 3);
    }

    #[test]
    fn chronological_orders_by_start() {
        let profile = with_placements(&[("06:00", 10)]);
        let timeline = TimelineAssembler::new().assemble(&profile, day()).unwrap();
        let starts: Vec<f64> = timeline.chronological().iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![0.0, 360.0, 360.0, 510.0, 1320.0]);
        let at_six: Vec<_> = timeline.chronological()[1..3].iter().map(|b| b.kind).collect();
        assert_eq!(at_six, vec![BlockKind::Routine, BlockKind::Habit]);
    }

    #[test]
    fn assemble_carries_reference_day_and_free_time() {
        let timeline = TimelineAssembler::new()
            .assemble(&Profile::default(), day())
            .unwrap();
        assert_eq!(timeline.day, day());
        assert_eq!(timeline.free_time.free_minutes, 270);

        let json = serde_json::to_value(&timeline).unwrap();
        assert_eq!(json["day"], "2026-03-14");
        assert_eq!(json["freeTime"]["freeMinutes"], 270);
    }

    #[test]
    fn open_windows_exclude_habits() {
        let profile = with_placements(&[("18:00", 60)]);
        let timeline = TimelineAssembler::new().assemble(&profile, day()).unwrap();
        let windows = timeline.open_windows();
        // 06:30-08:30, 17:30-18:00, 19:00-22:00
        assert_eq!(windows.len(), 3);
        assert_eq!((windows[0].start, windows[0].end), (390.0, 510.0));
        assert_eq!((windows[1].start, windows[1].end), (1050.0, 1080.0));
        assert_eq!((windows[2].start, windows[2].end), (1140.0, 1320.0));
    }
}
