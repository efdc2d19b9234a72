//! Timeline block types.

use serde::{Deserialize, Serialize};

use crate::clock::to_time_string;
use crate::schedule::{Placement, PlacementId};

/// What occupies a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Sleep,
    Work,   // Work plus commute
    Routine,
    Habit,  // User placement
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Work => "work",
            Self::Routine => "routine",
            Self::Habit => "habit",
        }
    }

    /// Fixed blocks come from profile fields and cannot be removed one by one.
    pub fn is_fixed(&self) -> bool {
        !matches!(self, Self::Habit)
    }
}

/// A derived occupancy interval. Never persisted.
///
/// `start`/`end` are day-minutes as `f64` because the work block carries
/// half the commute on each side. The work block may start below 0 and
/// habit blocks may end past 1440; neither is clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub start: f64,
    pub end: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_id: Option<PlacementId>,
}

impl TimeBlock {
    /// A fixed block.
    pub fn fixed(kind: BlockKind, start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            label: label.into(),
            habit_id: None,
            placement_id: None,
        }
    }

    /// The habit block for a placement.
    pub fn from_placement(placement: &Placement) -> Self {
        let start = f64::from(placement.start_time.minutes());
        Self {
            kind: BlockKind::Habit,
            start,
            end: f64::from(placement.end_minutes()),
            label: placement.habit_name.clone(),
            habit_id: Some(placement.habit_id.clone()),
            placement_id: Some(placement.placement_id.clone()),
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.end - self.start
    }

    /// Check if this block overlaps with another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// `"HH:MM-HH:MM"` with fractional minutes floored.
    pub fn clock_range(&self) -> String {
        format!(
            "{}-{}",
            to_time_string(self.start.floor() as i64),
            to_time_string(self.end.floor() as i64)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MinuteOfDay;

    #[test]
    fn placement_maps_to_habit_block() {
        let placement = Placement::new("h1", "Walk", MinuteOfDay::parse("12:15").unwrap(), 45);
        let block = TimeBlock::from_placement(&placement);
        assert_eq!(block.kind, BlockKind::Habit);
        assert_eq!(block.start, 735.0);
        assert_eq!(block.end, 780.0);
        assert_eq!(block.habit_id.as_deref(), Some("h1"));
        assert_eq!(block.placement_id.as_ref(), Some(&placement.placement_id));
        assert!(!block.kind.is_fixed());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = TimeBlock::fixed(BlockKind::Work, 510.0, 1050.0, "Work + Commute");
        let b = TimeBlock::fixed(BlockKind::Routine, 1050.0, 1080.0, "After");
        let c = TimeBlock::fixed(BlockKind::Routine, 1000.0, 1060.0, "Straddle");
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn clock_range_wraps_negative_start() {
        let block = TimeBlock::fixed(BlockKind::Work, -30.0, 480.0, "Work + Commute");
        assert_eq!(block.clock_range(), "23:30-08:00");
    }

    #[test]
    fn serializes_kind_as_type() {
        let block = TimeBlock::fixed(BlockKind::Sleep, 1320.0, 1440.0, "Sleep");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "sleep");
        assert!(json.get("habitId").is_none());
    }
}
