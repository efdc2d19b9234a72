//! Open-window detection and the drop-slot grid.
//!
//! Lists the stretches of `[0, 1440)` not covered by any block. This is a
//! read-only view for the caller; nothing here picks a slot for a habit.

use serde::{Deserialize, Serialize};

use super::block::TimeBlock;
use crate::clock::{to_time_string, MinuteOfDay, MINUTES_PER_DAY};

/// Grid step of the timeline's drop targets.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// An uncovered stretch of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenWindow {
    pub start: f64,
    pub end: f64,
}

impl OpenWindow {
    /// Get duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.end - self.start
    }

    /// Check if this window can fit a habit of given duration
    pub fn can_fit(&self, minutes: u32) -> bool {
        self.duration_minutes() >= f64::from(minutes)
    }
}

/// Detector for uncovered stretches of a day
pub struct OpenWindowDetector {
    /// Minimum window duration to report (in minutes)
    min_minutes: f64,
}

impl OpenWindowDetector {
    /// Create a detector that reports every non-empty window
    pub fn new() -> Self {
        Self { min_minutes: 0.0 }
    }

    /// Set the minimum window duration
    pub fn with_min_minutes(mut self, minutes: u32) -> Self {
        self.min_minutes = f64::from(minutes);
        self
    }

    /// Find windows not covered by any block, sorted by start.
    ///
    /// Blocks are clamped to the day first, so a work block that starts
    /// before midnight or a habit that runs past it only covers its
    /// in-day part.
    pub fn find(&self, blocks: &[TimeBlock]) -> Vec<OpenWindow> {
        let day_end = f64::from(MINUTES_PER_DAY);

        let mut spans: Vec<(f64, f64)> = blocks
            .iter()
            .map(|b| (b.start.max(0.0), b.end.min(day_end)))
            .filter(|(s, e)| e > s)
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut windows = Vec::new();
        let mut last_end = 0.0_f64;

        for (start, end) in spans {
            if start > last_end {
                self.push(&mut windows, last_end, start);
            }
            if end > last_end {
                last_end = end;
            }
        }

        // Check for window after last block
        if last_end < day_end {
            self.push(&mut windows, last_end, day_end);
        }

        windows
    }

    fn push(&self, windows: &mut Vec<OpenWindow>, start: f64, end: f64) {
        let window = OpenWindow { start, end };
        if window.duration_minutes() > 0.0 && window.duration_minutes() >= self.min_minutes {
            windows.push(window);
        }
    }
}

impl Default for OpenWindowDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to find open windows with default settings
pub fn open_windows(blocks: &[TimeBlock]) -> Vec<OpenWindow> {
    OpenWindowDetector::new().find(blocks)
}

/// Drop targets every `step` minutes from midnight, as `"HH:MM"`.
///
/// A zero step falls back to [`DEFAULT_SLOT_MINUTES`].
pub fn drop_slots(step: u32) -> Vec<MinuteOfDay> {
    let step = if step == 0 { DEFAULT_SLOT_MINUTES } else { step };
    (0..MINUTES_PER_DAY)
        .step_by(step as usize)
        .filter_map(MinuteOfDay::new)
        .collect()
}

/// `"HH:MM"` label for a fractional day-minute.
pub fn clock_label(minutes: f64) -> String {
    to_time_string(minutes.floor() as i64)
}
