//! Wall-clock codec.
//!
//! Converts between `"HH:MM"` strings and minute-of-day integers in
//! `[0, 1440)`. All times are naive: there is no date or timezone here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScheduleError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Parse `"HH:MM"` into minutes since midnight.
///
/// Both fields must be exactly two ASCII digits; hours in `0..=23`,
/// minutes in `0..=59`.
///
/// # Errors
/// Returns [`ScheduleError::InvalidTimeFormat`] for anything else.
pub fn to_minutes(input: &str) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat {
        input: input.to_string(),
    };

    let (hours, minutes) = input.split_once(':').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Format any minute count as `"HH:MM"`, wrapping into a single day first.
///
/// Negative values wrap backwards, so `-30` is `"23:30"`.
pub fn to_time_string(minutes: i64) -> String {
    let m = minutes.rem_euclid(i64::from(MINUTES_PER_DAY));
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// A validated minute-of-day in `[0, 1440)`.
///
/// Serializes as the `"HH:MM"` string used by the persisted profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// Build from a raw minute count, wrapping into the day.
    pub fn wrapping(minutes: i64) -> Self {
        // rem_euclid keeps this inside 0..1440, which fits u16.
        Self(minutes.rem_euclid(i64::from(MINUTES_PER_DAY)) as u16)
    }

    /// Build from a minute count that must already be inside the day.
    pub fn new(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then(|| Self(minutes as u16))
    }

    /// Build from hour and minute fields.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Self::new(hours * 60 + minutes)
    }

    /// Parse `"HH:MM"`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidTimeFormat`] on malformed input.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        to_minutes(input).map(|m| Self(m as u16))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// Forward distance to `later`, wrapping past midnight.
    pub fn minutes_until(self, later: Self) -> u32 {
        (later.minutes() + MINUTES_PER_DAY - self.minutes()) % MINUTES_PER_DAY
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_time_string(i64::from(self.0)))
    }
}

impl FromStr for MinuteOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MinuteOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MinuteOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
