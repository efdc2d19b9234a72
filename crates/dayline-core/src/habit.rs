//! Habit records consumed from the external catalog.
//!
//! The engine never creates or deletes habits. It only reads `id`, `text`
//! and the leading integer of `timeRequired`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Duration assumed when a habit does not declare a usable one.
pub const DEFAULT_HABIT_MINUTES: u32 = 15;

/// Category shown for habits without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A habit record as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub text: String,
    /// Free text such as `"30 min"`; only the leading integer is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Habit {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            time_required: None,
            category: None,
        }
    }

    /// Set the declared time requirement.
    pub fn with_time_required(mut self, time_required: impl Into<String>) -> Self {
        self.time_required = Some(time_required.into());
        self
    }

    /// Category for display grouping.
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Minutes this habit occupies once placed.
    ///
    /// Falls back to `fallback` when `timeRequired` is absent, has no
    /// leading integer, or the integer is zero.
    pub fn required_minutes_or(&self, fallback: u32) -> u32 {
        self.time_required
            .as_deref()
            .and_then(leading_integer)
            .filter(|&m| m > 0)
            .unwrap_or(fallback)
    }

    /// [`required_minutes_or`](Self::required_minutes_or) with the stock 15-minute default.
    pub fn required_minutes(&self) -> u32 {
        self.required_minutes_or(DEFAULT_HABIT_MINUTES)
    }
}

/// First whitespace-separated token's leading digits, e.g. `"45min"` -> 45.
fn leading_integer(text: &str) -> Option<u32> {
    let token = text.split_whitespace().next()?;
    let digits: String = token.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Read-only view of the externally owned habit list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitCatalog {
    habits: Vec<Habit>,
}

impl HabitCatalog {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    /// Load a catalog from a JSON array of habit records.
    ///
    /// A missing file is an empty catalog.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_json(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

impl From<Vec<Habit>> for HabitCatalog {
    fn from(habits: Vec<Habit>) -> Self {
        Self::new(habits)
    }
}
