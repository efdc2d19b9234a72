pub mod config;
pub mod habit;
pub mod profile;
pub mod timeline;

use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use dayline_core::storage::data_dir;
use dayline_core::{Config, CoreError, HabitCatalog, SqliteProfileStore, TimelineSession};

pub type CommandResult = Result<(), Box<dyn Error>>;

/// What every profile-bound command needs.
pub struct Context {
    pub config: Config,
    user_id: String,
    habits_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Config, user: Option<String>, habits_path: Option<PathBuf>) -> Self {
        let user_id = user.unwrap_or_else(|| config.user_id.clone());
        Self {
            config,
            user_id,
            habits_path,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The habit catalog from `--habits` or `<data dir>/habits.json`.
    pub fn catalog(&self) -> Result<HabitCatalog, CoreError> {
        let path = match &self.habits_path {
            Some(path) => path.clone(),
            None => data_dir()?.join("habits.json"),
        };
        HabitCatalog::load_json(&path)
    }

    pub fn store(&self) -> Result<SqliteProfileStore, CoreError> {
        SqliteProfileStore::open()
    }

    /// Resume the user's session, failing when setup has not run.
    pub fn session(&self) -> Result<TimelineSession<SqliteProfileStore>, Box<dyn Error>> {
        let session = TimelineSession::resume(self.store()?, &self.user_id, self.catalog()?)?
            .ok_or_else(|| {
                format!(
                    "no profile for user '{}'; run 'dayline profile init' first",
                    self.user_id
                )
            })?;
        Ok(session.with_default_minutes(self.config.placement.default_minutes))
    }
}

/// `--day` when given, otherwise today in local time.
pub fn reference_day(day: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match day {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| format!("invalid day '{raw}' (expected YYYY-MM-DD): {e}").into()),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
