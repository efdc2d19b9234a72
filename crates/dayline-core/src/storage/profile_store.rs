//! Profile document persistence.
//!
//! The engine treats storage as an opaque document store keyed by user id.
//! `save` always writes the whole document; the last save wins.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::data_dir;
use crate::error::{CoreError, StoreError};
use crate::schedule::Profile;

/// Every profile backend implements this trait.
pub trait ProfileStore {
    /// Fetch the stored profile, or `None` if the user has none yet.
    fn load(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    /// Replace the stored profile.
    fn save(&mut self, user_id: &str, profile: &Profile) -> Result<(), StoreError>;
}

/// In-process store, used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: HashMap<String, Profile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.get(user_id).cloned())
    }

    fn save(&mut self, user_id: &str, profile: &Profile) -> Result<(), StoreError> {
        self.profiles.insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}

/// SQLite store holding one JSON document per user.
pub struct SqliteProfileStore {
    conn: Connection,
}

impl SqliteProfileStore {
    /// Open the store at `~/.config/dayline/dayline.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("dayline.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS profiles (
                user_id     TEXT PRIMARY KEY,
                document    TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Ids of every user with a stored profile.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn user_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT user_id FROM profiles ORDER BY user_id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl ProfileStore for SqliteProfileStore {
    fn load(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(document) = document else {
            return Ok(None);
        };
        let profile = serde_json::from_str(&document).map_err(|source| StoreError::CorruptDocument {
            user_id: user_id.to_string(),
            source,
        })?;
        info!(user_id, "loaded profile");
        Ok(Some(profile))
    }

    fn save(&mut self, user_id: &str, profile: &Profile) -> Result<(), StoreError> {
        let document = serde_json::to_string(profile).map_err(|source| StoreError::CorruptDocument {
            user_id: user_id.to_string(),
            source,
        })?;
        self.conn.execute(
            "INSERT INTO profiles (user_id, document, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at",
            params![user_id, document, Utc::now().to_rfc3339()],
        )?;
        info!(
            user_id,
            placements = profile.scheduled_habits.len(),
            "saved profile"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MinuteOfDay;
    use crate::schedule::Placement;

    fn sample() -> Profile {
        let mut profile = Profile::default();
        profile.scheduled_habits.push(Placement::new(
            "h1",
            "Meditate",
            MinuteOfDay::parse("07:00").unwrap(),
            10,
        ));
        profile
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryProfileStore::new();
        assert!(store.load("u1").unwrap().is_none());
        let profile = sample();
        store.save("u1", &profile).unwrap();
        assert_eq!(store.load("u1").unwrap(), Some(profile));
        assert!(store.load("u2").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sqlite_missing_user_is_none() {
        let store = SqliteProfileStore::open_memory().unwrap();
        assert!(store.load("nobody").unwrap().is_none());
    }

    #[test]
    fn sqlite_save_overwrites_whole_document() {
        let mut store = SqliteProfileStore::open_memory().unwrap();
        let first = sample();
        store.save("u1", &first).unwrap();
        assert_eq!(store.load("u1").unwrap(), Some(first));

        let second = Profile::default();
        store.save("u1", &second).unwrap();
        let loaded = store.load("u1").unwrap().unwrap();
        assert!(loaded.scheduled_habits.is_empty());
        assert_eq!(store.user_ids().unwrap(), vec!["u1".to_string()]);
    }

    #[test]
    fn sqlite_reports_corrupt_document() {
        let store = SqliteProfileStore::open_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO profiles (user_id, document, updated_at) VALUES ('u1', ?1, '')",
                params![r#"{"sleepStart": 5}"#],
            )
            .unwrap();
        assert!(matches!(
            store.load("u1"),
            Err(StoreError::CorruptDocument { .. })
        ));
    }

    #[test]
    fn sqlite_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dayline.db");
        let profile = sample();
        {
            let mut store = SqliteProfileStore::open_at(&path).unwrap();
            store.save("u1", &profile).unwrap();
        }
        let store = SqliteProfileStore::open_at(&path).unwrap();
        assert_eq!(store.load("u1").unwrap(), Some(profile));
    }
}
