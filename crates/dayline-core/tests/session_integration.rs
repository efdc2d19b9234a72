//! Integration tests for sessions backed by the SQLite profile store.

use chrono::NaiveDate;
use dayline_core::{
    BlockKind, Config, CoreError, EventOutcome, Habit, HabitCatalog, ProfileStore, ScheduleError,
    ScheduleField, SessionEvent, SqliteProfileStore, TimelineSession,
};
use tempfile::TempDir;

fn catalog() -> HabitCatalog {
    HabitCatalog::new(vec![
        Habit::new("read", "Read").with_time_required("30 min"),
        Habit::new("walk", "Walk").with_time_required("45 min"),
        Habit::new("call", "Call family"),
    ])
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[test]
fn test_setup_place_save_and_resume() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("dayline.db");
    let profile = Config::default().defaults.to_profile();

    let placed_id = {
        let store = SqliteProfileStore::open_at(&db_path).unwrap();
        let mut session = TimelineSession::create(store, "alice", profile, catalog()).unwrap();

        let outcome = session
            .apply(SessionEvent::Place {
                habit_id: "read".into(),
                start: "20:00".into(),
            })
            .unwrap();
        let EventOutcome::Placed(placement) = outcome else {
            panic!("expected placement");
        };
        session
            .apply(SessionEvent::Place {
                habit_id: "walk".into(),
                start: "12:30".into(),
            })
            .unwrap();
        session.save().unwrap();
        placement.placement_id
    };

    let store = SqliteProfileStore::open_at(&db_path).unwrap();
    let mut session = TimelineSession::resume(store, "alice", catalog())
        .unwrap()
        .expect("profile should exist");
    assert_eq!(session.profile().scheduled_habits.len(), 2);

    let unplaced: Vec<_> = session.unplaced().iter().map(|h| h.id.clone()).collect();
    assert_eq!(unplaced, vec!["call".to_string()]);

    session
        .apply(SessionEvent::Remove {
            placement_id: placed_id,
        })
        .unwrap();
    session.save().unwrap();

    let timeline = session.timeline(day()).unwrap();
    let habits: Vec<_> = timeline
        .blocks
        .iter()
        .filter(|b| b.kind == BlockKind::Habit)
        .collect();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].label, "Walk");
    assert_eq!(timeline.free_time.free_minutes, 270);
}

#[test]
fn test_placement_ids_stay_stable_for_documents_without_them() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("dayline.db");
    SqliteProfileStore::open_at(&db_path).unwrap();

    // Document written before placements carried an id.
    let document = r#"{
        "sleepStart": "22:00", "sleepEnd": "06:00",
        "workStart": "09:00", "workEnd": "17:00",
        "commuteMinutes": 60, "morningRoutineMinutes": 30, "miscMinutes": 120,
        "scheduledHabits": [
            {"habitId": "read", "habitName": "Read", "startTime": "20:00", "duration": 30},
            {"habitId": "walk", "habitName": "Walk", "startTime": "12:30", "duration": 45}
        ]
    }"#;
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute(
            "INSERT INTO profiles (user_id, document, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params!["alice", document, "2026-01-01T00:00:00Z"],
        )
        .unwrap();

    let resume = || {
        let store = SqliteProfileStore::open_at(&db_path).unwrap();
        TimelineSession::resume(store, "alice", catalog())
            .unwrap()
            .unwrap()
    };

    let shown: Vec<_> = resume()
        .timeline(day())
        .unwrap()
        .blocks
        .into_iter()
        .filter_map(|b| b.placement_id)
        .collect();
    assert_eq!(shown.len(), 2);

    let mut later = resume();
    let reloaded: Vec<_> = later
        .profile()
        .scheduled_habits
        .iter()
        .map(|p| p.placement_id.clone())
        .collect();
    assert_eq!(reloaded, shown);

    let outcome = later
        .apply(SessionEvent::Remove {
            placement_id: shown[0].clone(),
        })
        .unwrap();
    assert!(matches!(outcome, EventOutcome::Removed(p) if p.habit_id == "read"));
    later.save().unwrap();

    let remaining = resume();
    assert_eq!(remaining.profile().scheduled_habits.len(), 1);
    assert_eq!(remaining.profile().scheduled_habits[0].placement_id, shown[1]);
}

#[test]
fn test_users_are_isolated() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("dayline.db");
    let profile = Config::default().defaults.to_profile();

    let store = SqliteProfileStore::open_at(&db_path).unwrap();
    let session = TimelineSession::create(store, "alice", profile, catalog()).unwrap();
    let store = session.into_store();

    assert!(store.load("bob").unwrap().is_none());
    let resumed = TimelineSession::resume(store, "bob", catalog()).unwrap();
    assert!(resumed.is_none());
}

#[test]
fn test_last_save_wins() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("dayline.db");
    let profile = Config::default().defaults.to_profile();
    let store = SqliteProfileStore::open_at(&db_path).unwrap();
    TimelineSession::create(store, "alice", profile, catalog()).unwrap();

    // Two sessions on the same document: no version check between them.
    let open = || SqliteProfileStore::open_at(&db_path).unwrap();
    let mut first = TimelineSession::resume(open(), "alice", catalog())
        .unwrap()
        .unwrap();
    let mut second = TimelineSession::resume(open(), "alice", catalog())
        .unwrap()
        .unwrap();

    first
        .apply(SessionEvent::EditSchedule {
            field: ScheduleField::MiscMinutes,
            value: "60".into(),
        })
        .unwrap();
    second
        .apply(SessionEvent::EditSchedule {
            field: ScheduleField::MiscMinutes,
            value: "90".into(),
        })
        .unwrap();
    first.save().unwrap();
    second.save().unwrap();

    let stored = SqliteProfileStore::open_at(&db_path)
        .unwrap()
        .load("alice")
        .unwrap()
        .unwrap();
    assert_eq!(stored.misc_minutes, 90);
}

#[test]
fn test_bad_edit_leaves_timeline_usable() {
    let store = SqliteProfileStore::open_memory().unwrap();
    let profile = Config::default().defaults.to_profile();
    let mut session = TimelineSession::create(store, "alice", profile, catalog()).unwrap();

    let err = session
        .apply(SessionEvent::EditSchedule {
            field: ScheduleField::SleepStart,
            value: "late".into(),
        })
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidTimeFormat { .. }));
    assert!(session.timeline(day()).is_ok());

    // A cross-field inconsistency is accepted as an edit but surfaces on use.
    session
        .apply(SessionEvent::EditSchedule {
            field: ScheduleField::WorkStart,
            value: "18:00".into(),
        })
        .unwrap();
    assert!(matches!(
        session.timeline(day()),
        Err(ScheduleError::NegativeDuration { .. })
    ));
    let err: CoreError = session.timeline(day()).unwrap_err().into();
    assert!(err.to_string().contains("Negative duration"));
}
