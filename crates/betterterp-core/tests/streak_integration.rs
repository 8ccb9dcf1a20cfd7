//! Streak behavior across process restarts, using the on-disk store.

use betterterp_core::{DateKey, HabitStreakEngine, KvStore, PersistenceGateway};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> DateKey {
    DateKey::from_ymd(y, m, d).unwrap()
}

#[test]
fn streak_continues_from_yesterday_after_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("betterterp.db");

    {
        let mut store = KvStore::open_at(&path).unwrap();
        store.set("streak-alice", "3").unwrap();
        store.set("streakDate-alice", "2024-12-07").unwrap();
    }

    let store = KvStore::open_at(&path).unwrap();
    let mut engine = HabitStreakEngine::load(store, "alice", day(2024, 12, 8));
    assert_eq!(engine.streak().count, 3);

    engine.mark_habit("h1", true).unwrap();
    assert_eq!(engine.streak().count, 4);
    drop(engine);

    let store = KvStore::open_at(&path).unwrap();
    assert_eq!(store.get("streak-alice").as_deref(), Some("4"));
    assert_eq!(store.get("streakDate-alice").as_deref(), Some("2024-12-08"));
    assert_eq!(
        store.get("habits-alice-2024-12-08").as_deref(),
        Some(r#"{"h1":true}"#)
    );
}

#[test]
fn toggling_across_restarts_counts_the_day_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("betterterp.db");
    let today = day(2024, 12, 8);

    let toggles = [("a", true), ("b", true), ("a", false), ("a", true)];
    for (id, value) in toggles {
        let store = KvStore::open_at(&path).unwrap();
        let mut engine = HabitStreakEngine::load(store, "alice", today);
        engine.mark_habit(id, value).unwrap();
    }

    let store = KvStore::open_at(&path).unwrap();
    let engine = HabitStreakEngine::load(store, "alice", today);
    assert_eq!(engine.streak().count, 1);
    assert!(engine.is_completed("a"));
    assert!(engine.is_completed("b"));
}

#[test]
fn users_do_not_share_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("betterterp.db");
    let today = day(2024, 12, 8);

    let store = KvStore::open_at(&path).unwrap();
    let mut engine = HabitStreakEngine::load(store, "alice", today);
    engine.mark_habit("h1", true).unwrap();

    engine.switch_user("bob", today);
    assert_eq!(engine.streak().count, 0);
    assert!(!engine.is_completed("h1"));
    engine.mark_habit("h7", true).unwrap();

    engine.switch_user("alice", today);
    assert_eq!(engine.streak().count, 1);
    assert!(engine.is_completed("h1"));
    assert!(!engine.is_completed("h7"));
}
