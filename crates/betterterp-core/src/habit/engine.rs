//! Daily checklist and streak state for one user.
//!
//! The engine only ever holds today's [`CompletionSet`]. Earlier days stay in
//! the store under their own keys, but nothing here reads them back: the
//! checklist window is exactly one local day.

use tracing::{debug, warn};

use super::{CompletionSet, StreakState};
use crate::day::DateKey;
use crate::error::StorageError;
use crate::storage::{keys, PersistenceGateway};

/// What a call to [`HabitStreakEngine::mark_habit`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    pub streak_incremented: bool,
    pub streak: u32,
}

pub struct HabitStreakEngine<G> {
    gateway: G,
    user: String,
    today: DateKey,
    streak: StreakState,
    completion: CompletionSet,
}

impl<G: PersistenceGateway> HabitStreakEngine<G> {
    /// Read the user's streak and today's checklist from the store, then
    /// write the loaded state back.
    ///
    /// Absent or unreadable values load as defaults: zero streak, no
    /// increment date, nothing checked. Writing them back replaces any
    /// malformed stored value with its default.
    pub fn load(gateway: G, user: impl Into<String>, today: DateKey) -> Self {
        let user = user.into();
        let streak = read_streak(&gateway, &user);
        let completion = read_completion(&gateway, &user, today);
        let mut engine = Self {
            gateway,
            user,
            today,
            streak,
            completion,
        };
        engine.persist_loaded();
        engine
    }

    /// Drop in-memory state and load another user's.
    ///
    /// The previous user's values stay in the store untouched.
    pub fn switch_user(&mut self, user: impl Into<String>, today: DateKey) {
        let user = user.into();
        self.streak = read_streak(&self.gateway, &user);
        self.completion = read_completion(&self.gateway, &user, today);
        self.user = user;
        self.today = today;
        self.persist_loaded();
    }

    /// Move to a new local day if the date changed. Returns true on change.
    ///
    /// The streak carries over; the checklist is reloaded for the new day.
    pub fn roll_over(&mut self, today: DateKey) -> bool {
        if today == self.today {
            return false;
        }
        debug!(user = %self.user, from = %self.today, to = %today, "day rolled over");
        self.today = today;
        self.completion = read_completion(&self.gateway, &self.user, today);
        self.persist_loaded();
        true
    }

    /// Check or uncheck a habit for today and write through.
    ///
    /// The streak goes up by one when today's checklist goes from nothing
    /// checked to something checked, and only if it has not already gone up
    /// today. Unchecking never lowers it.
    ///
    /// # Errors
    /// Returns an error if the store rejects a write. In-memory state has
    /// already been updated by then.
    pub fn mark_habit(&mut self, id: &str, value: bool) -> Result<MarkOutcome, StorageError> {
        let was_any = self.completion.any_completed();
        self.completion.set(id, value);
        let is_any = self.completion.any_completed();

        let streak_incremented =
            !was_any && is_any && !self.streak.incremented_on(self.today);
        if streak_incremented {
            self.streak.count = self.streak.count.saturating_add(1);
            self.streak.last_increment = Some(self.today);
            debug!(user = %self.user, streak = self.streak.count, "streak incremented");
        }

        self.write_through()?;
        Ok(MarkOutcome {
            streak_incremented,
            streak: self.streak.count,
        })
    }

    /// Write-through after a load. A failed write is logged; the loaded
    /// state stays usable in memory.
    fn persist_loaded(&mut self) {
        if let Err(e) = self.write_through() {
            warn!(user = %self.user, error = %e, "failed to write loaded state");
        }
    }

    fn write_through(&mut self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.completion)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.gateway
            .set(&keys::completion(&self.user, self.today), &snapshot)?;
        self.gateway
            .set(&keys::streak(&self.user), &self.streak.count.to_string())?;
        if let Some(day) = self.streak.last_increment {
            self.gateway
                .set(&keys::streak_date(&self.user), &day.to_string())?;
        }
        Ok(())
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn streak(&self) -> StreakState {
        self.streak
    }

    pub fn completion(&self) -> &CompletionSet {
        &self.completion
    }

    /// The checklist for `day`, which is only known when `day` is today.
    pub fn completion_for(&self, day: DateKey) -> Option<&CompletionSet> {
        (day == self.today).then_some(&self.completion)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completion.is_completed(id)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn into_gateway(self) -> G {
        self.gateway
    }
}

fn read_streak<G: PersistenceGateway>(gateway: &G, user: &str) -> StreakState {
    let count = gateway
        .get(&keys::streak(user))
        .and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(user, raw = %raw, error = %e, "ignoring malformed streak count");
                None
            }
        })
        .unwrap_or(0);
    let last_increment = gateway
        .get(&keys::streak_date(user))
        .and_then(|raw| match raw.parse::<DateKey>() {
            Ok(day) => Some(day),
            Err(e) => {
                warn!(user, raw = %raw, error = %e, "ignoring malformed streak date");
                None
            }
        });
    StreakState {
        count,
        last_increment,
    }
}

fn read_completion<G: PersistenceGateway>(gateway: &G, user: &str, day: DateKey) -> CompletionSet {
    gateway
        .get(&keys::completion(user, day))
        .and_then(|raw| match serde_json::from_str(&raw) {
            Ok(set) => Some(set),
            Err(e) => {
                warn!(user, day = %day, error = %e, "ignoring malformed checklist");
                None
            }
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 12, d).unwrap()
    }

    fn fresh(today: DateKey) -> HabitStreakEngine<MemoryStore> {
        HabitStreakEngine::load(MemoryStore::new(), "alice", today)
    }

    #[test]
    fn load_defaults_when_store_is_empty() {
        let engine = fresh(day(8));
        assert_eq!(engine.streak(), StreakState::default());
        assert!(!engine.completion().any_completed());
    }

    #[test]
    fn load_writes_defaults_through() {
        let engine = fresh(day(8));
        let store = engine.gateway();
        assert_eq!(store.get("streak-alice").as_deref(), Some("0"));
        assert_eq!(store.get("habits-alice-2024-12-08").as_deref(), Some("{}"));
        assert!(store.get("streakDate-alice").is_none());
    }

    #[test]
    fn load_replaces_malformed_values_in_store() {
        let store = MemoryStore::with_entries([
            ("streak-alice", "lots"),
            ("habits-alice-2024-12-08", "{not json"),
        ]);
        let engine = HabitStreakEngine::load(store, "alice", day(8));
        assert_eq!(engine.gateway().get("streak-alice").as_deref(), Some("0"));
        assert_eq!(
            engine.gateway().get("habits-alice-2024-12-08").as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn switch_user_writes_new_users_state() {
        let mut engine = fresh(day(8));
        engine.switch_user("bob", day(8));
        assert_eq!(engine.gateway().get("streak-bob").as_deref(), Some("0"));
        assert_eq!(engine.gateway().get("habits-bob-2024-12-08").as_deref(), Some("{}"));
    }

    #[test]
    fn streak_at_maximum_does_not_wrap() {
        let store = MemoryStore::with_entries([("streak-alice", "4294967295")]);
        let mut engine = HabitStreakEngine::load(store, "alice", day(8));
        let outcome = engine.mark_habit("a", true).unwrap();
        assert_eq!(outcome.streak, u32::MAX);
        assert_eq!(
            engine.gateway().get("streak-alice").as_deref(),
            Some("4294967295")
        );
        assert_eq!(engine.streak().last_increment, Some(day(8)));
    }

    #[test]
    fn load_reads_persisted_state() {
        let store = MemoryStore::with_entries([
            ("streak-alice", "3"),
            ("streakDate-alice", "2024-12-07"),
            ("habits-alice-2024-12-08", r#"{"h1":true}"#),
        ]);
        let engine = HabitStreakEngine::load(store, "alice", day(8));
        assert_eq!(engine.streak().count, 3);
        assert_eq!(engine.streak().last_increment, Some(day(7)));
        assert!(engine.is_completed("h1"));
    }

    #[test]
    fn malformed_values_load_as_defaults() {
        let store = MemoryStore::with_entries([
            ("streak-alice", "lots"),
            ("streakDate-alice", "someday"),
            ("habits-alice-2024-12-08", "{not json"),
        ]);
        let engine = HabitStreakEngine::load(store, "alice", day(8));
        assert_eq!(engine.streak(), StreakState::default());
        assert!(!engine.completion().any_completed());
    }

    #[test]
    fn first_completion_of_the_day_increments_once() {
        let mut engine = fresh(day(8));
        assert!(engine.mark_habit("a", true).unwrap().streak_incremented);
        assert!(!engine.mark_habit("b", true).unwrap().streak_incremented);
        engine.mark_habit("a", false).unwrap();
        engine.mark_habit("b", false).unwrap();
        let again = engine.mark_habit("a", true).unwrap();
        assert!(!again.streak_incremented);
        assert_eq!(again.streak, 1);
    }

    #[test]
    fn unmarking_never_decrements() {
        let mut engine = fresh(day(8));
        engine.mark_habit("a", true).unwrap();
        let outcome = engine.mark_habit("a", false).unwrap();
        assert_eq!(outcome.streak, 1);
        assert_eq!(engine.gateway().get("streak-alice").as_deref(), Some("1"));
    }

    #[test]
    fn repeated_identical_marks_are_idempotent() {
        let mut engine = fresh(day(8));
        for _ in 0..3 {
            engine.mark_habit("a", true).unwrap();
        }
        assert_eq!(engine.streak().count, 1);
        assert_eq!(engine.completion().completed_count(), 1);
    }

    #[test]
    fn unchecking_without_prior_check_does_not_increment() {
        let mut engine = fresh(day(8));
        let outcome = engine.mark_habit("a", false).unwrap();
        assert!(!outcome.streak_incremented);
        assert_eq!(outcome.streak, 0);
        assert!(engine.gateway().get("streakDate-alice").is_none());
    }

    #[test]
    fn writes_through_after_every_mark() {
        let mut engine = fresh(day(8));
        engine.mark_habit("a", true).unwrap();
        let store = engine.gateway();
        assert_eq!(
            store.get("habits-alice-2024-12-08").as_deref(),
            Some(r#"{"a":true}"#)
        );
        assert_eq!(store.get("streak-alice").as_deref(), Some("1"));
        assert_eq!(store.get("streakDate-alice").as_deref(), Some("2024-12-08"));
    }

    #[test]
    fn carries_yesterdays_streak_forward() {
        let store = MemoryStore::with_entries([
            ("streak-alice", "3"),
            ("streakDate-alice", "2024-12-07"),
        ]);
        let mut engine = HabitStreakEngine::load(store, "alice", day(8));
        assert_eq!(engine.streak().count, 3);
        engine.mark_habit("h1", true).unwrap();
        assert_eq!(engine.streak().count, 4);
        assert_eq!(
            engine.gateway().get("streakDate-alice").as_deref(),
            Some("2024-12-08")
        );
    }

    #[test]
    fn reload_same_day_does_not_increment_again() {
        let mut engine = fresh(day(8));
        engine.mark_habit("a", true).unwrap();
        engine.mark_habit("a", false).unwrap();
        let store = engine.into_gateway();

        let mut engine = HabitStreakEngine::load(store, "alice", day(8));
        assert!(!engine.mark_habit("a", true).unwrap().streak_incremented);
        assert_eq!(engine.streak().count, 1);
    }

    #[test]
    fn roll_over_starts_an_empty_checklist() {
        let mut engine = fresh(day(8));
        engine.mark_habit("a", true).unwrap();

        assert!(!engine.roll_over(day(8)));
        assert!(engine.roll_over(day(9)));
        assert!(!engine.is_completed("a"));
        assert!(engine.completion_for(day(8)).is_none());
        assert!(engine.completion_for(day(9)).is_some());

        assert!(engine.mark_habit("a", true).unwrap().streak_incremented);
        assert_eq!(engine.streak().count, 2);
        // yesterday's checklist is still on disk under its own key
        assert_eq!(
            engine.gateway().get("habits-alice-2024-12-08").as_deref(),
            Some(r#"{"a":true}"#)
        );
    }

    #[test]
    fn switch_user_discards_previous_state() {
        let mut engine = fresh(day(8));
        engine.mark_habit("a", true).unwrap();
        engine.switch_user("bob", day(8));

        assert_eq!(engine.user(), "bob");
        assert_eq!(engine.streak().count, 0);
        assert!(!engine.is_completed("a"));
        assert_eq!(engine.gateway().get("streak-alice").as_deref(), Some("1"));
    }
}
