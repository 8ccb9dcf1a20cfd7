use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::DateKey;

/// A habit as owned by the habits service. Never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Which habits are checked off for one user on one day.
///
/// Persisted as a JSON object of `id -> bool`. Unchecking keeps the entry
/// with `false` rather than removing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeMap<String, bool>);

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: &str, value: bool) {
        self.0.insert(id.to_string(), value);
    }

    pub fn any_completed(&self) -> bool {
        self.0.values().any(|done| *done)
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, done)| (id.as_str(), *done))
    }
}

/// Consecutive-day streak for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub count: u32,
    /// Day of the last increment; `None` until the first one.
    pub last_increment: Option<DateKey>,
}

impl StreakState {
    pub fn incremented_on(&self, day: DateKey) -> bool {
        self.last_increment == Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_set_serializes_as_plain_map() {
        let mut set = CompletionSet::new();
        set.set("h1", true);
        set.set("h2", false);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"h1":true,"h2":false}"#
        );
        let parsed: CompletionSet = serde_json::from_str(r#"{"h2":false,"h1":true}"#).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn unchecked_entries_do_not_count() {
        let mut set = CompletionSet::new();
        set.set("h1", false);
        assert!(!set.any_completed());
        set.set("h2", true);
        assert!(set.any_completed());
        assert_eq!(set.completed_count(), 1);
        assert!(!set.is_completed("missing"));
    }

    #[test]
    fn habit_tolerates_extra_and_missing_fields() {
        let habit: Habit = serde_json::from_str(
            r#"{"username":"alice","id":"42","title":"Read"}"#,
        )
        .unwrap();
        assert_eq!(habit.id, "42");
        assert_eq!(habit.description, "");
    }
}
