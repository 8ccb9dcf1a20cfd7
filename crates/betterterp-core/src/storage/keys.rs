//! Persisted key layout: `{kind}-{user}[-{dateKey}]`.

use crate::day::DateKey;

/// Signed-in user's handle.
pub const USERNAME: &str = "username";
/// Email given at login, if any.
pub const EMAIL: &str = "email";

pub fn streak(user: &str) -> String {
    format!("streak-{user}")
}

pub fn streak_date(user: &str) -> String {
    format!("streakDate-{user}")
}

/// Completion map for one user on one day.
pub fn completion(user: &str, day: DateKey) -> String {
    format!("habits-{user}-{day}")
}
