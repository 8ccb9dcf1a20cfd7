//! Daily affirmation rotation.
//!
//! One message per local day, picked deterministically from whatever list
//! the service returned. If the list arrives after the first render, the
//! next call may pick a different message; there is no memo.

use crate::day::{Clock, DateKeyProvider};

/// Shown while the list is empty (not fetched yet, or the fetch failed).
pub const FALLBACK_AFFIRMATION: &str = "Today is a great day to learn and build something new.";

#[derive(Debug, Clone, Default)]
pub struct AffirmationRotator {
    affirmations: Vec<String>,
}

impl AffirmationRotator {
    pub fn new(affirmations: Vec<String>) -> Self {
        Self { affirmations }
    }

    /// Replace the rotation set, e.g. once a fetch resolves.
    pub fn set_affirmations(&mut self, affirmations: Vec<String>) {
        self.affirmations = affirmations;
    }

    pub fn affirmations(&self) -> &[String] {
        &self.affirmations
    }

    pub fn is_empty(&self) -> bool {
        self.affirmations.is_empty()
    }

    /// Message for a given day index.
    pub fn message_for(&self, day_index: i64) -> &str {
        if self.affirmations.is_empty() {
            return FALLBACK_AFFIRMATION;
        }
        let len = self.affirmations.len() as i64;
        // rem_euclid keeps pre-1970 indices in range
        let slot = day_index.rem_euclid(len) as usize;
        &self.affirmations[slot]
    }

    pub fn message_for_today<C: Clock>(&self, days: &DateKeyProvider<C>) -> &str {
        self.message_for(days.day_index())
    }
}
