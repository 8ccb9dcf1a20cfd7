//! Local calendar days.
//!
//! Everything day-scoped in BetterTerp (the stored checklist, the streak
//! date, the affirmation of the day) is keyed by the viewer's local date,
//! never by UTC.

mod key;
mod provider;

pub use key::DateKey;
pub use provider::{Clock, DateKeyProvider, FixedClock, SystemClock};
