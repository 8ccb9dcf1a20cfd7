use chrono::{Local, NaiveDate};

use super::DateKey;

/// Source of the viewer's local calendar date.
pub trait Clock {
    fn local_date(&self) -> NaiveDate;
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date; advance it by hand in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn at(key: DateKey) -> Self {
        Self(key.date())
    }

    pub fn advance_day(&mut self) {
        self.0 = DateKey::new(self.0).succ().date();
    }
}

impl Clock for FixedClock {
    fn local_date(&self) -> NaiveDate {
        self.0
    }
}

/// Turns the clock into storage keys and rotation indices.
///
/// Both values come from the same local calendar date, so the affirmation
/// and the habit checklist roll over together at local midnight. Nothing is
/// cached: every call reads the clock again.
#[derive(Debug, Clone, Default)]
pub struct DateKeyProvider<C = SystemClock> {
    clock: C,
}

impl DateKeyProvider<SystemClock> {
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> DateKeyProvider<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> DateKey {
        DateKey::new(self.clock.local_date())
    }

    /// Whole local days since 1970-01-01.
    pub fn day_index(&self) -> i64 {
        self.today().days_since_epoch()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
