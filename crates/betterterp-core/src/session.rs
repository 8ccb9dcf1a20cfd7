//! The home view for one signed-in user.
//!
//! [`HomeSession`] wires the day provider, affirmation rotator, streak engine
//! and habit repository together. Fetch results carry the user they were
//! issued for and are dropped if a different user is current when they
//! arrive.

use serde::Serialize;
use tracing::{debug, warn};

use crate::affirmation::AffirmationRotator;
use crate::api::ApiClient;
use crate::day::{Clock, DateKey, DateKeyProvider, SystemClock};
use crate::error::{Result, ValidationError};
use crate::habit::{Habit, HabitFetch, HabitRepository, HabitStreakEngine, MarkOutcome};
use crate::storage::PersistenceGateway;

/// One habit row as the home view shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitRow {
    #[serde(flatten)]
    pub habit: Habit,
    pub completed: bool,
}

/// Everything the home view renders, at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub username: String,
    pub today: DateKey,
    pub affirmation: String,
    pub streak: u32,
    pub last_streak_date: Option<DateKey>,
    pub habits: Vec<HabitRow>,
}

pub struct HomeSession<G, C = SystemClock> {
    days: DateKeyProvider<C>,
    rotator: AffirmationRotator,
    engine: HabitStreakEngine<G>,
    repository: HabitRepository,
}

impl<G: PersistenceGateway, C: Clock> HomeSession<G, C> {
    /// Load the user's stored streak and today's checklist. Habits and
    /// affirmations start empty until [`HomeSession::refresh`].
    pub fn open(gateway: G, days: DateKeyProvider<C>, client: ApiClient, user: &str) -> Self {
        let engine = HabitStreakEngine::load(gateway, user, days.today());
        Self {
            days,
            rotator: AffirmationRotator::default(),
            engine,
            repository: HabitRepository::new(client),
        }
    }

    pub fn user(&self) -> &str {
        self.engine.user()
    }

    /// Fetch habits and affirmations concurrently and apply what arrives.
    pub async fn refresh(&mut self) {
        let user = self.engine.user().to_string();
        let client = self.repository.client().clone();
        let (fetch, affirmations) = tokio::join!(
            self.repository.list(&user),
            client.fetch_affirmations()
        );
        self.apply_habits(fetch);
        match affirmations {
            Ok(list) => self.rotator.set_affirmations(list),
            Err(e) => warn!(error = %e, "failed to load affirmations"),
        }
    }

    /// Install a habit listing. Returns false and leaves the cache alone if
    /// the listing was for someone other than the current user.
    pub fn apply_habits(&mut self, fetch: HabitFetch) -> bool {
        if fetch.user != self.engine.user() {
            debug!(stale = %fetch.user, current = %self.engine.user(), "discarding stale habit listing");
            return false;
        }
        self.repository.replace(fetch.habits);
        true
    }

    pub fn apply_affirmations(&mut self, affirmations: Vec<String>) {
        self.rotator.set_affirmations(affirmations);
    }

    /// Sign a different user in. The habit cache is cleared until the next
    /// refresh.
    pub fn switch_user(&mut self, user: &str) {
        self.engine.switch_user(user, self.days.today());
        self.repository.replace(Vec::new());
    }

    /// Pick up a local-midnight crossing since the last call.
    fn sync_day(&mut self) {
        self.engine.roll_over(self.days.today());
    }

    pub fn affirmation(&self) -> &str {
        self.rotator.message_for_today(&self.days)
    }

    pub fn habits(&self) -> &[Habit] {
        self.repository.habits()
    }

    /// Check or uncheck one of the listed habits for today.
    pub fn mark_habit(&mut self, id: &str, value: bool) -> Result<MarkOutcome> {
        if self.repository.find(id).is_none() {
            return Err(ValidationError::UnknownHabit(id.to_string()).into());
        }
        self.sync_day();
        Ok(self.engine.mark_habit(id, value)?)
    }

    pub async fn add_habit(&mut self, title: &str, description: &str) -> Result<Habit> {
        let user = self.engine.user().to_string();
        self.repository.create(&user, title, description).await
    }

    pub fn view(&mut self) -> HomeView {
        self.sync_day();
        let streak = self.engine.streak();
        HomeView {
            username: self.engine.user().to_string(),
            today: self.engine.today(),
            affirmation: self.affirmation().to_string(),
            streak: streak.count,
            last_streak_date: streak.last_increment,
            habits: self
                .repository
                .habits()
                .iter()
                .map(|h| HabitRow {
                    completed: self.engine.is_completed(&h.id),
                    habit: h.clone(),
                })
                .collect(),
        }
    }

    pub fn engine(&self) -> &HabitStreakEngine<G> {
        &self.engine
    }

    pub fn days_mut(&mut self) -> &mut DateKeyProvider<C> {
        &mut self.days
    }
}
