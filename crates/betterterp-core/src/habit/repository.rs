use tracing::warn;

use super::Habit;
use crate::api::{ApiClient, NewHabit};
use crate::error::{Result, ValidationError};

/// Result of a habit listing, tagged with the user it was issued for so a
/// late response can be matched against whoever is signed in by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitFetch {
    pub user: String,
    pub habits: Vec<Habit>,
}

/// Local cache of the service's habits for the signed-in user.
///
/// The cache is replaced wholesale on refresh and appended to on create.
pub struct HabitRepository {
    client: ApiClient,
    habits: Vec<Habit>,
}

impl HabitRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            habits: Vec::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// List the user's habits. A failed request is logged and reads as "no
    /// habits yet".
    pub async fn list(&self, user: &str) -> HabitFetch {
        let habits = match self.client.fetch_habits(user).await {
            Ok(habits) => habits,
            Err(e) => {
                warn!(user, error = %e, "failed to fetch habits");
                Vec::new()
            }
        };
        HabitFetch {
            user: user.to_string(),
            habits,
        }
    }

    pub fn replace(&mut self, habits: Vec<Habit>) {
        self.habits = habits;
    }

    /// Create a habit on the service and append it to the cache.
    ///
    /// # Errors
    /// Returns the validation or API error; the cache is left as it was.
    pub async fn create(&mut self, user: &str, title: &str, description: &str) -> Result<Habit> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title").into());
        }
        let habit = self
            .client
            .create_habit(&NewHabit {
                username: user,
                title,
                description: description.trim(),
            })
            .await?;
        self.habits.push(habit.clone());
        Ok(habit)
    }
}
