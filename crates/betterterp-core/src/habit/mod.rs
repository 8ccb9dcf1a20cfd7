mod engine;
mod model;
mod repository;

pub use engine::{HabitStreakEngine, MarkOutcome};
pub use model::{CompletionSet, Habit, StreakState};
pub use repository::{HabitFetch, HabitRepository};
