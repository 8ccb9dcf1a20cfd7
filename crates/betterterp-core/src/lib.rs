//! # BetterTerp Core Library
//!
//! Business logic for the BetterTerp student companion: a daily habit
//! checklist with a streak counter, and an affirmation that changes once per
//! local day. The `betterterp` CLI is a thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Days**: local calendar keys and day indices from an injectable clock
//! - **Affirmations**: deterministic one-per-day rotation with a fallback
//! - **Storage**: a string key-value gateway (SQLite or in-memory) and
//!   TOML-based configuration
//! - **Habits**: the streak engine and the repository backed by the REST
//!   service
//! - **Session**: the home view tying the pieces together for one user
//!
//! ## Key Components
//!
//! - [`HabitStreakEngine`]: per-user checklist and streak state machine
//! - [`AffirmationRotator`]: picks today's message
//! - [`PersistenceGateway`]: narrow store interface ([`KvStore`], [`MemoryStore`])
//! - [`HabitRepository`]: habit list/create against the service
//! - [`HomeSession`]: the assembled home view

pub mod affirmation;
pub mod api;
pub mod auth;
pub mod day;
pub mod error;
pub mod habit;
pub mod session;
pub mod storage;

pub use affirmation::{AffirmationRotator, FALLBACK_AFFIRMATION};
pub use api::ApiClient;
pub use auth::Identity;
pub use day::{Clock, DateKey, DateKeyProvider, FixedClock, SystemClock};
pub use error::{ApiError, ConfigError, CoreError, StorageError, ValidationError};
pub use habit::{
    CompletionSet, Habit, HabitFetch, HabitRepository, HabitStreakEngine, MarkOutcome,
    StreakState,
};
pub use session::{HabitRow, HomeSession, HomeView};
pub use storage::{Config, KvStore, MemoryStore, PersistenceGateway};
