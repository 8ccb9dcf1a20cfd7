mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{LoginResponse, NewHabit, RegisterResponse};
