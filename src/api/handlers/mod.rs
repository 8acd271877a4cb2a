// src/api/handlers/mod.rs
mod health;
mod languages;
mod run;

pub use health::health_check;
pub use languages::list_languages;
pub use run::{limit_runs, run_code, RATE_LIMITED_MESSAGE};
