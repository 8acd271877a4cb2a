// src/api/mod.rs
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use routes::{configure_app, configure_routes, json_config};
pub use state::AppState;
