// src/lib.rs
pub mod api;
pub mod banner;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod executor;
pub mod languages;
pub mod models;
