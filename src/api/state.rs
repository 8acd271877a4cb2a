// src/api/state.rs
use crate::api::rate_limit::RateLimiter;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::executor::{judge0::Judge0Client, ExecutionService};
use crate::languages::LanguageTable;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub languages: Arc<LanguageTable>,
    pub executor: Arc<dyn ExecutionService>,
    pub limiter: RateLimiter,
}

impl AppState {
    /// Builds the production state: Judge0 behind a client that gives up
    /// after the configured request timeout.
    pub fn new(config: AppConfig, languages: LanguageTable) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let executor = Arc::new(Judge0Client::new(client, config.judge0.clone()));
        Ok(Self::with_executor(config, languages, executor))
    }

    pub fn with_executor(
        config: AppConfig,
        languages: LanguageTable,
        executor: Arc<dyn ExecutionService>,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limit),
            config: Arc::new(config),
            languages: Arc::new(languages),
            executor,
        }
    }
}
