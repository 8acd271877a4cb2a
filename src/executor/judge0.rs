// src/executor/judge0.rs

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

use crate::config::Judge0Config;
use crate::errors::{CodebookError, Result};
use crate::executor::{ExecutionService, Submission};
use crate::models::RunResult;

/// Talks to a Judge0 CE instance using synchronous (`wait=true`) submissions.
pub struct Judge0Client {
    client: Client,
    config: Judge0Config,
}

impl Judge0Client {
    /// Creates a new `Judge0Client`.
    pub fn new(client: Client, config: Judge0Config) -> Self {
        Self { client, config }
    }

    fn submissions_url(&self) -> String {
        format!(
            "{}/submissions?base64_encoded=false&wait=true",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ExecutionService for Judge0Client {
    async fn execute(&self, submission: &Submission) -> Result<RunResult> {
        let url = self.submissions_url();

        log::info!("📡 Calling Judge0: {} with language_id: {}", url, submission.language_id);

        let mut request = self.client.post(&url).json(submission);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-Auth-Token", key);
        }

        let start = Instant::now();
        let resp = request.send().await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        log::info!("📥 Judge0 response status: {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            log::error!("Judge0 error: {} {}", status, error_body);
            return Err(CodebookError::ApiError {
                status: status.as_u16(),
                body: error_body,
            });
        }

        Ok(resp.json().await?)
    }
}
