// src/client/transport.rs

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::{CodebookError, Result};
use crate::models::{RunRequest, RunResult};

/// Delivers a run request to the backend and returns its decoded answer.
#[async_trait]
pub trait RunTransport: Send + Sync {
    async fn submit(&self, request: &RunRequest) -> Result<RunResult>;
}

/// Posts to `<server>/run`. No client-side timeout; the server enforces one.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(client: Client, server: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/run", server.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RunTransport for HttpTransport {
    async fn submit(&self, request: &RunRequest) -> Result<RunResult> {
        log::debug!("POST {} ({})", self.endpoint, request.language);

        let resp = self.client.post(&self.endpoint).json(request).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CodebookError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }
}
