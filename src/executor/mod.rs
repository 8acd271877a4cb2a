// src/executor/mod.rs

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::Result;
use crate::models::RunResult;

pub mod judge0;

/// One submission as the execution service understands it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Submission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

/// A remote compiler/runner that executes source against stdin and waits
/// for the outcome.
///
/// Object-safe so the server state can hold any implementation behind an `Arc`.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Runs `submission` to completion.
    ///
    /// # Returns
    /// The service's outcome, or `CodebookError::ApiError` when it answers
    /// with a non-success HTTP status.
    async fn execute(&self, submission: &Submission) -> Result<RunResult>;
}
