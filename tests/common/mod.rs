// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use codebook::client::{PromptOutcome, Prompter, RunTransport, Session};
use codebook::errors::{CodebookError, Result};
use codebook::models::{RunRequest, RunResult, RunStatus};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers prompts from a fixed script, cancelling once it runs out.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<PromptOutcome>>,
    pub asked: Arc<Mutex<usize>>,
    /// When set, records the session phase seen while each prompt is open.
    pub observe: Option<(Arc<Session>, Arc<Mutex<Vec<codebook::client::RunPhase>>>)>,
    /// Hands control back to the executor before every answer.
    yielding: bool,
}

impl ScriptedPrompter {
    pub fn lines(lines: &[&str]) -> Self {
        let mut answers: VecDeque<PromptOutcome> = lines
            .iter()
            .map(|l| PromptOutcome::Accepted(l.to_string()))
            .collect();
        answers.push_back(PromptOutcome::Cancelled);
        Self {
            answers: Mutex::new(answers),
            asked: Arc::new(Mutex::new(0)),
            observe: None,
            yielding: false,
        }
    }

    pub fn yielding(mut self) -> Self {
        self.yielding = true;
        self
    }

    pub fn cancel_immediately() -> Self {
        Self::lines(&[])
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask_once(&self, _message: &str) -> PromptOutcome {
        *self.asked.lock().unwrap() += 1;
        if let Some((session, phases)) = &self.observe {
            phases.lock().unwrap().push(session.phase());
        }
        if self.yielding {
            tokio::task::yield_now().await;
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled)
    }
}

#[derive(Clone)]
pub enum Reply {
    Result(RunResult),
    Status(u16, String),
    ConnectionRefused,
}

/// Records every submitted request and answers after a short delay so
/// overlapping runs can be observed.
pub struct RecordingTransport {
    reply: Reply,
    pub requests: Arc<Mutex<Vec<RunRequest>>>,
}

impl RecordingTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl RunTransport for RecordingTransport {
    async fn submit(&self, request: &RunRequest) -> Result<RunResult> {
        self.requests.lock().unwrap().push(request.clone());
        tokio::time::sleep(Duration::from_millis(20)).await;
        match &self.reply {
            Reply::Result(result) => Ok(result.clone()),
            Reply::Status(status, body) => Err(CodebookError::ApiError {
                status: *status,
                body: body.clone(),
            }),
            Reply::ConnectionRefused => Err(CodebookError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

pub fn result_with_status(description: &str, stdout: &str) -> RunResult {
    RunResult {
        stdout: Some(stdout.to_string()),
        time: Some("0.01".into()),
        memory: Some(1024.0),
        status: Some(RunStatus {
            id: 3,
            description: description.to_string(),
        }),
        ..RunResult::default()
    }
}
