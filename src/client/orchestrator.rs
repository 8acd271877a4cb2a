// src/client/orchestrator.rs
use std::sync::Arc;

use crate::client::collector::{collect_lines, Prompter, DEFAULT_PROMPT};
use crate::client::report::{failure_message, RunReport, EMPTY_SOURCE_MESSAGE};
use crate::client::session::{RunPhase, Session};
use crate::client::transport::RunTransport;
use crate::languages::LanguageTable;
use crate::models::RunRequest;

/// What the user asked to run.
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    pub language: String,
    pub code: String,
    /// Contents of the static stdin box.
    pub stdin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Another run held the session; nothing happened.
    Ignored,
    /// Refused locally, the network was not contacted.
    Rejected(String),
    Completed(RunReport),
    Failed(String),
}

impl RunOutcome {
    /// Text to show the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            RunOutcome::Ignored => None,
            RunOutcome::Rejected(msg) | RunOutcome::Failed(msg) => Some(msg),
            RunOutcome::Completed(report) => Some(&report.text),
        }
    }
}

/// Drives one run end to end: optional interactive collection, source shim,
/// a single submission and classification of the answer.
pub struct Orchestrator<T, P> {
    transport: T,
    prompter: P,
    languages: Arc<LanguageTable>,
    prompt_text: String,
}

impl<T, P> Orchestrator<T, P>
where
    T: RunTransport,
    P: Prompter,
{
    pub fn new(transport: T, prompter: P, languages: Arc<LanguageTable>) -> Self {
        Self {
            transport,
            prompter,
            languages,
            prompt_text: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt_text(mut self, prompt_text: impl Into<String>) -> Self {
        self.prompt_text = prompt_text.into();
        self
    }

    pub async fn run(&self, session: &Session, input: RunInput) -> RunOutcome {
        let code = input.code.trim();
        if code.is_empty() {
            log::warn!("Refusing to run empty source");
            return RunOutcome::Rejected(EMPTY_SOURCE_MESSAGE.to_string());
        }

        let interactive = session.interactive_enabled();
        let first_phase = if interactive {
            RunPhase::Collecting
        } else {
            RunPhase::Submitting
        };
        let Some(guard) = session.try_begin(first_phase) else {
            log::debug!("Run already in progress, ignoring request");
            return RunOutcome::Ignored;
        };

        let mut stdin = input.stdin;
        if interactive {
            let lines = collect_lines(&self.prompter, &self.prompt_text).await;
            log::info!("⌨️  Collected {} interactive line(s)", lines.len());
            let extra = lines.join("\n");
            guard.record_lines(lines);
            stdin = combine_stdin(stdin, &extra);
            guard.advance(RunPhase::Submitting);
        }

        let request = RunRequest {
            source: self.languages.prepare_source(&input.language, code),
            language: input.language,
            stdin,
        };

        log::info!("🚀 Submitting {} run", request.language);
        match self.transport.submit(&request).await {
            Ok(result) => {
                guard.advance(RunPhase::Completed);
                RunOutcome::Completed(RunReport::from_result(&result))
            }
            Err(e) => {
                log::error!("Run failed: {}", e);
                guard.advance(RunPhase::Failed);
                RunOutcome::Failed(failure_message(&e))
            }
        }
    }
}

/// Appends collected interactive input to the static stdin with a single
/// newline between them.
pub fn combine_stdin(static_stdin: String, collected: &str) -> String {
    if collected.is_empty() {
        return static_stdin;
    }
    if static_stdin.is_empty() {
        return collected.to_string();
    }
    let mut stdin = static_stdin;
    if !stdin.ends_with('\n') {
        stdin.push('\n');
    }
    stdin.push_str(collected);
    stdin
}
