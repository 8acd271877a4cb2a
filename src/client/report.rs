// src/client/report.rs
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::errors::CodebookError;
use crate::models::{RunResult, RunStatus};

pub const TIME_LIMIT_HINT: &str = "💡 Hint: Your program may be waiting for input. Provide it through stdin or enable interactive mode and run again.";

pub const EMPTY_SOURCE_MESSAGE: &str = "❌ Error: Please write some code first!";

static TIME_LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)time limit").unwrap());

/// Human-readable rendering of a finished execution.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub status: Option<RunStatus>,
    /// Set when the status looks like a time-limit kill, which usually means
    /// the program blocked on stdin.
    pub waiting_for_input: bool,
    pub text: String,
}

impl RunReport {
    pub fn from_result(result: &RunResult) -> Self {
        let status_text = result
            .status
            .as_ref()
            .map(|s| s.description.as_str())
            .unwrap_or("");

        let mut parts = Vec::new();
        if !status_text.is_empty() {
            parts.push(format!("📌 Status: {}", status_text));
        }
        if let Some(stdout) = non_empty(&result.stdout) {
            parts.push(format!("✅ Output:\n{}", stdout));
        }
        if let Some(stderr) = non_empty(&result.stderr) {
            parts.push(format!("⚠️ Error (stderr):\n{}", stderr));
        }
        if let Some(compile) = non_empty(&result.compile_output) {
            parts.push(format!("🛠️ Compile error:\n{}", compile));
        }
        parts.push(format!(
            "\n⏱ time={}s • 🧠 mem={} KB",
            result.time.as_deref().unwrap_or("?"),
            or_unknown(result.memory)
        ));

        let waiting_for_input = TIME_LIMIT.is_match(status_text);
        if waiting_for_input {
            parts.push(format!("\n{}", TIME_LIMIT_HINT));
        }

        RunReport {
            status: result.status.clone(),
            waiting_for_input,
            text: parts.join("\n\n"),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Text shown when a run could not be completed. Non-2xx answers show the
/// body verbatim, or the bare status when the body is empty.
pub fn failure_message(err: &CodebookError) -> String {
    let detail = match err {
        CodebookError::ApiError { status, body } if body.is_empty() => format!("HTTP {}", status),
        CodebookError::ApiError { body, .. } => body.clone(),
        other => other.to_string(),
    };
    format!("❌ Request failed:\n{}", detail)
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn or_unknown(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
