// src/models.rs
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /run`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub stdin: String,
}

/// Execution status as reported by Judge0, e.g. `{3, "Accepted"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunStatus {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// Outcome of one execution. Judge0 may leave any field out or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    /// Seconds of CPU time, kept as Judge0 wrote it (`"0.010"`).
    #[serde(default, deserialize_with = "decimal_text")]
    pub time: Option<String>,
    /// Kilobytes.
    #[serde(default, deserialize_with = "number_or_string")]
    pub memory: Option<f64>,
    #[serde(default)]
    pub status: Option<RunStatus>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ApiError {
    pub error: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Judge0 encodes `time` as a decimal string and `memory` as a number.
/// Anything that is not a readable number decodes as absent.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Like `number_or_string`, but keeps the decimal text untouched.
fn decimal_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n.to_string()),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            s.parse::<f64>().ok().map(|_| s.to_string())
        }
        Some(Raw::Other(_)) | None => None,
    })
}
