// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodebookError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Please write some code first!")]
    EmptySource,

    #[error("Invalid share link: {0}")]
    InvalidShareLink(String),

    #[error("Invalid share payload: {0}")]
    ShareDecode(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CodebookError>;
