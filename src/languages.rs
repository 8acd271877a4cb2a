// src/languages.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{CodebookError, Result};

const BUILTIN_LANGUAGES: &str = include_str!("../languages.toml");

/// One selectable language: its Judge0 id, file extension, optional input
/// shim and starter source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSpec {
    pub name: String,
    pub id: u32,
    #[serde(default)]
    pub extension: String,
    /// Source prepended to submissions so `prompt()`-style reads consume stdin lines.
    #[serde(default)]
    pub shim: Option<String>,
    #[serde(default)]
    pub boilerplate: String,
}

/// The language configuration table. Names are matched exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageTable {
    #[serde(rename = "language", default)]
    languages: Vec<LanguageSpec>,
}

impl LanguageTable {
    /// The table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_LANGUAGES)
    }

    /// Loads `path` when given, otherwise the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("📚 Loading language table from {}", path.display());
                Self::from_toml(&std::fs::read_to_string(path)?)
            }
            None => Self::builtin(),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let table: LanguageTable = toml::from_str(raw)?;

        if table.languages.is_empty() {
            return Err(CodebookError::Config("language table is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for lang in &table.languages {
            if !seen.insert(lang.name.as_str()) {
                return Err(CodebookError::Config(format!(
                    "language '{}' is defined more than once",
                    lang.name
                )));
            }
        }

        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&LanguageSpec> {
        self.languages.iter().find(|l| l.name == name)
    }

    pub fn judge0_id(&self, name: &str) -> Option<u32> {
        self.get(name).map(|l| l.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageSpec> {
        self.languages.iter()
    }

    /// Returns the source to submit: the shim, one newline, then `code`
    /// when the language has a shim; `code` unchanged otherwise.
    pub fn prepare_source(&self, language: &str, code: &str) -> String {
        match self.get(language).and_then(|l| l.shim.as_deref()) {
            Some(shim) => format!("{}\n{}", shim, code),
            None => code.to_string(),
        }
    }

    /// Decides what the editor buffer should become when `language` is
    /// selected. An empty buffer, or one holding an untouched boilerplate of
    /// any language, is replaced by the new language's boilerplate. Anything
    /// the user wrote is left alone (`None`).
    pub fn switch_buffer(&self, current: &str, language: &str) -> Option<String> {
        let current = current.trim();
        let untouched = current.is_empty()
            || self
                .languages
                .iter()
                .any(|l| !l.boilerplate.is_empty() && l.boilerplate.trim() == current);

        if !untouched {
            return None;
        }
        Some(self.get(language).map(|l| l.boilerplate.clone()).unwrap_or_default())
    }

    /// Download name used when saving code, e.g. `codebook-python.py`.
    pub fn save_file_name(&self, language: &str) -> String {
        let ext = self
            .get(language)
            .map(|l| l.extension.as_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(".txt");
        format!("codebook-{}{}", language.to_lowercase(), ext)
    }
}
