use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::QuestError;

pub const DEFAULT_LOG_FILTER: &str = "artifact_quests=info";

/// Runtime configuration, read from a TOML file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `artifacts/` and `quests/`
    pub data_dir: PathBuf,
    /// Default tracing directive, added on top of RUST_LOG
    pub log_filter: String,
    /// Scenario to run after loading
    pub scenario: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            scenario: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, QuestError> {
        let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
        toml::from_str(&content).map_err(|e| QuestError::toml(path, e))
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, QuestError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
