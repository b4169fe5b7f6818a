use std::path::PathBuf;

use thiserror::Error;

use crate::quest::QuestStep;

/// Errors raised while loading quest data or managing quest instances.
///
/// Interaction hooks never produce these; an interaction that does not
/// apply is reported as "not handled" instead.
#[derive(Debug, Error)]
pub enum QuestError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("quest snapshot error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },

    #[error("unknown quest step value {0}")]
    UnknownStep(i32),

    #[error("invalid step transition {from:?} -> {to:?}")]
    InvalidTransition { from: QuestStep, to: QuestStep },

    #[error("no quest registered for artifact '{0}'")]
    UnknownQuest(String),

    #[error("player '{player}' does not qualify for '{artifact}'")]
    NotQualified { player: String, artifact: String },

    #[error("quest instance of '{owner}' cannot be restored for '{player}'")]
    ForeignInstance { player: String, owner: String },
}

impl QuestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuestError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        QuestError::Toml {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(id: &str, reason: impl Into<String>) -> Self {
        QuestError::InvalidDefinition {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
