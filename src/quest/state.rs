//! Quest State Tracking
//!
//! Tracks the step of a player's quest instance and its persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuestError;

/// Progression step of a turn-in quest.
///
/// Steps are ordered; an instance only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStep {
    NotStarted,
    /// Accepted, waiting for the artifact's name to be whispered
    AwaitingKeyword,
    /// Keyword given, waiting for the complete book
    AwaitingBook,
    Finished,
}

impl QuestStep {
    /// Integer stored by the quest framework
    pub fn as_i32(&self) -> i32 {
        match self {
            QuestStep::NotStarted => 0,
            QuestStep::AwaitingKeyword => 1,
            QuestStep::AwaitingBook => 2,
            QuestStep::Finished => 3,
        }
    }

    pub fn from_i32(value: i32) -> Result<Self, QuestError> {
        match value {
            0 => Ok(QuestStep::NotStarted),
            1 => Ok(QuestStep::AwaitingKeyword),
            2 => Ok(QuestStep::AwaitingBook),
            3 => Ok(QuestStep::Finished),
            other => Err(QuestError::UnknownStep(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStep::NotStarted => "not_started",
            QuestStep::AwaitingKeyword => "awaiting_keyword",
            QuestStep::AwaitingBook => "awaiting_book",
            QuestStep::Finished => "finished",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == QuestStep::Finished
    }
}

/// One player's copy of one quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestInstance {
    pub id: Uuid,
    pub player_id: String,
    pub artifact_id: String,
    step: QuestStep,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl QuestInstance {
    /// A freshly accepted quest, waiting for the keyword
    pub fn new(player_id: &str, artifact_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            artifact_id: artifact_id.to_string(),
            step: QuestStep::AwaitingKeyword,
            started_at: Some(Utc::now()),
            finished_at: None,
        }
    }

    /// Rebuild an instance from the framework's stored step value
    pub fn restore(player_id: &str, artifact_id: &str, step: i32) -> Result<Self, QuestError> {
        let step = QuestStep::from_i32(step)?;
        Ok(Self {
            id: Uuid::new_v4(),
            player_id: player_id.to_string(),
            artifact_id: artifact_id.to_string(),
            step,
            started_at: None,
            finished_at: None,
        })
    }

    pub fn step(&self) -> QuestStep {
        self.step
    }

    /// Move to a later step. Going backwards, standing still, or leaving
    /// `Finished` is refused.
    pub fn advance(&mut self, next: QuestStep) -> Result<(), QuestError> {
        if self.step.is_terminal() || next <= self.step {
            return Err(QuestError::InvalidTransition {
                from: self.step,
                to: next,
            });
        }
        self.step = next;
        if next.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.step.is_terminal()
    }

    /// Get duration in seconds (if started)
    pub fn duration_secs(&self) -> Option<i64> {
        self.started_at.map(|start| {
            let end = self.finished_at.unwrap_or_else(Utc::now);
            (end - start).num_seconds()
        })
    }

    pub fn to_json(&self) -> Result<String, QuestError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, QuestError> {
        Ok(serde_json::from_str(json)?)
    }
}
