//! Quest Event Types
//!
//! Interactions that can advance a quest, and the outcome of handling them.

use std::fmt;

use crate::artifact::PageMask;
use crate::actor::Actor;
use crate::item::InventoryItem;

use super::state::QuestStep;

/// An interaction between two actors. Not persisted.
#[derive(Debug, Clone, Copy)]
pub enum InteractionEvent<'a> {
    /// `from` handed `item` to `to`
    ItemOffered {
        from: &'a Actor,
        to: &'a Actor,
        item: &'a InventoryItem,
    },

    /// `from` whispered `text` to `to`
    Whisper {
        from: &'a Actor,
        to: &'a Actor,
        text: &'a str,
    },
}

impl<'a> InteractionEvent<'a> {
    pub fn source(&self) -> &'a Actor {
        match self {
            InteractionEvent::ItemOffered { from, .. } => from,
            InteractionEvent::Whisper { from, .. } => from,
        }
    }

    pub fn target(&self) -> &'a Actor {
        match self {
            InteractionEvent::ItemOffered { to, .. } => to,
            InteractionEvent::Whisper { to, .. } => to,
        }
    }

    /// Get event type as string (for logging/debugging)
    pub fn event_type(&self) -> &'static str {
        match self {
            InteractionEvent::ItemOffered { .. } => "item_offered",
            InteractionEvent::Whisper { .. } => "whisper",
        }
    }
}

/// Why an interaction was not handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Giver is not a player or the target is not a scholar
    UnqualifiedActors,
    WrongStep(QuestStep),
    KeywordMismatch,
    IncompleteBook(PageMask),
    WrongArtifact(Option<String>),
    /// No reward version matched the giver's class and realm
    NoRewardVersions,
    /// Versions matched but none is the wildcard entry that gets granted
    MissingWildcardVersion,
    RemovalFailed,
}

impl Rejection {
    /// Guard failures are routine; anomalies deserve a warning
    pub fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Rejection::NoRewardVersions
                | Rejection::MissingWildcardVersion
                | Rejection::RemovalFailed
        )
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnqualifiedActors => write!(f, "unqualified actors"),
            Rejection::WrongStep(step) => write!(f, "wrong step ({})", step.as_str()),
            Rejection::KeywordMismatch => write!(f, "keyword mismatch"),
            Rejection::IncompleteBook(pages) => {
                write!(f, "incomplete book ({} pages)", pages.page_count())
            }
            Rejection::WrongArtifact(found) => {
                write!(f, "book belongs to {:?}", found.as_deref().unwrap_or("nothing"))
            }
            Rejection::NoRewardVersions => write!(f, "no reward versions"),
            Rejection::MissingWildcardVersion => write!(f, "no wildcard reward version"),
            Rejection::RemovalFailed => write!(f, "item removal failed"),
        }
    }
}
