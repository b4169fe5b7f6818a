//! Quest System Module
//!
//! Data-driven turn-in quests: a pure state machine decides, the lifecycle
//! adapter acts, and per-player journals route interactions to them.

pub mod api;
pub mod definition;
pub mod dispatcher;
pub mod events;
pub mod journal;
pub mod machine;
pub mod registry;
pub mod state;
pub mod turn_in;

#[cfg(test)]
pub(crate) mod fixtures;

pub use api::{ChatChannel, EligibilityRules, InventoryOps, NpcActions, Quest, QuestServices};
pub use definition::{QuestDialogue, TurnInQuestDefinition};
pub use dispatcher::QuestDispatcher;
pub use events::{InteractionEvent, Rejection};
pub use journal::{ActiveQuest, QuestJournal};
pub use machine::{TurnInDecision, TurnInMachine, TurnInPlan, WhisperDecision};
pub use registry::{QuestFactory, QuestTypeRegistry};
pub use state::{QuestInstance, QuestStep};
pub use turn_in::TurnInQuest;
