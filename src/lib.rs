//! Artifact quests
//!
//! Turn-in quests that grant artifacts: a player whispers the artifact's
//! name to a scholar, then hands over the completed artifact book and
//! receives the reward.

pub mod actor;
pub mod artifact;
pub mod config;
pub mod error;
pub mod item;
pub mod quest;
pub mod scenario;
pub mod world;

pub use actor::{Actor, ClassId, Npc, NpcRole, Player, Realm};
pub use artifact::{ArtifactCatalog, ArtifactLookup};
pub use config::Config;
pub use error::QuestError;
pub use quest::{QuestDispatcher, QuestStep, QuestTypeRegistry};
