//! Artifact Module
//!
//! Artifact books, reward versions, and the read-only lookups quests use.

pub mod book;
pub mod catalog;
pub mod definition;
pub mod lookup;

pub use book::PageMask;
pub use catalog::ArtifactCatalog;
pub use definition::{ArtifactDefinition, ArtifactVersion, BookTemplate};
pub use lookup::{ArtifactLookup, PageAggregation, RewardKey, RewardVersions};
