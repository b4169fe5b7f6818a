use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::actor::{ClassId, Realm};
use crate::error::QuestError;
use crate::item::InventoryItem;

use super::definition::{ArtifactDefinition, RawArtifactFile};
use super::lookup::{ArtifactLookup, PageAggregation, RewardVersions};

/// Registry for all artifact definitions
pub struct ArtifactCatalog {
    artifacts: HashMap<String, ArtifactDefinition>,
    /// Book template id -> owning artifact id
    book_index: HashMap<String, String>,
}

impl ArtifactCatalog {
    pub fn new() -> Self {
        Self {
            artifacts: HashMap::new(),
            book_index: HashMap::new(),
        }
    }

    /// Load all artifact definitions from `<data_dir>/artifacts`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), QuestError> {
        let artifacts_dir = data_dir.join("artifacts");

        if !artifacts_dir.exists() {
            warn!("Artifacts directory does not exist: {:?}", artifacts_dir);
            return Ok(());
        }

        let entries =
            std::fs::read_dir(&artifacts_dir).map_err(|e| QuestError::io(&artifacts_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| QuestError::io(&artifacts_dir, e))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "toml") {
                if let Err(e) = self.load_file(&path) {
                    warn!("Failed to load artifact {:?}: {}", path, e);
                }
            }
        }

        info!("Loaded {} artifact definitions", self.artifacts.len());

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), QuestError> {
        let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
        let raw: RawArtifactFile =
            toml::from_str(&content).map_err(|e| QuestError::toml(path, e))?;
        let artifact = ArtifactDefinition::from_raw(&raw.artifact)?;

        if !artifact.has_wildcard_version() {
            warn!(
                "Artifact '{}' has no wildcard version, turn-ins for it will be refused",
                artifact.id
            );
        }

        self.insert(artifact);
        Ok(())
    }

    /// Add or replace an artifact definition
    pub fn insert(&mut self, artifact: ArtifactDefinition) {
        if let Some(previous) = self.artifacts.remove(&artifact.id) {
            warn!("Duplicate artifact ID '{}', overwriting", artifact.id);
            self.book_index.retain(|_, owner| *owner != previous.id);
        }

        for book in &artifact.books {
            if let Some(owner) = self.book_index.get(&book.template_id) {
                warn!(
                    "Book template '{}' already belongs to '{}', reassigning to '{}'",
                    book.template_id, owner, artifact.id
                );
            }
            self.book_index
                .insert(book.template_id.clone(), artifact.id.clone());
        }

        self.artifacts.insert(artifact.id.clone(), artifact);
    }

    /// Get an artifact definition by ID
    pub fn get(&self, id: &str) -> Option<&ArtifactDefinition> {
        self.artifacts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.artifacts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl Default for ArtifactCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactLookup for ArtifactCatalog {
    fn page_aggregation(&self, item: &InventoryItem) -> PageAggregation {
        let Some(owner) = self.book_index.get(&item.template_id) else {
            return PageAggregation::not_a_page();
        };

        match self.artifacts.get(owner).and_then(|a| a.book(&item.template_id)) {
            Some(book) => PageAggregation {
                pages: book.pages,
                artifact_id: Some(owner.clone()),
            },
            None => PageAggregation::not_a_page(),
        }
    }

    fn reward_entries(&self, artifact_id: &str, class: ClassId, realm: Realm) -> RewardVersions {
        let Some(artifact) = self.artifacts.get(artifact_id) else {
            return RewardVersions::new();
        };

        artifact
            .versions
            .iter()
            .filter(|v| v.key.admits(class, realm))
            .map(|v| (v.key, v.template.clone()))
            .collect()
    }
}
