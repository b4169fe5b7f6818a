//! Quest Type Registry
//!
//! Maps artifact ids to the factories that build their quests. Filled once
//! at startup from TOML files (or explicit registrations) and shared
//! read-only afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::artifact::ArtifactCatalog;
use crate::error::QuestError;

use super::api::Quest;
use super::definition::{RawQuestFile, TurnInQuestDefinition};
use super::turn_in::TurnInQuest;

pub type QuestFactory = Box<dyn Fn() -> Arc<dyn Quest> + Send + Sync>;

/// Registry for all quest types
pub struct QuestTypeRegistry {
    factories: HashMap<String, QuestFactory>,
}

impl QuestTypeRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Load all turn-in quests from `<data_dir>/quests`, recursively
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<usize, QuestError> {
        let quests_dir = data_dir.join("quests");
        info!("Loading quests from {:?}", quests_dir);

        if !quests_dir.exists() {
            warn!("Quest directory does not exist: {:?}", quests_dir);
            return Ok(0);
        }

        let mut paths = Vec::new();
        collect_toml_files(&quests_dir, &mut paths)?;

        let mut count = 0;
        for path in paths {
            match load_quest_file(&path) {
                Ok(definition) => {
                    info!("Loaded quest: {} ({})", definition.name, definition.artifact_id);
                    self.register_turn_in(definition);
                    count += 1;
                }
                Err(e) => warn!("Failed to load quest {:?}: {}", path, e),
            }
        }

        info!("Loaded {} quest definitions", count);
        Ok(count)
    }

    /// Register a factory for an artifact id
    pub fn register(&mut self, artifact_id: &str, factory: QuestFactory) {
        if self.factories.contains_key(artifact_id) {
            warn!("Duplicate quest for artifact '{}', overwriting", artifact_id);
        }
        self.factories.insert(artifact_id.to_string(), factory);
    }

    /// Register a data-driven turn-in quest
    pub fn register_turn_in(&mut self, definition: TurnInQuestDefinition) {
        let artifact_id = definition.artifact_id.clone();
        let definition = Arc::new(definition);
        self.register(
            &artifact_id,
            Box::new(move || Arc::new(TurnInQuest::new(Arc::clone(&definition))) as Arc<dyn Quest>),
        );
    }

    /// Build the quest for an artifact id
    pub fn create(&self, artifact_id: &str) -> Option<Arc<dyn Quest>> {
        self.factories.get(artifact_id).map(|factory| factory())
    }

    pub fn contains(&self, artifact_id: &str) -> bool {
        self.factories.contains_key(artifact_id)
    }

    /// Get all artifact ids, sorted
    pub fn artifact_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Warn about quests whose artifact the catalog does not know
    pub fn validate_artifacts(&self, catalog: &ArtifactCatalog) -> usize {
        let mut missing = 0;
        for artifact_id in self.factories.keys() {
            if !catalog.contains(artifact_id) {
                warn!("Quest for '{}' references an unknown artifact", artifact_id);
                missing += 1;
            }
        }
        missing
    }
}

impl Default for QuestTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_toml_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), QuestError> {
    let entries = std::fs::read_dir(dir).map_err(|e| QuestError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| QuestError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            collect_toml_files(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }

    Ok(())
}

fn load_quest_file(path: &Path) -> Result<TurnInQuestDefinition, QuestError> {
    let content = std::fs::read_to_string(path).map_err(|e| QuestError::io(path, e))?;
    let raw: RawQuestFile = toml::from_str(&content).map_err(|e| QuestError::toml(path, e))?;
    TurnInQuestDefinition::from_raw(&raw.quest)
}
