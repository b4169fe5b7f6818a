//! Player Quest Journal
//!
//! Active and completed quests of one player, and delivery of interaction
//! hooks to them.

use std::sync::Arc;
use tracing::{debug, info};

use crate::actor::{Actor, Player};
use crate::error::QuestError;
use crate::item::InventoryItem;

use super::api::{EligibilityRules, Quest, QuestServices};
use super::state::QuestInstance;

/// A quest in progress: the strategy plus the player's copy of it
pub struct ActiveQuest {
    pub quest: Arc<dyn Quest>,
    pub instance: QuestInstance,
}

/// All quest state for a single player
pub struct QuestJournal {
    player_id: String,
    active: Vec<ActiveQuest>,
    /// Artifact ids of finished quests
    completed: Vec<String>,
}

impl QuestJournal {
    pub fn new(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            active: Vec::new(),
            completed: Vec::new(),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn can_start(&self, quest: &dyn Quest, player: &Player) -> bool {
        quest.check_qualification(player, self)
    }

    /// Start a quest for the player, at its first step
    pub fn accept(
        &mut self,
        quest: Arc<dyn Quest>,
        player: &Player,
    ) -> Result<&QuestInstance, QuestError> {
        if !self.can_start(quest.as_ref(), player) {
            return Err(QuestError::NotQualified {
                player: player.id.clone(),
                artifact: quest.artifact_id().to_string(),
            });
        }

        let instance = QuestInstance::new(&self.player_id, quest.artifact_id());
        info!(player = %self.player_id, artifact = quest.artifact_id(), "Quest accepted");
        self.active.push(ActiveQuest { quest, instance });

        let index = self.active.len() - 1;
        Ok(&self.active[index].instance)
    }

    /// Re-attach a quest instance loaded from storage
    pub fn restore(&mut self, quest: Arc<dyn Quest>, instance: QuestInstance) -> Result<(), QuestError> {
        if quest.artifact_id() != instance.artifact_id {
            return Err(QuestError::UnknownQuest(instance.artifact_id));
        }
        if instance.player_id != self.player_id {
            return Err(QuestError::ForeignInstance {
                player: self.player_id.clone(),
                owner: instance.player_id,
            });
        }
        if self.is_active(&instance.artifact_id) || self.is_completed(&instance.artifact_id) {
            debug!(artifact = %instance.artifact_id, "Restored quest already tracked, skipping");
            return Ok(());
        }

        if instance.is_finished() {
            self.completed.push(instance.artifact_id);
        } else {
            self.active.push(ActiveQuest { quest, instance });
        }
        Ok(())
    }

    /// Offer an item handover to each active quest until one takes it
    pub fn receive_item(
        &mut self,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        item: &InventoryItem,
    ) -> bool {
        self.deliver(|quest, instance| quest.receive_item(instance, services, source, target, item))
    }

    /// Offer a whisper to each active quest until one takes it
    pub fn whisper_receive(
        &mut self,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        text: &str,
    ) -> bool {
        self.deliver(|quest, instance| quest.whisper_receive(instance, services, source, target, text))
    }

    fn deliver<F>(&mut self, mut hook: F) -> bool
    where
        F: FnMut(&dyn Quest, &mut QuestInstance) -> bool,
    {
        let mut handled = false;
        for active in &mut self.active {
            if hook(active.quest.as_ref(), &mut active.instance) {
                handled = true;
                break;
            }
        }
        self.archive_finished();
        handled
    }

    fn archive_finished(&mut self) {
        let (finished, active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|a| a.instance.is_finished());
        self.active = active;
        for done in finished {
            debug!(player = %self.player_id, artifact = %done.instance.artifact_id, "Quest archived");
            self.completed.push(done.instance.artifact_id);
        }
    }

    pub fn is_active(&self, artifact_id: &str) -> bool {
        self.active.iter().any(|a| a.instance.artifact_id == artifact_id)
    }

    pub fn is_completed(&self, artifact_id: &str) -> bool {
        self.completed.iter().any(|id| id == artifact_id)
    }

    pub fn instance(&self, artifact_id: &str) -> Option<&QuestInstance> {
        self.active
            .iter()
            .find(|a| a.instance.artifact_id == artifact_id)
            .map(|a| &a.instance)
    }

    /// Journal text of an active quest
    pub fn description(&self, artifact_id: &str) -> Option<&str> {
        self.active
            .iter()
            .find(|a| a.instance.artifact_id == artifact_id)
            .map(|a| a.quest.description(a.instance.step()))
    }

    pub fn active_instances(&self) -> impl Iterator<Item = &QuestInstance> {
        self.active.iter().map(|a| &a.instance)
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }
}

impl EligibilityRules for QuestJournal {
    fn base_eligible(&self, player: &Player, artifact_id: &str) -> bool {
        player.id == self.player_id && !self.is_active(artifact_id) && !self.is_completed(artifact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactCatalog;
    use crate::quest::fixtures::{self, ARTIFACT};
    use crate::quest::{QuestStep, TurnInQuest};
    use crate::world::{InMemoryInventory, SpeechLog};

    fn band_quest() -> Arc<dyn Quest> {
        Arc::new(TurnInQuest::new(fixtures::definition()))
    }

    #[test]
    fn test_accept_checks_qualification() {
        let mut journal = QuestJournal::new("p1");

        let err = journal.accept(band_quest(), &fixtures::player(30)).unwrap_err();
        assert!(matches!(err, QuestError::NotQualified { .. }));

        let instance = journal.accept(band_quest(), &fixtures::player(45)).unwrap();
        assert_eq!(instance.step(), QuestStep::AwaitingKeyword);
        assert!(journal.is_active(ARTIFACT));

        // Already active
        assert!(journal.accept(band_quest(), &fixtures::player(45)).is_err());
        assert_eq!(journal.description(ARTIFACT), Some("Defeat Chisisi."));
    }

    #[test]
    fn test_full_run_archives_quest() {
        let catalog: ArtifactCatalog = fixtures::catalog();
        let mut inventory = InMemoryInventory::new();
        let mut speech = SpeechLog::new();
        let mut journal = QuestJournal::new("p1");
        journal.accept(band_quest(), &fixtures::player(50)).unwrap();

        let player = fixtures::player_actor(50);
        let scholar = fixtures::scholar_actor();
        let book = fixtures::complete_book();
        inventory.stock("p1", book.clone());

        let mut services = QuestServices::new(&catalog, &mut inventory, &mut speech);
        assert!(!journal.receive_item(&mut services, &player, &scholar, &book));
        assert!(journal.whisper_receive(&mut services, &player, &scholar, ARTIFACT));
        assert_eq!(journal.description(ARTIFACT), Some("Turn in the King's Vase."));
        assert!(journal.receive_item(&mut services, &player, &scholar, &book));

        assert!(!journal.is_active(ARTIFACT));
        assert!(journal.is_completed(ARTIFACT));
        assert!(!journal.can_start(band_quest().as_ref(), &fixtures::player(50)));
        assert_eq!(inventory.grants.len(), 1);
    }

    #[test]
    fn test_restore() {
        let mut journal = QuestJournal::new("p1");
        let at_book = QuestInstance::restore("p1", ARTIFACT, 2).unwrap();
        journal.restore(band_quest(), at_book).unwrap();
        assert_eq!(
            journal.instance(ARTIFACT).map(|i| i.step()),
            Some(QuestStep::AwaitingBook)
        );

        let mut other = QuestJournal::new("p1");
        let finished = QuestInstance::restore("p1", ARTIFACT, 3).unwrap();
        other.restore(band_quest(), finished).unwrap();
        assert!(other.is_completed(ARTIFACT));
        assert_eq!(other.active_instances().count(), 0);

        let mismatched = QuestInstance::restore("p1", "Crocodile's Tooth", 1).unwrap();
        assert!(matches!(
            journal.restore(band_quest(), mismatched),
            Err(QuestError::UnknownQuest(_))
        ));
    }

    #[test]
    fn test_restore_rejects_other_players_instance() {
        let mut journal = QuestJournal::new("p1");
        let theirs = QuestInstance::restore("p2", ARTIFACT, 2).unwrap();

        let err = journal.restore(band_quest(), theirs).unwrap_err();
        assert!(matches!(err, QuestError::ForeignInstance { ref owner, .. } if owner == "p2"));
        assert!(!journal.is_active(ARTIFACT));
    }

    #[test]
    fn test_other_players_not_eligible() {
        let journal = QuestJournal::new("someone_else");
        assert!(!journal.can_start(band_quest().as_ref(), &fixtures::player(50)));
    }
}
