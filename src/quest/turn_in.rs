//! Turn-in Quest
//!
//! Lifecycle adapter that maps the framework's hooks onto the turn-in state
//! machine and performs the side effects it decides on.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::actor::{Actor, Npc, Player};
use crate::item::InventoryItem;

use super::api::{ChatChannel, EligibilityRules, Quest, QuestServices};
use super::definition::TurnInQuestDefinition;
use super::events::Rejection;
use super::machine::{TurnInDecision, TurnInMachine, WhisperDecision};
use super::state::{QuestInstance, QuestStep};

/// A quest granting an artifact for a whispered keyword and a complete book
pub struct TurnInQuest {
    definition: Arc<TurnInQuestDefinition>,
}

impl TurnInQuest {
    pub fn new(definition: Arc<TurnInQuestDefinition>) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &TurnInQuestDefinition {
        &self.definition
    }

    fn machine(&self) -> TurnInMachine<'_> {
        TurnInMachine::new(&self.definition.artifact_id, self.definition.level_required)
    }

    /// Player giver/speaker and scholar target, or nothing
    fn participants<'a>(source: &'a Actor, target: &'a Actor) -> Option<(&'a Player, &'a Npc)> {
        Some((source.as_player()?, target.as_scholar()?))
    }

    fn log_rejection(&self, instance: &QuestInstance, hook: &str, reason: &Rejection) {
        if reason.is_anomaly() {
            warn!(
                player = %instance.player_id,
                artifact = %self.definition.artifact_id,
                step = instance.step().as_str(),
                "{} not handled: {}",
                hook,
                reason
            );
        } else {
            debug!(
                player = %instance.player_id,
                artifact = %self.definition.artifact_id,
                step = instance.step().as_str(),
                "{} not handled: {}",
                hook,
                reason
            );
        }
    }
}

impl Quest for TurnInQuest {
    fn id(&self) -> &str {
        &self.definition.id
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    fn artifact_id(&self) -> &str {
        &self.definition.artifact_id
    }

    fn description(&self, step: QuestStep) -> &str {
        self.definition.description(step)
    }

    fn check_qualification(&self, player: &Player, rules: &dyn EligibilityRules) -> bool {
        let base = rules.base_eligible(player, &self.definition.artifact_id);
        self.machine().qualify(player, base)
    }

    fn receive_item(
        &self,
        instance: &mut QuestInstance,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        item: &InventoryItem,
    ) -> bool {
        let Some((player, scholar)) = Self::participants(source, target) else {
            self.log_rejection(instance, "receive_item", &Rejection::UnqualifiedActors);
            return false;
        };

        let plan = match self
            .machine()
            .on_item_received(instance.step(), services.artifacts, player, item)
        {
            TurnInDecision::Accept(plan) => plan,
            TurnInDecision::Reject(reason) => {
                self.log_rejection(instance, "receive_item", &reason);
                return false;
            }
        };

        if !services.inventory.remove_item(player, item) {
            self.log_rejection(instance, "receive_item", &Rejection::RemovalFailed);
            return false;
        }

        services
            .inventory
            .give_item(scholar, player, &self.definition.artifact_id, &plan.reward);
        info!(
            player = %player.id,
            artifact = %self.definition.artifact_id,
            reward = %plan.reward.id,
            versions = plan.versions_found,
            "Book '{}' turned in",
            item.name
        );

        let reply = self.definition.dialogue.turn_in_complete_for(&player.name);
        services.npcs.turn_to(scholar, player);
        services
            .npcs
            .say_to(scholar, player, ChatChannel::PopupWindow, &reply);

        self.finish(instance);
        true
    }

    fn whisper_receive(
        &self,
        instance: &mut QuestInstance,
        services: &mut QuestServices<'_>,
        source: &Actor,
        target: &Actor,
        text: &str,
    ) -> bool {
        let Some((player, scholar)) = Self::participants(source, target) else {
            self.log_rejection(instance, "whisper_receive", &Rejection::UnqualifiedActors);
            return false;
        };

        let next = match self.machine().on_whisper(instance.step(), text) {
            WhisperDecision::Advance(next) => next,
            WhisperDecision::Reject(reason) => {
                self.log_rejection(instance, "whisper_receive", &reason);
                return false;
            }
        };

        if let Err(e) = instance.advance(next) {
            warn!(player = %player.id, "Keyword accepted but step not advanced: {}", e);
            return false;
        }
        info!(
            player = %player.id,
            artifact = %self.definition.artifact_id,
            step = next.as_str(),
            "Keyword accepted"
        );

        let reply = self.definition.dialogue.keyword_accepted_for(&player.name);
        services.npcs.turn_to(scholar, player);
        services
            .npcs
            .say_to(scholar, player, ChatChannel::PopupWindow, &reply);
        true
    }

    fn finish(&self, instance: &mut QuestInstance) {
        match instance.advance(QuestStep::Finished) {
            Ok(()) => info!(
                player = %instance.player_id,
                artifact = %self.definition.artifact_id,
                duration_secs = ?instance.duration_secs(),
                "Quest finished"
            ),
            Err(e) => warn!(player = %instance.player_id, "Quest not finished: {}", e),
        }
    }
}
