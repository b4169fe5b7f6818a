//! Quest Dispatcher
//!
//! Routes interactions to the acting player's journal. Each journal sits
//! behind its own lock, so two interactions from the same player are never
//! handled at the same time.

use std::sync::Arc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::actor::Player;
use crate::error::QuestError;

use super::api::QuestServices;
use super::events::InteractionEvent;
use super::journal::QuestJournal;
use super::registry::QuestTypeRegistry;
use super::state::QuestInstance;

pub struct QuestDispatcher {
    registry: Arc<QuestTypeRegistry>,
    // Player ID -> journal
    journals: DashMap<String, Arc<Mutex<QuestJournal>>>,
}

impl QuestDispatcher {
    pub fn new(registry: Arc<QuestTypeRegistry>) -> Self {
        Self {
            registry,
            journals: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &QuestTypeRegistry {
        &self.registry
    }

    /// Get or create the journal of a player
    pub fn journal(&self, player_id: &str) -> Arc<Mutex<QuestJournal>> {
        self.journals
            .entry(player_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(QuestJournal::new(player_id))))
            .clone()
    }

    /// Artifact ids of quests the player may be offered right now
    pub async fn available_quests(&self, player: &Player) -> Vec<String> {
        let journal = self.journal(&player.id);
        let journal = journal.lock().await;

        self.registry
            .artifact_ids()
            .into_iter()
            .filter(|artifact_id| {
                self.registry
                    .create(artifact_id)
                    .is_some_and(|quest| journal.can_start(quest.as_ref(), player))
            })
            .collect()
    }

    /// Start the quest for `artifact_id`; returns the new instance id
    pub async fn accept(&self, player: &Player, artifact_id: &str) -> Result<Uuid, QuestError> {
        let quest = self
            .registry
            .create(artifact_id)
            .ok_or_else(|| QuestError::UnknownQuest(artifact_id.to_string()))?;

        let journal = self.journal(&player.id);
        let mut journal = journal.lock().await;
        let instance = journal.accept(quest, player)?;
        Ok(instance.id)
    }

    /// Re-attach a stored quest step for a player
    pub async fn restore(&self, player_id: &str, artifact_id: &str, step: i32) -> Result<(), QuestError> {
        let quest = self
            .registry
            .create(artifact_id)
            .ok_or_else(|| QuestError::UnknownQuest(artifact_id.to_string()))?;
        let instance = QuestInstance::restore(player_id, artifact_id, step)?;

        let journal = self.journal(player_id);
        let mut journal = journal.lock().await;
        journal.restore(quest, instance)
    }

    /// Deliver an interaction to the source player's quests.
    ///
    /// Returns true if one of them handled it. Interactions not started by a
    /// player are never handled.
    pub async fn handle(&self, event: InteractionEvent<'_>, services: &mut QuestServices<'_>) -> bool {
        let Some(player) = event.source().as_player() else {
            debug!("{} from non-player '{}' ignored", event.event_type(), event.source().id());
            return false;
        };

        let journal = self.journal(&player.id);
        let mut journal = journal.lock().await;

        let handled = match event {
            InteractionEvent::ItemOffered { from, to, item } => {
                journal.receive_item(services, from, to, item)
            }
            InteractionEvent::Whisper { from, to, text } => {
                journal.whisper_receive(services, from, to, text)
            }
        };

        debug!(
            player = %player.id,
            event = event.event_type(),
            handled,
            "Interaction processed"
        );
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::fixtures::{self, ARTIFACT};
    use crate::quest::QuestStep;
    use crate::world::{InMemoryInventory, SpeechLog};

    fn dispatcher() -> QuestDispatcher {
        let mut registry = QuestTypeRegistry::new();
        registry.register_turn_in((*fixtures::definition()).clone());
        QuestDispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_available_and_accept() {
        let dispatcher = dispatcher();

        assert!(dispatcher.available_quests(&fixtures::player(20)).await.is_empty());
        assert_eq!(
            dispatcher.available_quests(&fixtures::player(50)).await,
            vec![ARTIFACT.to_string()]
        );

        dispatcher.accept(&fixtures::player(50), ARTIFACT).await.unwrap();
        assert!(dispatcher.available_quests(&fixtures::player(50)).await.is_empty());

        assert!(matches!(
            dispatcher.accept(&fixtures::player(50), "Nothing").await,
            Err(QuestError::UnknownQuest(_))
        ));
    }

    #[tokio::test]
    async fn test_handle_full_run() {
        let dispatcher = dispatcher();
        let catalog = fixtures::catalog();
        let mut inventory = InMemoryInventory::new();
        let mut speech = SpeechLog::new();

        let player = fixtures::player_actor(50);
        let scholar = fixtures::scholar_actor();
        let book = fixtures::complete_book();
        inventory.stock("p1", book.clone());
        dispatcher.accept(&fixtures::player(50), ARTIFACT).await.unwrap();

        let mut services = QuestServices::new(&catalog, &mut inventory, &mut speech);

        let whisper = InteractionEvent::Whisper {
            from: &player,
            to: &scholar,
            text: "band of stars",
        };
        assert!(dispatcher.handle(whisper, &mut services).await);
        assert!(!dispatcher.handle(whisper, &mut services).await);

        let offer = InteractionEvent::ItemOffered {
            from: &player,
            to: &scholar,
            item: &book,
        };
        assert!(dispatcher.handle(offer, &mut services).await);
        assert!(!dispatcher.handle(offer, &mut services).await);

        let journal = dispatcher.journal("p1");
        assert!(journal.lock().await.is_completed(ARTIFACT));
        assert_eq!(inventory.removals, 1);
        assert_eq!(inventory.grants.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_simultaneous_turn_ins_grant_once() {
        const OFFERS: usize = 8;

        let dispatcher = Arc::new(dispatcher());
        let catalog = Arc::new(fixtures::catalog());
        dispatcher
            .restore("p1", ARTIFACT, QuestStep::AwaitingBook.as_i32())
            .await
            .unwrap();

        // Each offer comes with its own bags, so only the journal lock can
        // keep two of them from being granted
        let barrier = Arc::new(std::sync::Barrier::new(OFFERS));
        let mut tasks = Vec::with_capacity(OFFERS);
        for _ in 0..OFFERS {
            let dispatcher = Arc::clone(&dispatcher);
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            let runtime = tokio::runtime::Handle::current();

            tasks.push(tokio::task::spawn_blocking(move || {
                let mut inventory = InMemoryInventory::new();
                let mut speech = SpeechLog::new();
                let player = fixtures::player_actor(50);
                let scholar = fixtures::scholar_actor();
                let book = fixtures::complete_book();
                inventory.stock("p1", book.clone());

                let offer = InteractionEvent::ItemOffered {
                    from: &player,
                    to: &scholar,
                    item: &book,
                };
                let mut services = QuestServices::new(catalog.as_ref(), &mut inventory, &mut speech);

                barrier.wait();
                let handled = runtime.block_on(dispatcher.handle(offer, &mut services));
                (handled, inventory.grants.len())
            }));
        }

        let mut handled = 0;
        let mut grants = 0;
        for task in tasks {
            let (h, g) = task.await.unwrap();
            handled += usize::from(h);
            grants += g;
        }

        assert_eq!(handled, 1);
        assert_eq!(grants, 1);
        let journal = dispatcher.journal("p1");
        assert!(journal.lock().await.is_completed(ARTIFACT));
    }

    #[tokio::test]
    async fn test_non_player_source_ignored() {
        let dispatcher = dispatcher();
        let catalog = fixtures::catalog();
        let mut inventory = InMemoryInventory::new();
        let mut speech = SpeechLog::new();
        let mut services = QuestServices::new(&catalog, &mut inventory, &mut speech);

        let scholar = fixtures::scholar_actor();
        let event = InteractionEvent::Whisper {
            from: &scholar,
            to: &scholar,
            text: ARTIFACT,
        };
        assert!(!dispatcher.handle(event, &mut services).await);
    }

    #[tokio::test]
    async fn test_restore_step() {
        let dispatcher = dispatcher();
        dispatcher.restore("p1", ARTIFACT, 2).await.unwrap();

        let journal = dispatcher.journal("p1");
        let journal = journal.lock().await;
        assert_eq!(
            journal.instance(ARTIFACT).map(|i| i.step()),
            Some(QuestStep::AwaitingBook)
        );
        drop(journal);

        assert!(matches!(
            dispatcher.restore("p1", ARTIFACT, 42).await,
            Err(QuestError::UnknownStep(42))
        ));
    }
}
