//! Shared test data: the Band of Stars quest and its artifact.

use std::sync::Arc;

use crate::actor::{Actor, ClassId, Npc, NpcRole, Player, Realm};
use crate::artifact::definition::RawArtifactFile;
use crate::artifact::{ArtifactCatalog, ArtifactDefinition};
use crate::item::InventoryItem;

use super::definition::TurnInQuestDefinition;
use super::definition::tests::BAND_OF_STARS_QUEST;

pub const ARTIFACT: &str = "Band of Stars";

const BAND_OF_STARS_ARTIFACT: &str = r#"
    [artifact]
    id = "Band of Stars"

    [[artifact.books]]
    template_id = "kings_vase"
    pages = [1, 2, 3]

    [[artifact.books]]
    template_id = "kings_vase_pages_1_2"
    pages = [1, 2]

    [[artifact.versions]]
    template_id = "band_of_stars"

    [[artifact.versions]]
    template_id = "band_of_stars_alb"
    realm = "albion"
"#;

const CROCODILE_ARTIFACT: &str = r#"
    [artifact]
    id = "Crocodile's Tooth"

    [[artifact.books]]
    template_id = "crocodile_book"
    pages = [1, 2, 3]
"#;

fn artifact(content: &str) -> ArtifactDefinition {
    let raw: RawArtifactFile = toml::from_str(content).unwrap();
    ArtifactDefinition::from_raw(&raw.artifact).unwrap()
}

pub fn catalog() -> ArtifactCatalog {
    let mut catalog = ArtifactCatalog::new();
    catalog.insert(artifact(BAND_OF_STARS_ARTIFACT));
    catalog.insert(artifact(CROCODILE_ARTIFACT));
    catalog
}

/// Catalog that knows the book but has no reward versions
pub fn catalog_without_rewards() -> ArtifactCatalog {
    let mut catalog = ArtifactCatalog::new();
    catalog.insert(artifact(
        r#"
        [artifact]
        id = "Band of Stars"
        [[artifact.books]]
        template_id = "kings_vase"
        pages = [1, 2, 3]
        "#,
    ));
    catalog
}

pub fn definition() -> Arc<TurnInQuestDefinition> {
    Arc::new(TurnInQuestDefinition::from_toml_str(BAND_OF_STARS_QUEST).unwrap())
}

pub fn player(level: i32) -> Player {
    Player {
        id: "p1".into(),
        name: "Aredhel".into(),
        level,
        class: ClassId(5),
        realm: Realm::Albion,
    }
}

pub fn player_actor(level: i32) -> Actor {
    Actor::Player(player(level))
}

pub fn scholar_actor() -> Actor {
    Actor::Npc(Npc {
        id: "scholar".into(),
        name: "Scholar Alaria".into(),
        role: NpcRole::Scholar,
    })
}

pub fn merchant_actor() -> Actor {
    Actor::Npc(Npc {
        id: "merchant".into(),
        name: "Merchant".into(),
        role: NpcRole::Merchant,
    })
}

pub fn complete_book() -> InventoryItem {
    InventoryItem::new("kings_vase", "King's Vase")
}

pub fn partial_book() -> InventoryItem {
    InventoryItem::new("kings_vase_pages_1_2", "Torn King's Vase")
}
