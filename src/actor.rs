use serde::{Deserialize, Serialize};

// ============================================================================
// Class & Realm
// ============================================================================

/// Character class identifier as stored by the game database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Realm {
    Albion,
    Midgard,
    Hibernia,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Albion => "albion",
            Realm::Midgard => "midgard",
            Realm::Hibernia => "hibernia",
        }
    }
}

// ============================================================================
// Actors
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub class: ClassId,
    pub realm: Realm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NpcRole {
    #[default]
    Generic,
    Scholar,
    Merchant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: NpcRole,
}

impl Npc {
    pub fn is_scholar(&self) -> bool {
        self.role == NpcRole::Scholar
    }
}

/// Anything that can take part in an interaction
#[derive(Debug, Clone)]
pub enum Actor {
    Player(Player),
    Npc(Npc),
}

impl Actor {
    pub fn id(&self) -> &str {
        match self {
            Actor::Player(p) => &p.id,
            Actor::Npc(n) => &n.id,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Actor::Player(p) => Some(p),
            Actor::Npc(_) => None,
        }
    }

    pub fn as_npc(&self) -> Option<&Npc> {
        match self {
            Actor::Npc(n) => Some(n),
            Actor::Player(_) => None,
        }
    }

    /// The NPC if it is a scholar, the only kind that reviews artifact books
    pub fn as_scholar(&self) -> Option<&Npc> {
        self.as_npc().filter(|n| n.is_scholar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_downcasts() {
        let player = Actor::Player(Player {
            id: "p1".into(),
            name: "Aredhel".into(),
            level: 50,
            class: ClassId(3),
            realm: Realm::Albion,
        });
        let scholar = Actor::Npc(Npc {
            id: "n1".into(),
            name: "Scholar Alaria".into(),
            role: NpcRole::Scholar,
        });
        let guard = Actor::Npc(Npc {
            id: "n2".into(),
            name: "Guard".into(),
            role: NpcRole::Generic,
        });

        assert!(player.as_player().is_some());
        assert!(player.as_scholar().is_none());
        assert!(scholar.as_scholar().is_some());
        assert!(guard.as_npc().is_some());
        assert!(guard.as_scholar().is_none());
        assert_eq!(scholar.id(), "n1");
    }

    #[test]
    fn test_realm_parsing() {
        let realm: Realm = serde_json::from_str("\"hibernia\"").unwrap();
        assert_eq!(realm, Realm::Hibernia);
        assert_eq!(realm.as_str(), "hibernia");
    }
}
