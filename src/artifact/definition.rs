use serde::Deserialize;

use crate::actor::{ClassId, Realm};
use crate::error::QuestError;
use crate::item::ItemTemplate;

use super::book::PageMask;
use super::lookup::RewardKey;

// ============================================================================
// Raw Artifact Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtifactFile {
    pub artifact: RawArtifact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtifact {
    pub id: String,
    /// Item templates that hold one or more pages of this artifact's book
    #[serde(default)]
    pub books: Vec<RawBookTemplate>,
    #[serde(default)]
    pub versions: Vec<RawVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBookTemplate {
    pub template_id: String,
    pub pages: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVersion {
    pub template_id: String,
    pub name: Option<String>,
    pub class: Option<u16>,
    pub realm: Option<Realm>,
}

// ============================================================================
// Resolved Artifact Definition
// ============================================================================

#[derive(Debug, Clone)]
pub struct BookTemplate {
    pub template_id: String,
    pub pages: PageMask,
}

#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    pub key: RewardKey,
    pub template: ItemTemplate,
}

#[derive(Debug, Clone)]
pub struct ArtifactDefinition {
    pub id: String,
    pub books: Vec<BookTemplate>,
    pub versions: Vec<ArtifactVersion>,
}

impl ArtifactDefinition {
    pub fn from_raw(raw: &RawArtifact) -> Result<Self, QuestError> {
        if raw.id.trim().is_empty() {
            return Err(QuestError::invalid(&raw.id, "artifact id is empty"));
        }

        let books = raw
            .books
            .iter()
            .map(|b| {
                let pages = PageMask::from_pages(&b.pages).ok_or_else(|| {
                    QuestError::invalid(
                        &raw.id,
                        format!("book '{}' has invalid pages {:?}", b.template_id, b.pages),
                    )
                })?;
                Ok(BookTemplate {
                    template_id: b.template_id.clone(),
                    pages,
                })
            })
            .collect::<Result<Vec<_>, QuestError>>()?;

        let versions = raw
            .versions
            .iter()
            .map(|v| ArtifactVersion {
                key: RewardKey {
                    class: v.class.map(ClassId),
                    realm: v.realm,
                },
                template: ItemTemplate {
                    id: v.template_id.clone(),
                    name: v.name.clone().unwrap_or_else(|| raw.id.clone()),
                },
            })
            .collect();

        Ok(Self {
            id: raw.id.clone(),
            books,
            versions,
        })
    }

    pub fn book(&self, template_id: &str) -> Option<&BookTemplate> {
        self.books.iter().find(|b| b.template_id == template_id)
    }

    pub fn has_wildcard_version(&self) -> bool {
        self.versions.iter().any(|v| v.key.is_wildcard())
    }
}
