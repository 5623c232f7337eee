//! Resolved entity links and the keys they are deduplicated by.

use serde::{Deserialize, Serialize};

use super::{clamp_confidence, EntityType};
use crate::matching::normalize;

/// A mention that was resolved to a canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub entity_type: EntityType,
    /// Player id, team abbreviation or game id. Empty when the link came from
    /// a source that could not supply one.
    #[serde(default)]
    pub entity_id: String,
    pub mention_text: String,
    /// The canonical name variant the mention matched.
    #[serde(default)]
    pub matched_name: String,
    /// Match confidence in `[0, 1]`.
    pub confidence: f64,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_abbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl ResolvedLink {
    /// Creates a link with the confidence clamped into `[0, 1]`.
    pub fn new(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        mention_text: impl Into<String>,
        matched_name: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
            mention_text: mention_text.into(),
            matched_name: matched_name.into(),
            confidence: clamp_confidence(confidence),
            is_primary: false,
            rank: None,
            position: None,
            team_abbr: None,
            team_name: None,
        }
    }

    /// Key that groups links to the same entity: the lowercased entity id,
    /// else the normalized matched name, else the normalized mention text.
    pub fn dedup_key(&self) -> DedupKey {
        let id = self.entity_id.trim();
        if !id.is_empty() {
            return DedupKey(id.to_lowercase());
        }
        let matched = normalize(&self.matched_name);
        if !matched.is_empty() {
            return DedupKey(matched);
        }
        DedupKey(normalize(&self.mention_text))
    }

    /// Dedup key scoped by entity type.
    pub fn entity_key(&self) -> EntityKey {
        EntityKey {
            entity_type: self.entity_type,
            key: self.dedup_key(),
        }
    }
}

/// Derived string used to group duplicate records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `(entity_type, dedup_key)`, the identity of an entity link within a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityKey {
    pub entity_type: EntityType,
    pub key: DedupKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_prefers_entity_id() {
        let link = ResolvedLink::new(EntityType::Team, "KC", "the Chiefs", "Chiefs", 0.9);
        assert_eq!(link.dedup_key().as_str(), "kc");
    }

    #[test]
    fn test_dedup_key_falls_back_to_names() {
        let mut link = ResolvedLink::new(EntityType::Player, "", "Mahomes's", "", 0.5);
        assert_eq!(link.dedup_key().as_str(), "mahomes");

        link.matched_name = "Patrick  Mahomes".to_string();
        assert_eq!(link.dedup_key().as_str(), "patrick mahomes");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let link = ResolvedLink::new(EntityType::Team, "KC", "KC", "KC", 1.7);
        assert_eq!(link.confidence, 1.0);
        let link = ResolvedLink::new(EntityType::Team, "KC", "KC", "KC", f64::NAN);
        assert_eq!(link.confidence, 0.0);
    }

    #[test]
    fn test_entity_key_scoped_by_type() {
        let team = ResolvedLink::new(EntityType::Team, "", "Cardinals", "", 1.0);
        let player = ResolvedLink::new(EntityType::Player, "", "Cardinals", "", 1.0);
        assert_eq!(team.dedup_key(), player.dedup_key());
        assert_ne!(team.entity_key(), player.entity_key());
    }
}
