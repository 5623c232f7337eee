//! Mentions emitted by the upstream extraction step.

use serde::{Deserialize, Serialize};

use super::EntityType;

/// A mention as it arrives from the extractor, before validation.
///
/// Every field is optional because extractor output is untrusted; see
/// [`crate::services::validate_mention`] for the rules that turn it into a
/// [`Mention`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMention {
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team_abbr: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

/// A validated mention of a player, team or game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub entity_type: EntityType,
    /// Surface text, never empty.
    pub text: String,
    pub context: Option<String>,
    /// Extractor confidence, clamped to `[0, 1]`.
    pub confidence: Option<f64>,
    /// Importance within the fact, lower is more important.
    pub rank: Option<u32>,
    pub is_primary: bool,
    pub position: Option<String>,
    pub team_abbr: Option<String>,
    pub team_name: Option<String>,
}

impl Mention {
    /// Creates a mention with no hints, rank or confidence.
    pub fn new(entity_type: EntityType, text: impl Into<String>) -> Self {
        Self {
            entity_type,
            text: text.into(),
            context: None,
            confidence: None,
            rank: None,
            is_primary: false,
            position: None,
            team_abbr: None,
            team_name: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_team_abbr(mut self, team_abbr: impl Into<String>) -> Self {
        self.team_abbr = Some(team_abbr.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// Disambiguation hints carried by this mention.
    pub fn hints(&self) -> PlayerHints {
        PlayerHints {
            position: non_blank(self.position.as_deref()),
            team_abbr: non_blank(self.team_abbr.as_deref()),
            team_name: non_blank(self.team_name.as_deref()),
        }
    }
}

/// Secondary signals used to pick among same-name players.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerHints {
    pub position: Option<String>,
    pub team_abbr: Option<String>,
    pub team_name: Option<String>,
}

impl PlayerHints {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.team_abbr.is_none() && self.team_name.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_ignore_blank_fields() {
        let mention = Mention::new(EntityType::Player, "Josh Allen")
            .with_position("  ")
            .with_team_abbr(" BUF ");
        let hints = mention.hints();
        assert_eq!(hints.position, None);
        assert_eq!(hints.team_abbr.as_deref(), Some("BUF"));
        assert!(!hints.is_empty());
    }

    #[test]
    fn test_raw_mention_deserializes_partial_input() {
        let raw: RawMention =
            serde_json::from_str(r#"{"entity_type": "team", "text": "Chiefs"}"#).unwrap();
        assert_eq!(raw.entity_type.as_deref(), Some("team"));
        assert_eq!(raw.is_primary, None);
        assert_eq!(raw.rank, None);
    }
}
