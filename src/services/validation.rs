//! Validation of raw extractor mentions before they reach matching.

use serde::Serialize;

use crate::models::{clamp_confidence, EntityType, Mention, RawMention};

/// Why a raw mention was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMention {
    /// No entity type was given.
    MissingEntityType,
    /// The entity type is not player, team or game.
    UnknownEntityType(String),
    /// The mention text is missing or blank.
    EmptyText,
}

impl std::fmt::Display for InvalidMention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMention::MissingEntityType => write!(f, "mention has no entity_type"),
            InvalidMention::UnknownEntityType(value) => {
                write!(f, "unknown entity_type '{}'", value)
            }
            InvalidMention::EmptyText => write!(f, "mention text is empty"),
        }
    }
}

/// A rejected mention, reported back to the batch caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMention {
    /// Position of the mention in the fact's input.
    pub index: usize,
    pub reason: String,
}

impl RejectedMention {
    pub fn new(index: usize, reason: &InvalidMention) -> Self {
        Self {
            index,
            reason: reason.to_string(),
        }
    }
}

/// Turns a raw mention into a typed [`Mention`].
///
/// Text is trimmed and confidence clamped to `[0, 1]`; hints are kept as given.
pub fn validate_mention(raw: &RawMention) -> Result<Mention, InvalidMention> {
    let entity_type = match raw.entity_type.as_deref().map(str::trim) {
        None | Some("") => return Err(InvalidMention::MissingEntityType),
        Some(value) => value
            .parse::<EntityType>()
            .map_err(|_| InvalidMention::UnknownEntityType(value.to_string()))?,
    };

    let text = raw.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(InvalidMention::EmptyText);
    }

    Ok(Mention {
        entity_type,
        text: text.to_string(),
        context: raw.context.clone(),
        confidence: raw.confidence.map(clamp_confidence),
        rank: raw.rank,
        is_primary: raw.is_primary.unwrap_or(false),
        position: raw.position.clone(),
        team_abbr: raw.team_abbr.clone(),
        team_name: raw.team_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entity_type: Option<&str>, text: Option<&str>) -> RawMention {
        RawMention {
            entity_type: entity_type.map(str::to_string),
            text: text.map(str::to_string),
            ..RawMention::default()
        }
    }

    #[test]
    fn test_valid_mention() {
        let mut input = raw(Some("Player"), Some("  Josh Allen "));
        input.confidence = Some(3.0);
        input.is_primary = Some(true);
        let mention = validate_mention(&input).unwrap();
        assert_eq!(mention.entity_type, EntityType::Player);
        assert_eq!(mention.text, "Josh Allen");
        assert_eq!(mention.confidence, Some(1.0));
        assert!(mention.is_primary);
    }

    #[test]
    fn test_missing_entity_type() {
        assert_eq!(
            validate_mention(&raw(None, Some("Chiefs"))),
            Err(InvalidMention::MissingEntityType)
        );
        assert_eq!(
            validate_mention(&raw(Some(" "), Some("Chiefs"))),
            Err(InvalidMention::MissingEntityType)
        );
    }

    #[test]
    fn test_unknown_entity_type() {
        assert_eq!(
            validate_mention(&raw(Some("coach"), Some("Andy Reid"))),
            Err(InvalidMention::UnknownEntityType("coach".to_string()))
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(
            validate_mention(&raw(Some("team"), None)),
            Err(InvalidMention::EmptyText)
        );
        assert_eq!(
            validate_mention(&raw(Some("team"), Some("   "))),
            Err(InvalidMention::EmptyText)
        );
    }

    #[test]
    fn test_rejected_mention_reason() {
        let rejected = RejectedMention::new(3, &InvalidMention::EmptyText);
        assert_eq!(rejected.index, 3);
        assert_eq!(rejected.reason, "mention text is empty");
    }
}
