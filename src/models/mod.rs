//! Domain models for mentions, canonical records and consolidated knowledge.

mod entity;
mod link;
mod mention;
mod topic;

pub use entity::{CanonicalEntity, EntityType, Game, Player, Team};
pub use link::{DedupKey, EntityKey, ResolvedLink};
pub use mention::{Mention, PlayerHints, RawMention};
pub use topic::{CanonicalTopic, RawTopic, TopicCategory};

/// Clamps a confidence into `[0, 1]`, mapping NaN to zero.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
