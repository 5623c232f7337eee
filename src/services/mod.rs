//! Resolution and consolidation services.
//!
//! Free functions carry the logic against an explicit index snapshot;
//! [`KnowledgeService`] binds them to the shared live index.

mod consolidation;
mod knowledge;
mod resolution;
mod topic;
mod validation;

pub use consolidation::{
    compare_priority, merge_entities, merge_fact_knowledge, merge_topics, Consolidate, Consolidator,
    MergePolicy, PrimaryConfidenceRank,
};
pub use knowledge::{
    consolidate_fact, BatchOutcome, EntityLinkRow, FactExtraction, FactKnowledge, KnowledgeService,
    TopicRow,
};
pub use resolution::{resolve_mention, Resolution, ResolutionReport};
pub use topic::{canonicalize, canonicalize_topic, match_rules, TopicRule, TOPIC_RULES};
pub use validation::{validate_mention, InvalidMention, RejectedMention};
