//! Per-fact pipeline: validate, resolve, canonicalize, consolidate.

use serde::{Deserialize, Serialize};

use super::consolidation::merge_fact_knowledge;
use super::resolution::{resolve_mention, ResolutionReport};
use super::topic::canonicalize_topic;
use super::validation::{validate_mention, RejectedMention};
use crate::index::{ReferenceIndex, SharedIndex};
use crate::matching::MatchEngine;
use crate::models::{CanonicalTopic, DedupKey, RawMention, RawTopic, ResolvedLink, TopicCategory};

/// Everything the upstream extractor produced for one fact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactExtraction {
    pub fact_id: String,
    #[serde(default)]
    pub mentions: Vec<RawMention>,
    #[serde(default)]
    pub topics: Vec<RawTopic>,
}

/// Consolidated knowledge for one fact, ready to be persisted.
#[derive(Debug, Clone, Serialize)]
pub struct FactKnowledge {
    pub fact_id: String,
    pub entities: Vec<ResolvedLink>,
    pub topics: Vec<CanonicalTopic>,
    pub rejected: Vec<RejectedMention>,
    pub report: ResolutionReport,
}

/// Row shape of the fact-to-entity link table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityLinkRow {
    pub fact_id: String,
    pub dedup_key: DedupKey,
    #[serde(flatten)]
    pub link: ResolvedLink,
}

/// Row shape of the fact-to-topic table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicRow {
    pub fact_id: String,
    pub canonical_category: TopicCategory,
    pub confidence: Option<f64>,
    pub rank: Option<u32>,
}

impl FactKnowledge {
    pub fn entity_rows(&self) -> Vec<EntityLinkRow> {
        self.entities
            .iter()
            .map(|link| EntityLinkRow {
                fact_id: self.fact_id.clone(),
                dedup_key: link.dedup_key(),
                link: link.clone(),
            })
            .collect()
    }

    pub fn topic_rows(&self) -> Vec<TopicRow> {
        self.topics
            .iter()
            .map(|topic| TopicRow {
                fact_id: self.fact_id.clone(),
                canonical_category: topic.category,
                confidence: topic.confidence,
                rank: topic.rank,
            })
            .collect()
    }
}

/// Runs one fact through the pipeline against a fixed index snapshot.
///
/// Invalid mentions are reported in `rejected` and skipped; unresolved
/// mentions and out-of-taxonomy topics are counted and dropped.
pub fn consolidate_fact(
    extraction: &FactExtraction,
    index: &ReferenceIndex,
    engine: &MatchEngine,
) -> FactKnowledge {
    let mut report = ResolutionReport::default();
    let mut rejected = Vec::new();
    let mut links = Vec::new();

    for (position, raw) in extraction.mentions.iter().enumerate() {
        let mention = match validate_mention(raw) {
            Ok(mention) => mention,
            Err(reason) => {
                tracing::debug!(
                    fact_id = %extraction.fact_id,
                    position,
                    %reason,
                    "Rejected mention"
                );
                rejected.push(RejectedMention::new(position, &reason));
                continue;
            }
        };
        let resolution = resolve_mention(&mention, index, engine);
        report.record(&resolution);
        links.extend(resolution.into_link());
    }
    report.rejected = rejected.len();

    let mut topics = Vec::new();
    for raw in &extraction.topics {
        match canonicalize_topic(raw) {
            Some(topic) => {
                report.topics_accepted += 1;
                topics.push(topic);
            }
            None => {
                tracing::debug!(
                    fact_id = %extraction.fact_id,
                    topic = %raw.text,
                    "Topic outside taxonomy"
                );
                report.topics_rejected += 1;
            }
        }
    }

    let (entities, topics) = merge_fact_knowledge(links, topics);
    FactKnowledge {
        fact_id: extraction.fact_id.clone(),
        entities,
        topics,
        rejected,
        report,
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub facts: Vec<FactKnowledge>,
    pub report: ResolutionReport,
}

/// Resolves facts against the live index.
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    index: SharedIndex,
    engine: MatchEngine,
}

impl KnowledgeService {
    pub fn new(index: SharedIndex, engine: MatchEngine) -> Self {
        Self { index, engine }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Consolidates one fact. The whole fact sees a single index snapshot,
    /// even if a reload lands midway.
    pub fn consolidate_fact(&self, extraction: &FactExtraction) -> FactKnowledge {
        let index = self.index.snapshot();
        consolidate_fact(extraction, &index, &self.engine)
    }

    /// Consolidates facts in input order and sums their reports.
    pub fn consolidate_batch(&self, extractions: &[FactExtraction]) -> BatchOutcome {
        let mut report = ResolutionReport::default();
        let facts: Vec<FactKnowledge> = extractions
            .iter()
            .map(|extraction| {
                let knowledge = self.consolidate_fact(extraction);
                report.absorb(&knowledge.report);
                knowledge
            })
            .collect();

        tracing::info!(
            facts = facts.len(),
            resolved = report.resolved,
            unresolved = report.unresolved,
            ambiguous = report.ambiguous,
            rejected = report.rejected,
            topics_accepted = report.topics_accepted,
            topics_rejected = report.topics_rejected,
            "Batch consolidated"
        );

        BatchOutcome { facts, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    fn service() -> KnowledgeService {
        let index = ReferenceIndex::build(
            vec![],
            vec![
                Team {
                    abbr: "KC".to_string(),
                    full_name: "Kansas City Chiefs".to_string(),
                    nickname: "Chiefs".to_string(),
                },
                Team {
                    abbr: "BUF".to_string(),
                    full_name: "Buffalo Bills".to_string(),
                    nickname: "Bills".to_string(),
                },
            ],
            vec![],
        )
        .unwrap();
        KnowledgeService::new(SharedIndex::new(index), MatchEngine::default())
    }

    fn mention(entity_type: Option<&str>, text: Option<&str>) -> RawMention {
        RawMention {
            entity_type: entity_type.map(str::to_string),
            text: text.map(str::to_string),
            ..RawMention::default()
        }
    }

    #[test]
    fn test_fact_merges_duplicate_team_mentions() {
        let fact = FactExtraction {
            fact_id: "f1".to_string(),
            mentions: vec![
                mention(Some("team"), Some("Chefs")),
                mention(Some("team"), Some("Kansas City Chiefs")),
                mention(Some("team"), Some("Bills")),
            ],
            topics: vec![
                RawTopic::new("QB Play"),
                RawTopic::new("Quarterback Performance & Analysis"),
            ],
        };
        let knowledge = service().consolidate_fact(&fact);

        let ids: Vec<&str> = knowledge.entities.iter().map(|l| l.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["KC", "BUF"]);
        assert_eq!(knowledge.entities[0].confidence, 1.0);
        assert_eq!(knowledge.topics.len(), 1);
        assert_eq!(knowledge.report.resolved, 3);
        assert_eq!(knowledge.report.topics_accepted, 2);
    }

    #[test]
    fn test_extraction_passes_keep_higher_confidence() {
        let pass = |confidence: f64| RawMention {
            confidence: Some(confidence),
            ..mention(Some("team"), Some("Chiefs"))
        };
        let fact = FactExtraction {
            fact_id: "f4".to_string(),
            mentions: vec![pass(0.70), pass(0.95)],
            topics: vec![],
        };
        let knowledge = service().consolidate_fact(&fact);

        assert_eq!(knowledge.entities.len(), 1);
        assert_eq!(knowledge.entities[0].entity_id, "KC");
        assert!((knowledge.entities[0].confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_and_unresolved_mentions_are_counted() {
        let fact = FactExtraction {
            fact_id: "f2".to_string(),
            mentions: vec![
                mention(None, Some("Chiefs")),
                mention(Some("team"), Some("  ")),
                mention(Some("team"), Some("Xyzzy Nonteam")),
                mention(Some("team"), Some("Chiefs")),
            ],
            topics: vec![RawTopic::new("weather")],
        };
        let knowledge = service().consolidate_fact(&fact);

        assert_eq!(knowledge.entities.len(), 1);
        assert_eq!(knowledge.rejected.len(), 2);
        assert_eq!(knowledge.rejected[0].index, 0);
        assert_eq!(knowledge.rejected[1].index, 1);
        assert_eq!(knowledge.report.rejected, 2);
        assert_eq!(knowledge.report.unresolved, 1);
        assert_eq!(knowledge.report.resolved, 1);
        assert_eq!(knowledge.report.topics_rejected, 1);
        assert!(knowledge.topics.is_empty());
    }

    #[test]
    fn test_rows_carry_fact_id_and_keys() {
        let fact = FactExtraction {
            fact_id: "f3".to_string(),
            mentions: vec![mention(Some("team"), Some("Chiefs"))],
            topics: vec![RawTopic::new("Injury report")],
        };
        let knowledge = service().consolidate_fact(&fact);

        let entity_rows = knowledge.entity_rows();
        assert_eq!(entity_rows.len(), 1);
        assert_eq!(entity_rows[0].fact_id, "f3");
        assert_eq!(entity_rows[0].dedup_key.as_str(), "kc");

        let topic_rows = knowledge.topic_rows();
        assert_eq!(topic_rows[0].canonical_category, TopicCategory::InjuriesAndPlayerHealth);

        let json = serde_json::to_value(&entity_rows[0]).unwrap();
        assert_eq!(json["entity_id"], "KC");
        assert_eq!(json["dedup_key"], "kc");
    }

    #[test]
    fn test_batch_sums_reports() {
        let facts = vec![
            FactExtraction {
                fact_id: "a".to_string(),
                mentions: vec![mention(Some("team"), Some("Chiefs"))],
                topics: vec![],
            },
            FactExtraction {
                fact_id: "b".to_string(),
                mentions: vec![mention(Some("team"), Some("Bills")), mention(None, None)],
                topics: vec![RawTopic::new("Playoff race")],
            },
        ];
        let outcome = service().consolidate_batch(&facts);
        assert_eq!(outcome.facts.len(), 2);
        assert_eq!(outcome.facts[1].fact_id, "b");
        assert_eq!(outcome.report.resolved, 2);
        assert_eq!(outcome.report.rejected, 1);
        assert_eq!(outcome.report.topics_accepted, 1);
    }

    #[test]
    fn test_fact_extraction_defaults() {
        let fact: FactExtraction = serde_json::from_str(r#"{"fact_id": "x"}"#).unwrap();
        assert!(fact.mentions.is_empty());
        assert!(fact.topics.is_empty());
    }
}
