//! Resolution of a single mention to a canonical link.

use serde::Serialize;

use crate::index::ReferenceIndex;
use crate::matching::{select_best, Candidate, Disambiguation, Disambiguator, MatchEngine};
use crate::models::{clamp_confidence, EntityType, Mention, ResolvedLink};

/// What happened to one mention.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedLink),
    /// Resolved, but only by picking among several equally plausible records.
    Ambiguous {
        link: ResolvedLink,
        survivors: usize,
    },
    Unresolved,
}

impl Resolution {
    pub fn link(&self) -> Option<&ResolvedLink> {
        match self {
            Resolution::Resolved(link) | Resolution::Ambiguous { link, .. } => Some(link),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_link(self) -> Option<ResolvedLink> {
        match self {
            Resolution::Resolved(link) | Resolution::Ambiguous { link, .. } => Some(link),
            Resolution::Unresolved => None,
        }
    }
}

/// Resolves a validated mention against an index snapshot.
///
/// Player mentions go through the [`Disambiguator`]; team and game mentions
/// take the best candidate directly. Several surviving candidates are settled
/// by the first-seen tie-break and logged.
pub fn resolve_mention(
    mention: &Mention,
    index: &ReferenceIndex,
    engine: &MatchEngine,
) -> Resolution {
    let candidates = engine.resolve_candidates(&mention.text, mention.entity_type, index);
    let outcome = match mention.entity_type {
        EntityType::Player => {
            Disambiguator::new(index, engine).disambiguate(candidates, &mention.hints())
        }
        EntityType::Team | EntityType::Game => select_best(candidates),
    };

    match outcome {
        Disambiguation::Unique(candidate) => Resolution::Resolved(to_link(mention, candidate)),
        Disambiguation::TieBroken { chosen, survivors } => {
            // First-seen wins among equals; team recency is not considered
            tracing::warn!(
                mention = %mention.text,
                entity_type = %mention.entity_type,
                chosen = %chosen.entity.id(),
                survivors,
                "Ambiguous match settled by tie-break"
            );
            Resolution::Ambiguous {
                link: to_link(mention, chosen),
                survivors,
            }
        }
        Disambiguation::NoMatch => {
            tracing::debug!(
                mention = %mention.text,
                entity_type = %mention.entity_type,
                "No match"
            );
            Resolution::Unresolved
        }
    }
}

/// Match confidence scaled by the extractor's confidence, when it gave one.
fn link_confidence(mention: &Mention, candidate: &Candidate) -> f64 {
    match mention.confidence {
        Some(extracted) => clamp_confidence(candidate.confidence * extracted),
        None => candidate.confidence,
    }
}

fn to_link(mention: &Mention, candidate: Candidate) -> ResolvedLink {
    let confidence = link_confidence(mention, &candidate);
    let mut link = ResolvedLink::new(
        mention.entity_type,
        candidate.entity.id(),
        mention.text.clone(),
        candidate.matched_name,
        confidence,
    );
    link.is_primary = mention.is_primary;
    link.rank = mention.rank;
    link.position = mention.position.clone();
    link.team_abbr = mention.team_abbr.clone();
    link.team_name = mention.team_name.clone();
    link
}

/// Aggregate outcome counters for a fact or a batch.
///
/// `ambiguous` counts resolutions that needed a tie-break and is included in
/// `resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub resolved: usize,
    pub unresolved: usize,
    pub ambiguous: usize,
    pub rejected: usize,
    pub topics_accepted: usize,
    pub topics_rejected: usize,
}

impl ResolutionReport {
    pub fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Resolved(_) => self.resolved += 1,
            Resolution::Ambiguous { .. } => {
                self.resolved += 1;
                self.ambiguous += 1;
            }
            Resolution::Unresolved => self.unresolved += 1,
        }
    }

    /// Adds another report's counts into this one.
    pub fn absorb(&mut self, other: &ResolutionReport) {
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
        self.ambiguous += other.ambiguous;
        self.rejected += other.rejected;
        self.topics_accepted += other.topics_accepted;
        self.topics_rejected += other.topics_rejected;
    }
}
