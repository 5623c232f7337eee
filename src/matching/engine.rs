//! Exact and fuzzy matching of mention text against the reference index.

use crate::index::{team_alias, NameVariant, ReferenceIndex};
use crate::models::{CanonicalEntity, EntityType};

use super::normalize::{normalize, token_sort, token_sort_ratio};

/// Minimum fuzzy score (0-100) for a match to count.
pub const DEFAULT_SCORE_CUTOFF: f64 = 70.0;

/// How a candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Alias,
    Exact,
    Fuzzy,
}

/// A canonical record a mention may refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub entity: CanonicalEntity,
    /// The name variant that matched, as originally written.
    pub matched_name: String,
    /// In `[0, 1]`; `1.0` for alias and exact matches.
    pub confidence: f64,
    pub kind: MatchKind,
}

/// Resolves mention text to scored candidates.
///
/// Lookup order is alias table (teams only), then exact normalized name, then
/// the single best fuzzy variant if it scores at least the cutoff. Nothing
/// found is an empty result, never an error.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    score_cutoff: f64,
}

impl MatchEngine {
    /// Creates an engine with a fuzzy cutoff on a 0-100 scale.
    pub fn new(score_cutoff: f64) -> Self {
        Self {
            score_cutoff: score_cutoff.clamp(0.0, 100.0),
        }
    }

    pub fn score_cutoff(&self) -> f64 {
        self.score_cutoff
    }

    pub fn resolve_candidates(
        &self,
        text: &str,
        entity_type: EntityType,
        index: &ReferenceIndex,
    ) -> Vec<Candidate> {
        let key = normalize(text);
        if key.is_empty() {
            return Vec::new();
        }

        if entity_type == EntityType::Team {
            if let Some(team) = team_alias(&key).and_then(|abbr| index.team(abbr)) {
                return vec![Candidate {
                    matched_name: team.full_name.clone(),
                    entity: CanonicalEntity::Team(team.clone()),
                    confidence: 1.0,
                    kind: MatchKind::Alias,
                }];
            }
        }

        let names = index.names(entity_type);
        if let Some(variant) = names.exact(&key) {
            return expand(index, entity_type, variant, 1.0, MatchKind::Exact);
        }

        let sorted = token_sort(&key);
        let mut best: Option<(&NameVariant, f64)> = None;
        for variant in names.variants() {
            let score = token_sort_ratio(&sorted, &variant.sorted);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((variant, score));
            }
        }

        match best {
            Some((variant, score)) if score >= self.score_cutoff => {
                tracing::debug!(
                    mention = %text,
                    matched = %variant.name,
                    score,
                    "Fuzzy match"
                );
                expand(index, entity_type, variant, score / 100.0, MatchKind::Fuzzy)
            }
            _ => Vec::new(),
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CUTOFF)
    }
}

fn expand(
    index: &ReferenceIndex,
    entity_type: EntityType,
    variant: &NameVariant,
    confidence: f64,
    kind: MatchKind,
) -> Vec<Candidate> {
    variant
        .entries
        .iter()
        .filter_map(|&position| index.entity(entity_type, position))
        .map(|entity| Candidate {
            entity,
            matched_name: variant.name.clone(),
            confidence,
            kind,
        })
        .collect()
}
