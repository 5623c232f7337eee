//! Picks one player among same-name candidates using position and team hints.
//!
//! A hint only filters when both the mention supplies it and the canonical
//! record has the field populated. Missing reference data never excludes a
//! candidate.

use std::cmp::Ordering;

use crate::index::ReferenceIndex;
use crate::models::{EntityType, PlayerHints};

use super::engine::{Candidate, MatchEngine};

/// Outcome of narrowing a candidate set down to one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Disambiguation {
    /// Exactly one candidate survived.
    Unique(Candidate),
    /// Several survived; the highest-confidence, first-seen one was taken.
    TieBroken { chosen: Candidate, survivors: usize },
    /// Nothing survived.
    NoMatch,
}

impl Disambiguation {
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            Disambiguation::Unique(c) | Disambiguation::TieBroken { chosen: c, .. } => Some(c),
            Disambiguation::NoMatch => None,
        }
    }

    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            Disambiguation::Unique(c) | Disambiguation::TieBroken { chosen: c, .. } => Some(c),
            Disambiguation::NoMatch => None,
        }
    }

    pub fn is_tie_broken(&self) -> bool {
        matches!(self, Disambiguation::TieBroken { .. })
    }
}

/// Applies player hints against a reference index.
pub struct Disambiguator<'a> {
    index: &'a ReferenceIndex,
    engine: &'a MatchEngine,
}

impl<'a> Disambiguator<'a> {
    /// `engine` is used to turn a team-name hint into abbreviations.
    pub fn new(index: &'a ReferenceIndex, engine: &'a MatchEngine) -> Self {
        Self { index, engine }
    }

    pub fn disambiguate(&self, candidates: Vec<Candidate>, hints: &PlayerHints) -> Disambiguation {
        let position = hints.position.as_deref().map(position_code);
        let teams = self.team_filter(hints);

        let survivors = candidates
            .into_iter()
            .filter(|candidate| {
                let Some(player) = candidate.entity.as_player() else {
                    return true;
                };
                let position_ok = match (&position, populated(player.position.as_deref())) {
                    (Some(wanted), Some(actual)) => positions_match(wanted, &position_code(actual)),
                    _ => true,
                };
                let team_ok = match (&teams, populated(player.team_abbr.as_deref())) {
                    (Some(wanted), Some(actual)) => wanted.contains(&actual.to_uppercase()),
                    _ => true,
                };
                position_ok && team_ok
            })
            .collect();

        select_best(survivors)
    }

    /// Team abbreviations the hint allows, or `None` when there is no usable
    /// team hint.
    fn team_filter(&self, hints: &PlayerHints) -> Option<Vec<String>> {
        if let Some(abbr) = &hints.team_abbr {
            return Some(vec![abbr.trim().to_uppercase()]);
        }
        let name = hints.team_name.as_deref()?;
        let abbrs: Vec<String> = self
            .engine
            .resolve_candidates(name, EntityType::Team, self.index)
            .iter()
            .map(|c| c.entity.id().to_uppercase())
            .collect();
        if abbrs.is_empty() {
            tracing::debug!(team_name = %name, "Dropping unresolvable team hint");
            return None;
        }
        Some(abbrs)
    }
}

/// Deterministic tie-break: highest confidence wins, first-seen among equals.
pub fn select_best(mut candidates: Vec<Candidate>) -> Disambiguation {
    match candidates.len() {
        0 => Disambiguation::NoMatch,
        1 => Disambiguation::Unique(candidates.remove(0)),
        survivors => {
            candidates.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal)
            });
            Disambiguation::TieBroken {
                chosen: candidates.remove(0),
                survivors,
            }
        }
    }
}

fn populated(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Maps spelled-out positions onto roster codes; codes pass through
/// uppercased.
fn position_code(position: &str) -> String {
    let code = match position.trim().to_lowercase().as_str() {
        "quarterback" => "QB",
        "running back" | "halfback" => "RB",
        "fullback" => "FB",
        "wide receiver" | "receiver" => "WR",
        "tight end" => "TE",
        "offensive lineman" | "offensive line" => "OL",
        "offensive tackle" | "tackle" => "T",
        "guard" => "G",
        "center" => "C",
        "defensive lineman" => "DL",
        "defensive end" => "DE",
        "defensive tackle" => "DT",
        "nose tackle" => "NT",
        "edge rusher" | "edge" => "EDGE",
        "linebacker" => "LB",
        "inside linebacker" => "ILB",
        "outside linebacker" => "OLB",
        "middle linebacker" => "MLB",
        "cornerback" | "corner" => "CB",
        "safety" => "S",
        "free safety" => "FS",
        "strong safety" => "SS",
        "defensive back" => "DB",
        "kicker" | "placekicker" => "K",
        "punter" => "P",
        "long snapper" => "LS",
        other => return other.to_uppercase(),
    };
    code.to_string()
}

fn position_group(code: &str) -> Option<&'static str> {
    match code {
        "RB" | "HB" | "FB" => Some("RB"),
        "OL" | "T" | "OT" | "G" | "OG" | "C" | "OC" => Some("OL"),
        "DL" | "DE" | "DT" | "NT" | "EDGE" => Some("DL"),
        "LB" | "ILB" | "OLB" | "MLB" => Some("LB"),
        "DB" | "CB" | "S" | "FS" | "SS" | "SAF" => Some("DB"),
        _ => None,
    }
}

fn positions_match(a: &str, b: &str) -> bool {
    a == b || matches!((position_group(a), position_group(b)), (Some(x), Some(y)) if x == y)
}
