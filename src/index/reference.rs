//! Immutable snapshot of canonical players, teams and games.

use std::collections::{HashMap, HashSet};

use crate::error::ReferenceLoadError;
use crate::matching::{normalize, token_sort};
use crate::models::{CanonicalEntity, EntityType, Game, Player, Team};

/// One normalized name and every record filed under it.
#[derive(Debug, Clone)]
pub struct NameVariant {
    /// Normalized key.
    pub key: String,
    /// `key` with its tokens sorted, for fuzzy scoring.
    pub sorted: String,
    /// The name as first supplied, before normalization.
    pub name: String,
    /// Positions of the records in the owning collection, first-seen order.
    pub entries: Vec<usize>,
}

/// Normalized name variants of one entity type, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    variants: Vec<NameVariant>,
    lookup: HashMap<String, usize>,
}

impl NameTable {
    fn insert(&mut self, name: &str, entry: usize) {
        let key = normalize(name);
        if key.is_empty() {
            return;
        }
        match self.lookup.get(&key) {
            Some(&slot) => {
                let variant = &mut self.variants[slot];
                if !variant.entries.contains(&entry) {
                    variant.entries.push(entry);
                }
            }
            None => {
                self.lookup.insert(key.clone(), self.variants.len());
                self.variants.push(NameVariant {
                    sorted: token_sort(&key),
                    key,
                    name: name.trim().to_string(),
                    entries: vec![entry],
                });
            }
        }
    }

    /// Variant whose key equals an already-normalized text.
    pub fn exact(&self, key: &str) -> Option<&NameVariant> {
        self.lookup.get(key).map(|&slot| &self.variants[slot])
    }

    pub fn variants(&self) -> &[NameVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Record counts for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub players: usize,
    pub teams: usize,
    pub games: usize,
    pub name_variants: usize,
}

/// Canonical records plus a name-variant table per entity type.
///
/// Built once from bulk reads and never mutated afterwards. A refresh builds a
/// new index; see [`crate::index::SharedIndex`] for swapping it in.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    players: Vec<Player>,
    teams: Vec<Team>,
    games: Vec<Game>,
    player_names: NameTable,
    team_names: NameTable,
    game_names: NameTable,
    team_by_abbr: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// An index with no records. Every resolution against it misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an index from complete reference collections.
    ///
    /// Empty collections are fine. A blank or repeated identifier, or a game
    /// without both teams, fails the whole build.
    pub fn build(
        players: Vec<Player>,
        teams: Vec<Team>,
        games: Vec<Game>,
    ) -> Result<Self, ReferenceLoadError> {
        check_identifiers(EntityType::Player, players.iter().map(|p| p.id.as_str()))?;
        check_identifiers(EntityType::Team, teams.iter().map(|t| t.abbr.as_str()))?;
        check_identifiers(EntityType::Game, games.iter().map(|g| g.id.as_str()))?;
        for game in &games {
            if game.home_team.trim().is_empty() {
                return Err(ReferenceLoadError::MissingGameTeam {
                    game_id: game.id.clone(),
                    side: "home",
                });
            }
            if game.away_team.trim().is_empty() {
                return Err(ReferenceLoadError::MissingGameTeam {
                    game_id: game.id.clone(),
                    side: "away",
                });
            }
        }

        let mut index = Self {
            team_by_abbr: teams
                .iter()
                .enumerate()
                .map(|(i, t)| (t.abbr.trim().to_uppercase(), i))
                .collect(),
            players,
            teams,
            games,
            ..Self::default()
        };
        index.index_players();
        index.index_teams();
        index.index_games();

        let stats = index.stats();
        tracing::info!(
            players = stats.players,
            teams = stats.teams,
            games = stats.games,
            name_variants = stats.name_variants,
            "Built reference index"
        );
        Ok(index)
    }

    /// Builds a replacement index from fresh collections. `self` is left
    /// untouched whether or not the build succeeds.
    pub fn reload(
        &self,
        players: Vec<Player>,
        teams: Vec<Team>,
        games: Vec<Game>,
    ) -> Result<Self, ReferenceLoadError> {
        let previous = self.stats();
        let next = Self::build(players, teams, games)?;
        tracing::info!(
            previous_variants = previous.name_variants,
            name_variants = next.stats().name_variants,
            "Reloaded reference index"
        );
        Ok(next)
    }

    fn index_players(&mut self) {
        for (i, player) in self.players.iter().enumerate() {
            let table = &mut self.player_names;
            table.insert(&player.display_name, i);
            let first = player.first_name.as_deref().unwrap_or_default();
            let last = player.last_name.as_deref().unwrap_or_default();
            table.insert(&format!("{first} {last}"), i);
            table.insert(last, i);
            if let Some(short) = &player.short_name {
                table.insert(short, i);
            }
            if let Some(football) = &player.football_name {
                table.insert(football, i);
                if !last.trim().is_empty() {
                    table.insert(&format!("{football} {last}"), i);
                }
            }
        }
    }

    fn index_teams(&mut self) {
        for (i, team) in self.teams.iter().enumerate() {
            let table = &mut self.team_names;
            table.insert(&team.full_name, i);
            table.insert(&team.nickname, i);
            table.insert(&team.abbr, i);
            if let Some(location) = team.location() {
                table.insert(location, i);
            }
        }
    }

    fn index_games(&mut self) {
        for (i, game) in self.games.iter().enumerate() {
            let table = &mut self.game_names;
            table.insert(&game.id, i);

            let away = team_forms(&self.teams, &self.team_by_abbr, &game.away_team);
            let home = team_forms(&self.teams, &self.team_by_abbr, &game.home_team);
            for (a, h) in away.iter().zip(home.iter()) {
                let (Some(a), Some(h)) = (a, h) else {
                    continue;
                };
                table.insert(&format!("{a} at {h}"), i);
                table.insert(&format!("{a} @ {h}"), i);
                table.insert(&format!("{a} vs {h}"), i);
                table.insert(&format!("{h} vs {a}"), i);
            }
        }
    }

    /// Name table for an entity type.
    pub fn names(&self, entity_type: EntityType) -> &NameTable {
        match entity_type {
            EntityType::Player => &self.player_names,
            EntityType::Team => &self.team_names,
            EntityType::Game => &self.game_names,
        }
    }

    /// Record at `position` in the collection for `entity_type`.
    pub fn entity(&self, entity_type: EntityType, position: usize) -> Option<CanonicalEntity> {
        match entity_type {
            EntityType::Player => self.players.get(position).cloned().map(CanonicalEntity::Player),
            EntityType::Team => self.teams.get(position).cloned().map(CanonicalEntity::Team),
            EntityType::Game => self.games.get(position).cloned().map(CanonicalEntity::Game),
        }
    }

    /// Team by abbreviation, case-insensitively.
    pub fn team(&self, abbr: &str) -> Option<&Team> {
        self.team_by_abbr
            .get(&abbr.trim().to_uppercase())
            .map(|&i| &self.teams[i])
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.teams.is_empty() && self.games.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            players: self.players.len(),
            teams: self.teams.len(),
            games: self.games.len(),
            name_variants: self.player_names.len() + self.team_names.len() + self.game_names.len(),
        }
    }
}

fn check_identifiers<'a>(
    entity_type: EntityType,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ReferenceLoadError> {
    let mut seen = HashSet::new();
    for (position, id) in ids.enumerate() {
        let id = id.trim();
        if id.is_empty() {
            return Err(ReferenceLoadError::MissingIdentifier {
                entity_type,
                position,
            });
        }
        if !seen.insert(id.to_lowercase()) {
            return Err(ReferenceLoadError::DuplicateIdentifier {
                entity_type,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Abbreviation, nickname and full name of a team, aligned so that the same
/// slot of two teams holds the same kind of name. Unknown teams only have an
/// abbreviation.
fn team_forms(teams: &[Team], by_abbr: &HashMap<String, usize>, abbr: &str) -> [Option<String>; 3] {
    let team = by_abbr.get(&abbr.trim().to_uppercase()).map(|&i| &teams[i]);
    [
        Some(abbr.trim().to_string()),
        team.map(|t| t.nickname.clone()),
        team.map(|t| t.full_name.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(abbr: &str, full: &str, nick: &str) -> Team {
        Team {
            abbr: abbr.to_string(),
            full_name: full.to_string(),
            nickname: nick.to_string(),
        }
    }

    fn player(id: &str, first: &str, last: &str) -> Player {
        Player {
            id: id.to_string(),
            display_name: format!("{first} {last}"),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            short_name: None,
            football_name: None,
            position: None,
            team_abbr: None,
        }
    }

    #[test]
    fn test_empty_input_builds_empty_index() {
        let index = ReferenceIndex::build(vec![], vec![], vec![]).unwrap();
        assert!(index.is_empty());
        assert!(index.names(EntityType::Player).is_empty());
        assert!(index.team("KC").is_none());
    }

    #[test]
    fn test_player_variants() {
        let mut mahomes = player("00-0033873", "Patrick", "Mahomes");
        mahomes.short_name = Some("P.Mahomes".to_string());
        mahomes.football_name = Some("Pat".to_string());
        let index = ReferenceIndex::build(vec![mahomes], vec![], vec![]).unwrap();

        let names = index.names(EntityType::Player);
        for key in ["patrick mahomes", "mahomes", "p.mahomes", "pat", "pat mahomes"] {
            let variant = names.exact(key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(variant.entries, vec![0]);
        }
        // display name and first+last collapse into one variant
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_shared_name_keeps_every_record() {
        let index = ReferenceIndex::build(
            vec![player("a", "Josh", "Allen"), player("b", "Josh", "Allen")],
            vec![],
            vec![],
        )
        .unwrap();
        let variant = index.names(EntityType::Player).exact("josh allen").unwrap();
        assert_eq!(variant.entries, vec![0, 1]);
    }

    #[test]
    fn test_team_variants_include_location() {
        let index =
            ReferenceIndex::build(vec![], vec![team("KC", "Kansas City Chiefs", "Chiefs")], vec![])
                .unwrap();
        let names = index.names(EntityType::Team);
        assert!(names.exact("kansas city chiefs").is_some());
        assert!(names.exact("chiefs").is_some());
        assert!(names.exact("kc").is_some());
        assert!(names.exact("kansas city").is_some());
        assert_eq!(index.team("kc").map(|t| t.nickname.as_str()), Some("Chiefs"));
    }

    #[test]
    fn test_game_matchup_variants() {
        let game = Game {
            id: "2024_01_BAL_KC".to_string(),
            season: 2024,
            week: 1,
            home_team: "KC".to_string(),
            away_team: "BAL".to_string(),
        };
        let index = ReferenceIndex::build(
            vec![],
            vec![
                team("KC", "Kansas City Chiefs", "Chiefs"),
                team("BAL", "Baltimore Ravens", "Ravens"),
            ],
            vec![game],
        )
        .unwrap();
        let names = index.names(EntityType::Game);
        for key in [
            "2024_01_bal_kc",
            "bal at kc",
            "ravens @ chiefs",
            "chiefs vs ravens",
            "baltimore ravens vs kansas city chiefs",
        ] {
            assert!(names.exact(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_missing_identifier_is_fatal() {
        let err =
            ReferenceIndex::build(vec![player("  ", "No", "Id")], vec![], vec![]).unwrap_err();
        assert_eq!(
            err,
            ReferenceLoadError::MissingIdentifier {
                entity_type: EntityType::Player,
                position: 0
            }
        );
    }

    #[test]
    fn test_duplicate_identifier_is_fatal() {
        let err = ReferenceIndex::build(
            vec![],
            vec![team("KC", "Kansas City Chiefs", "Chiefs"), team("kc", "Chiefs", "Chiefs")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ReferenceLoadError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn test_game_without_team_is_fatal() {
        let game = Game {
            id: "g1".to_string(),
            season: 2024,
            week: 1,
            home_team: "KC".to_string(),
            away_team: String::new(),
        };
        let err = ReferenceIndex::build(vec![], vec![], vec![game]).unwrap_err();
        assert_eq!(
            err,
            ReferenceLoadError::MissingGameTeam {
                game_id: "g1".to_string(),
                side: "away"
            }
        );
    }

    #[test]
    fn test_reload_leaves_original_untouched() {
        let original = ReferenceIndex::build(vec![player("a", "Josh", "Allen")], vec![], vec![])
            .unwrap();
        let failed = original.reload(vec![player("", "No", "Id")], vec![], vec![]);
        assert!(failed.is_err());
        assert_eq!(original.players().len(), 1);

        let next = original.reload(vec![], vec![], vec![]).unwrap();
        assert!(next.is_empty());
        assert_eq!(original.players().len(), 1);
    }
}
