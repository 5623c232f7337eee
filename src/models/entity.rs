//! Canonical reference records that mentions resolve against.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of entity a mention can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Player,
    Team,
    Game,
}

impl EntityType {
    /// Returns a static slice of all entity types.
    pub fn all() -> &'static [EntityType] {
        &[EntityType::Player, EntityType::Team, EntityType::Game]
    }

    /// Lowercase name used in storage keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Player => "player",
            EntityType::Team => "team",
            EntityType::Game => "game",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" | "players" => Ok(EntityType::Player),
            "team" | "teams" => Ok(EntityType::Team),
            "game" | "games" => Ok(EntityType::Game),
            _ => Err(format!(
                "Invalid entity type '{}'. Valid values: player, team, game",
                s
            )),
        }
    }
}

/// A rostered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable player identifier (e.g. a GSIS id).
    pub id: String,
    /// Name as usually printed ("Patrick Mahomes").
    pub display_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Abbreviated form ("P.Mahomes").
    #[serde(default)]
    pub short_name: Option<String>,
    /// Name the player goes by on the field ("Pat").
    #[serde(default)]
    pub football_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Current team abbreviation.
    #[serde(default)]
    pub team_abbr: Option<String>,
}

/// An NFL franchise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Abbreviation ("KC"), the team's identifier.
    pub abbr: String,
    /// Full name ("Kansas City Chiefs").
    pub full_name: String,
    /// Nickname ("Chiefs").
    pub nickname: String,
}

impl Team {
    /// The location part of the full name ("Kansas City"), if the full name
    /// ends with the nickname.
    pub fn location(&self) -> Option<&str> {
        let location = self
            .full_name
            .trim()
            .strip_suffix(self.nickname.trim())?
            .trim();
        (!location.is_empty()).then_some(location)
    }
}

/// A scheduled or played game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Game identifier ("2024_01_BAL_KC").
    pub id: String,
    pub season: u16,
    pub week: u8,
    /// Home team abbreviation.
    pub home_team: String,
    /// Away team abbreviation.
    pub away_team: String,
}

/// A canonical record of any entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanonicalEntity {
    Player(Player),
    Team(Team),
    Game(Game),
}

impl CanonicalEntity {
    pub fn entity_type(&self) -> EntityType {
        match self {
            CanonicalEntity::Player(_) => EntityType::Player,
            CanonicalEntity::Team(_) => EntityType::Team,
            CanonicalEntity::Game(_) => EntityType::Game,
        }
    }

    /// Identifier persisted on resolved links: player id, team abbreviation
    /// or game id.
    pub fn id(&self) -> &str {
        match self {
            CanonicalEntity::Player(p) => &p.id,
            CanonicalEntity::Team(t) => &t.abbr,
            CanonicalEntity::Game(g) => &g.id,
        }
    }

    /// Human-readable name of the record.
    pub fn display_name(&self) -> String {
        match self {
            CanonicalEntity::Player(p) => p.display_name.clone(),
            CanonicalEntity::Team(t) => t.full_name.clone(),
            CanonicalEntity::Game(g) => format!("{} @ {}", g.away_team, g.home_team),
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            CanonicalEntity::Player(p) => Some(p),
            _ => None,
        }
    }
}
