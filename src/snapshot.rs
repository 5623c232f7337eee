//! Loading reference data and fact extractions from JSON files.
//!
//! Reference snapshots are plain JSON arrays of [`Player`], [`Team`] and
//! [`Game`] records. Fact input is a JSON array of [`FactExtraction`].

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::index::ReferenceIndex;
use crate::models::{Game, Player, Team};
use crate::services::FactExtraction;

/// Raw reference collections as read from disk.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
}

impl ReferenceSnapshot {
    /// Reads all three collections. A missing game path yields no games.
    pub fn load(players: &Path, teams: &Path, games: Option<&Path>) -> Result<Self, AppError> {
        let snapshot = Self {
            players: read_json(players)?,
            teams: read_json(teams)?,
            games: games.map(read_json).transpose()?.unwrap_or_default(),
        };
        tracing::debug!(
            players = snapshot.players.len(),
            teams = snapshot.teams.len(),
            games = snapshot.games.len(),
            "Read reference snapshot"
        );
        Ok(snapshot)
    }

    pub fn into_index(self) -> Result<ReferenceIndex, AppError> {
        Ok(ReferenceIndex::build(self.players, self.teams, self.games)?)
    }
}

/// Reads a JSON array of fact extractions.
pub fn load_facts(path: &Path) -> Result<Vec<FactExtraction>, AppError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AppError::Json {
        path: PathBuf::from(path),
        source,
    })
}
