//! Process-wide handle to the current reference index.

use std::sync::Arc;

use parking_lot::RwLock;

use super::ReferenceIndex;
use crate::error::ReferenceLoadError;
use crate::models::{Game, Player, Team};

/// Shared pointer to the live [`ReferenceIndex`].
///
/// Readers take a snapshot (`Arc` clone) and work against it lock-free for as
/// long as they need. A reload builds the next index outside the lock and only
/// swaps the pointer once the build succeeded, so readers never see a partial
/// index and a failed reload keeps the previous one active.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<ReferenceIndex>>>,
}

impl SharedIndex {
    pub fn new(index: ReferenceIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// The index that is live right now.
    pub fn snapshot(&self) -> Arc<ReferenceIndex> {
        Arc::clone(&*self.current.read())
    }

    /// Builds a new index from fresh collections and swaps it in.
    pub fn reload(
        &self,
        players: Vec<Player>,
        teams: Vec<Team>,
        games: Vec<Game>,
    ) -> Result<Arc<ReferenceIndex>, ReferenceLoadError> {
        let next = self.snapshot().reload(players, teams, games)?;
        Ok(self.replace(next))
    }

    /// Swaps in an already-built index and returns it.
    pub fn replace(&self, index: ReferenceIndex) -> Arc<ReferenceIndex> {
        let next = Arc::new(index);
        *self.current.write() = Arc::clone(&next);
        next
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(ReferenceIndex::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(abbr: &str) -> Team {
        Team {
            abbr: abbr.to_string(),
            full_name: format!("{abbr} Full"),
            nickname: format!("{abbr} Nick"),
        }
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let shared =
            SharedIndex::new(ReferenceIndex::build(vec![], vec![team("KC")], vec![]).unwrap());
        let before = shared.snapshot();

        shared.reload(vec![], vec![team("BUF")], vec![]).unwrap();

        assert!(before.team("KC").is_some());
        assert!(before.team("BUF").is_none());
        let after = shared.snapshot();
        assert!(after.team("BUF").is_some());
        assert!(after.team("KC").is_none());
    }

    #[test]
    fn test_failed_reload_keeps_previous_index() {
        let shared =
            SharedIndex::new(ReferenceIndex::build(vec![], vec![team("KC")], vec![]).unwrap());

        let result = shared.reload(vec![], vec![team(" ")], vec![]);

        assert!(result.is_err());
        assert!(shared.snapshot().team("KC").is_some());
    }

    #[test]
    fn test_clones_share_the_pointer() {
        let shared = SharedIndex::default();
        let other = shared.clone();
        other.replace(ReferenceIndex::build(vec![], vec![team("SF")], vec![]).unwrap());
        assert!(shared.snapshot().team("SF").is_some());
    }
}
