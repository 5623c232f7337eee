//! Application context shared by the commands.

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::index::{ReferenceIndex, SharedIndex};
use crate::matching::MatchEngine;
use crate::services::KnowledgeService;
use crate::snapshot::ReferenceSnapshot;

/// Root application context.
#[derive(Clone)]
pub struct Context {
    /// Live reference index.
    pub index: SharedIndex,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(index: ReferenceIndex, config: Config) -> Self {
        Self {
            index: SharedIndex::new(index),
            config: Arc::new(config),
        }
    }

    pub fn engine(&self) -> MatchEngine {
        MatchEngine::new(self.config.matching.score_cutoff)
    }

    pub fn knowledge_service(&self) -> KnowledgeService {
        KnowledgeService::new(self.index.clone(), self.engine())
    }

    /// Rebuilds the index from a fresh snapshot. On failure the current index
    /// stays live.
    pub fn reload(&self, snapshot: ReferenceSnapshot) -> Result<Arc<ReferenceIndex>, AppError> {
        let index = self
            .index
            .reload(snapshot.players, snapshot.teams, snapshot.games)?;
        Ok(index)
    }
}
