//! Resolve subcommand - consolidate a batch of fact extractions.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use serde::Serialize;

use crate::config::Config;
use crate::context::Context;
use crate::error::AppError;
use crate::services::{BatchOutcome, EntityLinkRow, ResolutionReport, TopicRow};
use crate::snapshot::{load_facts, ReferenceSnapshot};

/// Resolve mentions and canonicalize topics for a batch of facts.
#[derive(Parser)]
pub struct ResolveCommand {
    /// JSON array of fact extractions.
    #[arg(long)]
    pub facts: PathBuf,

    /// Players snapshot (overrides `reference.players`).
    #[arg(long)]
    pub players: Option<PathBuf>,

    /// Teams snapshot (overrides `reference.teams`).
    #[arg(long)]
    pub teams: Option<PathBuf>,

    /// Games snapshot (overrides `reference.games`).
    #[arg(long)]
    pub games: Option<PathBuf>,

    /// Fuzzy score cutoff, 0-100 (overrides `matching.score_cutoff`).
    #[arg(long)]
    pub score_cutoff: Option<f64>,

    /// Emit flat link rows instead of per-fact knowledge.
    #[arg(long)]
    pub rows: bool,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Flat rows for the two link tables.
#[derive(Serialize)]
struct RowOutput {
    entity_links: Vec<EntityLinkRow>,
    topic_links: Vec<TopicRow>,
    report: ResolutionReport,
}

impl From<&BatchOutcome> for RowOutput {
    fn from(outcome: &BatchOutcome) -> Self {
        Self {
            entity_links: outcome.facts.iter().flat_map(|f| f.entity_rows()).collect(),
            topic_links: outcome.facts.iter().flat_map(|f| f.topic_rows()).collect(),
            report: outcome.report,
        }
    }
}

impl ResolveCommand {
    /// Run the resolve command.
    pub fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(cutoff) = self.score_cutoff {
            config.matching.score_cutoff = cutoff;
            config.validate()?;
        }

        let players = pick(&self.players, &config.reference.players, "players")?;
        let teams = pick(&self.teams, &config.reference.teams, "teams")?;
        let games = self.games.clone().or_else(|| config.reference.games.clone());

        let snapshot = ReferenceSnapshot::load(&players, &teams, games.as_deref())?;
        let context = Context::new(snapshot.into_index()?, config);

        let facts = load_facts(&self.facts)?;
        tracing::info!(
            facts = facts.len(),
            path = %self.facts.display(),
            score_cutoff = context.config.matching.score_cutoff,
            "Resolving facts"
        );

        let outcome = context.knowledge_service().consolidate_batch(&facts);
        let json = if self.rows {
            serde_json::to_string_pretty(&RowOutput::from(&outcome))?
        } else {
            serde_json::to_string_pretty(&outcome)?
        };

        match &self.output {
            Some(path) => write_output(path, &json)?,
            None => println!("{}", json),
        }
        Ok(())
    }
}

fn pick(
    flag: &Option<PathBuf>,
    configured: &Option<PathBuf>,
    name: &'static str,
) -> Result<PathBuf, AppError> {
    flag.clone()
        .or_else(|| configured.clone())
        .ok_or(AppError::MissingSnapshot(name))
}

fn write_output(path: &Path, json: &str) -> Result<(), AppError> {
    std::fs::write(path, json).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Wrote output");
    Ok(())
}
