//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/gridlink/config.toml` (XDG) or platform config dir
//! 2. Project config: `.gridlink.toml`
//! 3. Environment variables: `GRIDLINK_*`, with `__` separating sections
//!    (`GRIDLINK_MATCHING__SCORE_CUTOFF=80`)
//!
//! Every key has a default, so no file is required.
//!
//! ```toml
//! [matching]
//! score_cutoff = 70
//!
//! [reference]
//! players = "data/players.json"
//! teams = "data/teams.json"
//! games = "data/games.json"
//! ```

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::matching::DEFAULT_SCORE_CUTOFF;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub reference: ReferenceConfig,
}

/// Matching thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum fuzzy score on a 0-100 scale.
    pub score_cutoff: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
        }
    }
}

/// Default locations of the reference snapshots.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub players: Option<PathBuf>,
    pub teams: Option<PathBuf>,
    pub games: Option<PathBuf>,
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, AppError> {
        Self::from_figment(Self::figment(&Self::user_config_path(), Path::new(".gridlink.toml")))
    }

    /// The layered provider stack, with explicit file locations.
    pub fn figment(user_config: &Path, project_config: &Path) -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("GRIDLINK_").split("__"))
    }

    /// Extracts and validates a config.
    pub fn from_figment(figment: Figment) -> Result<Self, AppError> {
        let config: Config = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let cutoff = self.matching.score_cutoff;
        if !cutoff.is_finite() || !(0.0..=100.0).contains(&cutoff) {
            return Err(AppError::InvalidConfig(format!(
                "matching.score_cutoff must be between 0 and 100, got {}",
                cutoff
            )));
        }
        Ok(())
    }

    /// User config path: ~/.config/gridlink/config.toml (XDG) or platform config dir.
    pub fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("gridlink").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("gridlink").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.matching.score_cutoff, 70.0);
        assert!(config.reference.players.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_cutoff_is_rejected() {
        let mut config = Config::default();
        config.matching.score_cutoff = 120.0;
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
        config.matching.score_cutoff = f64::NAN;
        assert!(config.validate().is_err());
    }
}
