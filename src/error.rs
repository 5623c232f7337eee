//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::EntityType;

/// Structurally invalid reference data. Fatal to whoever is building or
/// reloading the index; a failed reload leaves the previous index in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceLoadError {
    #[error("{entity_type} record #{position} has no identifier")]
    MissingIdentifier {
        entity_type: EntityType,
        position: usize,
    },

    #[error("Duplicate {entity_type} identifier: {id}")]
    DuplicateIdentifier { entity_type: EntityType, id: String },

    #[error("Game '{game_id}' has no {side} team")]
    MissingGameTeam {
        game_id: String,
        side: &'static str,
    },
}

/// Application-level errors for gridlink.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Reference load error: {0}")]
    ReferenceLoad(#[from] ReferenceLoadError),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Snapshot errors
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No {0} snapshot configured. Pass it on the command line or set it in [reference].")]
    MissingSnapshot(&'static str),
}
