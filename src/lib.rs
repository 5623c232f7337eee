//! gridlink - NFL entity resolution and knowledge consolidation
//!
//! Resolves player, team and game mentions produced by an upstream extractor
//! to canonical reference records, maps freeform topics onto a closed
//! taxonomy, and collapses duplicates per fact.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod index;
pub mod matching;
pub mod models;
pub mod services;
pub mod snapshot;
