//! Mention-to-record matching.

mod disambiguate;
mod engine;
mod normalize;

pub use disambiguate::{select_best, Disambiguation, Disambiguator};
pub use engine::{Candidate, MatchEngine, MatchKind, DEFAULT_SCORE_CUTOFF};
pub use normalize::{normalize, token_sort, token_sort_ratio};
