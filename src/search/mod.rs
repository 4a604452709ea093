//! Fuzzy player search.

pub mod fuzzy;
pub mod scorer;

pub use fuzzy::{FuzzyIndex, SearchMatch, DEFAULT_LIMIT, DEFAULT_SCORE_CUTOFF};
pub use scorer::weighted_ratio;
