//! Core utilities for the badminton ranking CLI
//!
//! - `cache`: in-memory age-group point cache used by the store
//! - `paths`: data/config locations and file helpers

pub mod cache;
pub mod paths;

// Re-export commonly used items for convenience
pub use cache::{rank_within, AgeGroupCache, AgeGroupKey};
pub use paths::{config_path, data_dir, database_path, excel_dir, try_read_to_string, write_string};
