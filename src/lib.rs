//! Badminton Ranking CLI Library
//!
//! A local cache-and-query tool for the weekly German badminton (DBV) ranking
//! spreadsheets: download them, index every week as a replaceable snapshot, and answer
//! player lookups, comparisons, fuzzy name searches and rank histories.
//!
//! ## Features
//!
//! - **Snapshot Store**: one SQLite snapshot per ranking week, atomically replaced on re-index
//! - **Age-Group Rank**: a player's rank among peers of the same age class
//! - **History**: per-player rank series across all stored weeks
//! - **Fuzzy Search**: weighted-ratio name matching over the newest snapshot
//! - **Acquisition**: ranking page scraping and spreadsheet download from the DBV site
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use badminton_cli::{Discipline, PlayerId, RankingDatabase};
//!
//! # fn example() -> badminton_cli::Result<()> {
//! let db = RankingDatabase::open_default()?;
//! for entry in db.get_players(None, Some(Discipline::HE), Some(10), true)? {
//!     println!("{} {} {:?}", entry.rank, entry.full_name(), entry.age_group_rank);
//! }
//! let history = db.get_player_history(&PlayerId::new("01-150083"), None)?;
//! println!("{} weeks of history", history.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export BADMINTON_CLI_DATA_DIR=/tmp/rankings   # database and spreadsheets
//! export BADMINTON_CLI_CONFIG=/tmp/poi.toml     # player-of-interest config file
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dbv;
pub mod error;
pub mod output;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Discipline, PlayerId, RankingWeek, WeekSpan};
pub use error::{RankingError, Result};
pub use search::{FuzzyIndex, SearchMatch};
pub use storage::{Entry, HistoryPoint, RankingDatabase};

/// Overrides the data directory holding the database and downloaded spreadsheets
pub const DATA_DIR_ENV_VAR: &str = "BADMINTON_CLI_DATA_DIR";

/// Overrides the config file path
pub const CONFIG_ENV_VAR: &str = "BADMINTON_CLI_CONFIG";
