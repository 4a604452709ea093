//! Snapshot store for weekly rankings
//!
//! One SQLite database holds every indexed ranking week as an independent,
//! replaceable snapshot:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `query`: Typed, parameterized entry queries
//! - `queries`: Snapshot indexing and point-in-time lookups
//! - `history`: Rank history across snapshots

pub mod history;
pub mod models;
pub mod queries;
pub mod query;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use history::history_since;
pub use models::*;
pub use query::{EntryOrder, PlayerQuery};
pub use schema::RankingDatabase;
