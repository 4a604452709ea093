//! Database schema and connection management

use crate::core::{cache::AgeGroupCache, paths::database_path};
use crate::Result;
use rusqlite::{functions::FunctionFlags, Connection};
use std::cell::RefCell;
use std::path::Path;
use tracing::debug;

/// Durable schema shared with other tooling: one row per indexed week, one row per
/// player-discipline entry pointing at its week.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ranking_weeks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year INTEGER NOT NULL,
    week INTEGER NOT NULL,
    filename TEXT NOT NULL,
    UNIQUE(year, week)
);

CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ranking_week_id INTEGER NOT NULL,
    discipline TEXT NOT NULL,
    rank INTEGER NOT NULL,
    federation_rank INTEGER NOT NULL,
    last_name TEXT NOT NULL,
    first_name TEXT NOT NULL,
    gender TEXT NOT NULL,
    player_id TEXT NOT NULL,
    birth_year INTEGER NOT NULL,
    age_class_1 TEXT NOT NULL,
    age_class_2 TEXT NOT NULL,
    points REAL NOT NULL,
    tournaments INTEGER NOT NULL,
    club TEXT NOT NULL,
    district TEXT NOT NULL,
    FOREIGN KEY (ranking_week_id) REFERENCES ranking_weeks(id)
);

CREATE INDEX IF NOT EXISTS idx_players_player_id ON players(player_id);
CREATE INDEX IF NOT EXISTS idx_players_name ON players(last_name, first_name);
CREATE INDEX IF NOT EXISTS idx_players_discipline ON players(discipline);
CREATE INDEX IF NOT EXISTS idx_players_rank ON players(rank);
CREATE INDEX IF NOT EXISTS idx_players_ranking_week ON players(ranking_week_id);
";

/// Snapshot store over the weekly rankings.
///
/// Not `Sync`: the store is meant for one logical thread per process.
pub struct RankingDatabase {
    pub(crate) conn: Connection,
    pub(crate) age_cache: RefCell<AgeGroupCache>,
}

impl RankingDatabase {
    /// Open the database at the default data location, creating it if needed
    pub fn open_default() -> Result<Self> {
        let db_path = database_path()?;
        Self::open(&db_path)
    }

    /// Open (or create) a database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "opening ranking database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Fresh in-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        let mut db = Self {
            conn,
            age_cache: RefCell::new(AgeGroupCache::default()),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}

/// SQL name of the Unicode lower-casing function; SQLite's own `lower` and `LIKE`
/// only fold ASCII letters.
pub(crate) const FOLD_CASE_FN: &str = "fold_case";

fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        FOLD_CASE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}
