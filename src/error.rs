//! Error types for the badminton ranking CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankingError>;

#[derive(Error, Debug)]
pub enum RankingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Could not parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Could not write config file: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Could not determine the {kind} directory")]
    MissingDirectory { kind: &'static str },

    #[error("Invalid week '{input}' (expected e.g. KW2, 2026-KW02 or 2)")]
    InvalidWeek { input: String },

    #[error("Invalid duration '{input}' (expected e.g. 12w, 6m or 1y)")]
    InvalidDuration { input: String },

    #[error("Invalid discipline: {code}")]
    InvalidDiscipline { code: String },

    #[error("Invalid player ID: '{input}'")]
    InvalidPlayerId { input: String },

    #[error("No player ID given and no player of interest set (use `poi set <id>`)")]
    MissingPlayerId,

    #[error("Ranking source returned no data: {what}")]
    NoData { what: String },
}

impl RankingError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RankingError::Http(_) | RankingError::NoData { .. } => true,
            RankingError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Storage faults: query results can no longer be trusted, so callers must stop
    /// instead of skipping the failed item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RankingError::Database(_))
    }

    /// Whether this is a rejected user input rather than a runtime failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RankingError::InvalidWeek { .. }
                | RankingError::InvalidDuration { .. }
                | RankingError::InvalidDiscipline { .. }
                | RankingError::InvalidPlayerId { .. }
                | RankingError::MissingPlayerId
        )
    }
}
