//! Data models for the storage layer

use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use serde::{Deserialize, Serialize};

/// One player's standing in one discipline in one ranking week.
///
/// Identity is `(week, discipline, player_id)`; the week is implied by the snapshot
/// the entry was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub discipline: Discipline,
    pub rank: u32,
    pub federation_rank: u32,
    pub last_name: String,
    pub first_name: String,
    pub gender: String,
    pub player_id: PlayerId,
    pub birth_year: u16,
    pub age_class_1: String,
    /// Finer age bracket, the one age-group ranks are computed in
    pub age_class_2: String,
    /// Already divided by 1000
    pub points: f64,
    pub tournaments: u32,
    pub club: String,
    pub district: String,
    /// Filled in by queries that ask for it, never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group_rank: Option<u32>,
}

impl Entry {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "Last, First"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// One point of a player's rank history in a single discipline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub week: RankingWeek,
    pub rank: u32,
    pub points: f64,
}

/// Distinct player of a snapshot, the unit the fuzzy index works on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquePlayer {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
}

impl UniquePlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
