//! Approximate player-name lookup over one snapshot.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::scorer::{default_process, weighted_ratio_processed};
use crate::cli::types::{PlayerId, RankingWeek};
use crate::storage::{Entry, RankingDatabase, UniquePlayer};
use crate::Result;

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_SCORE_CUTOFF: f64 = 50.0;

/// One fuzzy hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub score: f64,
}

impl SearchMatch {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Index of distinct players, matched on "first last".
///
/// Built once per snapshot. Rebuild after the snapshot changes.
#[derive(Debug, Clone, Default)]
pub struct FuzzyIndex {
    players: Vec<UniquePlayer>,
    processed: Vec<String>,
}

impl FuzzyIndex {
    pub fn new(players: Vec<UniquePlayer>) -> Self {
        let processed = players
            .iter()
            .map(|p| default_process(&p.full_name()))
            .collect();
        Self { players, processed }
    }

    /// Index the distinct players of `week` (current week when `None`)
    pub fn build(db: &RankingDatabase, week: Option<RankingWeek>) -> Result<Self> {
        let players = db.get_unique_players(week)?;
        debug!(players = players.len(), "built fuzzy index");
        Ok(Self::new(players))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Best matches with `score >= score_cutoff`, highest first, at most `limit`.
    ///
    /// Equal scores keep index order.
    pub fn search(&self, query: &str, limit: usize, score_cutoff: f64) -> Vec<SearchMatch> {
        let query = default_process(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .processed
            .par_iter()
            .enumerate()
            .map(|(idx, choice)| (idx, weighted_ratio_processed(&query, choice)))
            .filter(|(_, score)| *score >= score_cutoff)
            .collect();

        // stable: ties stay in index order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(idx, score)| {
                let player = &self.players[idx];
                SearchMatch {
                    player_id: player.player_id.clone(),
                    first_name: player.first_name.clone(),
                    last_name: player.last_name.clone(),
                    score,
                }
            })
            .collect()
    }

    /// Fuzzy matches paired with their entries in `week`.
    ///
    /// Matches whose player no longer has entries in that week are dropped.
    pub fn search_with_details(
        &self,
        db: &RankingDatabase,
        query: &str,
        week: Option<RankingWeek>,
        limit: usize,
        score_cutoff: f64,
    ) -> Result<Vec<(SearchMatch, Vec<Entry>)>> {
        let mut results = Vec::new();
        for hit in self.search(query, limit, score_cutoff) {
            let entries = db.get_player_by_id(&hit.player_id, week, false)?;
            if !entries.is_empty() {
                results.push((hit, entries));
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, first: &str, last: &str) -> UniquePlayer {
        UniquePlayer {
            player_id: PlayerId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn index() -> FuzzyIndex {
        FuzzyIndex::new(vec![
            player("01-1", "Max", "Mustermann"),
            player("01-2", "Erika", "Schmidt"),
            player("01-3", "Maximilian", "Muster"),
            player("01-4", "Max", "Mustermann"),
        ])
    }

    #[test]
    fn test_partial_name_ranks_first() {
        let hits = index().search("Max Mustr", DEFAULT_LIMIT, DEFAULT_SCORE_CUTOFF);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].player_id.as_str(), "01-1");
        assert!(hits.iter().all(|h| h.player_id.as_str() != "01-2"));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_index_order() {
        let hits = index().search("max mustermann", DEFAULT_LIMIT, 99.0);
        let ids: Vec<&str> = hits.iter().map(|h| h.player_id.as_str()).collect();
        assert_eq!(ids, vec!["01-1", "01-4"]);
    }

    #[test]
    fn test_limit_and_cutoff() {
        let idx = index();
        assert_eq!(idx.search("Max", 1, 0.0).len(), 1);
        assert!(idx.search("Max", 10, 101.0).is_empty());
        assert!(idx.search("   ", 10, 0.0).is_empty());
        assert!(FuzzyIndex::default().search("Max", 10, 0.0).is_empty());
    }

    #[test]
    fn test_word_order_and_case() {
        let hits = index().search("SCHMIDT erika", 3, DEFAULT_SCORE_CUTOFF);
        assert_eq!(hits[0].player_id.as_str(), "01-2");
        assert_eq!(hits[0].full_name(), "Erika Schmidt");
    }
}
