//! Rank history reconstruction across snapshots.
//!
//! Snapshots share nothing but the player ID string, so a history is rebuilt by
//! scanning every week for the player's entries in one discipline.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{models::HistoryPoint, queries::discipline_column, schema::RankingDatabase};
use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use crate::core::cache::rank_within;
use crate::Result;

impl RankingDatabase {
    /// Chronological `(week, rank, points)` series for one player.
    ///
    /// Without an explicit discipline, the one with the player's best (lowest) rank in
    /// any week is used. This can differ from the discipline the player played in the
    /// earliest week; see [`RankingDatabase::first_week_discipline`].
    pub fn get_player_history(
        &self,
        player_id: &PlayerId,
        discipline: Option<Discipline>,
    ) -> Result<Vec<HistoryPoint>> {
        let discipline = match discipline {
            Some(discipline) => discipline,
            None => match self.best_discipline(player_id)? {
                Some(discipline) => discipline,
                None => return Ok(Vec::new()),
            },
        };

        let mut stmt = self.conn.prepare(
            "SELECT rw.year, rw.week, p.rank, p.points
             FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE p.player_id = ? AND p.discipline = ?
             ORDER BY rw.year, rw.week",
        )?;
        let rows = stmt.query_map(params![player_id.as_str(), discipline.code()], |row| {
            Ok(HistoryPoint {
                week: RankingWeek::new(row.get(0)?, row.get(1)?),
                rank: row.get(2)?,
                points: row.get(3)?,
            })
        })?;

        let mut history = Vec::new();
        for row in rows {
            history.push(row?);
        }
        debug!(player = %player_id, %discipline, points = history.len(), "rebuilt history");
        Ok(history)
    }

    /// Discipline of the player's best rank across all weeks, `None` if never ranked
    pub fn best_discipline(&self, player_id: &PlayerId) -> Result<Option<Discipline>> {
        let discipline = self
            .conn
            .query_row(
                "SELECT discipline, MIN(rank) AS best_rank
                 FROM players WHERE player_id = ?
                 GROUP BY discipline
                 ORDER BY best_rank, discipline
                 LIMIT 1",
                params![player_id.as_str()],
                |row| discipline_column(row, 0),
            )
            .optional()?;
        Ok(discipline)
    }

    /// Discipline of the player's first entry in the earliest week of `history`.
    ///
    /// Used for labelling charts; history selection itself goes by best rank.
    pub fn first_week_discipline(
        &self,
        player_id: &PlayerId,
        history: &[HistoryPoint],
    ) -> Result<Option<Discipline>> {
        let Some(first) = history.first() else {
            return Ok(None);
        };
        let entries = self.get_player_by_id(player_id, Some(first.week), false)?;
        Ok(entries.first().map(|e| e.discipline))
    }

    /// Replace each point's rank with the player's age-group rank in that week.
    ///
    /// Each point is ranked by its own points against the age group of that week.
    /// `progress` is called with `(done, total)` after every week. Read-only, so the
    /// loop can be abandoned between iterations.
    pub fn age_rank_history<F>(
        &self,
        player_id: &PlayerId,
        discipline: Discipline,
        age_class: &str,
        history: &[HistoryPoint],
        mut progress: F,
    ) -> Result<Vec<HistoryPoint>>
    where
        F: FnMut(usize, usize),
    {
        let total = history.len();
        let mut ranked = Vec::with_capacity(total);

        for (i, point) in history.iter().enumerate() {
            let peers = self.age_group_points(point.week, discipline, age_class)?;
            ranked.push(HistoryPoint {
                rank: rank_within(&peers, point.points),
                ..*point
            });
            progress(i + 1, total);
        }
        debug!(player = %player_id, %discipline, age_class, weeks = total, "age rank history");
        Ok(ranked)
    }
}

/// Points at or after `cutoff`; no lookup, just a filter
pub fn history_since(history: &[HistoryPoint], cutoff: RankingWeek) -> Vec<HistoryPoint> {
    history
        .iter()
        .filter(|point| point.week >= cutoff)
        .copied()
        .collect()
}
