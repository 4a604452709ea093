//! Snapshot store operations

use std::collections::HashSet;
use std::sync::Arc;

use rusqlite::{params, types::Type, OptionalExtension, Row};
use tracing::{debug, info};

use super::{
    models::*,
    query::{EntryOrder, PlayerQuery},
    schema::RankingDatabase,
};
use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use crate::core::cache::{rank_within, AgeGroupKey};
use crate::Result;

impl RankingDatabase {
    /// Check whether a ranking week has been indexed
    pub fn has_week(&self, week: RankingWeek) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM ranking_weeks WHERE year = ? AND week = ?",
                params![week.year, week.week],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Replace the snapshot for `week` with `entries`.
    ///
    /// Delete and insert run in one transaction, so readers see either the old or the
    /// new snapshot. An empty `entries` slice stores an empty snapshot.
    pub fn index_week(&mut self, week: RankingWeek, entries: &[Entry]) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM players WHERE ranking_week_id IN
             (SELECT id FROM ranking_weeks WHERE year = ? AND week = ?)",
            params![week.year, week.week],
        )?;
        tx.execute(
            "DELETE FROM ranking_weeks WHERE year = ? AND week = ?",
            params![week.year, week.week],
        )?;
        tx.execute(
            "INSERT INTO ranking_weeks (year, week, filename) VALUES (?, ?, ?)",
            params![week.year, week.week, week.filename()],
        )?;
        let week_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO players (
                    ranking_week_id, discipline, rank, federation_rank,
                    last_name, first_name, gender, player_id, birth_year,
                    age_class_1, age_class_2, points, tournaments, club, district
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for entry in entries {
                stmt.execute(params![
                    week_id,
                    entry.discipline.code(),
                    entry.rank,
                    entry.federation_rank,
                    entry.last_name,
                    entry.first_name,
                    entry.gender,
                    entry.player_id.as_str(),
                    entry.birth_year,
                    entry.age_class_1,
                    entry.age_class_2,
                    entry.points,
                    entry.tournaments,
                    entry.club,
                    entry.district,
                ])?;
            }
        }

        tx.commit()?;
        self.age_cache.borrow_mut().invalidate();

        info!(week = %week, entries = entries.len(), "indexed ranking week");
        Ok(())
    }

    /// Number of entries stored for a week (0 when the week is absent)
    pub fn count_entries(&self, week: RankingWeek) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE rw.year = ? AND rw.week = ?",
            params![week.year, week.week],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// All indexed weeks, newest first
    pub fn get_weeks(&self) -> Result<Vec<RankingWeek>> {
        let mut stmt = self
            .conn
            .prepare("SELECT year, week FROM ranking_weeks ORDER BY year DESC, week DESC")?;
        let rows = stmt.query_map([], |row| Ok(RankingWeek::new(row.get(0)?, row.get(1)?)))?;

        let mut weeks = Vec::new();
        for row in rows {
            weeks.push(row?);
        }
        Ok(weeks)
    }

    /// The newest indexed week, derived from stored data only
    pub fn get_current_week(&self) -> Result<Option<RankingWeek>> {
        let week = self
            .conn
            .query_row(
                "SELECT year, week FROM ranking_weeks ORDER BY year DESC, week DESC LIMIT 1",
                [],
                |row| Ok(RankingWeek::new(row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(week)
    }

    /// Explicit week, or the current one when omitted
    fn resolve_week(&self, week: Option<RankingWeek>) -> Result<Option<RankingWeek>> {
        match week {
            Some(week) => Ok(Some(week)),
            None => self.get_current_week(),
        }
    }

    /// Entries of one week ordered by rank, optionally filtered and capped
    pub fn get_players(
        &self,
        week: Option<RankingWeek>,
        discipline: Option<Discipline>,
        limit: Option<usize>,
        include_age_rank: bool,
    ) -> Result<Vec<Entry>> {
        let Some(week) = self.resolve_week(week)? else {
            return Ok(Vec::new());
        };

        let query = PlayerQuery::for_week(week)
            .discipline(discipline)
            .order_by(EntryOrder::Rank)
            .limit(limit);
        let mut entries = self.run_entry_query(&query)?;

        if include_age_rank {
            self.annotate_age_ranks(week, &mut entries)?;
        }
        Ok(entries)
    }

    /// All discipline entries of one player in one week, by discipline code
    pub fn get_player_by_id(
        &self,
        player_id: &PlayerId,
        week: Option<RankingWeek>,
        include_age_rank: bool,
    ) -> Result<Vec<Entry>> {
        let Some(week) = self.resolve_week(week)? else {
            return Ok(Vec::new());
        };

        let query = PlayerQuery::for_week(week)
            .player(player_id)
            .order_by(EntryOrder::Discipline);
        let mut entries = self.run_entry_query(&query)?;

        if include_age_rank {
            self.annotate_age_ranks(week, &mut entries)?;
        }
        Ok(entries)
    }

    /// Substring search over names, club and player ID, strongest players first.
    ///
    /// Coarse pre-filter; approximate name matching lives in [`crate::search`].
    pub fn search_players(
        &self,
        text: &str,
        week: Option<RankingWeek>,
        limit: usize,
    ) -> Result<Vec<Entry>> {
        let Some(week) = self.resolve_week(week)? else {
            return Ok(Vec::new());
        };

        let query = PlayerQuery::for_week(week)
            .matching(text)
            .order_by(EntryOrder::PointsDesc)
            .limit(Some(limit));
        self.run_entry_query(&query)
    }

    /// Distinct players of a week, in first-seen order
    pub fn get_unique_players(&self, week: Option<RankingWeek>) -> Result<Vec<UniquePlayer>> {
        let Some(week) = self.resolve_week(week)? else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            "SELECT p.player_id, p.first_name, p.last_name
             FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE rw.year = ? AND rw.week = ?
             ORDER BY p.id",
        )?;
        let rows = stmt.query_map(params![week.year, week.week], |row| {
            Ok(UniquePlayer {
                player_id: PlayerId::new(row.get::<_, String>(0)?),
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        })?;

        let mut seen = HashSet::new();
        let mut players = Vec::new();
        for row in rows {
            let player = row?;
            if seen.insert(player.player_id.clone()) {
                players.push(player);
            }
        }
        Ok(players)
    }

    /// Rank of a player among the same age class in one week and discipline:
    /// `1 + number of peers with strictly more points`.
    ///
    /// Recomputed from the snapshot on every call. A player without an entry in that
    /// week and discipline gets 1, since nothing compares as greater than a missing value.
    pub fn get_age_group_rank(
        &self,
        player_id: &PlayerId,
        discipline: Discipline,
        age_class: &str,
        week: RankingWeek,
    ) -> Result<u32> {
        let rank: i64 = self.conn.query_row(
            "SELECT COUNT(*) + 1
             FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE rw.year = ? AND rw.week = ?
             AND p.discipline = ?
             AND p.age_class_2 = ?
             AND p.points > (
                 SELECT p2.points FROM players p2
                 JOIN ranking_weeks rw2 ON p2.ranking_week_id = rw2.id
                 WHERE rw2.year = ? AND rw2.week = ?
                 AND p2.player_id = ? AND p2.discipline = ?
             )",
            params![
                week.year,
                week.week,
                discipline.code(),
                age_class,
                week.year,
                week.week,
                player_id.as_str(),
                discipline.code(),
            ],
            |row| row.get(0),
        )?;
        Ok(rank as u32)
    }

    /// Descending points of one age group, served from the cache when possible
    pub(crate) fn age_group_points(
        &self,
        week: RankingWeek,
        discipline: Discipline,
        age_class: &str,
    ) -> Result<Arc<Vec<f64>>> {
        let key = AgeGroupKey::new(week, discipline, age_class);
        if let Some(points) = self.age_cache.borrow_mut().get(&key) {
            return Ok(points);
        }

        let mut stmt = self.conn.prepare_cached(
            "SELECT p.points FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE rw.year = ? AND rw.week = ? AND p.discipline = ? AND p.age_class_2 = ?",
        )?;
        let rows = stmt.query_map(
            params![week.year, week.week, discipline.code(), age_class],
            |row| row.get::<_, f64>(0),
        )?;
        let mut points = Vec::new();
        for row in rows {
            points.push(row?);
        }

        debug!(%week, %discipline, age_class, peers = points.len(), "loaded age group");
        Ok(self.age_cache.borrow_mut().put(key, points))
    }

    /// Fill `age_group_rank` on entries that all belong to `week`
    fn annotate_age_ranks(&self, week: RankingWeek, entries: &mut [Entry]) -> Result<()> {
        for entry in entries.iter_mut() {
            let peers = self.age_group_points(week, entry.discipline, &entry.age_class_2)?;
            entry.age_group_rank = Some(rank_within(&peers, entry.points));
        }
        Ok(())
    }

    /// Delete every snapshot
    pub fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM players", [])?;
        tx.execute("DELETE FROM ranking_weeks", [])?;
        tx.commit()?;
        self.age_cache.borrow_mut().invalidate();
        Ok(())
    }

    pub(crate) fn run_entry_query(&self, query: &PlayerQuery) -> Result<Vec<Entry>> {
        let built = query.build();
        let mut stmt = self.conn.prepare(&built.sql)?;
        let rows = stmt.query_map(built.param_refs().as_slice(), row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

/// Map a row selected with `ENTRY_COLUMNS` to an [`Entry`]
pub(crate) fn row_to_entry(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        discipline: discipline_column(row, 0)?,
        rank: row.get(1)?,
        federation_rank: row.get(2)?,
        last_name: row.get(3)?,
        first_name: row.get(4)?,
        gender: row.get(5)?,
        player_id: PlayerId::new(row.get::<_, String>(6)?),
        birth_year: row.get(7)?,
        age_class_1: row.get(8)?,
        age_class_2: row.get(9)?,
        points: row.get(10)?,
        tournaments: row.get(11)?,
        club: row.get(12)?,
        district: row.get(13)?,
        age_group_rank: None,
    })
}

/// Read a discipline code column; an unknown code means the file is not ours
pub(crate) fn discipline_column(row: &Row, idx: usize) -> rusqlite::Result<Discipline> {
    let code: String = row.get(idx)?;
    Discipline::from_code(&code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown discipline code '{code}'").into(),
        )
    })
}
