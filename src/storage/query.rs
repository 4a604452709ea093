//! Typed query object for entry lookups.
//!
//! All filters are bound as positional parameters; the SQL text only ever contains
//! fixed fragments chosen by the builder.

use rusqlite::ToSql;

use super::schema::FOLD_CASE_FN;
use crate::cli::types::{Discipline, PlayerId, RankingWeek};

/// Columns of `players` that make up an [`Entry`](super::Entry), in row order.
pub(crate) const ENTRY_COLUMNS: &str = "p.discipline, p.rank, p.federation_rank, p.last_name, \
     p.first_name, p.gender, p.player_id, p.birth_year, p.age_class_1, p.age_class_2, \
     p.points, p.tournaments, p.club, p.district";

/// Result ordering for entry queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    /// Ascending rank, discipline code as tie-break
    Rank,
    /// Discipline code ascending
    Discipline,
    /// Descending points, rank as tie-break
    PointsDesc,
}

/// Entry lookup within one snapshot.
#[derive(Debug, Clone)]
pub struct PlayerQuery {
    week: RankingWeek,
    discipline: Option<Discipline>,
    player_id: Option<PlayerId>,
    text: Option<String>,
    order: EntryOrder,
    limit: Option<usize>,
}

/// SQL text plus its bound parameters
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Box<dyn ToSql>>,
}

impl BuiltQuery {
    pub fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

impl PlayerQuery {
    pub fn for_week(week: RankingWeek) -> Self {
        Self {
            week,
            discipline: None,
            player_id: None,
            text: None,
            order: EntryOrder::Rank,
            limit: None,
        }
    }

    pub fn discipline(mut self, discipline: Option<Discipline>) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn player(mut self, player_id: &PlayerId) -> Self {
        self.player_id = Some(player_id.clone());
        self
    }

    /// Case-insensitive substring match on first name, last name, club or player ID.
    /// Case is folded with Unicode rules, so `öz` finds `Öztürk`.
    /// Rows are de-duplicated when a text filter is present.
    pub fn matching(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn order_by(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(&self) -> BuiltQuery {
        let distinct = if self.text.is_some() { "DISTINCT " } else { "" };
        let mut sql = format!(
            "SELECT {distinct}{ENTRY_COLUMNS} FROM players p
             JOIN ranking_weeks rw ON p.ranking_week_id = rw.id
             WHERE rw.year = ? AND rw.week = ?"
        );
        let mut params: Vec<Box<dyn ToSql>> =
            vec![Box::new(self.week.year), Box::new(self.week.week)];

        if let Some(discipline) = self.discipline {
            sql.push_str(" AND p.discipline = ?");
            params.push(Box::new(discipline.code()));
        }

        if let Some(player_id) = &self.player_id {
            sql.push_str(" AND p.player_id = ?");
            params.push(Box::new(player_id.as_str().to_string()));
        }

        if let Some(text) = &self.text {
            let clauses: Vec<String> = ["p.first_name", "p.last_name", "p.club", "p.player_id"]
                .iter()
                .map(|column| format!("{FOLD_CASE_FN}({column}) LIKE ? ESCAPE '\\'"))
                .collect();
            sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
            let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
            for _ in 0..4 {
                params.push(Box::new(pattern.clone()));
            }
        }

        sql.push_str(match self.order {
            EntryOrder::Rank => " ORDER BY p.rank, p.discipline",
            EntryOrder::Discipline => " ORDER BY p.discipline",
            EntryOrder::PointsDesc => " ORDER BY p.points DESC, p.rank",
        });

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        BuiltQuery { sql, params }
    }
}

/// Escape LIKE wildcards so user text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_query_binds_week_only() {
        let built = PlayerQuery::for_week(RankingWeek::new(2026, 2)).build();
        assert_eq!(built.params.len(), 2);
        assert!(built.sql.contains("ORDER BY p.rank"));
        assert!(!built.sql.contains("LIMIT"));
        assert!(!built.sql.contains("DISTINCT"));
    }

    #[test]
    fn test_all_filters_are_parameters() {
        let built = PlayerQuery::for_week(RankingWeek::new(2026, 2))
            .discipline(Some(Discipline::HD))
            .player(&PlayerId::new("01-1'; DROP TABLE players; --"))
            .matching("50%_off")
            .order_by(EntryOrder::PointsDesc)
            .limit(Some(5))
            .build();

        // week(2) + discipline + player + 4 patterns + limit
        assert_eq!(built.params.len(), 9);
        assert!(!built.sql.contains("DROP TABLE"));
        assert!(!built.sql.contains("50%"));
        assert!(built.sql.starts_with("SELECT DISTINCT"));
        assert!(built.sql.ends_with("LIMIT ?"));
        assert!(built.sql.contains("ORDER BY p.points DESC"));
        assert!(built.sql.contains("fold_case(p.last_name) LIKE ?"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_x\\"), "50\\%\\_x\\\\");
    }
}
