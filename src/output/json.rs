//! Machine-readable output shapes for `--json`.

use serde::Serialize;

use super::graph::{Series, YAxis};
use crate::analysis::TeamPoints;
use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use crate::search::SearchMatch;
use crate::storage::Entry;
use crate::Result;

/// Pretty-print any serializable value to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RankingJson {
    pub discipline: Discipline,
    pub rank: u32,
    pub federation_rank: u32,
    pub points: f64,
    pub tournaments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group_rank: Option<u32>,
}

/// One player with all discipline entries of a week
#[derive(Debug, Serialize)]
pub struct PlayerDetails {
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub birth_year: u16,
    pub club: String,
    pub district: String,
    pub age_class_1: String,
    pub age_class_2: String,
    pub ranking_week: Option<String>,
    pub rankings: Vec<RankingJson>,
}

/// `None` when the player has no entries
pub fn player_details(entries: &[Entry], week: Option<RankingWeek>) -> Option<PlayerDetails> {
    let first = entries.first()?;
    Some(PlayerDetails {
        player_id: first.player_id.clone(),
        first_name: first.first_name.clone(),
        last_name: first.last_name.clone(),
        full_name: first.full_name(),
        birth_year: first.birth_year,
        club: first.club.clone(),
        district: first.district.clone(),
        age_class_1: first.age_class_1.clone(),
        age_class_2: first.age_class_2.clone(),
        ranking_week: week.map(|w| w.label()),
        rankings: entries
            .iter()
            .map(|e| RankingJson {
                discipline: e.discipline,
                rank: e.rank,
                federation_rank: e.federation_rank,
                points: e.points,
                tournaments: e.tournaments,
                age_group_rank: e.age_group_rank,
            })
            .collect(),
    })
}

#[derive(Debug, Serialize)]
pub struct SearchResultJson {
    pub player_id: PlayerId,
    pub name: String,
    pub score: f64,
    pub club: String,
    pub best_rank: Option<u32>,
    pub best_discipline: Option<Discipline>,
}

pub fn search_results(results: &[(SearchMatch, Vec<Entry>)]) -> Vec<SearchResultJson> {
    results
        .iter()
        .map(|(hit, entries)| {
            let best = entries.iter().min_by_key(|e| e.rank);
            SearchResultJson {
                player_id: hit.player_id.clone(),
                name: hit.full_name(),
                score: (hit.score * 100.0).round() / 100.0,
                club: best.map(|e| e.club.clone()).unwrap_or_default(),
                best_rank: best.map(|e| e.rank),
                best_discipline: best.map(|e| e.discipline),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ComparisonJson {
    pub player1: Option<PlayerDetails>,
    pub player2: Option<PlayerDetails>,
}

pub fn comparison(player1: &[Entry], player2: &[Entry], week: Option<RankingWeek>) -> ComparisonJson {
    ComparisonJson {
        player1: player_details(player1, week),
        player2: player_details(player2, week),
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerRef {
    pub player_id: PlayerId,
    pub full_name: String,
}

impl From<&Entry> for PlayerRef {
    fn from(entry: &Entry) -> Self {
        Self {
            player_id: entry.player_id.clone(),
            full_name: entry.full_name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamJson {
    pub player1: PlayerRef,
    pub player2: PlayerRef,
    pub team: Vec<TeamPoints>,
    pub best: Option<TeamPoints>,
}

#[derive(Debug, Serialize)]
pub struct TopEntryJson {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub club: String,
    pub points: f64,
    pub birth_year: u16,
    pub tournaments: u32,
    pub discipline: Discipline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group_rank: Option<u32>,
}

pub fn top_rankings(entries: &[Entry], show_age_rank: bool) -> Vec<TopEntryJson> {
    entries
        .iter()
        .map(|e| TopEntryJson {
            rank: e.rank,
            player_id: e.player_id.clone(),
            name: e.full_name(),
            club: e.club.clone(),
            points: e.points,
            birth_year: e.birth_year,
            tournaments: e.tournaments,
            discipline: e.discipline,
            age_group_rank: if show_age_rank { e.age_group_rank } else { None },
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct GraphPointJson {
    pub week: u8,
    pub year: u16,
    pub label: String,
    pub rank: u32,
    pub points: f64,
}

#[derive(Debug, Serialize)]
pub struct GraphSeriesJson {
    pub name: String,
    pub data: Vec<GraphPointJson>,
}

#[derive(Debug, Serialize)]
pub struct GraphJson {
    pub discipline: Discipline,
    pub y_axis: &'static str,
    pub players: Vec<GraphSeriesJson>,
}

pub fn graph_history(series: &[Series], discipline: Discipline, y_axis: YAxis) -> GraphJson {
    GraphJson {
        discipline,
        y_axis: y_axis.key(),
        players: series
            .iter()
            .map(|s| GraphSeriesJson {
                name: s.name.clone(),
                data: s
                    .points
                    .iter()
                    .map(|p| GraphPointJson {
                        week: p.week.week,
                        year: p.week.year,
                        label: p.week.label(),
                        rank: p.rank,
                        points: p.points,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct WeekJson {
    pub year: u16,
    pub week: u8,
    pub label: String,
    pub is_current: bool,
}

pub fn weeks(weeks: &[RankingWeek], current: Option<RankingWeek>) -> Vec<WeekJson> {
    weeks
        .iter()
        .map(|w| WeekJson {
            year: w.year,
            week: w.week,
            label: w.label(),
            is_current: Some(*w) == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(discipline: Discipline, rank: u32, points: f64) -> Entry {
        Entry {
            discipline,
            rank,
            federation_rank: 2,
            last_name: "Müller".to_string(),
            first_name: "Jörg".to_string(),
            gender: "M".to_string(),
            player_id: PlayerId::new("01-012345"),
            birth_year: 2008,
            age_class_1: "U19".to_string(),
            age_class_2: "U19".to_string(),
            points,
            tournaments: 6,
            club: "TSV Süd".to_string(),
            district: "Bayern".to_string(),
            age_group_rank: None,
        }
    }

    #[test]
    fn test_player_details_shape() {
        let mut with_age = entry(Discipline::HD, 7, 2.5);
        with_age.age_group_rank = Some(3);
        let entries = vec![entry(Discipline::HE, 3, 5.0), with_age];

        let details = player_details(&entries, Some(RankingWeek::new(2026, 2))).unwrap();
        let value = serde_json::to_value(&details).unwrap();

        assert_eq!(value["player_id"], json!("01-012345"));
        assert_eq!(value["full_name"], json!("Jörg Müller"));
        assert_eq!(value["ranking_week"], json!("KW 2 2026"));
        assert_eq!(value["rankings"][0]["discipline"], json!("HE"));
        assert!(value["rankings"][0].get("age_group_rank").is_none());
        assert_eq!(value["rankings"][1]["age_group_rank"], json!(3));

        assert!(player_details(&[], None).is_none());
    }

    #[test]
    fn test_search_results_round_score_and_pick_best() {
        let hit = SearchMatch {
            player_id: PlayerId::new("01-012345"),
            first_name: "Jörg".to_string(),
            last_name: "Müller".to_string(),
            score: 85.4999,
        };
        let entries = vec![entry(Discipline::HD, 9, 1.0), entry(Discipline::HE, 4, 2.0)];
        let out = search_results(&[(hit, entries)]);
        assert_eq!(out[0].score, 85.5);
        assert_eq!(out[0].best_rank, Some(4));
        assert_eq!(out[0].best_discipline, Some(Discipline::HE));
    }

    #[test]
    fn test_weeks_flag_current() {
        let list = weeks(
            &[RankingWeek::new(2026, 2), RankingWeek::new(2026, 1)],
            Some(RankingWeek::new(2026, 2)),
        );
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value[0]["is_current"], json!(true));
        assert_eq!(value[1]["is_current"], json!(false));
        assert_eq!(value[1]["label"], json!("KW 1 2026"));
    }

    #[test]
    fn test_graph_history_axis_key() {
        let series = vec![Series {
            name: "Jörg Müller".to_string(),
            points: vec![crate::storage::HistoryPoint {
                week: RankingWeek::new(2026, 1),
                rank: 2,
                points: 3.0,
            }],
        }];
        let value =
            serde_json::to_value(graph_history(&series, Discipline::HE, YAxis::AgeRank)).unwrap();
        assert_eq!(value["y_axis"], json!("age_rank"));
        assert_eq!(value["players"][0]["data"][0]["rank"], json!(2));
        assert_eq!(value["discipline"], json!("HE"));
    }
}
