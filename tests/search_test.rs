//! Fuzzy search and team points over an indexed snapshot

use badminton_cli::{
    analysis::{best_team_discipline, calculate_team_points},
    storage::Entry,
    Discipline, FuzzyIndex, PlayerId, RankingDatabase, RankingWeek,
};

fn entry(id: &str, first: &str, last: &str, discipline: Discipline, points: f64) -> Entry {
    Entry {
        discipline,
        rank: 1,
        federation_rank: 1,
        last_name: last.to_string(),
        first_name: first.to_string(),
        gender: "M".to_string(),
        player_id: PlayerId::new(id),
        birth_year: 2007,
        age_class_1: "U19".to_string(),
        age_class_2: "U19".to_string(),
        points,
        tournaments: 1,
        club: "TV Beispiel".to_string(),
        district: "Süd".to_string(),
        age_group_rank: None,
    }
}

fn seeded_db() -> RankingDatabase {
    let mut db = RankingDatabase::open_in_memory().unwrap();
    db.index_week(
        RankingWeek::new(2026, 2),
        &[
            entry("01-1", "Max", "Mustermann", Discipline::HE, 6.0),
            entry("01-1", "Max", "Mustermann", Discipline::HD, 5.2),
            entry("01-2", "Erika", "Schmidt", Discipline::DE, 4.0),
            entry("01-3", "Tom", "Partner", Discipline::HD, 3.1),
        ],
    )
    .unwrap();
    db
}

#[test]
fn test_partial_name_beats_unrelated_name() {
    let db = seeded_db();
    let index = FuzzyIndex::build(&db, None).unwrap();
    assert_eq!(index.len(), 3);

    let hits = index.search("Max Mustr", 10, 0.0);
    assert_eq!(hits[0].player_id.as_str(), "01-1");
    assert!(hits[0].score > 50.0);
    let erika = hits.iter().find(|h| h.player_id.as_str() == "01-2").unwrap();
    assert!(erika.score < hits[0].score);

    let above_cutoff = index.search("Max Mustr", 10, 50.0);
    assert!(above_cutoff.iter().all(|h| h.player_id.as_str() != "01-2"));
}

#[test]
fn test_search_with_details_drops_vanished_players() {
    let mut db = seeded_db();
    let index = FuzzyIndex::build(&db, None).unwrap();

    // a newer snapshot without Max
    db.index_week(
        RankingWeek::new(2026, 3),
        &[entry("01-2", "Erika", "Schmidt", Discipline::DE, 4.5)],
    )
    .unwrap();

    let results = index
        .search_with_details(&db, "Max Mustermann", None, 10, 50.0)
        .unwrap();
    assert!(results.is_empty());

    let results = index
        .search_with_details(&db, "Max Mustermann", Some(RankingWeek::new(2026, 2)), 10, 50.0)
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1.len(), 2);
}

#[test]
fn test_team_points_from_stored_entries() {
    let db = seeded_db();
    let max = db.get_player_by_id(&PlayerId::new("01-1"), None, false).unwrap();
    let tom = db.get_player_by_id(&PlayerId::new("01-3"), None, false).unwrap();

    let teams = calculate_team_points(&max, &tom, Some(Discipline::HD));
    assert_eq!(teams.len(), 1);
    assert!((teams[0].team_total - 8.3).abs() < 1e-9);

    let best = best_team_discipline(&max, &tom).unwrap();
    assert_eq!(best.discipline, Discipline::HD);

    let erika = db.get_player_by_id(&PlayerId::new("01-2"), None, false).unwrap();
    assert!(calculate_team_points(&max, &erika, None).is_empty());
}
