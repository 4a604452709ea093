//! Doubles team strength from two players' entries.

use serde::Serialize;

use crate::cli::types::Discipline;
use crate::storage::Entry;

/// Combined points of a pair in one doubles discipline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamPoints {
    pub discipline: Discipline,
    pub player1_points: f64,
    pub player2_points: f64,
    pub team_total: f64,
}

fn find(entries: &[Entry], discipline: Discipline) -> Option<&Entry> {
    entries.iter().find(|e| e.discipline == discipline)
}

/// Team totals for every doubles discipline both players are ranked in, in
/// discipline order.
///
/// With `discipline` set, only that one is considered; a singles discipline yields
/// nothing.
pub fn calculate_team_points(
    player1: &[Entry],
    player2: &[Entry],
    discipline: Option<Discipline>,
) -> Vec<TeamPoints> {
    let candidates: &[Discipline] = match discipline {
        Some(d) if !d.is_doubles() => return Vec::new(),
        Some(ref d) => std::slice::from_ref(d),
        None => &Discipline::DOUBLES,
    };

    candidates
        .iter()
        .filter_map(|&disc| {
            let p1 = find(player1, disc)?;
            let p2 = find(player2, disc)?;
            Some(TeamPoints {
                discipline: disc,
                player1_points: p1.points,
                player2_points: p2.points,
                team_total: p1.points + p2.points,
            })
        })
        .collect()
}

/// Doubles discipline with the highest team total; the first one wins ties
pub fn best_team_discipline(player1: &[Entry], player2: &[Entry]) -> Option<TeamPoints> {
    calculate_team_points(player1, player2, None)
        .into_iter()
        .fold(None, |best: Option<TeamPoints>, team| match best {
            Some(b) if b.team_total >= team.team_total => Some(b),
            _ => Some(team),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::PlayerId;

    fn entry(id: &str, discipline: Discipline, points: f64) -> Entry {
        Entry {
            discipline,
            rank: 1,
            federation_rank: 1,
            last_name: format!("Last{id}"),
            first_name: format!("First{id}"),
            gender: "M".to_string(),
            player_id: PlayerId::new(id),
            birth_year: 2000,
            age_class_1: "O19".to_string(),
            age_class_2: "O19".to_string(),
            points,
            tournaments: 3,
            club: "BC".to_string(),
            district: "Nord".to_string(),
            age_group_rank: None,
        }
    }

    #[test]
    fn test_team_total_is_sum() {
        let p1 = vec![entry("A", Discipline::HD, 5.2)];
        let p2 = vec![entry("B", Discipline::HD, 3.1)];
        let teams = calculate_team_points(&p1, &p2, Some(Discipline::HD));
        assert_eq!(teams.len(), 1);
        assert!((teams[0].team_total - 8.3).abs() < 1e-9);
        assert_eq!(teams[0].player1_points, 5.2);
    }

    #[test]
    fn test_missing_partner_entry_gives_nothing() {
        let p1 = vec![entry("A", Discipline::HD, 5.2), entry("A", Discipline::HM, 2.0)];
        let p2 = vec![entry("B", Discipline::HM, 1.0)];
        let teams = calculate_team_points(&p1, &p2, None);
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].discipline, Discipline::HM);
        assert!(calculate_team_points(&p1, &p2, Some(Discipline::HD)).is_empty());
    }

    #[test]
    fn test_singles_discipline_yields_nothing() {
        let p1 = vec![entry("A", Discipline::HE, 5.0)];
        let p2 = vec![entry("B", Discipline::HE, 5.0)];
        assert!(calculate_team_points(&p1, &p2, Some(Discipline::HE)).is_empty());
        assert!(calculate_team_points(&p1, &p2, None).is_empty());
    }

    #[test]
    fn test_best_team_discipline() {
        let p1 = vec![entry("A", Discipline::HD, 5.0), entry("A", Discipline::HM, 4.0)];
        let p2 = vec![entry("B", Discipline::HD, 1.0), entry("B", Discipline::HM, 4.0)];
        let best = best_team_discipline(&p1, &p2).unwrap();
        assert_eq!(best.discipline, Discipline::HM);
        assert_eq!(best.team_total, 8.0);
        assert!(best_team_discipline(&p1, &[]).is_none());
    }
}
