//! Plain-text tables and panels for terminal output.
//!
//! Every function returns the rendered text; commands decide where it goes.

use crate::analysis::TeamPoints;
use crate::cli::types::{Discipline, RankingWeek};
use crate::search::SearchMatch;
use crate::storage::Entry;

/// Cut `s` to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max).collect();
        format!("{kept}...")
    }
}

fn rule(len: usize) -> String {
    "-".repeat(len)
}

fn best_entry(entries: &[Entry]) -> Option<&Entry> {
    entries.iter().min_by_key(|e| e.rank)
}

fn optional_rank(rank: Option<u32>) -> String {
    rank.map_or_else(|| "-".to_string(), |r| format!("#{r}"))
}

/// One player's standing in each discipline, best rank first
pub fn player_rankings(entries: &[Entry]) -> String {
    let has_age_rank = entries.iter().any(|e| e.age_group_rank.is_some());
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.rank);

    let mut lines = Vec::new();
    if has_age_rank {
        lines.push(format!(
            "{:<16} {:>6} {:>8} {:>9} {:>11}",
            "Discipline", "Rank", "Age Rank", "Points", "Tournaments"
        ));
        lines.push(rule(54));
    } else {
        lines.push(format!(
            "{:<16} {:>6} {:>9} {:>11}",
            "Discipline", "Rank", "Points", "Tournaments"
        ));
        lines.push(rule(45));
    }

    for e in sorted {
        let rank = format!("#{}", e.rank);
        if has_age_rank {
            lines.push(format!(
                "{:<16} {:>6} {:>8} {:>9.3} {:>11}",
                e.discipline.full_name(),
                rank,
                optional_rank(e.age_group_rank),
                e.points,
                e.tournaments
            ));
        } else {
            lines.push(format!(
                "{:<16} {:>6} {:>9.3} {:>11}",
                e.discipline.full_name(),
                rank,
                e.points,
                e.tournaments
            ));
        }
    }
    lines.join("\n")
}

/// Player header with personal details followed by the rankings table
pub fn player_panel(entries: &[Entry], week: Option<RankingWeek>) -> String {
    let Some(first) = entries.first() else {
        return "No player data".to_string();
    };

    let mut lines = vec![
        format!("== {} ==", first.full_name()),
        format!("Player ID:    {}", first.player_id),
        format!("Birth Year:   {}", first.birth_year),
        format!("Club:         {}", first.club),
        format!("District:     {}", first.district),
        format!("Age Class:    {}", first.age_class_2),
    ];
    if let Some(week) = week {
        lines.push(format!("Ranking Week: {}", week.label()));
    }
    lines.push(String::new());
    lines.push(player_rankings(entries));
    lines.join("\n")
}

/// Fuzzy search hits with each player's best entry
pub fn search_table(results: &[(SearchMatch, Vec<Entry>)]) -> String {
    let mut lines = vec![
        format!(
            "{:>3} {:<28} {:<23} {:<12} {:>10}",
            "#", "Name", "Club", "ID", "Best Rank"
        ),
        rule(80),
    ];
    for (i, (hit, entries)) in results.iter().enumerate() {
        let (club, best) = match best_entry(entries) {
            Some(e) => (truncate(&e.club, 20), format!("#{} ({})", e.rank, e.discipline)),
            None => (String::new(), "-".to_string()),
        };
        lines.push(format!(
            "{:>3} {:<28} {:<23} {:<12} {:>10}",
            i + 1,
            truncate(&hit.full_name(), 25),
            club,
            hit.player_id,
            best
        ));
    }
    lines.join("\n")
}

/// Ranking list of one snapshot
pub fn top_table(entries: &[Entry], title: &str, show_age_rank: bool) -> String {
    let age_header = if show_age_rank { " Age#" } else { "" };
    let mut lines = vec![
        title.to_string(),
        format!(
            "{:>4}{} {:<28} {:<28} {:>9} {:>4} {:>11}",
            "#", age_header, "Name", "Club", "Points", "Age", "Tournaments"
        ),
        rule(if show_age_rank { 94 } else { 89 }),
    ];

    for e in entries {
        let age_rank = if show_age_rank {
            format!(
                " {:>4}",
                e.age_group_rank.map_or_else(|| "-".to_string(), |r| r.to_string())
            )
        } else {
            String::new()
        };
        lines.push(format!(
            "{:>4}{} {:<28} {:<28} {:>9.3} {:>4} {:>11}",
            e.rank,
            age_rank,
            truncate(&e.full_name(), 25),
            truncate(&e.club, 25),
            e.points,
            e.age_class_2,
            e.tournaments
        ));
    }
    lines.join("\n")
}

/// Side-by-side comparison with team sums for shared doubles disciplines
pub fn comparison_table(player1: &[Entry], player2: &[Entry]) -> String {
    let (Some(p1), Some(p2)) = (player1.first(), player2.first()) else {
        return "Comparison (no data)".to_string();
    };
    let name1 = truncate(&p1.full_name(), 20);
    let name2 = truncate(&p2.full_name(), 20);

    let mut lines = vec![
        format!("{} vs {}", p1.full_name(), p2.full_name()),
        format!("{:<12} {:>23} {:>23} {:>10}", "", name1, name2, "Team Sum"),
        rule(71),
        format!(
            "{:<12} {:>23} {:>23} {:>10}",
            "Club",
            truncate(&p1.club, 20),
            truncate(&p2.club, 20),
            "-"
        ),
        format!(
            "{:<12} {:>23} {:>23} {:>10}",
            "Birth Year", p1.birth_year, p2.birth_year, "-"
        ),
        format!(
            "{:<12} {:>23} {:>23} {:>10}",
            "Age Class", p1.age_class_2, p2.age_class_2, "-"
        ),
        rule(71),
    ];

    for disc in Discipline::ALL {
        let e1 = player1.iter().find(|e| e.discipline == disc);
        let e2 = player2.iter().find(|e| e.discipline == disc);
        if e1.is_none() && e2.is_none() {
            continue;
        }
        let points = |e: Option<&Entry>| e.map_or_else(|| "-".to_string(), |e| format!("{:.3}", e.points));
        let team_sum = match (e1, e2) {
            (Some(a), Some(b)) if disc.is_doubles() => format!("{:.3}", a.points + b.points),
            _ => "-".to_string(),
        };
        lines.push(format!(
            "{:<12} {:>23} {:>23} {:>10}",
            format!("{} ({})", disc.code(), disc.short_name()),
            points(e1),
            points(e2),
            team_sum
        ));
    }
    lines.join("\n")
}

/// Team totals per doubles discipline, best one highlighted below
pub fn team_table(
    player1: &Entry,
    player2: &Entry,
    teams: &[TeamPoints],
    best: Option<&TeamPoints>,
) -> String {
    let mut lines = vec![
        format!("Team: {} + {}", player1.full_name(), player2.full_name()),
        format!(
            "{:<16} {:>10} {:>10} {:>10}",
            "Discipline", "Player 1", "Player 2", "Total"
        ),
        rule(49),
    ];
    for team in teams {
        lines.push(format!(
            "{:<16} {:>10.3} {:>10.3} {:>10.3}",
            team.discipline.full_name(),
            team.player1_points,
            team.player2_points,
            team.team_total
        ));
    }
    if let Some(best) = best {
        lines.push(String::new());
        lines.push(format!(
            "Best discipline: {} ({:.3})",
            best.discipline.full_name(),
            best.team_total
        ));
    }
    lines.join("\n")
}

/// Indexed weeks, newest first, the current one marked
pub fn weeks_table(weeks: &[RankingWeek], current: Option<RankingWeek>) -> String {
    let mut lines = vec![
        format!("{:<6} {:<6} {:<12} {}", "Year", "Week", "Label", ""),
        rule(34),
    ];
    for week in weeks {
        let marker = if Some(*week) == current { "current" } else { "" };
        lines.push(
            format!(
                "{:<6} {:<6} {:<12} {}",
                week.year,
                format!("KW {}", week.week),
                week.label(),
                marker
            )
            .trim_end()
            .to_string(),
        );
    }
    lines.join("\n")
}
