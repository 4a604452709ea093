//! `team`: combined points of a doubles pair.

use super::common::CommandContext;
use crate::analysis::{best_team_discipline, calculate_team_points};
use crate::cli::types::{Discipline, PlayerId, RankingWeek};
use crate::output::{json, print_json, text};

pub async fn handle_team(
    ctx: &mut CommandContext,
    id1: &PlayerId,
    id2: &PlayerId,
    discipline: Option<Discipline>,
    week: Option<RankingWeek>,
) -> anyhow::Result<()> {
    if !ctx.ensure_data().await? {
        return Ok(());
    }

    let player1 = ctx.db.get_player_by_id(id1, week, false)?;
    let player2 = ctx.db.get_player_by_id(id2, week, false)?;
    let (Some(first1), Some(first2)) = (player1.first(), player2.first()) else {
        ctx.warn("Insufficient data: both players need rankings in this week.");
        return Ok(());
    };

    let teams = calculate_team_points(&player1, &player2, discipline);
    if teams.is_empty() {
        ctx.warn("The players share no ranked doubles discipline.");
        return Ok(());
    }
    let best = match discipline {
        Some(_) => teams.first().copied(),
        None => best_team_discipline(&player1, &player2),
    };

    if ctx.json {
        print_json(&json::TeamJson {
            player1: first1.into(),
            player2: first2.into(),
            team: teams,
            best,
        })?;
    } else {
        println!("{}", text::team_table(first1, first2, &teams, best.as_ref()));
    }
    Ok(())
}
