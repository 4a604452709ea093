//! `compare`: two players side by side.

use super::common::CommandContext;
use crate::cli::types::{PlayerId, RankingWeek};
use crate::output::{json, print_json, text};

pub async fn handle_compare(
    ctx: &mut CommandContext,
    id1: &PlayerId,
    id2: &PlayerId,
    week: Option<RankingWeek>,
) -> anyhow::Result<()> {
    if !ctx.ensure_data().await? {
        return Ok(());
    }

    let player1 = ctx.db.get_player_by_id(id1, week, false)?;
    let player2 = ctx.db.get_player_by_id(id2, week, false)?;

    let mut missing = false;
    for (id, entries) in [(id1, &player1), (id2, &player2)] {
        if entries.is_empty() {
            ctx.warn(format!("Player '{id}' not found."));
            missing = true;
        }
    }
    if missing {
        return Ok(());
    }

    if ctx.json {
        let week = match week {
            Some(week) => Some(week),
            None => ctx.db.get_current_week()?,
        };
        print_json(&json::comparison(&player1, &player2, week))?;
    } else {
        println!("{}", text::comparison_table(&player1, &player2));
    }
    Ok(())
}
