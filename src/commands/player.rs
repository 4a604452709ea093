//! `player`: one player's rankings in one week.

use super::common::CommandContext;
use crate::cli::types::{PlayerId, RankingWeek};
use crate::output::{json, print_json, text};

pub async fn handle_player(
    ctx: &mut CommandContext,
    player_id: Option<PlayerId>,
    week: Option<RankingWeek>,
    age_rank: bool,
) -> anyhow::Result<()> {
    let player_id = ctx.resolve_player_id(player_id)?;
    if !ctx.ensure_data().await? {
        return Ok(());
    }

    let week = match week {
        Some(week) => Some(week),
        None => ctx.db.get_current_week()?,
    };
    let entries = ctx.db.get_player_by_id(&player_id, week, age_rank)?;
    if entries.is_empty() {
        ctx.warn(format!("Player '{player_id}' not found."));
        return Ok(());
    }

    if ctx.json {
        print_json(&json::player_details(&entries, week))?;
    } else {
        println!("{}", text::player_panel(&entries, week));
    }
    Ok(())
}
