//! `top`: head of the ranking list.

use super::common::CommandContext;
use crate::cli::types::{Discipline, RankingWeek};
use crate::output::{json, print_json, text};

pub async fn handle_top(
    ctx: &mut CommandContext,
    discipline: Option<Discipline>,
    limit: usize,
    week: Option<RankingWeek>,
    age_rank: bool,
) -> anyhow::Result<()> {
    if !ctx.ensure_data().await? {
        return Ok(());
    }

    let entries = ctx.db.get_players(week, discipline, Some(limit), age_rank)?;
    if entries.is_empty() {
        ctx.warn("No rankings available.");
        return Ok(());
    }

    if ctx.json {
        print_json(&json::top_rankings(&entries, age_rank))?;
    } else {
        let mut title = format!("Top {limit}");
        if let Some(discipline) = discipline {
            title.push_str(&format!(" - {}", discipline.full_name()));
        }
        if let Some(week) = week {
            title.push_str(&format!(" ({})", week.label()));
        }
        println!("{}", text::top_table(&entries, &title, age_rank));
    }
    Ok(())
}
