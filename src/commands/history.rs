//! `history`: indexed weeks.

use super::common::CommandContext;
use crate::output::{json, print_json, text};

pub fn handle_history(ctx: &CommandContext) -> anyhow::Result<()> {
    let weeks = ctx.db.get_weeks()?;
    if weeks.is_empty() {
        ctx.warn("No ranking data available. Run 'update --all' first.");
        return Ok(());
    }

    let current = weeks.first().copied();
    if ctx.json {
        print_json(&json::weeks(&weeks, current))?;
    } else {
        println!("{}", text::weeks_table(&weeks, current));
    }
    Ok(())
}
