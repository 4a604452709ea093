//! `search`: fuzzy name lookup in the newest snapshot.

use super::common::CommandContext;
use crate::output::{json, print_json, text};
use crate::search::{FuzzyIndex, DEFAULT_SCORE_CUTOFF};

pub async fn handle_search(ctx: &mut CommandContext, name: &str, limit: usize) -> anyhow::Result<()> {
    if !ctx.ensure_data().await? {
        return Ok(());
    }

    let index = FuzzyIndex::build(&ctx.db, None)?;
    let results = index.search_with_details(&ctx.db, name, None, limit, DEFAULT_SCORE_CUTOFF)?;

    if results.is_empty() {
        ctx.warn("No players found.");
        return Ok(());
    }

    if ctx.json {
        print_json(&json::search_results(&results))?;
    } else {
        println!("{}", text::search_table(&results));
    }
    Ok(())
}
