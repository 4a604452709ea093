//! `update`: download ranking spreadsheets and index them.

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use super::common::{fetch_and_index, CommandContext};
use crate::output::print_json;

/// Outcome of one update run
#[derive(Debug, Default, Serialize)]
pub struct UpdateSummary {
    pub indexed: Vec<IndexedWeek>,
    pub failed: Vec<String>,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct IndexedWeek {
    pub label: String,
    pub entries: usize,
}

/// Fetch the current week, or with `all` every week the archive lists.
///
/// Per-week download and parse failures are reported and skipped; storage
/// failures abort.
pub async fn handle_update(
    ctx: &mut CommandContext,
    all: bool,
    force: bool,
) -> anyhow::Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    if !all {
        ctx.status("Updating current week...");
        let Some(remote) = ctx
            .client
            .get_current_week()
            .await
            .context("Could not determine the current ranking week")?
        else {
            ctx.warn("Could not fetch current week.");
            return Ok(summary);
        };

        let count = fetch_and_index(&mut ctx.db, &ctx.client, &remote, true).await?;
        ctx.status(format!("✓ Updated {} ({} entries)", remote.week.label(), count));
        summary.indexed.push(IndexedWeek {
            label: remote.week.label(),
            entries: count,
        });
    } else {
        ctx.status("Fetching available weeks...");
        let weeks = ctx
            .client
            .get_available_weeks()
            .await
            .context("Could not list available ranking weeks")?;
        ctx.status(format!("Found {} ranking weeks", weeks.len()));

        let total = weeks.len();
        for (i, remote) in weeks.iter().enumerate() {
            let redownload = force || remote.is_current;
            let needed = redownload
                || !ctx.client.is_downloaded(remote.week)
                || !ctx.db.has_week(remote.week)?;
            if !needed {
                debug!(week = %remote.week, "already indexed");
                summary.skipped += 1;
                continue;
            }

            ctx.status(format!("Downloading {} ({}/{})", remote.week.label(), i + 1, total));
            match fetch_and_index(&mut ctx.db, &ctx.client, remote, redownload).await {
                Ok(count) => summary.indexed.push(IndexedWeek {
                    label: remote.week.label(),
                    entries: count,
                }),
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    let what = if e.is_transient() { "download" } else { "read" };
                    ctx.warn(format!("Failed to {what} {}: {e}", remote.week.label()));
                    summary.failed.push(remote.week.label());
                }
            }
        }

        ctx.status(format!(
            "✓ Update complete: {} indexed, {} unchanged, {} failed",
            summary.indexed.len(),
            summary.skipped,
            summary.failed.len()
        ));
    }

    if ctx.json {
        print_json(&summary)?;
    }
    Ok(summary)
}
