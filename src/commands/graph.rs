//! `graph`: rank, age rank or points history of one or more players.

use super::common::CommandContext;
use crate::cli::types::{Discipline, PlayerId, WeekSpan};
use crate::output::{json, print_json, render_chart, Series, YAxis};
use crate::storage::history_since;

const CHART_HEIGHT: usize = 15;

/// Options of the `graph` command
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    pub discipline: Option<Discipline>,
    pub points: bool,
    pub age_rank: bool,
    pub since: Option<WeekSpan>,
}

impl GraphOptions {
    fn y_axis(&self) -> YAxis {
        if self.points {
            YAxis::Points
        } else if self.age_rank {
            YAxis::AgeRank
        } else {
            YAxis::Rank
        }
    }
}

/// Build one series per player that has history. Players without entries or
/// history are reported and skipped.
///
/// Also returns the discipline used for labelling: the requested one, otherwise the
/// discipline of the first player's earliest week.
pub fn collect_series(
    ctx: &CommandContext,
    player_ids: &[PlayerId],
    opts: &GraphOptions,
) -> anyhow::Result<(Vec<Series>, Option<Discipline>)> {
    let weeks = ctx.db.get_weeks()?;
    let cutoff = match (opts.since, weeks.first()) {
        (Some(span), Some(&latest)) => Some(span.cutoff_from(latest)),
        _ => None,
    };

    let mut series = Vec::new();
    let mut label = opts.discipline;

    for player_id in player_ids {
        let entries = ctx.db.get_player_by_id(player_id, None, false)?;
        let Some(current) = entries.first() else {
            ctx.warn(format!("Player '{player_id}' not found, skipping."));
            continue;
        };

        let discipline = match opts.discipline {
            Some(discipline) => Some(discipline),
            None => ctx.db.best_discipline(player_id)?,
        };
        let Some(discipline) = discipline else {
            ctx.warn(format!("No history for '{player_id}', skipping."));
            continue;
        };

        let mut history = ctx.db.get_player_history(player_id, Some(discipline))?;
        if let Some(cutoff) = cutoff {
            history = history_since(&history, cutoff);
        }
        if history.is_empty() {
            ctx.warn(format!("No history for '{player_id}', skipping."));
            continue;
        }

        if label.is_none() {
            label = ctx.db.first_week_discipline(player_id, &history)?;
        }

        if opts.age_rank {
            let age_class = entries
                .iter()
                .find(|e| e.discipline == discipline)
                .unwrap_or(current)
                .age_class_2
                .clone();
            let show_progress = !ctx.json;
            history = ctx.db.age_rank_history(
                player_id,
                discipline,
                &age_class,
                &history,
                |done, total| {
                    if show_progress {
                        eprint!("\rComputing age ranks... {done}/{total}");
                    }
                },
            )?;
            if show_progress {
                eprintln!();
            }
        }

        series.push(Series {
            name: current.full_name(),
            points: history,
        });
    }

    Ok((series, label))
}

pub async fn handle_graph(
    ctx: &mut CommandContext,
    player_ids: Vec<PlayerId>,
    opts: GraphOptions,
) -> anyhow::Result<()> {
    let player_ids = if player_ids.is_empty() {
        vec![ctx.resolve_player_id(None)?]
    } else {
        player_ids
    };

    if !ctx.ensure_data().await? {
        return Ok(());
    }

    if ctx.db.get_weeks()?.len() < 2 {
        ctx.warn("Need at least 2 ranking weeks for history graph.");
        ctx.warn("Run 'update --all' to download historical data.");
        return Ok(());
    }

    let (series, label) = collect_series(ctx, &player_ids, &opts)?;
    if series.is_empty() {
        ctx.warn("No valid player histories found.");
        return Ok(());
    }

    let discipline = label.unwrap_or(Discipline::HE);
    let y_axis = opts.y_axis();

    if ctx.json {
        print_json(&json::graph_history(&series, discipline, y_axis))?;
    } else {
        let title = match series.as_slice() {
            [single] => format!("{} - {}", single.name, discipline.full_name()),
            _ => format!("Rank Comparison - {}", discipline.full_name()),
        };
        println!("{}", render_chart(&title, &series, y_axis, CHART_HEIGHT));
    }
    Ok(())
}
